// SPDX-License-Identifier: MIT OR Apache-2.0

//! The validated, read-only configuration of one process run.

use crate::domain::config_value::ConfigValue;
use crate::domain::credential::{AuthScheme, Credential};
use crate::domain::errors::{ConfigError, Result};
use crate::domain::schema::{
    HOLMSCAN_DEBUG, HOLMSCAN_FORMAT, HOLMSEC_ENDPOINT, HOLMSEC_PASSWORD, HOLMSEC_TOKEN,
    HOLMSEC_URL, HOLMSEC_USERNAME,
};
use std::fmt;

/// Placeholder shown instead of secret values.
pub const MASK: &str = "********";

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry {
    name: String,
    value: ConfigValue,
    secret: bool,
}

/// Effective configuration produced by the validator.
///
/// There is no public constructor: holding one means every required key had a
/// value and every value satisfied its rule. Entries keep schema order.
#[derive(Clone, PartialEq, Eq)]
pub struct EffectiveConfiguration {
    scheme: AuthScheme,
    entries: Vec<Entry>,
}

impl EffectiveConfiguration {
    pub(crate) fn new(scheme: AuthScheme) -> Self {
        Self {
            scheme,
            entries: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, name: &str, value: ConfigValue, secret: bool) {
        self.entries.push(Entry {
            name: name.to_string(),
            value,
            secret,
        });
    }

    /// Returns the authentication scheme of the schema this was validated against.
    pub fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    /// Returns the resolved value for `name`.
    pub fn get(&self, name: &str) -> Option<&ConfigValue> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
    }

    /// Returns the resolved value for `name` as a string slice.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).map(ConfigValue::as_str)
    }

    /// Returns true if debug output was requested.
    pub fn debug(&self) -> bool {
        self.get(HOLMSCAN_DEBUG)
            .map(ConfigValue::is_truthy)
            .unwrap_or(false)
    }

    /// Returns the configured output format name, if the schema has one.
    pub fn format(&self) -> Option<&str> {
        self.get_str(HOLMSCAN_FORMAT)
    }

    /// Returns the base URL every gateway call is relative to.
    pub fn base_url(&self) -> Result<&str> {
        let key = match self.scheme {
            AuthScheme::Token => HOLMSEC_ENDPOINT,
            AuthScheme::Session => HOLMSEC_URL,
        };
        self.require(key)
    }

    /// Returns the credential for the active scheme.
    pub fn credential(&self) -> Result<Credential> {
        match self.scheme {
            AuthScheme::Token => Ok(Credential::Token(self.require(HOLMSEC_TOKEN)?.to_string())),
            AuthScheme::Session => Ok(Credential::Session {
                username: self.require(HOLMSEC_USERNAME)?.to_string(),
                password: self.require(HOLMSEC_PASSWORD)?.to_string(),
            }),
        }
    }

    /// Iterates over `(name, value)` pairs with secret values replaced by [`MASK`].
    pub fn masked(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|entry| {
            let value = if entry.secret && !entry.value.is_blank() {
                MASK
            } else {
                entry.value.as_str()
            };
            (entry.name.as_str(), value)
        })
    }

    fn require(&self, name: &str) -> Result<&str> {
        match self.get(name) {
            Some(value) if !value.is_blank() => Ok(value.as_str()),
            _ => Err(ConfigError::MissingRequired {
                key: name.to_string(),
                hint: None,
            }),
        }
    }
}

impl fmt::Debug for EffectiveConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveConfiguration")
            .field("scheme", &self.scheme)
            .field("entries", &self.masked().collect::<Vec<_>>())
            .finish()
    }
}

/// One `NAME ....... value` line per entry, secrets masked.
impl fmt::Display for EffectiveConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.entries.iter().map(|e| e.name.len()).max().unwrap_or(0) + 8;
        for (name, value) in self.masked() {
            writeln!(f, "{} {} {}", name, ".".repeat(width - name.len()), value)?;
        }
        Ok(())
    }
}
