// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration value type.
//!
//! Sources hand values through untouched as strings; [`ConfigValue`] wraps them
//! and provides the conversions the validator and consumers need.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw configuration value.
///
/// # Examples
///
/// ```
/// use holmscan::domain::ConfigValue;
///
/// let value = ConfigValue::from("yes");
/// assert_eq!(value.as_str(), "yes");
/// assert!(value.as_bool("HOLMSCAN_DEBUG").unwrap());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigValue(String);

impl ConfigValue {
    /// Creates a new `ConfigValue` from a `String`.
    pub fn new(value: String) -> Self {
        ConfigValue(value)
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns an owned copy of the value.
    pub fn as_string(&self) -> String {
        self.0.clone()
    }

    /// Returns true if the value is empty or only whitespace.
    ///
    /// A blank value counts as "not configured" for required keys.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Converts the value to a boolean.
    ///
    /// Recognizes the following values (case-insensitive, surrounding whitespace
    /// ignored):
    /// - `true`: "true", "t", "yes", "y", "1", "on"
    /// - `false`: "false", "f", "no", "n", "0", "off", ""
    ///
    /// Anything else is an [`ConfigError::InvalidValue`] for `key`.
    pub fn as_bool(&self, key: &str) -> Result<bool> {
        match self.0.trim().to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "1" | "on" => Ok(true),
            "false" | "f" | "no" | "n" | "0" | "off" | "" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: self.0.clone(),
                hint: Some("expected a boolean such as true, false, 1 or 0".to_string()),
            }),
        }
    }

    /// Returns true only if the value is a recognized truthy string.
    ///
    /// Used where an unparseable value must not abort, such as the early
    /// `HOLMSCAN_DEBUG` check made before configuration is loaded.
    pub fn is_truthy(&self) -> bool {
        self.as_bool("").unwrap_or(false)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue(s.to_string())
    }
}

impl From<ConfigValue> for String {
    fn from(value: ConfigValue) -> Self {
        value.0
    }
}

impl AsRef<str> for ConfigValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
