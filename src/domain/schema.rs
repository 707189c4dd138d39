// SPDX-License-Identifier: MIT OR Apache-2.0

//! The allowlist of recognized configuration keys.
//!
//! A [`Schema`] is fixed at build time. Each client generation has its own:
//! [`Schema::session`] for the username/password Security Center login and
//! [`Schema::token`] for the token-authenticated REST API. Keys not listed in the
//! active schema are dropped by the resolver no matter which source provides them.

use crate::domain::config_key::ConfigKey;
use crate::domain::credential::AuthScheme;
use crate::domain::rule::Rule;
use once_cell::sync::Lazy;

/// Raises log verbosity to debug.
pub const HOLMSCAN_DEBUG: &str = "HOLMSCAN_DEBUG";
/// Output format of the command line (`table` or `yaml`).
pub const HOLMSCAN_FORMAT: &str = "HOLMSCAN_FORMAT";
/// Base URL of the token-authenticated REST API, including the version segment.
pub const HOLMSEC_ENDPOINT: &str = "HOLMSEC_ENDPOINT";
/// API token for the REST API.
pub const HOLMSEC_TOKEN: &str = "HOLMSEC_TOKEN";
/// Base URL of the Security Center web application, with trailing slash.
pub const HOLMSEC_URL: &str = "HOLMSEC_URL";
/// Security Center login name.
pub const HOLMSEC_USERNAME: &str = "HOLMSEC_USERNAME";
/// Security Center password.
pub const HOLMSEC_PASSWORD: &str = "HOLMSEC_PASSWORD";

/// Default REST API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://se-api.holmsecurity.com/v1";
/// Default Security Center URL.
pub const DEFAULT_URL: &str = "https://sc.holmsecurity.com/";

const ENDPOINT_PATTERN: &str = "^http(s)?://[a-zA-Z0-9._-]+/v[0-9]$";
const URL_PATTERN: &str = "^http(s)?://[a-zA-Z0-9._-]+/$";

static TOKEN_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(AuthScheme::Token)
        .with_key(ConfigKey::flag(HOLMSCAN_DEBUG).with_default("false"))
        .with_key(
            ConfigKey::text(HOLMSCAN_FORMAT)
                .with_default("table")
                .required()
                .with_rule(Rule::choices(["table", "yaml"]))
                .with_invalid_hint("valid choices: table, yaml"),
        )
        .with_key(
            ConfigKey::text(HOLMSEC_ENDPOINT)
                .with_default(DEFAULT_ENDPOINT)
                .required()
                .with_rule(Rule::pattern(ENDPOINT_PATTERN).expect("endpoint pattern compiles"))
                .with_missing_hint(
                    "example: echo HOLMSEC_ENDPOINT: https://se-api.holmsecurity.com/v1 >> ~/.config/holmscan.yaml",
                )
                .with_invalid_hint("example: https://se-api.holmsecurity.com/v1"),
        )
        .with_key(
            ConfigKey::text(HOLMSEC_TOKEN)
                .with_default("")
                .required()
                .secret()
                .with_missing_hint("example: export HOLMSEC_TOKEN=<api token>"),
        )
});

static SESSION_SCHEMA: Lazy<Schema> = Lazy::new(|| {
    Schema::new(AuthScheme::Session)
        .with_key(ConfigKey::flag(HOLMSCAN_DEBUG).with_default("false"))
        .with_key(
            ConfigKey::text(HOLMSEC_PASSWORD)
                .with_default("")
                .required()
                .secret(),
        )
        .with_key(
            ConfigKey::text(HOLMSEC_URL)
                .with_default(DEFAULT_URL)
                .required()
                .with_rule(Rule::pattern(URL_PATTERN).expect("url pattern compiles"))
                .with_missing_hint(
                    "example: echo HOLMSEC_URL: https://sc.holmsecurity.com/ >> ~/.config/holmscan.yaml",
                )
                .with_invalid_hint("example: https://sc.holmsecurity.com/"),
        )
        .with_key(
            ConfigKey::text(HOLMSEC_USERNAME)
                .with_default("")
                .required()
                .with_missing_hint("example: export HOLMSEC_USERNAME=username@example.com"),
        )
});

/// An ordered set of recognized configuration keys for one client generation.
///
/// Key order is the order in which the validator checks them.
///
/// # Examples
///
/// ```
/// use holmscan::domain::{AuthScheme, Schema};
///
/// let schema = Schema::token();
/// assert_eq!(schema.scheme(), AuthScheme::Token);
/// assert!(schema.contains("HOLMSEC_TOKEN"));
/// assert!(!schema.contains("HOLMSEC_PASSWORD"));
/// ```
#[derive(Clone, Debug)]
pub struct Schema {
    scheme: AuthScheme,
    keys: Vec<ConfigKey>,
}

impl Schema {
    /// Creates an empty schema for the given authentication scheme.
    pub fn new(scheme: AuthScheme) -> Self {
        Self {
            scheme,
            keys: Vec::new(),
        }
    }

    /// The token-authenticated REST API generation.
    pub fn token() -> Self {
        TOKEN_SCHEMA.clone()
    }

    /// The username/password Security Center generation.
    pub fn session() -> Self {
        SESSION_SCHEMA.clone()
    }

    /// Returns the built-in schema for a scheme.
    pub fn for_scheme(scheme: AuthScheme) -> Self {
        match scheme {
            AuthScheme::Token => Self::token(),
            AuthScheme::Session => Self::session(),
        }
    }

    /// Adds a key, replacing any earlier key of the same name in place.
    pub fn with_key(mut self, key: ConfigKey) -> Self {
        match self.keys.iter_mut().find(|k| k.name() == key.name()) {
            Some(existing) => *existing = key,
            None => self.keys.push(key),
        }
        self
    }

    /// Returns the authentication scheme this generation uses.
    pub fn scheme(&self) -> AuthScheme {
        self.scheme
    }

    /// Looks up a key by name.
    pub fn key(&self, name: &str) -> Option<&ConfigKey> {
        self.keys.iter().find(|k| k.name() == name)
    }

    /// Returns true if `name` is on the allowlist.
    pub fn contains(&self, name: &str) -> bool {
        self.key(name).is_some()
    }

    /// Iterates over the keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.keys.iter()
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the schema has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
