// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable configuration source adapter.
//!
//! This module provides an adapter that reads configuration values from
//! environment variables. Variable names are used as keys exactly as spelled,
//! so `HOLMSEC_TOKEN` in the environment is `HOLMSEC_TOKEN` in the configuration.

use crate::domain::Result;
use crate::ports::{layer, ConfigSource};
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Configuration source adapter for environment variables.
///
/// # Priority
///
/// The environment is the last layer of the standard chain
/// ([`layer::ENVIRONMENT`]) and overrides every file and default.
///
/// # Examples
///
/// ```rust
/// use holmscan::adapters::EnvVarAdapter;
/// use holmscan::ports::ConfigSource;
/// use std::collections::HashMap;
///
/// let mut values = HashMap::new();
/// values.insert("HOLMSEC_TOKEN".to_string(), "abc123".to_string());
///
/// let adapter = EnvVarAdapter::with_values(values);
/// assert_eq!(adapter.read().unwrap().get("HOLMSEC_TOKEN").unwrap(), "abc123");
/// ```
#[derive(Debug, Default)]
pub struct EnvVarAdapter {
    /// Fixed values standing in for the process environment
    values: Option<HashMap<String, String>>,
}

impl EnvVarAdapter {
    /// Creates an adapter over the process environment.
    ///
    /// The environment is read on every call to [`ConfigSource::read`].
    pub fn new() -> Self {
        Self { values: None }
    }

    /// Creates an adapter with pre-populated values instead of the process
    /// environment.
    ///
    /// **Note**: This is intended for tests and embedding; use `new()` for the
    /// real environment.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: Some(values),
        }
    }

    /// Loads environment variables into a new HashMap.
    fn load() -> HashMap<String, String> {
        let mut loaded = HashMap::new();

        // vars_os: a non-UTF-8 variable elsewhere in the environment must not panic
        for (key, value) in env::vars_os() {
            let (Some(key), Some(value)) = (key.to_str(), value.to_str()) else {
                continue;
            };

            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={} (max key={}, max value={})",
                    key.len(),
                    value.len(),
                    MAX_ENV_KEY_LEN,
                    MAX_ENV_VALUE_LEN
                );
                continue;
            }

            loaded.insert(key.to_string(), value.to_string());
        }

        tracing::debug!("Loaded {} environment variables", loaded.len());

        loaded
    }
}

impl ConfigSource for EnvVarAdapter {
    fn name(&self) -> &str {
        "env"
    }

    fn priority(&self) -> u8 {
        layer::ENVIRONMENT
    }

    fn read(&self) -> Result<HashMap<String, String>> {
        match &self.values {
            Some(values) => Ok(values.clone()),
            None => Ok(Self::load()),
        }
    }

    fn describe(&self) -> String {
        "environment".to_string()
    }
}
