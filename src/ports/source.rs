// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration source trait definition.
//!
//! This module defines the `ConfigSource` trait, the port every configuration
//! origin (built-in defaults, YAML files, YAML directories, the environment)
//! implements so the resolver can layer them.

use crate::domain::Result;
use std::collections::HashMap;

/// Layer priorities of the standard source chain, lowest first.
///
/// Later layers override earlier ones key by key.
pub mod layer {
    /// Hard-coded defaults.
    pub const DEFAULTS: u8 = 0;
    /// The single site-wide file.
    pub const SITE_FILE: u8 = 1;
    /// The site-wide drop-in directory.
    pub const SITE_DIR: u8 = 2;
    /// The single user file.
    pub const USER_FILE: u8 = 3;
    /// The user drop-in directory.
    pub const USER_DIR: u8 = 4;
    /// Process environment variables.
    pub const ENVIRONMENT: u8 = 5;
}

/// A trait for configuration sources.
///
/// A source reads one origin into a flat map of raw string values. It performs
/// no type coercion and no allowlist filtering; both happen later. An origin
/// that does not exist is not an error: the source returns an empty map.
///
/// # Priority
///
/// Each source has a priority (see [`layer`]). The resolver applies sources in
/// ascending priority order, so a source with a higher priority wins on a key
/// both provide. Sources with equal priority keep the order they were added in.
///
/// # Examples
///
/// ```rust
/// use holmscan::ports::ConfigSource;
/// use holmscan::domain::Result;
/// use std::collections::HashMap;
///
/// struct Fixed;
///
/// impl ConfigSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn priority(&self) -> u8 {
///         1
///     }
///
///     fn read(&self) -> Result<HashMap<String, String>> {
///         let mut values = HashMap::new();
///         values.insert("HOLMSCAN_FORMAT".to_string(), "yaml".to_string());
///         Ok(values)
///     }
/// }
///
/// let values = Fixed.read().unwrap();
/// assert_eq!(values.get("HOLMSCAN_FORMAT").map(String::as_str), Some("yaml"));
/// ```
pub trait ConfigSource: Send + Sync {
    /// Returns a short identifier used in logs and error messages, such as
    /// `"env"` or `"yaml-file"`.
    fn name(&self) -> &str;

    /// Returns the layer priority of this source.
    fn priority(&self) -> u8;

    /// Reads the origin into a flat key/value map.
    ///
    /// # Returns
    ///
    /// * `Ok(map)` - The values found; empty if the origin is absent
    /// * `Err(ConfigError)` - The origin exists but could not be read or parsed
    fn read(&self) -> Result<HashMap<String, String>>;

    /// Returns a human-readable description of the origin, for logging.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}
