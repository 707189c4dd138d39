// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the content of one
//! configuration file into a flat key/value map.

use crate::domain::Result;
use std::collections::HashMap;
use std::path::Path;

/// A trait for parsing configuration files.
///
/// # Key Format
///
/// Parsers flatten nested structures using dot notation, so
///
/// ```yaml
/// proxy:
///   host: localhost
/// ```
///
/// becomes `proxy.host -> "localhost"`. Only top-level names can be on a
/// schema's allowlist, so nested content never reaches the effective
/// configuration.
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a flat key-value map.
    ///
    /// # Returns
    ///
    /// * `Ok(HashMap<String, String>)` - The parsed configuration; empty content
    ///   yields an empty map
    /// * `Err(ConfigError)` - The content is not valid for this format
    fn parse(&self, content: &str) -> Result<HashMap<String, String>>;

    /// Returns the file extensions (without the leading dot) this parser reads
    /// when scanning a directory.
    fn supported_extensions(&self) -> &[&str];

    /// Returns true if `path` has one of the supported extensions.
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.supported_extensions().contains(&ext))
            .unwrap_or(false)
    }
}
