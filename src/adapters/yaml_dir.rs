// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drop-in directory configuration source adapter.
//!
//! Reads every `*.yaml` file in a directory such as `/etc/holmscan.d` and merges
//! them into one map.

use crate::adapters::yaml_file::{read_optional_file, YamlParser};
use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, ConfigSource};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source adapter for a directory of YAML files.
///
/// Files are read in ascending byte order of their file names and merged
/// shallowly, so `20-site.yaml` overrides `10-site.yaml` on a shared key. Files
/// without a `.yaml` extension and subdirectories are ignored. A missing
/// directory contributes nothing.
///
/// # Examples
///
/// ```rust
/// use holmscan::adapters::YamlDirAdapter;
/// use holmscan::ports::{layer, ConfigSource};
///
/// let adapter = YamlDirAdapter::new("/nonexistent/holmscan.d", layer::SITE_DIR);
/// assert!(adapter.read().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct YamlDirAdapter {
    dir_path: PathBuf,
    priority: u8,
    parser: YamlParser,
}

impl YamlDirAdapter {
    /// Creates an adapter for the directory `path` at the given layer priority.
    pub fn new<P: AsRef<Path>>(path: P, priority: u8) -> Self {
        Self {
            dir_path: path.as_ref().to_path_buf(),
            priority,
            parser: YamlParser::new(),
        }
    }

    /// Returns the directory this adapter reads.
    pub fn dir_path(&self) -> &Path {
        &self.dir_path
    }

    /// Lists the files that will be read, in merge order.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir_path.is_dir() {
            tracing::debug!(
                "Configuration directory not found, skipping: {}",
                self.dir_path.display()
            );
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir_path).map_err(|e| ConfigError::SourceError {
            source_name: self.name().to_string(),
            message: format!("Failed to list directory: {}", self.dir_path.display()),
            source: Some(Box::new(e)),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::SourceError {
                source_name: self.name().to_string(),
                message: format!("Failed to list directory: {}", self.dir_path.display()),
                source: Some(Box::new(e)),
            })?;
            let path = entry.path();
            if path.is_file() && self.parser.accepts(&path) {
                files.push(path);
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

impl ConfigSource for YamlDirAdapter {
    fn name(&self) -> &str {
        "yaml-dir"
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn read(&self) -> Result<HashMap<String, String>> {
        let mut merged = HashMap::new();
        for file in self.files()? {
            tracing::debug!("Loading configuration file: {}", file.display());
            if let Some(values) = read_optional_file(&file, &self.parser, self.name())? {
                merged.extend(values);
            }
        }
        Ok(merged)
    }

    fn describe(&self) -> String {
        self.dir_path.join("*.yaml").display().to_string()
    }
}
