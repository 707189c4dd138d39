// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML file configuration source adapter.
//!
//! This module provides the YAML parser and an adapter that reads a single YAML
//! file. A file that does not exist contributes nothing.

use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, ConfigSource};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for YAML configuration files (10MB)
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// YAML parser implementation.
///
/// The document must be a mapping (or empty). Nested mappings are flattened with
/// dot notation and sequences with numeric indices; scalars become strings and
/// `null` becomes the empty string.
///
/// A top-level key whose value is a mapping or a sequence is also emitted under
/// its own name, so it replaces that key from lower layers as a whole. Empty
/// collections give the empty string; others give their YAML text.
///
/// # Examples
///
/// ```rust
/// use holmscan::adapters::YamlParser;
/// use holmscan::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let values = parser.parse("HOLMSCAN_DEBUG: true\nHOLMSCAN_FORMAT: yaml").unwrap();
/// assert_eq!(values.get("HOLMSCAN_DEBUG"), Some(&"true".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    /// Flattens a YAML value into a flat map with dot notation keys.
    fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, result: &mut HashMap<String, String>) {
        let join = |segment: &str| {
            if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{}.{}", prefix, segment)
            }
        };

        match value {
            serde_yaml::Value::Mapping(map) => {
                for (key, val) in map {
                    let segment = match key {
                        serde_yaml::Value::String(s) => s.clone(),
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        _ => continue,
                    };
                    Self::flatten_yaml(val, &join(&segment), result);
                }
            }
            serde_yaml::Value::Sequence(seq) => {
                for (i, val) in seq.iter().enumerate() {
                    Self::flatten_yaml(val, &join(&i.to_string()), result);
                }
            }
            serde_yaml::Value::String(s) => {
                result.insert(prefix.to_string(), s.clone());
            }
            serde_yaml::Value::Number(n) => {
                result.insert(prefix.to_string(), n.to_string());
            }
            serde_yaml::Value::Bool(b) => {
                result.insert(prefix.to_string(), b.to_string());
            }
            serde_yaml::Value::Null => {
                result.insert(prefix.to_string(), String::new());
            }
            serde_yaml::Value::Tagged(tagged) => {
                Self::flatten_yaml(&tagged.value, prefix, result);
            }
        }
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<HashMap<String, String>> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        let mut result = HashMap::new();
        match value {
            serde_yaml::Value::Null => {}
            serde_yaml::Value::Mapping(ref map) => {
                for (key, val) in map {
                    if let Some(name) = key.as_str() {
                        if let Some(text) = collection_text(val)? {
                            result.insert(name.to_string(), text);
                        }
                    }
                }
                Self::flatten_yaml(&value, "", &mut result);
            }
            _ => {
                return Err(ConfigError::ParseError {
                    message: "Expected a mapping of configuration keys at the top level"
                        .to_string(),
                    source: None,
                })
            }
        }
        Ok(result)
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml"]
    }
}

/// Text of a mapping or sequence value, or `None` for anything else.
fn collection_text(value: &serde_yaml::Value) -> Result<Option<String>> {
    let is_empty = match value {
        serde_yaml::Value::Mapping(map) => map.is_empty(),
        serde_yaml::Value::Sequence(seq) => seq.is_empty(),
        serde_yaml::Value::Tagged(tagged) => return collection_text(&tagged.value),
        _ => return Ok(None),
    };
    if is_empty {
        return Ok(Some(String::new()));
    }

    let text = serde_yaml::to_string(value).map_err(|e| ConfigError::ParseError {
        message: format!("Failed to render YAML value: {}", e),
        source: Some(Box::new(e)),
    })?;
    Ok(Some(text.trim_end().to_string()))
}

/// Reads and parses one file, returning `None` if it does not exist.
pub(crate) fn read_optional_file(
    path: &Path,
    parser: &dyn ConfigParser,
    source_name: &str,
) -> Result<Option<HashMap<String, String>>> {
    let path_text = path.display().to_string();

    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("Configuration file not found, skipping: {}", path_text);
            return Ok(None);
        }
        Err(e) => {
            return Err(ConfigError::SourceError {
                source_name: source_name.to_string(),
                message: format!("Failed to read file metadata: {}", path_text),
                source: Some(Box::new(e)),
            })
        }
    };

    if !metadata.is_file() {
        tracing::debug!("Not a regular file, skipping: {}", path_text);
        return Ok(None);
    }

    if metadata.len() > MAX_YAML_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: source_name.to_string(),
            message: format!(
                "Configuration file too large: {} ({} bytes, max {} bytes)",
                path_text,
                metadata.len(),
                MAX_YAML_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: source_name.to_string(),
        message: format!("Failed to read configuration file: {}", path_text),
        source: Some(Box::new(e)),
    })?;

    parser
        .parse(&content)
        .map(Some)
        .map_err(|e| match e {
            ConfigError::ParseError { message, source } => ConfigError::ParseError {
                message: format!("{}: {}", path_text, message),
                source,
            },
            other => other,
        })
}

/// Configuration source adapter for a single YAML file.
///
/// # Examples
///
/// ```rust
/// use holmscan::adapters::YamlFileAdapter;
/// use holmscan::ports::{layer, ConfigSource};
///
/// let adapter = YamlFileAdapter::new("/nonexistent/holmscan.yaml", layer::SITE_FILE);
/// assert!(adapter.read().unwrap().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct YamlFileAdapter {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Layer priority
    priority: u8,
    /// YAML parser
    parser: YamlParser,
}

impl YamlFileAdapter {
    /// Creates an adapter for `path` at the given layer priority.
    ///
    /// The file is not touched until [`ConfigSource::read`] is called.
    pub fn new<P: AsRef<Path>>(path: P, priority: u8) -> Self {
        Self {
            file_path: path.as_ref().to_path_buf(),
            priority,
            parser: YamlParser::new(),
        }
    }

    /// Returns the path to the configuration file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

impl ConfigSource for YamlFileAdapter {
    fn name(&self) -> &str {
        "yaml-file"
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn read(&self) -> Result<HashMap<String, String>> {
        Ok(read_optional_file(&self.file_path, &self.parser, self.name())?.unwrap_or_default())
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}
