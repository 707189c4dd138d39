// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in defaults as a configuration source.

use crate::domain::{Result, Schema};
use crate::ports::{layer, ConfigSource};
use std::collections::HashMap;

/// Configuration source holding the hard-coded defaults of a schema.
///
/// This is the lowest layer of the standard chain; every other source
/// overrides it.
///
/// # Examples
///
/// ```rust
/// use holmscan::adapters::DefaultsAdapter;
/// use holmscan::domain::Schema;
/// use holmscan::ports::ConfigSource;
///
/// let defaults = DefaultsAdapter::from_schema(&Schema::token()).read().unwrap();
/// assert_eq!(defaults.get("HOLMSCAN_FORMAT").map(String::as_str), Some("table"));
/// ```
#[derive(Debug, Clone)]
pub struct DefaultsAdapter {
    values: HashMap<String, String>,
}

impl DefaultsAdapter {
    /// Collects the defaults of every key in `schema` that has one.
    pub fn from_schema(schema: &Schema) -> Self {
        let values = schema
            .keys()
            .filter_map(|key| {
                key.default_value()
                    .map(|default| (key.name().to_string(), default.to_string()))
            })
            .collect();
        Self { values }
    }
}

impl ConfigSource for DefaultsAdapter {
    fn name(&self) -> &str {
        "defaults"
    }

    fn priority(&self) -> u8 {
        layer::DEFAULTS
    }

    fn read(&self) -> Result<HashMap<String, String>> {
        Ok(self.values.clone())
    }

    fn describe(&self) -> String {
        "configuration defaults".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuthScheme, ConfigKey};

    #[test]
    fn test_session_defaults() {
        let values = DefaultsAdapter::from_schema(&Schema::session()).read().unwrap();
        assert_eq!(values.get("HOLMSCAN_DEBUG"), Some(&"false".to_string()));
        assert_eq!(
            values.get("HOLMSEC_URL"),
            Some(&"https://sc.holmsecurity.com/".to_string())
        );
        assert_eq!(values.get("HOLMSEC_USERNAME"), Some(&"".to_string()));
        assert_eq!(values.len(), 4);
    }

    #[test]
    fn test_keys_without_default_are_absent() {
        let schema = Schema::new(AuthScheme::Token)
            .with_key(ConfigKey::text("WITH").with_default("x"))
            .with_key(ConfigKey::text("WITHOUT"));
        let values = DefaultsAdapter::from_schema(&schema).read().unwrap();
        assert_eq!(values.len(), 1);
        assert!(!values.contains_key("WITHOUT"));
    }

    #[test]
    fn test_priority_is_lowest() {
        let adapter = DefaultsAdapter::from_schema(&Schema::token());
        assert_eq!(adapter.priority(), layer::DEFAULTS);
        assert_eq!(adapter.name(), "defaults");
    }
}
