// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup validation of a resolved configuration mapping.

use crate::domain::{
    ConfigError, ConfigValue, EffectiveConfiguration, Result, Schema, ValueKind,
};
use std::collections::HashMap;

/// Checks a resolved mapping against a [`Schema`].
///
/// Validation runs in two passes over the schema's keys, in declaration
/// order, and stops at the first failure:
///
/// 1. presence: every required key must have a non-blank value,
/// 2. rules: flag keys must read as booleans and every key with a [`Rule`]
///    must satisfy it.
///
/// Flag values are normalized to `"true"` or `"false"`. Blank values of
/// optional keys are not checked against rules.
///
/// [`Rule`]: crate::domain::Rule
///
/// # Examples
///
/// ```rust
/// use holmscan::domain::{ConfigError, Schema};
/// use holmscan::service::ConfigValidator;
/// use std::collections::HashMap;
///
/// let mut mapping = HashMap::new();
/// mapping.insert("HOLMSCAN_FORMAT".to_string(), "table".to_string());
/// mapping.insert("HOLMSEC_ENDPOINT".to_string(), "https://example.com/v2x".to_string());
/// mapping.insert("HOLMSEC_TOKEN".to_string(), "abc123".to_string());
///
/// let result = ConfigValidator::new(Schema::token()).validate(&mapping);
/// assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigValidator {
    schema: Schema,
}

impl ConfigValidator {
    /// Creates a validator for `schema`.
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Validates `mapping` and builds the effective configuration.
    pub fn validate(&self, mapping: &HashMap<String, String>) -> Result<EffectiveConfiguration> {
        self.check_presence(mapping)?;

        let mut config = EffectiveConfiguration::new(self.schema.scheme());
        for key in self.schema.keys() {
            let Some(raw) = mapping.get(key.name()) else {
                continue;
            };
            let value = ConfigValue::from(raw.as_str());

            let value = match key.kind() {
                ValueKind::Flag => ConfigValue::from(value.as_bool(key.name())?.to_string()),
                ValueKind::Text => value,
            };

            if let Some(rule) = key.rule() {
                if !(value.is_blank() && !key.is_required()) && !rule.accepts(value.as_str()) {
                    tracing::debug!("{} does not satisfy {}", key.name(), rule);
                    return Err(ConfigError::InvalidValue {
                        key: key.name().to_string(),
                        value: value.as_string(),
                        hint: key.invalid_hint().map(str::to_string),
                    });
                }
            }

            config.insert(key.name(), value, key.is_secret());
        }

        Ok(config)
    }

    fn check_presence(&self, mapping: &HashMap<String, String>) -> Result<()> {
        for key in self.schema.keys().filter(|key| key.is_required()) {
            let present = mapping
                .get(key.name())
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false);

            if !present {
                return Err(ConfigError::MissingRequired {
                    key: key.name().to_string(),
                    hint: key.missing_hint().map(str::to_string),
                });
            }
        }
        Ok(())
    }
}
