// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration key definitions.
//!
//! A [`ConfigKey`] names one configuration slot and carries everything the
//! resolver and validator need to know about it: its default, whether it is
//! required, the rule its value must satisfy and the hints shown when it does not.

use crate::domain::rule::Rule;
use std::fmt;

/// How a key's raw string value is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Free-form (or rule-constrained) text.
    Text,
    /// A boolean switch, coerced from `true|yes|1|on` / `false|no|0|off`.
    Flag,
}

/// A recognized configuration key.
///
/// Keys are built once, at startup, and are never modified afterwards.
///
/// # Examples
///
/// ```
/// use holmscan::domain::{ConfigKey, Rule};
///
/// let key = ConfigKey::text("HOLMSCAN_FORMAT")
///     .with_default("table")
///     .required()
///     .with_rule(Rule::choices(["table", "yaml"]));
///
/// assert_eq!(key.name(), "HOLMSCAN_FORMAT");
/// assert_eq!(key.default_value(), Some("table"));
/// assert!(key.is_required());
/// ```
#[derive(Clone, Debug)]
pub struct ConfigKey {
    name: String,
    kind: ValueKind,
    default: Option<String>,
    required: bool,
    secret: bool,
    rule: Option<Rule>,
    missing_hint: Option<String>,
    invalid_hint: Option<String>,
}

impl ConfigKey {
    fn new(name: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            required: false,
            secret: false,
            rule: None,
            missing_hint: None,
            invalid_hint: None,
        }
    }

    /// Creates a text key with no default, rule or hints.
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Text)
    }

    /// Creates a boolean flag key.
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ValueKind::Flag)
    }

    /// Sets the built-in default value.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Marks the key as required; an empty resolved value is an error.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the key as secret; its value is masked when displayed.
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Attaches a validation rule.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Sets the hint shown when the key is required but not configured.
    pub fn with_missing_hint(mut self, hint: impl Into<String>) -> Self {
        self.missing_hint = Some(hint.into());
        self
    }

    /// Sets the hint shown when the value breaks the key's rule.
    pub fn with_invalid_hint(mut self, hint: impl Into<String>) -> Self {
        self.invalid_hint = Some(hint.into());
        self
    }

    /// Returns the key name, spelled exactly as in files and the environment.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how the raw value is interpreted.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns the built-in default, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Returns true if the key must resolve to a non-empty value.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if the value must not be displayed.
    pub fn is_secret(&self) -> bool {
        self.secret
    }

    /// Returns the validation rule, if any.
    pub fn rule(&self) -> Option<&Rule> {
        self.rule.as_ref()
    }

    /// Returns the remediation hint for a missing value.
    pub fn missing_hint(&self) -> Option<&str> {
        self.missing_hint.as_deref()
    }

    /// Returns the remediation hint for an invalid value.
    pub fn invalid_hint(&self) -> Option<&str> {
        self.invalid_hint.as_deref()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
