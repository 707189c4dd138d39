// SPDX-License-Identifier: MIT OR Apache-2.0

//! Validation rules attached to configuration keys.

use crate::domain::errors::{ConfigError, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;

/// A rule a resolved value must satisfy.
///
/// Patterns are always matched against the whole value; choice sets are an
/// exact, case-sensitive membership test.
///
/// # Examples
///
/// ```
/// use holmscan::domain::Rule;
///
/// let rule = Rule::pattern(r"v[0-9]").unwrap();
/// assert!(rule.accepts("v1"));
/// assert!(!rule.accepts("v1x"));
///
/// let rule = Rule::choices(["table", "yaml"]);
/// assert!(rule.accepts("yaml"));
/// assert!(!rule.accepts("json"));
/// ```
#[derive(Clone)]
pub enum Rule {
    /// The value must fully match the regular expression.
    Pattern(Regex),
    /// The value must be one of a finite set of strings.
    Choices(BTreeSet<String>),
}

impl Rule {
    /// Compiles a pattern rule.
    ///
    /// The expression is anchored on both ends, so `a+` accepts `"aaa"` but not
    /// `"aaab"`.
    pub fn pattern(expression: &str) -> Result<Self> {
        Regex::new(&format!("^(?:{})$", expression))
            .map(Rule::Pattern)
            .map_err(|e| ConfigError::ParseError {
                message: format!("Invalid validation pattern '{}': {}", expression, e),
                source: Some(Box::new(e)),
            })
    }

    /// Builds a choice-set rule.
    pub fn choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule::Choices(choices.into_iter().map(Into::into).collect())
    }

    /// Returns true if `value` satisfies this rule.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Rule::Pattern(regex) => regex.is_match(value),
            Rule::Choices(choices) => choices.contains(value),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Rule::Choices(choices) => f.debug_tuple("Choices").field(choices).finish(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Pattern(regex) => write!(f, "pattern {}", regex.as_str()),
            Rule::Choices(choices) => {
                let choices: Vec<&str> = choices.iter().map(String::as_str).collect();
                write!(f, "one of {}", choices.join(", "))
            }
        }
    }
}
