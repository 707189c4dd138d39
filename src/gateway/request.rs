// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request options and responses of the gateway.

use crate::domain::DataError;
use serde_json::Value;
use std::time::Duration;

/// Optional parts of an outbound call: query pairs and a JSON or form body.
///
/// # Examples
///
/// ```rust
/// use holmscan::gateway::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .query("limit", "10000")
///     .json(json!({"name": "Scan via API"}));
/// assert_eq!(options.query_pairs(), &[("limit".to_string(), "10000".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    query: Vec<(String, String)>,
    json: Option<Value>,
    form: Vec<(String, String)>,
}

impl RequestOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Sets a JSON request body.
    pub fn json(mut self, body: Value) -> Self {
        self.json = Some(body);
        self
    }

    /// Appends a form field; any form field makes the body url-encoded.
    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }

    /// Returns the query parameters in insertion order.
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns the JSON body, if any.
    pub fn json_body(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    /// Returns the form fields in insertion order.
    pub fn form_fields(&self) -> &[(String, String)] {
        &self.form
    }
}

/// A successful response.
///
/// Only 2xx answers become a `Response`; everything else is a
/// [`RemoteError`](crate::domain::RemoteError).
#[derive(Debug, Clone)]
pub struct Response {
    pub(crate) status: u16,
    pub(crate) url: String,
    pub(crate) text: String,
    pub(crate) elapsed: Duration,
}

impl Response {
    /// Returns the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the final URL after redirects.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the raw body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the wall-clock duration of the call.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> Result<Value, DataError> {
        serde_json::from_str(&self.text).map_err(|e| DataError::MalformedPayload {
            message: format!("{} did not return JSON: {}", self.url, e),
        })
    }
}
