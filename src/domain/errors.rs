// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for holmscan.
//!
//! Three kinds of failure reach the command line: configuration problems found at
//! startup ([`ConfigError`]), transport or status failures reported by the request
//! gateway ([`RemoteError`]), and payloads that do not look the way a resource
//! module expects ([`DataError`]). [`HolmscanError`] wraps all three so call sites
//! can use `?` across layers. All errors use `thiserror`.

use thiserror::Error;

/// Renders an optional remediation hint as a `", <hint>"` suffix.
fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(", {}", hint),
        None => String::new(),
    }
}

/// Errors raised while reading, resolving or validating configuration.
///
/// # Examples
///
/// ```
/// use holmscan::domain::ConfigError;
///
/// let error = ConfigError::MissingRequired {
///     key: "HOLMSEC_TOKEN".to_string(),
///     hint: Some("example: export HOLMSEC_TOKEN=<api token>".to_string()),
/// };
/// assert_eq!(
///     error.to_string(),
///     "HOLMSEC_TOKEN is not configured, example: export HOLMSEC_TOKEN=<api token>"
/// );
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A required key resolved to an empty value.
    #[error("{key} is not configured{}", hint_suffix(.hint))]
    MissingRequired {
        /// The key that has no value
        key: String,
        /// Remediation example, if one is registered for the key
        hint: Option<String>,
    },

    /// A value does not satisfy the rule registered for its key.
    #[error("{key} is malformed: '{value}'{}", hint_suffix(.hint))]
    InvalidValue {
        /// The offending key
        key: String,
        /// The offending value
        value: String,
        /// Remediation example, if one is registered for the key
        hint: Option<String>,
    },

    /// An output format was requested that the renderer does not know.
    #[error("Unsupported output format '{format}', valid choices: table, yaml")]
    UnsupportedFormat {
        /// The requested format
        format: String,
    },

    /// A configuration source could not be read.
    #[error("Configuration source '{source_name}' error: {message}")]
    SourceError {
        /// The name of the source that encountered the error
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configuration file or rule could not be parsed.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Errors raised by the request gateway.
///
/// The raw transport error type never crosses this boundary; its message is
/// carried as text instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RemoteError {
    /// The remote answered with a non-success status.
    #[error("{method} {url} failed with status {status}: {body}")]
    Status {
        /// HTTP method of the failed call
        method: String,
        /// Full target URL
        url: String,
        /// Status code returned by the remote
        status: u16,
        /// Beginning of the response body
        body: String,
    },

    /// The call did not complete within the transport timeout.
    #[error("{method} {url} timed out: {message}")]
    Timeout {
        /// HTTP method of the failed call
        method: String,
        /// Full target URL
        url: String,
        /// Transport message
        message: String,
    },

    /// Connection-level failure (DNS, TLS, refused connection, broken body).
    #[error("{method} {url} failed: {message}")]
    Transport {
        /// HTTP method of the failed call
        method: String,
        /// Full target URL
        url: String,
        /// Transport message
        message: String,
    },

    /// The session login did not return the expected success marker.
    #[error("Login to {url} was rejected, check HOLMSEC_USERNAME and HOLMSEC_PASSWORD")]
    LoginRejected {
        /// Login URL
        url: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {message}")]
    ClientSetup {
        /// Transport message
        message: String,
    },
}

/// Errors raised when request input or response payloads are malformed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataError {
    /// An identifier failed its format check.
    #[error("Invalid {kind} identifier: '{value}'")]
    InvalidIdentifier {
        /// What the identifier names (asset, profile, scan)
        kind: String,
        /// The offending value
        value: String,
    },

    /// A response body was not shaped as expected.
    #[error("Unexpected response payload: {message}")]
    MalformedPayload {
        /// What was wrong with the payload
        message: String,
    },
}

/// Any error holmscan can surface to the command line.
#[derive(Debug, Error)]
pub enum HolmscanError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Remote error
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// Data error
    #[error(transparent)]
    Data(#[from] DataError),
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
