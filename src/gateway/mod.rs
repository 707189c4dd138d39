// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request gateway: every call to the remote API goes through [`Gateway`].
//!
//! The gateway joins paths to the configured base URL, attaches the
//! credential (an `Authorization: Token …` header, or a lazily established
//! login session), times each call and turns transport failures and
//! non-success statuses into [`RemoteError`](crate::domain::RemoteError).

pub mod client;
pub mod request;

pub use client::{AuthState, Gateway, DEFAULT_TIMEOUT, LOGIN_PATH, LOGIN_SUCCESS_MARKER};
pub use request::{RequestOptions, Response};

use crate::domain::RemoteError;
use reqwest::Url;

/// Parses a base URL, rejecting anything a path cannot be joined to.
///
/// # Examples
///
/// ```rust
/// use holmscan::gateway::parse_base_url;
///
/// assert!(parse_base_url("https://se-api.holmsecurity.com/v1").is_ok());
/// assert!(parse_base_url("se-api.holmsecurity.com/v1").is_err());
/// assert!(parse_base_url("mailto:scans@example.com").is_err());
/// ```
pub fn parse_base_url(base: &str) -> Result<Url, RemoteError> {
    let url = Url::parse(base).map_err(|e| RemoteError::ClientSetup {
        message: format!("invalid base URL '{}': {}", base, e),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(RemoteError::ClientSetup {
            message: format!("invalid base URL '{}': expected an http(s) URL", base),
        });
    }
    Ok(url)
}

/// Appends the segments of a relative path to a base URL.
///
/// Empty segments are dropped, so leading, trailing and doubled slashes on
/// either side never produce an empty path segment.
///
/// # Examples
///
/// ```rust
/// use holmscan::gateway::{join_url, parse_base_url};
///
/// let base = parse_base_url("https://se-api.holmsecurity.com/v1").unwrap();
/// assert_eq!(
///     join_url(&base, "/net-scans/assets").as_str(),
///     "https://se-api.holmsecurity.com/v1/net-scans/assets"
/// );
///
/// let base = parse_base_url("https://sc.holmsecurity.com/").unwrap();
/// assert_eq!(join_url(&base, "login/in").as_str(), "https://sc.holmsecurity.com/login/in");
/// ```
pub fn join_url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join(base: &str, path: &str) -> String {
        join_url(&parse_base_url(base).unwrap(), path).to_string()
    }

    #[test]
    fn test_join_url_slashes() {
        assert_eq!(join("http://a/v1/", "/x"), "http://a/v1/x");
        assert_eq!(join("http://a/v1", "x"), "http://a/v1/x");
        assert_eq!(join("http://a/v1", "x//y/"), "http://a/v1/x/y");
        assert_eq!(join("http://a/v1", ""), "http://a/v1");
        assert_eq!(join("http://127.0.0.1:8080/", "/login/in"), "http://127.0.0.1:8080/login/in");
    }

    #[test]
    fn test_join_url_keeps_base_query_out_of_path() {
        assert_eq!(join("http://a/v1?x=1", "scans"), "http://a/v1/scans?x=1");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(RemoteError::ClientSetup { .. })
        ));
        assert!(matches!(
            parse_base_url("ftp://example.com/v1"),
            Err(RemoteError::ClientSetup { .. })
        ));
        assert!(parse_base_url("http://127.0.0.1:9/v1").is_ok());
    }
}
