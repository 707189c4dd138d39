// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication schemes and credentials.

use std::fmt;

/// The authentication mechanism a client generation uses.
///
/// Exactly one is active for a given [`Schema`](crate::domain::Schema).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthScheme {
    /// Username/password login establishing a cookie session.
    Session,
    /// `Authorization: Token <token>` header on every call.
    Token,
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::Session => write!(f, "session"),
            AuthScheme::Token => write!(f, "token"),
        }
    }
}

/// Credentials carried by the effective configuration.
///
/// `Debug` never prints the secret parts.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Username and password for the session login.
    Session {
        /// Login name
        username: String,
        /// Password
        password: String,
    },
    /// API token.
    Token(String),
}

impl Credential {
    /// Returns the scheme this credential belongs to.
    pub fn scheme(&self) -> AuthScheme {
        match self {
            Credential::Session { .. } => AuthScheme::Session,
            Credential::Token(_) => AuthScheme::Token,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::Session { username, .. } => f
                .debug_struct("Session")
                .field("username", username)
                .field("password", &"********")
                .finish(),
            Credential::Token(_) => f.debug_tuple("Token").field(&"********").finish(),
        }
    }
}
