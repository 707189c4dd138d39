// SPDX-License-Identifier: MIT OR Apache-2.0

//! The authenticated request gateway.

use crate::domain::{AuthScheme, Credential, EffectiveConfiguration, HolmscanError, RemoteError};
use crate::gateway::request::{RequestOptions, Response};
use crate::gateway::{join_url, parse_base_url};
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Url};
use std::time::{Duration, Instant};

/// Default transport timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the session login form, relative to the base URL.
pub const LOGIN_PATH: &str = "login/in";

/// Text present in the body of a successful session login.
pub const LOGIN_SUCCESS_MARKER: &str = "doLogout";

/// Maximum characters of an error body carried in [`RemoteError::Status`].
const ERROR_BODY_LIMIT: usize = 200;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Authentication lifecycle of a [`Gateway`].
///
/// The session scheme starts `Unauthenticated` and moves to `Authenticated`
/// after a login whose response carries [`LOGIN_SUCCESS_MARKER`]. The token
/// scheme sends its credential on every call and is `Authenticated` from the
/// start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No session has been established.
    Unauthenticated,
    /// Calls are sent with valid credentials.
    Authenticated,
}

/// The single chokepoint for outbound API calls.
///
/// A gateway owns its transport session (connection pool and cookie store).
/// Calls take `&mut self`; share one across threads only behind a lock. Each
/// call is attempted once; there is no retry.
///
/// A session that expires mid-run is not detected. The resulting
/// [`RemoteError`] is returned as is; call [`Gateway::logout`] to force a new
/// login on the next call.
///
/// # Examples
///
/// ```rust,no_run
/// use holmscan::domain::Credential;
/// use holmscan::gateway::{Gateway, RequestOptions};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut gateway = Gateway::new(
///     "https://se-api.holmsecurity.com/v1",
///     Credential::Token("abc123".to_string()),
/// )?;
/// let response = gateway.get("/net-scans/assets", &RequestOptions::new())?;
/// println!("{}", response.json()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gateway {
    base_url: Url,
    credential: Credential,
    timeout: Duration,
    client: Client,
    state: AuthState,
}

impl Gateway {
    /// Creates a gateway for `base_url` using `credential`.
    ///
    /// Fails with [`RemoteError::ClientSetup`] if `base_url` is not an
    /// absolute http(s) URL.
    pub fn new(base_url: impl AsRef<str>, credential: Credential) -> Result<Self, RemoteError> {
        let base_url = parse_base_url(base_url.as_ref())?;
        let state = match credential.scheme() {
            AuthScheme::Token => AuthState::Authenticated,
            AuthScheme::Session => AuthState::Unauthenticated,
        };
        Ok(Self {
            base_url,
            credential,
            timeout: DEFAULT_TIMEOUT,
            client: build_client(DEFAULT_TIMEOUT)?,
            state,
        })
    }

    /// Creates a gateway from a validated configuration.
    ///
    /// The authentication scheme follows the configuration's schema.
    pub fn from_config(config: &EffectiveConfiguration) -> Result<Self, HolmscanError> {
        let base_url = config.base_url()?;
        let credential = config.credential()?;
        Ok(Self::new(base_url, credential)?)
    }

    /// Replaces the transport timeout.
    ///
    /// The transport is rebuilt, so an established session is dropped.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, RemoteError> {
        self.timeout = timeout;
        self.reset_session()?;
        Ok(self)
    }

    /// Returns the base URL every path is joined to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Returns the authentication scheme in use.
    pub fn scheme(&self) -> AuthScheme {
        self.credential.scheme()
    }

    /// Returns the current authentication state.
    pub fn auth_state(&self) -> AuthState {
        self.state
    }

    /// Returns the transport timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issues a GET for `path` relative to the base URL.
    pub fn get(&mut self, path: &str, options: &RequestOptions) -> Result<Response, RemoteError> {
        self.call(Method::GET, path, options)
    }

    /// Issues a POST for `path` relative to the base URL.
    pub fn post(&mut self, path: &str, options: &RequestOptions) -> Result<Response, RemoteError> {
        self.call(Method::POST, path, options)
    }

    /// Logs in if the session scheme has no established session yet.
    pub fn ensure_authenticated(&mut self) -> Result<(), RemoteError> {
        match self.state {
            AuthState::Authenticated => Ok(()),
            AuthState::Unauthenticated => self.login(),
        }
    }

    /// Performs the session login.
    ///
    /// On success the session cookies are kept by the transport and reused by
    /// later calls. A response without the success marker leaves the gateway
    /// unauthenticated and fails with [`RemoteError::LoginRejected`]. For the
    /// token scheme this does nothing.
    pub fn login(&mut self) -> Result<(), RemoteError> {
        let (username, password) = match &self.credential {
            Credential::Token(_) => return Ok(()),
            Credential::Session { username, password } => (username.clone(), password.clone()),
        };

        let url = join_url(&self.base_url, LOGIN_PATH);
        tracing::debug!("Logging in as {}", username);

        let options = RequestOptions::new()
            .form("username", username)
            .form("password", password)
            .form("redirect", "")
            .form("language", "en");
        let response = self.execute(Method::POST, &url, &options)?;

        if !response.text().contains(LOGIN_SUCCESS_MARKER) {
            tracing::warn!("Login to {} did not return a session", url);
            return Err(RemoteError::LoginRejected {
                url: url.to_string(),
            });
        }

        self.state = AuthState::Authenticated;
        tracing::info!("Logged in to {}", self.base_url);
        Ok(())
    }

    /// Drops the session and returns to `Unauthenticated`.
    ///
    /// No remote endpoint is called; the cookie store is discarded with the
    /// transport. For the token scheme this does nothing.
    pub fn logout(&mut self) -> Result<(), RemoteError> {
        if self.scheme() == AuthScheme::Token {
            return Ok(());
        }
        self.reset_session()?;
        tracing::debug!("Session for {} discarded", self.base_url);
        Ok(())
    }

    fn reset_session(&mut self) -> Result<(), RemoteError> {
        self.client = build_client(self.timeout)?;
        if self.scheme() == AuthScheme::Session {
            self.state = AuthState::Unauthenticated;
        }
        Ok(())
    }

    fn call(
        &mut self,
        method: Method,
        path: &str,
        options: &RequestOptions,
    ) -> Result<Response, RemoteError> {
        self.ensure_authenticated()?;
        let url = join_url(&self.base_url, path);
        self.execute(method, &url, options)
    }

    fn execute(
        &self,
        method: Method,
        url: &Url,
        options: &RequestOptions,
    ) -> Result<Response, RemoteError> {
        let mut request = self.client.request(method.clone(), url.clone());

        if let Credential::Token(token) = &self.credential {
            request = request.header(AUTHORIZATION, format!("Token {}", token));
        }
        if !options.query_pairs().is_empty() {
            request = request.query(options.query_pairs());
        }
        if let Some(body) = options.json_body() {
            request = request.json(body);
        }
        if !options.form_fields().is_empty() {
            request = request.form(options.form_fields());
        }

        let started = Instant::now();
        let response = request
            .send()
            .map_err(|e| transport_error(&method, url, e))?;
        let status = response.status();
        let final_url = response.url().to_string();
        let text = response
            .text()
            .map_err(|e| transport_error(&method, url, e))?;
        let elapsed = started.elapsed();

        tracing::debug!(
            "{} {} -> {} ({} ms)",
            method,
            url,
            status.as_u16(),
            elapsed.as_millis()
        );

        if !status.is_success() {
            return Err(RemoteError::Status {
                method: method.to_string(),
                url: url.to_string(),
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(Response {
            status: status.as_u16(),
            url: final_url,
            text,
            elapsed,
        })
    }
}

fn build_client(timeout: Duration) -> Result<Client, RemoteError> {
    Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| RemoteError::ClientSetup {
            message: e.to_string(),
        })
}

fn transport_error(method: &Method, url: &Url, error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout {
            method: method.to_string(),
            url: url.to_string(),
            message: error.to_string(),
        }
    } else {
        RemoteError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
