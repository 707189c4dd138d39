// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for the integration tests: a mock configuration source, an
//! environment guard, temporary config trees and a local stub HTTP server.

#![allow(dead_code)]

use holmscan::domain::Result;
use holmscan::ports::ConfigSource;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tiny_http::{Header, Server};

/// A mock configuration source for testing.
#[derive(Debug, Clone)]
pub struct MockConfigSource {
    name: String,
    priority: u8,
    values: HashMap<String, String>,
}

impl MockConfigSource {
    /// Creates a new mock source with the given name and priority.
    pub fn new(name: impl Into<String>, priority: u8) -> Self {
        Self {
            name: name.into(),
            priority,
            values: HashMap::new(),
        }
    }

    /// Adds a value to the mock source.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl ConfigSource for MockConfigSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }

    fn read(&self) -> Result<HashMap<String, String>> {
        Ok(self.values.clone())
    }
}

/// Serializes tests that touch the process environment.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Helper to set and clean up environment variables.
///
/// Holds a process-wide lock for its lifetime so tests in the same binary do
/// not see each other's variables.
pub struct EnvGuard {
    keys: Vec<String>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvGuard {
    pub fn new() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        EnvGuard {
            keys: Vec::new(),
            _lock: lock,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) {
        env::set_var(key, value);
        self.keys.push(key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        env::remove_var(key);
        self.keys.push(key.to_string());
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for key in &self.keys {
            env::remove_var(key);
        }
    }
}

/// A site root and a user root laid out like `/etc` and `~/.config`.
pub struct ConfigTree {
    root: tempfile::TempDir,
}

impl ConfigTree {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("etc")).unwrap();
        fs::create_dir(root.path().join("config")).unwrap();
        Self { root }
    }

    pub fn site_root(&self) -> PathBuf {
        self.root.path().join("etc")
    }

    pub fn user_root(&self) -> PathBuf {
        self.root.path().join("config")
    }

    /// Writes `relative` under `base`, creating parent directories.
    pub fn write(&self, base: &Path, relative: &str, content: &str) {
        let path = base.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

/// One canned answer of the stub server.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
    pub delay: Duration,
}

impl StubResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            delay: Duration::ZERO,
        }
    }

    pub fn html(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            headers: vec![("Content-Type".to_string(), "text/html".to_string())],
            delay: Duration::ZERO,
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as seen by the stub server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    /// Looks up a header case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A local HTTP server answering with canned responses, one per request.
pub struct StubServer {
    base_url: String,
    handle: JoinHandle<Vec<RecordedRequest>>,
}

impl StubServer {
    pub fn start(responses: Vec<StubResponse>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("http server");
        let addr = server.server_addr().to_ip().expect("ip listener");
        let base_url = format!("http://{}", addr);

        let handle = thread::spawn(move || {
            let mut recorded = Vec::new();
            for canned in responses {
                let mut request = match server.recv_timeout(Duration::from_secs(10)) {
                    Ok(Some(request)) => request,
                    _ => break,
                };

                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                recorded.push(RecordedRequest {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    headers: request
                        .headers()
                        .iter()
                        .map(|h| (h.field.to_string(), h.value.to_string()))
                        .collect(),
                    body,
                });

                thread::sleep(canned.delay);
                let mut response =
                    tiny_http::Response::from_string(canned.body).with_status_code(canned.status);
                for (name, value) in &canned.headers {
                    response = response.with_header(
                        Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("header"),
                    );
                }
                let _ = request.respond(response);
            }
            recorded
        });

        Self { base_url, handle }
    }

    /// Base URL without trailing slash, such as `http://127.0.0.1:41234`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Waits for the server thread and returns what it received.
    pub fn finish(self) -> Vec<RecordedRequest> {
        self.handle.join().expect("server thread")
    }
}
