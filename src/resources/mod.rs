// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-resource API modules.
//!
//! Network scans and web application scans expose the same set of calls under
//! different path prefixes. [`ScanResource`] provides those calls on top of a
//! [`Gateway`]; [`NetScans`] and [`WebScans`] only differ in their prefix and in
//! the body used to start a scan.

pub mod netscan;
pub mod webscan;

pub use netscan::NetScans;
pub use webscan::WebScans;

use crate::domain::{DataError, HolmscanError};
use crate::gateway::{Gateway, RequestOptions};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Name given to scans started from this client.
pub const SCAN_NAME: &str = "Scan via API";

/// Page size requested when listing scans.
pub const LIST_LIMIT: u32 = 10000;

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$",
    )
    .expect("uuid pattern compiles")
});

/// Fails with [`DataError::InvalidIdentifier`] unless `value` is a canonical
/// hyphenated UUID.
///
/// # Examples
///
/// ```rust
/// use holmscan::resources::check_uuid;
///
/// assert!(check_uuid("scan", "0b9a4a3e-3f7e-4a3c-9a53-2f1d8e8b6c11").is_ok());
/// assert!(check_uuid("scan", "../../admin").is_err());
/// ```
pub fn check_uuid(kind: &str, value: &str) -> Result<(), DataError> {
    if UUID_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(DataError::InvalidIdentifier {
            kind: kind.to_string(),
            value: value.to_string(),
        })
    }
}

/// Returns the `results` array of a listing payload.
pub fn results(payload: &Value) -> Result<&[Value], DataError> {
    payload
        .get("results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| DataError::MalformedPayload {
            message: "expected an object with a 'results' array".to_string(),
        })
}

/// Calls shared by the scan resources.
///
/// Implementors supply the path prefix, the gateway and the body used to start
/// a scan; every call returns the parsed JSON body of the response.
pub trait ScanResource {
    /// Path prefix of the resource, such as `/net-scans`.
    fn prefix(&self) -> &'static str;

    /// The gateway calls are sent through.
    fn gateway(&mut self) -> &mut Gateway;

    /// JSON body that starts a scan of `asset` with `profile`.
    fn start_body(&self, asset: &str, profile: &str) -> Value;

    /// Lists the scannable assets.
    fn assets(&mut self) -> Result<Value, HolmscanError> {
        let path = format!("{}/assets", self.prefix());
        fetch(self.gateway(), &path, &RequestOptions::new())
    }

    /// Lists the scan profiles.
    fn profiles(&mut self) -> Result<Value, HolmscanError> {
        let path = format!("{}/scan-profiles", self.prefix());
        fetch(self.gateway(), &path, &RequestOptions::new())
    }

    /// Lists the scan schedules.
    fn schedules(&mut self) -> Result<Value, HolmscanError> {
        let path = format!("{}/schedules", self.prefix());
        fetch(self.gateway(), &path, &RequestOptions::new())
    }

    /// Lists scans, up to [`LIST_LIMIT`] of them.
    fn list(&mut self) -> Result<Value, HolmscanError> {
        let path = self.prefix().to_string();
        let options = RequestOptions::new().query("limit", LIST_LIMIT.to_string());
        fetch(self.gateway(), &path, &options)
    }

    /// Shows one scan.
    fn show(&mut self, uuid: &str) -> Result<Value, HolmscanError> {
        check_uuid("scan", uuid)?;
        let path = format!("{}/{}", self.prefix(), uuid);
        fetch(self.gateway(), &path, &RequestOptions::new())
    }

    /// Starts a scan of `asset` using `profile`.
    fn start(&mut self, asset: &str, profile: &str) -> Result<Value, HolmscanError> {
        check_uuid("asset", asset)?;
        check_uuid("profile", profile)?;

        let body = self.start_body(asset, profile);
        tracing::debug!("Starting scan with {}", body);

        let path = self.prefix().to_string();
        let response = self
            .gateway()
            .post(&path, &RequestOptions::new().json(body))?;
        Ok(response.json()?)
    }
}

fn fetch(
    gateway: &mut Gateway,
    path: &str,
    options: &RequestOptions,
) -> Result<Value, HolmscanError> {
    let response = gateway.get(path, options)?;
    Ok(response.json()?)
}
