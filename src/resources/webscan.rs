// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web application scans (`/web-scans`).

use crate::gateway::Gateway;
use crate::resources::{ScanResource, SCAN_NAME};
use serde_json::{json, Value};

/// Web application scan calls.
#[derive(Debug)]
pub struct WebScans<'a> {
    gateway: &'a mut Gateway,
}

impl<'a> WebScans<'a> {
    /// Wraps `gateway` for web application scan calls.
    pub fn new(gateway: &'a mut Gateway) -> Self {
        Self { gateway }
    }
}

impl ScanResource for WebScans<'_> {
    fn prefix(&self) -> &'static str {
        "/web-scans"
    }

    fn gateway(&mut self) -> &mut Gateway {
        &mut *self.gateway
    }

    fn start_body(&self, asset: &str, profile: &str) -> Value {
        json!({
            "name": SCAN_NAME,
            "profile_uuid": profile,
            "webapp_asset_uuid": asset,
        })
    }
}
