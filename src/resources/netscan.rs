// SPDX-License-Identifier: MIT OR Apache-2.0

//! Network scans (`/net-scans`).

use crate::gateway::Gateway;
use crate::resources::{ScanResource, SCAN_NAME};
use serde_json::{json, Value};

/// Network scan calls.
#[derive(Debug)]
pub struct NetScans<'a> {
    gateway: &'a mut Gateway,
}

impl<'a> NetScans<'a> {
    /// Wraps `gateway` for network scan calls.
    pub fn new(gateway: &'a mut Gateway) -> Self {
        Self { gateway }
    }
}

impl ScanResource for NetScans<'_> {
    fn prefix(&self) -> &'static str {
        "/net-scans"
    }

    fn gateway(&mut self) -> &mut Gateway {
        &mut *self.gateway
    }

    fn start_body(&self, asset: &str, profile: &str) -> Value {
        json!({
            "name": SCAN_NAME,
            "included_assets": [asset],
            "profile_uuid": profile,
        })
    }
}
