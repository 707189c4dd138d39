// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: configuration resolution, validation, the gateway, the
//! scan resources and rendering working together.

mod common;

use common::{ConfigTree, StubResponse, StubServer};
use holmscan::prelude::*;
use holmscan::resources::results;
use holmscan::render::{NAMED_COLUMNS, SCAN_COLUMNS};
use serde_json::json;
use std::collections::HashMap;

const ASSET: &str = "6c3f2a6e-1d1b-4c4f-9a43-5b2f3b0e8a10";
const PROFILE: &str = "9f1e2d3c-4b5a-4968-8776-a5b4c3d2e1f0";

fn env_only(pairs: &[(&str, &str)]) -> Result<EffectiveConfiguration> {
    let tree = ConfigTree::new();
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    ConfigResolver::builder(Schema::token())
        .with_defaults()
        .with_locations(&ConfigLocations::under(tree.site_root(), Some(tree.user_root())))
        .with_source(Box::new(EnvVarAdapter::with_values(values)))
        .build()
        .load()
}

#[test]
fn test_env_only_configuration_to_rendered_table() {
    let config = env_only(&[
        ("HOLMSEC_ENDPOINT", "https://se-api.holmsecurity.com/v1"),
        ("HOLMSEC_TOKEN", "abc123"),
        ("HOLMSCAN_FORMAT", "table"),
    ])
    .unwrap();
    assert_eq!(config.base_url().unwrap(), "https://se-api.holmsecurity.com/v1");

    let server = StubServer::start(vec![StubResponse::json(
        200,
        r#"{"results":[{"name":"host1","uuid":"u-1"}]}"#,
    )]);

    // Same credential, pointed at the local stub instead of the configured host
    let mut gateway =
        Gateway::new(format!("{}/v1", server.base_url()), config.credential().unwrap()).unwrap();
    let payload = NetScans::new(&mut gateway).assets().unwrap();

    let format: OutputFormat = config.format().unwrap().parse().unwrap();
    let table = Renderer::new(format)
        .render_rows(results(&payload).unwrap(), NAMED_COLUMNS)
        .unwrap();
    assert_eq!(table, "Name  | UUID\nhost1 | u-1");

    let requests = server.finish();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/v1/net-scans/assets");
    assert_eq!(requests[0].header("Authorization"), Some("Token abc123"));
}

#[test]
fn test_missing_token_stops_before_any_call() {
    let error = env_only(&[("HOLMSEC_ENDPOINT", "https://se-api.holmsecurity.com/v1")])
        .unwrap_err();

    assert!(matches!(error, ConfigError::MissingRequired { ref key, .. } if key == "HOLMSEC_TOKEN"));
    assert_eq!(
        error.to_string(),
        "HOLMSEC_TOKEN is not configured, example: export HOLMSEC_TOKEN=<api token>"
    );
}

#[test]
fn test_malformed_endpoint_from_environment() {
    let error = env_only(&[
        ("HOLMSEC_ENDPOINT", "https://example.com/v2x"),
        ("HOLMSEC_TOKEN", "abc123"),
    ])
    .unwrap_err();

    assert!(matches!(error, ConfigError::InvalidValue { ref value, .. } if value == "https://example.com/v2x"));
}

#[test]
fn test_unsupported_format_from_environment() {
    let error = env_only(&[
        ("HOLMSCAN_FORMAT", "json"),
        ("HOLMSEC_TOKEN", "abc123"),
    ])
    .unwrap_err();

    assert!(matches!(error, ConfigError::InvalidValue { ref key, .. } if key == "HOLMSCAN_FORMAT"));
}

#[test]
fn test_effective_configuration_masks_token() {
    let config = env_only(&[("HOLMSEC_TOKEN", "abc123"), ("HOLMSCAN_DEBUG", "1")]).unwrap();

    assert!(config.debug());
    assert!(!config.to_string().contains("abc123"));
    assert!(!format!("{:?}", config).contains("abc123"));
    assert_eq!(config.get_str("HOLMSEC_TOKEN"), Some("abc123"));
}

#[test]
fn test_scan_listing_and_start() {
    let server = StubServer::start(vec![
        StubResponse::json(
            200,
            r#"{"count":1,"results":[{"uuid":"s-1","status":"completed","started_date":"2020-05-01","finished_date":"2020-05-02","vulnerabilities_count":3}]}"#,
        ),
        StubResponse::json(201, r#"{"uuid":"s-2","status":"queued"}"#),
    ]);
    let mut gateway =
        Gateway::new(format!("{}/v1", server.base_url()), Credential::Token("t".into())).unwrap();

    let listing = WebScans::new(&mut gateway).list().unwrap();
    let table = Renderer::new(OutputFormat::Table)
        .render_rows(results(&listing).unwrap(), SCAN_COLUMNS)
        .unwrap();
    assert_eq!(
        table.lines().nth(1),
        Some("s-1  | completed | 2020-05-01 | 2020-05-02 | 3")
    );

    let started = WebScans::new(&mut gateway).start(ASSET, PROFILE).unwrap();
    assert_eq!(started["uuid"], "s-2");

    let requests = server.finish();
    assert_eq!(requests[0].url, "/v1/web-scans?limit=10000");
    assert_eq!(requests[1].method, "POST");
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&requests[1].body).unwrap(),
        json!({"name": "Scan via API", "profile_uuid": PROFILE, "webapp_asset_uuid": ASSET})
    );
}

#[test]
fn test_net_scan_start_and_show() {
    let server = StubServer::start(vec![
        StubResponse::json(201, r#"{"uuid":"s-3"}"#),
        StubResponse::json(200, r#"{"uuid":"s-3","status":"running"}"#),
    ]);
    let mut gateway =
        Gateway::new(format!("{}/v1", server.base_url()), Credential::Token("t".into())).unwrap();
    let mut scans = NetScans::new(&mut gateway);

    scans.start(ASSET, PROFILE).unwrap();
    let shown = scans.show(ASSET).unwrap();
    assert_eq!(shown["status"], "running");

    let requests = server.finish();
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&requests[0].body).unwrap(),
        json!({"name": "Scan via API", "included_assets": [ASSET], "profile_uuid": PROFILE})
    );
    assert_eq!(requests[1].url, format!("/v1/net-scans/{}", ASSET));
}

#[test]
fn test_invalid_identifier_is_data_error() {
    let mut gateway =
        Gateway::new("http://127.0.0.1:9/v1", Credential::Token("t".into())).unwrap();

    let error = NetScans::new(&mut gateway)
        .start("not-a-uuid", PROFILE)
        .unwrap_err();
    assert!(matches!(
        error,
        HolmscanError::Data(DataError::InvalidIdentifier { ref kind, .. }) if kind == "asset"
    ));
}

#[test]
fn test_listing_without_results_is_data_error() {
    let server = StubServer::start(vec![StubResponse::json(200, r#"{"detail":"ok"}"#)]);
    let mut gateway =
        Gateway::new(format!("{}/v1", server.base_url()), Credential::Token("t".into())).unwrap();

    let payload = NetScans::new(&mut gateway).profiles().unwrap();
    assert!(matches!(
        results(&payload),
        Err(DataError::MalformedPayload { .. })
    ));
    assert_eq!(server.finish()[0].url, "/v1/net-scans/scan-profiles");
}

#[test]
fn test_html_instead_of_json_is_data_error() {
    let server = StubServer::start(vec![StubResponse::html(200, "<html></html>")]);
    let mut gateway =
        Gateway::new(format!("{}/v1", server.base_url()), Credential::Token("t".into())).unwrap();

    let error = WebScans::new(&mut gateway).schedules().unwrap_err();
    assert!(matches!(error, HolmscanError::Data(DataError::MalformedPayload { .. })));
    assert_eq!(server.finish()[0].url, "/v1/web-scans/schedules");
}
