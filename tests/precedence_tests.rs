// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration source precedence.

mod common;

use common::{ConfigTree, EnvGuard, MockConfigSource};
use holmscan::prelude::*;
use std::collections::HashMap;

const KEY: &str = "HOLMSEC_ENDPOINT";

fn resolver(tree: &ConfigTree, env: HashMap<String, String>) -> ConfigResolver {
    let locations = ConfigLocations::under(tree.site_root(), Some(tree.user_root()));
    ConfigResolver::builder(Schema::token())
        .with_defaults()
        .with_locations(&locations)
        .with_source(Box::new(EnvVarAdapter::with_values(env)))
        .build()
}

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn endpoint(resolver: &ConfigResolver) -> String {
    resolver.resolve().unwrap().get(KEY).cloned().unwrap_or_default()
}

#[test]
fn test_default_when_nothing_else_is_set() {
    let tree = ConfigTree::new();
    assert_eq!(
        endpoint(&resolver(&tree, HashMap::new())),
        "https://se-api.holmsecurity.com/v1"
    );
}

#[test]
fn test_each_layer_overrides_the_one_below() {
    let tree = ConfigTree::new();
    let site = tree.site_root();
    let user = tree.user_root();

    tree.write(&site, "holmscan.yaml", "HOLMSEC_ENDPOINT: https://site-file/v1\n");
    assert_eq!(endpoint(&resolver(&tree, HashMap::new())), "https://site-file/v1");

    tree.write(&site, "holmscan.d/10.yaml", "HOLMSEC_ENDPOINT: https://site-dir/v1\n");
    assert_eq!(endpoint(&resolver(&tree, HashMap::new())), "https://site-dir/v1");

    tree.write(&user, "holmscan.yaml", "HOLMSEC_ENDPOINT: https://user-file/v1\n");
    assert_eq!(endpoint(&resolver(&tree, HashMap::new())), "https://user-file/v1");

    tree.write(&user, "holmscan.d/10.yaml", "HOLMSEC_ENDPOINT: https://user-dir/v1\n");
    assert_eq!(endpoint(&resolver(&tree, HashMap::new())), "https://user-dir/v1");

    let from_env = env(&[(KEY, "https://example.com/v2")]);
    assert_eq!(endpoint(&resolver(&tree, from_env)), "https://example.com/v2");
}

#[test]
fn test_lower_layers_fill_keys_the_higher_ones_omit() {
    let tree = ConfigTree::new();
    let site = tree.site_root();
    let user = tree.user_root();

    tree.write(&site, "holmscan.yaml", "HOLMSCAN_FORMAT: yaml\n");
    tree.write(&user, "holmscan.yaml", "HOLMSEC_TOKEN: from-user-file\n");

    let resolved = resolver(&tree, env(&[(KEY, "https://example.com/v3")]))
        .resolve()
        .unwrap();

    assert_eq!(resolved.get("HOLMSCAN_FORMAT").unwrap(), "yaml");
    assert_eq!(resolved.get("HOLMSEC_TOKEN").unwrap(), "from-user-file");
    assert_eq!(resolved.get(KEY).unwrap(), "https://example.com/v3");
    assert_eq!(resolved.get("HOLMSCAN_DEBUG").unwrap(), "false");
}

#[test]
fn test_directory_files_apply_in_name_order() {
    let tree = ConfigTree::new();
    let site = tree.site_root();

    tree.write(&site, "holmscan.d/b.yaml", "HOLMSEC_ENDPOINT: https://b/v1\n");
    tree.write(&site, "holmscan.d/a.yaml", "HOLMSEC_ENDPOINT: https://a/v1\n");
    tree.write(&site, "holmscan.d/c.yml", "HOLMSEC_ENDPOINT: https://c/v1\n");

    assert_eq!(endpoint(&resolver(&tree, HashMap::new())), "https://b/v1");
}

#[test]
fn test_unknown_keys_never_survive() {
    let tree = ConfigTree::new();
    let site = tree.site_root();
    tree.write(
        &site,
        "holmscan.yaml",
        "RANDOM_KEY: foo\nHOLMSEC_PASSWORD: session-only\nproxy:\n  host: localhost\n",
    );

    let resolved = resolver(&tree, env(&[("RANDOM_KEY", "bar"), ("PATH", "/bin")]))
        .resolve()
        .unwrap();

    assert!(!resolved.contains_key("RANDOM_KEY"));
    assert!(!resolved.contains_key("HOLMSEC_PASSWORD"));
    assert!(!resolved.contains_key("proxy.host"));
    assert!(!resolved.contains_key("PATH"));
    assert_eq!(resolved.len(), 4);
}

#[test]
fn test_collection_value_replaces_lower_layer() {
    let tree = ConfigTree::new();
    let site = tree.site_root();
    let user = tree.user_root();
    tree.write(&site, "holmscan.yaml", "HOLMSEC_TOKEN: site-token\n");
    tree.write(&user, "holmscan.yaml", "HOLMSEC_TOKEN: []\n");

    let resolver = resolver(&tree, HashMap::new());
    assert_eq!(
        resolver.resolve().unwrap().get("HOLMSEC_TOKEN").map(String::as_str),
        Some("")
    );
    assert!(matches!(
        resolver.load(),
        Err(ConfigError::MissingRequired { ref key, .. }) if key == "HOLMSEC_TOKEN"
    ));

    tree.write(&user, "holmscan.yaml", "HOLMSEC_TOKEN:\n  nested: x\n");
    let resolved = resolver.resolve().unwrap();
    assert_eq!(resolved.get("HOLMSEC_TOKEN").map(String::as_str), Some("nested: x"));
}

#[test]
fn test_empty_file_is_allowed() {
    let tree = ConfigTree::new();
    let site = tree.site_root();
    tree.write(&site, "holmscan.yaml", "");
    tree.write(&site, "holmscan.d/empty.yaml", "# nothing here\n");

    assert_eq!(
        endpoint(&resolver(&tree, HashMap::new())),
        "https://se-api.holmsecurity.com/v1"
    );
}

#[test]
fn test_malformed_file_fails_fast() {
    let tree = ConfigTree::new();
    let user = tree.user_root();
    tree.write(&user, "holmscan.yaml", "HOLMSEC_TOKEN: [unclosed\n");

    match resolver(&tree, HashMap::new()).resolve() {
        Err(ConfigError::ParseError { message, .. }) => {
            assert!(message.contains("holmscan.yaml"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_sources_added_out_of_order() {
    let resolver = ConfigResolver::builder(Schema::token())
        .with_source(Box::new(
            MockConfigSource::new("env", layer::ENVIRONMENT).with_value(KEY, "https://env/v1"),
        ))
        .with_source(Box::new(
            MockConfigSource::new("user", layer::USER_FILE).with_value(KEY, "https://user/v1"),
        ))
        .with_defaults()
        .build();

    assert_eq!(endpoint(&resolver), "https://env/v1");
}

#[test]
fn test_process_environment_overrides_files() {
    let mut guard = EnvGuard::new();
    guard.set(KEY, "https://from-process-env/v1");
    guard.set("RANDOM_KEY", "foo");

    let tree = ConfigTree::new();
    let site = tree.site_root();
    tree.write(&site, "holmscan.yaml", "HOLMSEC_ENDPOINT: https://site-file/v1\n");

    let locations = ConfigLocations::under(tree.site_root(), Some(tree.user_root()));
    let resolver = ConfigResolver::standard(Schema::token(), &locations);
    let resolved = resolver.resolve().unwrap();

    assert_eq!(resolved.get(KEY).unwrap(), "https://from-process-env/v1");
    assert!(!resolved.contains_key("RANDOM_KEY"));
}
