//! Integration tests for the amflens CLI
//!
//! These tests run the compiled binary against model files on disk

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const MODEL: &str = r##"[{
    "@context": {
        "@base": "amf://id",
        "doc": "http://a.ml/vocabularies/document#",
        "core": "http://a.ml/vocabularies/core#",
        "apiContract": "http://a.ml/vocabularies/apiContract#"
    },
    "@id": "",
    "@type": ["doc:Document", "doc:Unit"],
    "doc:encodes": {
        "@id": "#/web-api",
        "@type": ["apiContract:WebAPI"],
        "core:name": "Inventory",
        "apiContract:server": [{
            "@id": "#/web-api/server",
            "@type": ["apiContract:Server"],
            "core:urlTemplate": "https://inventory.example.com"
        }],
        "apiContract:endpoint": [{
            "@id": "#/web-api/items",
            "@type": ["apiContract:EndPoint"],
            "apiContract:path": "/items",
            "apiContract:supportedOperation": [{
                "@id": "#/web-api/items/post",
                "@type": ["apiContract:Operation"],
                "apiContract:method": "post",
                "core:name": "Create item"
            }]
        }]
    }
}]"##;

fn amflens(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_amflens"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run CLI")
}

fn write_model(dir: &Path) -> String {
    let path = dir.join("api.json");
    fs::write(&path, MODEL).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = amflens(&["--help"], dir.path());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.contains("Usage: amflens [OPTIONS] <FILE|URL>"));
    assert!(stdout.contains("--operation <ID>"));
}

#[test]
fn test_cli_version() {
    let dir = tempfile::tempdir().unwrap();
    let output = amflens(&["--version"], dir.path());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains(&format!("amflens {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn test_cli_renders_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());
    let output = amflens(&[&model], dir.path());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(stdout.contains("Web API: Inventory"));
    assert!(stdout.contains("https://inventory.example.com/items"));
    assert!(stdout.contains("POST    Create item"));
}

#[test]
fn test_cli_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());
    let output = amflens(&["--json", &model], dir.path());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(value["summary"]["name"], "Inventory");
    assert_eq!(value["endpoints"][0]["path"], "/items");
}

#[test]
fn test_cli_config_file_sets_base_uri() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());
    fs::write(
        dir.path().join("amflens.toml"),
        "base_uri = \"http://localhost:9000\"\n",
    )
    .unwrap();

    let output = amflens(&[&model], dir.path());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("http://localhost:9000/items"));
}

#[test]
fn test_cli_operation_view() {
    let dir = tempfile::tempdir().unwrap();
    let model = write_model(dir.path());
    let output = amflens(&["-o", "#/web-api/items/post", &model], dir.path());
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(stdout.contains("POST /items"));
    assert!(stdout.contains("https://inventory.example.com"));
}

#[test]
fn test_cli_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = amflens(&["does-not-exist.json"], dir.path());
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to read does-not-exist.json"));
}

#[test]
fn test_cli_unknown_flag() {
    let dir = tempfile::tempdir().unwrap();
    let output = amflens(&["--bogus", "api.json"], dir.path());
    assert!(!output.status.success());
}
