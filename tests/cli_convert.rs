// tests/cli_convert.rs
// Command-line conversion writing themes to disk

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use mapbox2harp::cli::{run_convert, ConvertArgs};
use serde_json::{json, Value};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/streets.json")
}

fn args(extra: &[&str]) -> ConvertArgs {
    let style = fixture_path();
    let mut argv = vec!["mapbox2harp".to_string(), style.display().to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    ConvertArgs::try_parse_from(argv).unwrap()
}

#[test]
fn writes_wrapped_theme_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("theme.json");
    run_convert(&args(&["--name", "streets", "--output", out.to_str().unwrap()])).unwrap();

    let theme: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let styles = theme["styles"]["streets"].as_array().unwrap();
    assert_eq!(styles.len(), 7);
    assert_eq!(styles[0]["id"], json!("water"));
    assert_eq!(styles[6]["id"], json!("hidden-landuse"));
}

#[test]
fn config_file_and_flags_combine() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"styleSetName": "night", "shape": "bare", "skipHidden": true}"#)
        .unwrap();
    let out = dir.path().join("theme.json");
    run_convert(&args(&[
        "--config",
        config.to_str().unwrap(),
        "--px-to-meter",
        "2",
        "--compact",
        "--output",
        out.to_str().unwrap(),
    ]))
    .unwrap();

    let raw = fs::read_to_string(&out).unwrap();
    assert_eq!(raw.trim_end().lines().count(), 1);
    let theme: Value = serde_json::from_str(&raw).unwrap();
    let styles = theme["night"].as_array().unwrap();
    assert_eq!(styles.len(), 6);
    let path = styles.iter().find(|s| s["id"] == "road-path").unwrap();
    assert_eq!(path["dashSize"].as_f64(), Some(3.0));
}

#[test]
fn missing_style_file_reports_error() {
    let argv = ["mapbox2harp", "/nonexistent/style.json"];
    let parsed = ConvertArgs::try_parse_from(argv).unwrap();
    let err = run_convert(&parsed).unwrap_err();
    assert!(format!("{err:#}").contains("loading style"));
}

#[test]
fn config_file_rejects_non_positive_factor() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, r#"{"pxToMeter": -1}"#).unwrap();
    let err = run_convert(&args(&["--config", config.to_str().unwrap()])).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("parsing config"));
    assert!(message.contains("pxToMeter"));
}
