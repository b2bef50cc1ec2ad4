#![allow(dead_code)]

use std::path::PathBuf;

use phx::{AssemblyOptions, HbModel, PhxProject};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Read a fixture model from `tests/data`.
pub fn load_model(name: &str) -> HbModel {
    let path = fixture_path(name);
    phx::read_hbjson_file(&path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// Read a fixture as raw JSON, for tests that tweak it before parsing.
pub fn load_json(name: &str) -> serde_json::Value {
    let text = std::fs::read_to_string(fixture_path(name)).expect("Failed to read fixture");
    serde_json::from_str(&text).expect("Fixture is not valid JSON")
}

pub fn assemble(name: &str) -> PhxProject {
    let model = load_model(name);
    phx::convert_hbjson_model(&model, &AssemblyOptions::default()).expect("Assembly failed")
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
