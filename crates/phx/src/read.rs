//! Reading the source JSON model from disk.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{PhxError, Result};
use crate::hbjson::HbModel;

const MODEL_TYPE: &str = "Model";

/// Parse a source model from JSON text. The top-level `"type"` must be
/// `"Model"`.
pub fn parse_hbjson_str(text: &str) -> Result<HbModel> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let found = value
        .get("type")
        .and_then(|t| t.as_str())
        .unwrap_or_default();
    if found != MODEL_TYPE {
        return Err(PhxError::WrongModelType {
            found: found.to_string(),
        });
    }
    Ok(serde_json::from_value(value)?)
}

/// Read and parse a source model file.
pub fn read_hbjson_file(path: &Path) -> Result<HbModel> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PhxError::SourceNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    debug!("Read {} bytes from {}", text.len(), path.display());
    parse_hbjson_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_other_document_types() {
        let err = parse_hbjson_str(r#"{"type": "Room", "identifier": "r"}"#).unwrap_err();
        assert!(matches!(err, PhxError::WrongModelType { ref found } if found == "Room"));
    }

    #[test]
    fn missing_type_is_wrong_type() {
        let err = parse_hbjson_str(r#"{"identifier": "m"}"#).unwrap_err();
        assert!(matches!(err, PhxError::WrongModelType { ref found } if found.is_empty()));
    }

    #[test]
    fn empty_model_parses() {
        let model = parse_hbjson_str(r#"{"type": "Model", "identifier": "m"}"#).unwrap();
        assert!(model.rooms.is_empty());
        assert_eq!(model.display_name(), "m");
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.hbjson");
        let err = read_hbjson_file(&path).unwrap_err();
        assert!(matches!(err, PhxError::SourceNotFound(p) if p == path));
    }
}
