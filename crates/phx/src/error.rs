use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhxError {
    #[error("Source file not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a source document of type 'Model', got '{found}'")]
    WrongModelType { found: String },

    #[error("Unknown {kind} '{value}'. Expected one of: {}", .accepted.join(", "))]
    UnknownEnumeration {
        kind: &'static str,
        value: String,
        accepted: Vec<&'static str>,
    },

    #[error("'{entity}' is missing required attribute '{attribute}'")]
    MissingAttribute {
        entity: String,
        attribute: &'static str,
    },

    #[error("'{entity}' references unknown {kind} '{identifier}'")]
    UnresolvedReference {
        entity: String,
        kind: &'static str,
        identifier: String,
    },

    #[error("Invalid schedule '{identifier}': {reason}")]
    InvalidSchedule { identifier: String, reason: String },
}

impl PhxError {
    pub(crate) fn unknown(kind: &'static str, value: &str, accepted: &[&'static str]) -> Self {
        Self::UnknownEnumeration {
            kind,
            value: value.to_string(),
            accepted: accepted.to_vec(),
        }
    }

    pub(crate) fn missing(entity: &str, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            entity: entity.to_string(),
            attribute,
        }
    }
}

pub type Result<T> = std::result::Result<T, PhxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_enumeration_lists_accepted_values() {
        let err = PhxError::unknown("fuel type", "COAL", &["NATURAL_GAS", "OIL"]);
        assert_eq!(
            err.to_string(),
            "Unknown fuel type 'COAL'. Expected one of: NATURAL_GAS, OIL"
        );
    }

    #[test]
    fn missing_attribute_names_the_entity() {
        let err = PhxError::missing("Kitchen", "energy.shw");
        assert_eq!(
            err.to_string(),
            "'Kitchen' is missing required attribute 'energy.shw'"
        );
    }
}
