use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("No XML schema '{key}' for entity '{entity}'")]
    SchemaNotFound { entity: &'static str, key: String },

    #[error("XML schema '{key}' cannot write entity '{entity}'")]
    SchemaMismatch { entity: &'static str, key: &'static str },

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Emitted XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Target path has no file name: {}", .0.display())]
    InvalidTarget(PathBuf),
}

pub type Result<T> = std::result::Result<T, XmlError>;
