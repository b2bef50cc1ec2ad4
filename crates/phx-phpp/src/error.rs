use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhppError {
    #[error(
        "Could not find '{anchor}' in column {column} of worksheet '{sheet}'. \
         Check that the workbook matches the selected PHPP shape."
    )]
    ShapeNotFound {
        sheet: String,
        column: String,
        anchor: String,
    },

    #[error(
        "Found '{anchor}' on row {header_row} of worksheet '{sheet}' but no entry \
         marker below it in column {column}"
    )]
    EntryRowNotFound {
        sheet: String,
        column: String,
        anchor: String,
        header_row: u32,
    },

    #[error("Invalid column letters '{0}'")]
    InvalidColumn(String),

    #[error("Column offset {offset} from '{column}' is out of range")]
    ColumnOutOfRange { column: String, offset: i64 },

    #[error("No free row left for '{description}' in block '{anchor}' of worksheet '{sheet}'")]
    BlockFull {
        sheet: String,
        anchor: String,
        description: String,
    },

    #[error("'{name}' is not listed in the PHPP {block} block")]
    NotListed { block: &'static str, name: String },

    #[error("Unknown worksheet '{0}'")]
    UnknownSheet(String),

    #[error("Invalid PHPP shape: {0}")]
    Shape(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PhppError>;
