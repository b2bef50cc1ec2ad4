//! WUFI-Passive XML writer for PHX projects.
//!
//! Each PHX record type has a schema: a function listing the child elements
//! of the record in document order. The [`Emitter`] walks those schemas from
//! the project down and writes indented XML with `quick-xml`.
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn run(project: &phx::PhxProject) -> phx_wufi_xml::Result<()> {
//! let xml = phx_wufi_xml::project_to_xml_string(project)?;
//! phx_wufi_xml::write_xml_file(Path::new("out/house.xml"), &xml, &Default::default())?;
//! # Ok(())
//! # }
//! ```

pub mod emit;
pub mod error;
pub mod schema;
pub mod writable;
pub mod write;

use std::path::Path;

use phx::PhxProject;

pub use emit::{Emitter, ROOT_ELEMENT, project_to_xml_string};
pub use error::{Result, XmlError};
pub use schema::SchemaTable;
pub use writable::{Entity, Value, Writable};
pub use write::{WriteOptions, WriteReport, timestamped_path, write_xml_file};

/// Serialize `project` and write it to `path`.
pub fn write_project(project: &PhxProject, path: &Path, options: &WriteOptions) -> Result<WriteReport> {
    let xml = project_to_xml_string(project)?;
    write_xml_file(path, &xml, options)
}
