//! Passive-House exchange (PHX) model.
//!
//! A source building-energy model (rooms, faces, apertures, constructions,
//! schedules, HVAC and hot-water systems, with their Passive-House
//! extensions) is read with [`read_hbjson_file`] and assembled into a
//! [`PhxProject`] by [`convert_hbjson_model`]. The project is a plain tree
//! of records cross-referenced by integer IDs; output writers for the
//! simulator XML and the design spreadsheet live in their own crates.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let model = phx::read_hbjson_file(Path::new("house.hbjson"))?;
//! let project = phx::convert_hbjson_model(&model, &phx::AssemblyOptions::default())?;
//! println!("{} variant(s)", project.variants.len());
//! # Ok::<(), phx::PhxError>(())
//! ```

pub mod calc;
pub mod error;
pub mod from_hbjson;
pub mod hbjson;
pub mod ids;
pub mod model;
pub mod read;

pub use error::{PhxError, Result};
pub use from_hbjson::{AssemblyOptions, SourceIdMap, convert_hbjson_model, convert_hbjson_model_with};
pub use hbjson::HbModel;
pub use ids::{IdClass, IdRegistry};
pub use model::{PhxProject, PhxVariant};
pub use read::{parse_hbjson_str, read_hbjson_file};
