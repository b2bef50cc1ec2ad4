//! Row builders: one PHPP input row from one PHX record.
//!
//! Each builder owns the values it writes, already resolved to what the
//! workbook expects (PHPP IDs instead of PHX ID numbers, mm instead of m
//! where PHPP asks for it), and turns them into cell writes for a row.

mod ducts;
mod frames;
mod glazings;
mod surfaces;
mod u_values;
mod vent_rooms;
mod vent_units;
mod ventilators;
mod windows;

pub use ducts::DuctRow;
pub use frames::FrameRow;
pub use glazings::GlazingRow;
pub use surfaces::{SurfaceGroup, SurfaceRow};
pub use u_values::{UValueConstructor, UValueLayer};
pub use vent_rooms::VentRoomRow;
pub use vent_units::VentUnitRow;
pub use ventilators::VentilatorRow;
pub use windows::WindowRow;

use crate::xl::XlItem;

/// A record written to one row of a block.
pub trait PhppRow {
    type Columns;

    /// Text matched against the block's description column when choosing
    /// which row to overwrite.
    fn description(&self) -> &str;

    fn description_column(columns: &Self::Columns) -> &str;

    fn xl_items(&self, sheet: &str, row: u32, columns: &Self::Columns) -> Vec<XlItem>;
}
