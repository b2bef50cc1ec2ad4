//! Where each input block lives in a PHPP workbook.
//!
//! A shape is plain data, loaded from TOML so that localized or older
//! workbooks only need a new table. [`PhppShape::english_10`] is built in.

use serde::Deserialize;

use crate::error::Result;
use crate::xl::CellValue;

const ENGLISH_10: &str = include_str!("shapes/phpp_en_10.toml");

fn default_header_search_rows() -> u32 {
    100
}

fn default_entry_search_rows() -> u32 {
    25
}

/// Cell content marking the first entry row of a block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EntryMarker {
    Integer(i64),
    Text(String),
}

impl EntryMarker {
    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            Self::Integer(i) => value.as_number() == Some(*i as f64),
            Self::Text(s) => value.as_text().map(str::trim) == Some(s.as_str()),
        }
    }

    pub fn to_cell(&self) -> CellValue {
        match self {
            Self::Integer(i) => CellValue::Number(*i as f64),
            Self::Text(s) => CellValue::Text(s.clone()),
        }
    }
}

/// How to find a block: an anchor string in `header_col`, then the entry
/// marker in `entry_col` somewhere below it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockLocator {
    pub header_col: String,
    pub header_anchor: String,
    pub entry_col: String,
    pub entry_marker: EntryMarker,
    #[serde(default = "default_header_search_rows")]
    pub header_search_rows: u32,
    #[serde(default = "default_entry_search_rows")]
    pub entry_search_rows: u32,
}

/// A block of one-row records.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockShape<C> {
    pub sheet: String,
    pub locator: BlockLocator,
    /// Number of entry rows in the block.
    pub capacity: u32,
    pub columns: C,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SurfaceColumns {
    pub description: String,
    pub group_number: String,
    pub quantity: String,
    pub area: String,
    pub assembly_id: String,
    pub angle_from_north: String,
    pub angle_from_horizontal: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GlazingColumns {
    pub description: String,
    pub g_value: String,
    pub u_value: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrameColumns {
    pub description: String,
    pub u_value_left: String,
    pub u_value_right: String,
    pub u_value_bottom: String,
    pub u_value_top: String,
    pub width_left: String,
    pub width_right: String,
    pub width_bottom: String,
    pub width_top: String,
    pub psi_g_left: String,
    pub psi_g_right: String,
    pub psi_g_bottom: String,
    pub psi_g_top: String,
    pub psi_i_left: String,
    pub psi_i_right: String,
    pub psi_i_bottom: String,
    pub psi_i_top: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VentilatorColumns {
    pub description: String,
    pub sensible_heat_recovery: String,
    pub latent_heat_recovery: String,
    pub electric_efficiency: String,
    pub frost_protection_reqd: String,
    pub temperature_below_defrost_used: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VentRoomColumns {
    pub description: String,
    pub quantity: String,
    pub vent_unit_assigned: String,
    pub weighted_floor_area: String,
    pub clear_height: String,
    pub supply: String,
    pub extract: String,
    pub transfer: String,
    pub period_high_time: String,
    pub period_high_speed: String,
    pub period_standard_time: String,
    pub period_standard_speed: String,
    pub period_basic_time: String,
    pub period_basic_speed: String,
    pub period_minimum_time: String,
    pub period_minimum_speed: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VentUnitColumns {
    pub description: String,
    pub quantity: String,
    pub unit_selected: String,
    pub in_conditioned_space: String,
    pub frost_protection_reqd: String,
    pub temperature_below_defrost_used: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DuctColumns {
    pub description: String,
    pub quantity: String,
    pub assigned_vent_unit: String,
    pub length: String,
    pub diameter: String,
    pub height: String,
    pub width: String,
    pub insulation_thickness: String,
    pub insulation_conductivity: String,
    pub insulation_reflective: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UValueColumns {
    pub description: String,
    pub r_si: String,
    pub r_se: String,
    pub layer_material: String,
    pub layer_conductivity: String,
    pub layer_thickness: String,
}

/// The U-value sheet stacks one multi-row constructor per assembly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UValueShape {
    pub sheet: String,
    pub locator: BlockLocator,
    /// Number of constructors on the sheet.
    pub capacity: u32,
    /// Rows from one constructor's description to the next.
    pub stride: u32,
    pub r_si_offset: u32,
    pub r_se_offset: u32,
    pub first_layer_offset: u32,
    pub max_layers: u32,
    pub columns: UValueColumns,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindowColumns {
    pub description: String,
    pub quantity: String,
    pub width: String,
    pub height: String,
    pub host: String,
    pub glazing_id: String,
    pub frame_id: String,
    pub installed: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhppShape {
    pub name: String,
    pub surfaces: BlockShape<SurfaceColumns>,
    pub glazings: BlockShape<GlazingColumns>,
    pub frames: BlockShape<FrameColumns>,
    pub ventilators: BlockShape<VentilatorColumns>,
    pub vent_rooms: BlockShape<VentRoomColumns>,
    pub vent_units: BlockShape<VentUnitColumns>,
    pub vent_ducts: BlockShape<DuctColumns>,
    pub u_values: UValueShape,
    pub windows: BlockShape<WindowColumns>,
}

impl PhppShape {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// English PHPP 10.
    pub fn english_10() -> Result<Self> {
        Self::from_toml_str(ENGLISH_10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::col_index;

    #[test]
    fn built_in_shape_parses() {
        let shape = PhppShape::english_10().unwrap();
        assert_eq!(shape.frames.locator.header_col, "IK");
        assert_eq!(shape.frames.locator.header_anchor, "Window frames");
        assert_eq!(shape.frames.columns.description, "IL");
        assert_eq!(shape.frames.columns.psi_i_top, "JB");
        assert_eq!(shape.surfaces.locator.header_search_rows, 100);
        assert_eq!(shape.u_values.locator.entry_marker, EntryMarker::Text("01ud".into()));
    }

    #[test]
    fn frame_columns_are_contiguous() {
        let c = PhppShape::english_10().unwrap().frames.columns;
        let all = [
            &c.description,
            &c.u_value_left,
            &c.u_value_right,
            &c.u_value_bottom,
            &c.u_value_top,
            &c.width_left,
            &c.width_right,
            &c.width_bottom,
            &c.width_top,
            &c.psi_g_left,
            &c.psi_g_right,
            &c.psi_g_bottom,
            &c.psi_g_top,
            &c.psi_i_left,
            &c.psi_i_right,
            &c.psi_i_bottom,
            &c.psi_i_top,
        ];
        for pair in all.windows(2) {
            assert_eq!(col_index(pair[1]).unwrap(), col_index(pair[0]).unwrap() + 1);
        }
    }

    #[test]
    fn markers_match_numbers_and_text() {
        assert!(EntryMarker::Integer(1).matches(&CellValue::Number(1.0)));
        assert!(EntryMarker::Integer(1).matches(&CellValue::from("1")));
        assert!(!EntryMarker::Integer(1).matches(&CellValue::Number(2.0)));
        assert!(EntryMarker::Text("01ud".into()).matches(&CellValue::from(" 01ud")));
    }

    #[test]
    fn broken_shape_is_reported() {
        let err = PhppShape::from_toml_str("name = 3").unwrap_err();
        assert!(err.to_string().starts_with("Invalid PHPP shape"));
    }
}
