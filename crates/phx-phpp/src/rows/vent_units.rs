use phx::model::mechanical::PhxMechanicalDevice;
use phx::model::mechanical::ventilation::VentilatorParams;

use super::PhppRow;
use crate::shape::VentUnitColumns;
use crate::xl::XlItem;

/// An installed ventilation unit on the Additional Vent sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct VentUnitRow {
    pub description: String,
    pub quantity: u32,
    /// PHPP ID of the unit type in the component library.
    pub unit_selected: String,
    pub in_conditioned_space: bool,
    pub frost_protection_reqd: bool,
    pub temperature_below_defrost_used: f64,
}

impl VentUnitRow {
    pub fn new(device: &PhxMechanicalDevice, params: &VentilatorParams, unit_selected: String) -> Self {
        Self {
            description: device.display_name.clone(),
            quantity: params.quantity,
            unit_selected,
            in_conditioned_space: params.in_conditioned_space,
            frost_protection_reqd: params.frost_protection_reqd,
            temperature_below_defrost_used: params.temperature_below_defrost_used,
        }
    }
}

impl PhppRow for VentUnitRow {
    type Columns = VentUnitColumns;

    fn description(&self) -> &str {
        &self.description
    }

    fn description_column(columns: &VentUnitColumns) -> &str {
        &columns.description
    }

    fn xl_items(&self, sheet: &str, row: u32, c: &VentUnitColumns) -> Vec<XlItem> {
        vec![
            XlItem::new(sheet, &c.description, row, self.description.as_str()),
            XlItem::new(sheet, &c.quantity, row, self.quantity),
            XlItem::new(sheet, &c.unit_selected, row, self.unit_selected.as_str()),
            XlItem::new(sheet, &c.in_conditioned_space, row, self.in_conditioned_space),
            XlItem::new(sheet, &c.frost_protection_reqd, row, self.frost_protection_reqd),
            XlItem::new(
                sheet,
                &c.temperature_below_defrost_used,
                row,
                self.temperature_below_defrost_used,
            ),
        ]
    }
}
