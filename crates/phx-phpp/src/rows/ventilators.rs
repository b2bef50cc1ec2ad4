use phx::model::mechanical::PhxMechanicalDevice;
use phx::model::mechanical::ventilation::VentilatorParams;

use super::PhppRow;
use crate::shape::VentilatorColumns;
use crate::xl::XlItem;

/// A heat-recovery unit in the component library.
#[derive(Debug, Clone, PartialEq)]
pub struct VentilatorRow {
    pub description: String,
    pub params: VentilatorParams,
}

impl VentilatorRow {
    pub fn new(device: &PhxMechanicalDevice, params: &VentilatorParams) -> Self {
        Self {
            description: device.display_name.clone(),
            params: *params,
        }
    }
}

impl PhppRow for VentilatorRow {
    type Columns = VentilatorColumns;

    fn description(&self) -> &str {
        &self.description
    }

    fn description_column(columns: &VentilatorColumns) -> &str {
        &columns.description
    }

    fn xl_items(&self, sheet: &str, row: u32, c: &VentilatorColumns) -> Vec<XlItem> {
        let p = &self.params;
        vec![
            XlItem::new(sheet, &c.description, row, self.description.as_str()),
            XlItem::new(sheet, &c.sensible_heat_recovery, row, p.sensible_heat_recovery),
            XlItem::new(sheet, &c.latent_heat_recovery, row, p.latent_heat_recovery),
            XlItem::new(sheet, &c.electric_efficiency, row, p.electric_efficiency),
            XlItem::new(sheet, &c.frost_protection_reqd, row, p.frost_protection_reqd),
            XlItem::new(
                sheet,
                &c.temperature_below_defrost_used,
                row,
                p.temperature_below_defrost_used,
            ),
        ]
    }
}
