use phx::model::mechanical::distribution::PhxDuctElement;

use super::PhppRow;
use crate::shape::DuctColumns;
use crate::xl::{CellValue, XlItem};

#[derive(Debug, Clone, PartialEq)]
pub struct DuctRow {
    pub description: String,
    pub quantity: u32,
    /// PHPP ID of the unit the duct serves.
    pub assigned_vent_unit: String,
    /// m
    pub length: f64,
    /// mm; round ducts only
    pub diameter: Option<f64>,
    /// mm; rectangular ducts only
    pub height: Option<f64>,
    pub width: Option<f64>,
    /// mm
    pub insulation_thickness: f64,
    pub insulation_conductivity: f64,
    pub insulation_reflective: bool,
}

impl DuctRow {
    pub fn new(duct: &PhxDuctElement, assigned_vent_unit: String) -> Self {
        let round = duct.is_round();
        Self {
            description: duct.display_name.clone(),
            quantity: duct.quantity,
            assigned_vent_unit,
            length: duct.length,
            diameter: round.then_some(duct.diameter),
            height: if round { None } else { duct.height },
            width: if round { None } else { duct.width },
            insulation_thickness: duct.insulation_thickness,
            insulation_conductivity: duct.insulation_conductivity,
            insulation_reflective: duct.insulation_reflective,
        }
    }
}

fn optional(value: Option<f64>) -> CellValue {
    value.map_or(CellValue::Empty, CellValue::Number)
}

impl PhppRow for DuctRow {
    type Columns = DuctColumns;

    fn description(&self) -> &str {
        &self.description
    }

    fn description_column(columns: &DuctColumns) -> &str {
        &columns.description
    }

    fn xl_items(&self, sheet: &str, row: u32, c: &DuctColumns) -> Vec<XlItem> {
        vec![
            XlItem::new(sheet, &c.description, row, self.description.as_str()),
            XlItem::new(sheet, &c.quantity, row, self.quantity),
            XlItem::new(sheet, &c.assigned_vent_unit, row, self.assigned_vent_unit.as_str()),
            XlItem::new(sheet, &c.length, row, self.length),
            XlItem::new(sheet, &c.diameter, row, optional(self.diameter)),
            XlItem::new(sheet, &c.height, row, optional(self.height)),
            XlItem::new(sheet, &c.width, row, optional(self.width)),
            XlItem::new(sheet, &c.insulation_thickness, row, self.insulation_thickness),
            XlItem::new(sheet, &c.insulation_conductivity, row, self.insulation_conductivity),
            XlItem::new(sheet, &c.insulation_reflective, row, self.insulation_reflective),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PhppShape;

    #[test]
    fn rectangular_duct_clears_the_diameter() {
        let duct = PhxDuctElement {
            id_num: 1,
            display_name: "Exhaust".into(),
            duct_type: Default::default(),
            length: 4.0,
            diameter: 160.0,
            height: Some(100.0),
            width: Some(200.0),
            insulation_thickness: 25.0,
            insulation_conductivity: 0.04,
            insulation_reflective: false,
            quantity: 1,
        };
        let row = DuctRow::new(&duct, "1-ERV".into());
        assert_eq!(row.diameter, None);

        let shape = PhppShape::english_10().unwrap();
        let items = row.xl_items("Additional Vent", 90, &shape.vent_ducts.columns);
        let value = |col: &str| items.iter().find(|i| i.cell.column == col).unwrap().value.clone();
        assert_eq!(value("H"), CellValue::Empty);
        assert_eq!(value("J"), CellValue::Number(200.0));
        assert_eq!(value("F"), CellValue::from("1-ERV"));
        assert_eq!(value("M"), CellValue::from("no"));
    }
}
