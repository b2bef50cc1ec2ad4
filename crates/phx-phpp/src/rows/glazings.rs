use phx::model::PhxConstructionWindow;

use super::PhppRow;
use crate::shape::GlazingColumns;
use crate::xl::XlItem;

#[derive(Debug, Clone, PartialEq)]
pub struct GlazingRow {
    pub description: String,
    pub g_value: f64,
    /// W/m²K
    pub u_value: f64,
}

impl GlazingRow {
    pub fn from_window_type(window: &PhxConstructionWindow) -> Self {
        Self {
            description: window.glazing_display_name().to_string(),
            g_value: window.glass_g_value,
            u_value: window.u_value_glass,
        }
    }
}

impl PhppRow for GlazingRow {
    type Columns = GlazingColumns;

    fn description(&self) -> &str {
        &self.description
    }

    fn description_column(columns: &GlazingColumns) -> &str {
        &columns.description
    }

    fn xl_items(&self, sheet: &str, row: u32, columns: &GlazingColumns) -> Vec<XlItem> {
        vec![
            XlItem::new(sheet, &columns.description, row, self.description.as_str()),
            XlItem::new(sheet, &columns.g_value, row, self.g_value),
            XlItem::new(sheet, &columns.u_value, row, self.u_value),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PhppShape;

    #[test]
    fn uses_the_glazing_name_when_present() {
        let mut window = PhxConstructionWindow::new(1, "w", "Triple");
        window.glazing_name = Some("4/16/4/16/4 Ar".into());
        window.glass_g_value = 0.52;
        let row = GlazingRow::from_window_type(&window);
        assert_eq!(row.description, "4/16/4/16/4 Ar");
        assert_eq!(row.g_value, 0.52);
    }

    #[test]
    fn glazing_cells() {
        let shape = PhppShape::english_10().unwrap();
        let row = GlazingRow {
            description: "Glazing A".into(),
            g_value: 0.5,
            u_value: 0.6,
        };
        let cells: Vec<String> = row
            .xl_items("Components", 12, &shape.glazings.columns)
            .iter()
            .map(|i| format!("{}!{} = {}", i.sheet, i.cell, i.value))
            .collect();
        insta::assert_snapshot!(cells.join("\n"), @r"
        Components!IE12 = Glazing A
        Components!IF12 = 0.5
        Components!IG12 = 0.6
        ");
    }
}
