use log::warn;
use phx::model::PhxPolygon;

use super::PhppRow;
use crate::shape::WindowColumns;
use crate::xl::{CellValue, XlItem};

/// A window opening. Dimensions in m.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRow {
    pub description: String,
    pub quantity: u32,
    pub width: f64,
    pub height: f64,
    /// PHPP ID of the host surface on the Areas sheet.
    pub host: Option<String>,
    pub glazing_id: String,
    pub frame_id: String,
}

impl WindowRow {
    /// A row for one aperture polygon. Non-rectangular apertures are
    /// entered as a square of equal area.
    pub fn from_polygon(
        polygon: &PhxPolygon,
        host: Option<String>,
        glazing_id: String,
        frame_id: String,
    ) -> Self {
        let (width, height) = match polygon.as_rectangular() {
            Some(rect) => (rect.width, rect.height),
            None => {
                warn!(
                    "Window '{}' is not rectangular; entering it as a square of equal area",
                    polygon.display_name
                );
                let side = polygon.area().sqrt();
                (side, side)
            }
        };
        Self {
            description: polygon.display_name.clone(),
            quantity: 1,
            width,
            height,
            host,
            glazing_id,
            frame_id,
        }
    }
}

impl PhppRow for WindowRow {
    type Columns = WindowColumns;

    fn description(&self) -> &str {
        &self.description
    }

    fn description_column(columns: &WindowColumns) -> &str {
        &columns.description
    }

    fn xl_items(&self, sheet: &str, row: u32, c: &WindowColumns) -> Vec<XlItem> {
        let host = self.host.clone().map_or(CellValue::Empty, CellValue::Text);
        vec![
            XlItem::new(sheet, &c.quantity, row, self.quantity),
            XlItem::new(sheet, &c.description, row, self.description.as_str()),
            XlItem::new(sheet, &c.width, row, self.width),
            XlItem::new(sheet, &c.height, row, self.height),
            XlItem::new(sheet, &c.host, row, host),
            XlItem::new(sheet, &c.glazing_id, row, self.glazing_id.as_str()),
            XlItem::new(sheet, &c.frame_id, row, self.frame_id.as_str()),
            XlItem::new(sheet, &c.installed, row, 1u32),
        ]
    }
}
