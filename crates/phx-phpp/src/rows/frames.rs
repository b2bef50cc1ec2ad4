use phx::model::PhxConstructionWindow;
use phx::model::constructions::WindowFrames;

use super::PhppRow;
use crate::shape::FrameColumns;
use crate::xl::XlItem;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    pub description: String,
    pub frames: WindowFrames,
}

impl FrameRow {
    pub fn from_window_type(window: &PhxConstructionWindow) -> Self {
        Self {
            description: window.frame_display_name().to_string(),
            frames: window.frames,
        }
    }
}

impl PhppRow for FrameRow {
    type Columns = FrameColumns;

    fn description(&self) -> &str {
        &self.description
    }

    fn description_column(columns: &FrameColumns) -> &str {
        &columns.description
    }

    fn xl_items(&self, sheet: &str, row: u32, c: &FrameColumns) -> Vec<XlItem> {
        let WindowFrames {
            top,
            right,
            bottom,
            left,
        } = self.frames;
        let item = |column: &str, value: f64| XlItem::new(sheet, column, row, value);
        vec![
            XlItem::new(sheet, &c.description, row, self.description.as_str()),
            item(&c.u_value_left, left.u_value),
            item(&c.u_value_right, right.u_value),
            item(&c.u_value_bottom, bottom.u_value),
            item(&c.u_value_top, top.u_value),
            item(&c.width_left, left.width),
            item(&c.width_right, right.width),
            item(&c.width_bottom, bottom.width),
            item(&c.width_top, top.width),
            item(&c.psi_g_left, left.psi_glazing),
            item(&c.psi_g_right, right.psi_glazing),
            item(&c.psi_g_bottom, bottom.psi_glazing),
            item(&c.psi_g_top, top.psi_glazing),
            item(&c.psi_i_left, left.psi_install),
            item(&c.psi_i_right, right.psi_install),
            item(&c.psi_i_bottom, bottom.psi_install),
            item(&c.psi_i_top, top.psi_install),
        ]
    }
}
