use phx::model::loads::PhxRoomVentilation;
use phx::model::schedules::VentOperatingPeriods;

use super::PhppRow;
use crate::shape::VentRoomColumns;
use crate::xl::{CellValue, XlItem};

#[derive(Debug, Clone, PartialEq)]
pub struct VentRoomRow {
    pub description: String,
    pub quantity: u32,
    /// PHPP ID of the serving unit, if any.
    pub vent_unit: Option<String>,
    pub weighted_floor_area: f64,
    pub clear_height: f64,
    /// m³/h
    pub supply: f64,
    pub extract: f64,
    pub transfer: f64,
    pub periods: VentOperatingPeriods,
}

impl VentRoomRow {
    /// Rooms without a utilization pattern run at full speed all day.
    pub fn new(
        room: &PhxRoomVentilation,
        vent_unit: Option<String>,
        periods: Option<&VentOperatingPeriods>,
    ) -> Self {
        Self {
            description: room.display_name.clone(),
            quantity: room.quantity,
            vent_unit,
            weighted_floor_area: room.weighted_floor_area,
            clear_height: room.clear_height,
            supply: room.flows.supply,
            extract: room.flows.extract,
            transfer: room.flows.transfer,
            periods: periods.copied().unwrap_or_else(VentOperatingPeriods::constant_full),
        }
    }
}

impl PhppRow for VentRoomRow {
    type Columns = VentRoomColumns;

    fn description(&self) -> &str {
        &self.description
    }

    fn description_column(columns: &VentRoomColumns) -> &str {
        &columns.description
    }

    fn xl_items(&self, sheet: &str, row: u32, c: &VentRoomColumns) -> Vec<XlItem> {
        let unit = self
            .vent_unit
            .clone()
            .map_or(CellValue::Empty, CellValue::Text);
        let p = &self.periods;
        let mut items = vec![
            XlItem::new(sheet, &c.description, row, self.description.as_str()),
            XlItem::new(sheet, &c.quantity, row, self.quantity),
            XlItem::new(sheet, &c.vent_unit_assigned, row, unit),
            XlItem::new(sheet, &c.weighted_floor_area, row, self.weighted_floor_area),
            XlItem::new(sheet, &c.clear_height, row, self.clear_height),
            XlItem::new(sheet, &c.supply, row, self.supply),
            XlItem::new(sheet, &c.extract, row, self.extract),
            XlItem::new(sheet, &c.transfer, row, self.transfer),
        ];
        let periods = [
            (&c.period_high_time, &c.period_high_speed, &p.high),
            (&c.period_standard_time, &c.period_standard_speed, &p.standard),
            (&c.period_basic_time, &c.period_basic_speed, &p.basic),
            (&c.period_minimum_time, &c.period_minimum_speed, &p.minimum),
        ];
        for (time_col, speed_col, period) in periods {
            items.push(XlItem::new(sheet, time_col, row, period.period_operating_hours));
            items.push(XlItem::new(sheet, speed_col, row, period.period_operation_speed));
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::PhppShape;

    #[test]
    fn unassigned_room_leaves_the_unit_cell_empty() {
        let shape = PhppShape::english_10().unwrap();
        let mut room = PhxRoomVentilation::new(1, "Bedroom");
        room.flows.supply = 30.0;
        let row = VentRoomRow::new(&room, None, None);
        let items = row.xl_items("Additional Vent", 40, &shape.vent_rooms.columns);

        let unit = items.iter().find(|i| i.cell.column == "F").unwrap();
        assert_eq!(unit.value, CellValue::Empty);
        let supply = items.iter().find(|i| i.cell.column == "J").unwrap();
        assert_eq!(supply.value.as_number(), Some(30.0));
        let high_hours = items.iter().find(|i| i.cell.column == "N").unwrap();
        assert_eq!(
            high_hours.value.as_number(),
            Some(VentOperatingPeriods::constant_full().high.period_operating_hours)
        );
    }
}
