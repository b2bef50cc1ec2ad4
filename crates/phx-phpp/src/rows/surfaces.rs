use phx::model::building::ComponentExposureExterior;
use phx::model::{PhxComponent, PhxGraphics3D};

use super::PhppRow;
use crate::shape::SurfaceColumns;
use crate::xl::{CellValue, XlItem};

/// Area group numbers on the Areas sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceGroup {
    WallAmbient,
    WallGround,
    RoofAmbient,
    FloorSlab,
    Adiabatic,
}

impl SurfaceGroup {
    pub fn number(self) -> u32 {
        match self {
            Self::WallAmbient => 8,
            Self::WallGround => 9,
            Self::RoofAmbient => 10,
            Self::FloorSlab => 11,
            Self::Adiabatic => 18,
        }
    }

    /// Group of a surface with the given exposure whose normal makes
    /// `inclination_deg` with the vertical.
    pub fn classify(exposure: ComponentExposureExterior, inclination_deg: f64) -> Self {
        match exposure {
            ComponentExposureExterior::Surface => Self::Adiabatic,
            ComponentExposureExterior::Ground if inclination_deg >= 120.0 => Self::FloorSlab,
            ComponentExposureExterior::Ground => Self::WallGround,
            ComponentExposureExterior::Exterior if inclination_deg <= 60.0 => Self::RoofAmbient,
            ComponentExposureExterior::Exterior if inclination_deg >= 120.0 => Self::FloorSlab,
            ComponentExposureExterior::Exterior => Self::WallAmbient,
        }
    }
}

/// An opaque envelope surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceRow {
    pub description: String,
    pub group: SurfaceGroup,
    pub quantity: u32,
    /// m²
    pub area: f64,
    /// PHPP ID of the assembly on the U-Values sheet.
    pub assembly_id: Option<String>,
    pub angle_from_north: f64,
    pub angle_from_horizontal: f64,
}

impl SurfaceRow {
    /// Area is summed over the component's polygons. Orientation is read
    /// from the first one.
    pub fn from_component(
        component: &PhxComponent,
        graphics: &PhxGraphics3D,
        assembly_id: Option<String>,
    ) -> Self {
        let polygons: Vec<_> = component
            .polygon_ids
            .iter()
            .filter_map(|id| graphics.polygon_by_id(*id))
            .collect();
        let area = polygons.iter().map(|p| p.area()).sum();
        let (angle_from_north, angle_from_horizontal) = polygons
            .first()
            .map(|p| (p.cardinal_orientation_deg(), p.inclination_deg()))
            .unwrap_or_default();

        Self {
            description: component.display_name.clone(),
            group: SurfaceGroup::classify(component.exposure_exterior, angle_from_horizontal),
            quantity: 1,
            area,
            assembly_id,
            angle_from_north,
            angle_from_horizontal,
        }
    }
}

impl PhppRow for SurfaceRow {
    type Columns = SurfaceColumns;

    fn description(&self) -> &str {
        &self.description
    }

    fn description_column(columns: &SurfaceColumns) -> &str {
        &columns.description
    }

    fn xl_items(&self, sheet: &str, row: u32, c: &SurfaceColumns) -> Vec<XlItem> {
        let assembly = self
            .assembly_id
            .clone()
            .map_or(CellValue::Empty, CellValue::Text);
        vec![
            XlItem::new(sheet, &c.description, row, self.description.as_str()),
            XlItem::new(sheet, &c.group_number, row, self.group.number()),
            XlItem::new(sheet, &c.quantity, row, self.quantity),
            XlItem::new(sheet, &c.area, row, self.area),
            XlItem::new(sheet, &c.assembly_id, row, assembly),
            XlItem::new(sheet, &c.angle_from_north, row, self.angle_from_north),
            XlItem::new(sheet, &c.angle_from_horizontal, row, self.angle_from_horizontal),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_by_exposure_and_tilt() {
        use ComponentExposureExterior::*;
        assert_eq!(SurfaceGroup::classify(Exterior, 90.0), SurfaceGroup::WallAmbient);
        assert_eq!(SurfaceGroup::classify(Exterior, 0.0), SurfaceGroup::RoofAmbient);
        assert_eq!(SurfaceGroup::classify(Exterior, 180.0), SurfaceGroup::FloorSlab);
        assert_eq!(SurfaceGroup::classify(Ground, 180.0), SurfaceGroup::FloorSlab);
        assert_eq!(SurfaceGroup::classify(Ground, 90.0), SurfaceGroup::WallGround);
        assert_eq!(SurfaceGroup::classify(Surface, 0.0).number(), 18);
    }
}
