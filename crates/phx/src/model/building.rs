use crate::model::elec_equip::PhxElectricDeviceCollection;
use crate::model::loads::PhxRoomVentilation;

/// Marker used in cross-reference fields that point at nothing.
pub const NO_REFERENCE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentFaceOpacity {
    Opaque,
    Transparent,
    AirBoundary,
}

impl ComponentFaceOpacity {
    pub fn code(self) -> i32 {
        match self {
            Self::Opaque => 1,
            Self::Transparent => 2,
            Self::AirBoundary => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentExposureExterior {
    Exterior,
    Ground,
    Surface,
}

impl ComponentExposureExterior {
    pub fn code(self) -> i32 {
        match self {
            Self::Exterior => -1,
            Self::Ground => -2,
            Self::Surface => -3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentColor {
    ExtWallInner,
    InnerWall,
    Window,
    ExtWallOuter,
    SlopedRoofOuter,
    FlatRoofOuter,
    FloorSlab,
    SurfaceGroundContact,
    AdiabaticWallOuter,
}

impl ComponentColor {
    pub fn code(self) -> i32 {
        match self {
            Self::ExtWallInner => 1,
            Self::InnerWall => 2,
            Self::Window => 4,
            Self::ExtWallOuter => 10,
            Self::SlopedRoofOuter => 11,
            Self::FlatRoofOuter => 12,
            Self::FloorSlab => 13,
            Self::SurfaceGroundContact => 14,
            Self::AdiabaticWallOuter => 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxComponent {
    pub id_num: u32,
    pub display_name: String,
    pub face_opacity: ComponentFaceOpacity,
    pub color_interior: ComponentColor,
    pub color_exterior: ComponentColor,
    pub exposure_exterior: ComponentExposureExterior,
    /// Zone the component bounds (its own zone, or a neighbour's).
    pub exposure_interior: i32,
    pub interior_attachment_id: i32,
    /// Opaque construction ID, or [`NO_REFERENCE`] when transparent.
    pub assembly_type_id_num: i32,
    /// Window construction ID, or [`NO_REFERENCE`] when not transparent.
    pub window_type_id_num: i32,
    pub polygon_ids: Vec<u32>,
}

impl PhxComponent {
    pub fn is_transparent(&self) -> bool {
        self.face_opacity == ComponentFaceOpacity::Transparent
    }
}

/// Default specific heat capacities in Wh/m²K.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SpecificHeatCapacity {
    #[default]
    Lightweight,
    Mixed,
    Massive,
    UserDefined(f64),
}

impl SpecificHeatCapacity {
    pub fn selection_code(self) -> i32 {
        match self {
            Self::Lightweight => 1,
            Self::Mixed => 2,
            Self::Massive => 3,
            Self::UserDefined(_) => 6,
        }
    }

    pub fn wh_per_m2k(self) -> f64 {
        match self {
            Self::Lightweight => 60.0,
            Self::Mixed => 132.0,
            Self::Massive => 204.0,
            Self::UserDefined(v) => v,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxZone {
    pub id_num: u32,
    pub display_name: String,
    pub volume_gross: f64,
    pub volume_net: f64,
    pub weighted_net_floor_area: f64,
    pub clearance_height: f64,
    pub specific_heat_capacity: SpecificHeatCapacity,
    pub res_occupant_quantity: f64,
    pub res_number_bedrooms: u32,
    pub wufi_rooms: Vec<PhxRoomVentilation>,
    pub elec_equipment: PhxElectricDeviceCollection,
}

impl PhxZone {
    pub fn new(id_num: u32, display_name: impl Into<String>) -> Self {
        Self {
            id_num,
            display_name: display_name.into(),
            volume_gross: 0.0,
            volume_net: 0.0,
            weighted_net_floor_area: 0.0,
            clearance_height: 2.5,
            specific_heat_capacity: SpecificHeatCapacity::default(),
            res_occupant_quantity: 0.0,
            res_number_bedrooms: 0,
            wufi_rooms: Vec::new(),
            elec_equipment: PhxElectricDeviceCollection::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhxBuilding {
    pub components: Vec<PhxComponent>,
    pub zones: Vec<PhxZone>,
}

impl PhxBuilding {
    pub fn opaque_components(&self) -> impl Iterator<Item = &PhxComponent> {
        self.components.iter().filter(|c| !c.is_transparent())
    }

    pub fn aperture_components(&self) -> impl Iterator<Item = &PhxComponent> {
        self.components.iter().filter(|c| c.is_transparent())
    }

    pub fn ventilation_rooms(&self) -> impl Iterator<Item = &PhxRoomVentilation> {
        self.zones.iter().flat_map(|z| z.wufi_rooms.iter())
    }

    pub fn weighted_net_floor_area(&self) -> f64 {
        self.zones.iter().map(|z| z.weighted_net_floor_area).sum()
    }

    pub fn net_volume(&self) -> f64 {
        self.zones.iter().map(|z| z.volume_net).sum()
    }
}
