//! Energy properties of the source model: materials, constructions,
//! construction sets and per-room loads.

use serde::Deserialize;

use crate::calc::VentilationRates;
use crate::hbjson::geometry::{BoundaryConditionKind, FaceType};
use crate::hbjson::ph::{PhEquipment, PhWindowFrame, PhWindowGlazing};

#[derive(Debug, Clone, Deserialize)]
pub struct MassMaterial {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// m
    pub thickness: f64,
    /// W/mK
    pub conductivity: f64,
    /// kg/m³
    #[serde(default)]
    pub density: f64,
    /// J/kgK
    #[serde(default)]
    pub specific_heat: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoMassMaterial {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// m²K/W
    pub r_value: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleGlazingMaterial {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// W/m²K
    pub u_factor: f64,
    pub shgc: f64,
    #[serde(default)]
    pub vt: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Material {
    #[serde(rename = "EnergyMaterial")]
    Mass(MassMaterial),
    #[serde(rename = "EnergyMaterialNoMass")]
    NoMass(NoMassMaterial),
    #[serde(rename = "EnergyWindowMaterialSimpleGlazSys")]
    SimpleGlazing(SimpleGlazingMaterial),
    #[serde(other)]
    Unsupported,
}

impl Material {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Mass(m) => Some(&m.identifier),
            Self::NoMass(m) => Some(&m.identifier),
            Self::SimpleGlazing(m) => Some(&m.identifier),
            Self::Unsupported => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpaqueConstruction {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Material identifiers, outside to inside.
    pub materials: Vec<String>,
}

impl OpaqueConstruction {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowConstructionPh {
    #[serde(default)]
    pub ph_frame: Option<PhWindowFrame>,
    #[serde(default)]
    pub ph_glazing: Option<PhWindowGlazing>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowConstructionProperties {
    #[serde(default)]
    pub ph: WindowConstructionPh,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WindowConstruction {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub materials: Vec<String>,
    #[serde(default)]
    pub properties: WindowConstructionProperties,
}

impl WindowConstruction {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Construction {
    #[serde(rename = "OpaqueConstructionAbridged")]
    Opaque(OpaqueConstruction),
    #[serde(rename = "WindowConstructionAbridged")]
    Window(WindowConstruction),
    #[serde(other)]
    Unsupported,
}

impl Construction {
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Opaque(c) => Some(&c.identifier),
            Self::Window(c) => Some(&c.identifier),
            Self::Unsupported => None,
        }
    }
}

/// Constructions for one face type, by boundary condition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurfaceConstructionSet {
    #[serde(default)]
    pub exterior_construction: Option<String>,
    #[serde(default)]
    pub ground_construction: Option<String>,
    #[serde(default)]
    pub interior_construction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApertureConstructionSet {
    #[serde(default)]
    pub window_construction: Option<String>,
    #[serde(default)]
    pub operable_construction: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConstructionSet {
    pub identifier: String,
    #[serde(default)]
    pub wall_set: SurfaceConstructionSet,
    #[serde(default)]
    pub floor_set: SurfaceConstructionSet,
    #[serde(default)]
    pub roof_ceiling_set: SurfaceConstructionSet,
    #[serde(default)]
    pub aperture_set: ApertureConstructionSet,
}

impl ConstructionSet {
    /// Construction identifier a face of `face_type` facing `bc` receives
    /// when it names none itself.
    pub fn face_construction(&self, face_type: FaceType, bc: BoundaryConditionKind) -> Option<&str> {
        let set = match face_type {
            FaceType::Wall => &self.wall_set,
            FaceType::Floor => &self.floor_set,
            FaceType::RoofCeiling => &self.roof_ceiling_set,
            FaceType::AirBoundary => return None,
        };
        let id = match bc {
            BoundaryConditionKind::Outdoors => &set.exterior_construction,
            BoundaryConditionKind::Ground => &set.ground_construction,
            BoundaryConditionKind::Surface | BoundaryConditionKind::Adiabatic => {
                &set.interior_construction
            }
        };
        id.as_deref()
    }

    pub fn aperture_construction(&self, operable: bool) -> Option<&str> {
        let set = &self.aperture_set;
        if operable {
            set.operable_construction
                .as_deref()
                .or(set.window_construction.as_deref())
        } else {
            set.window_construction.as_deref()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaceEnergyProperties {
    #[serde(default)]
    pub construction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApertureEnergyProperties {
    #[serde(default)]
    pub construction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeoplePh {
    #[serde(default)]
    pub number_bedrooms: u32,
    #[serde(default)]
    pub number_people: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PeopleProperties {
    #[serde(default)]
    pub ph: Option<PeoplePh>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct People {
    pub identifier: String,
    pub people_per_area: f64,
    #[serde(default)]
    pub occupancy_schedule: Option<String>,
    #[serde(default)]
    pub properties: PeopleProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ventilation {
    pub identifier: String,
    /// m³/s
    #[serde(default)]
    pub flow_per_person: f64,
    /// m³/s·m²
    #[serde(default)]
    pub flow_per_area: f64,
    #[serde(default)]
    pub air_changes_per_hour: f64,
    /// m³/s
    #[serde(default)]
    pub flow_per_zone: f64,
    #[serde(default)]
    pub schedule: Option<String>,
}

impl Ventilation {
    pub fn rates(&self) -> VentilationRates {
        VentilationRates {
            flow_per_person: self.flow_per_person,
            flow_per_area: self.flow_per_area,
            air_changes_per_hour: self.air_changes_per_hour,
            flow_per_zone: self.flow_per_zone,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EquipmentCollection {
    #[serde(default)]
    pub equipment: Vec<PhEquipment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElectricEquipmentPh {
    #[serde(default)]
    pub equipment_collection: EquipmentCollection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElectricEquipmentProperties {
    #[serde(default)]
    pub ph: ElectricEquipmentPh,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElectricEquipment {
    pub identifier: String,
    #[serde(default)]
    pub watts_per_area: f64,
    #[serde(default)]
    pub properties: ElectricEquipmentProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomEnergyProperties {
    #[serde(default)]
    pub construction_set: Option<String>,
    #[serde(default)]
    pub hvac: Option<String>,
    #[serde(default)]
    pub shw: Option<String>,
    #[serde(default)]
    pub people: Option<People>,
    #[serde(default)]
    pub ventilation: Option<Ventilation>,
    #[serde(default)]
    pub electric_equipment: Option<ElectricEquipment>,
}
