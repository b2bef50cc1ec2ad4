//! Rooms, faces and apertures of the source model.

use glam::DVec3;
use serde::Deserialize;

use crate::error::{PhxError, Result};
use crate::hbjson::energy::{ApertureEnergyProperties, FaceEnergyProperties, RoomEnergyProperties};
use crate::hbjson::ph::RoomPhProperties;
use crate::model::geometry::{newell_normal, polygon_area, shell_volume};

#[derive(Debug, Clone, Deserialize)]
pub struct Face3D {
    pub boundary: Vec<[f64; 3]>,
}

impl Face3D {
    pub fn points(&self) -> Vec<DVec3> {
        self.boundary.iter().map(|p| DVec3::from_array(*p)).collect()
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.points())
    }

    pub fn normal(&self) -> DVec3 {
        newell_normal(&self.points())
    }
}

/// A line given by start point `p` and direction vector `v`.
#[derive(Debug, Clone, Deserialize)]
pub struct LineSegment3D {
    pub p: [f64; 3],
    pub v: [f64; 3],
}

impl LineSegment3D {
    pub fn length(&self) -> f64 {
        DVec3::from_array(self.v).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryConditionKind {
    Outdoors,
    Ground,
    Surface,
    Adiabatic,
}

impl BoundaryConditionKind {
    pub const ACCEPTED: &'static [&'static str] = &["Outdoors", "Ground", "Surface", "Adiabatic"];

    /// Faces that bound the building envelope rather than another room.
    pub fn is_exposed(self) -> bool {
        !matches!(self, Self::Surface)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryCondition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub boundary_condition_objects: Vec<String>,
}

impl BoundaryCondition {
    pub fn parse_kind(&self) -> Result<BoundaryConditionKind> {
        match self.kind.as_str() {
            "Outdoors" => Ok(BoundaryConditionKind::Outdoors),
            "Ground" => Ok(BoundaryConditionKind::Ground),
            "Surface" => Ok(BoundaryConditionKind::Surface),
            "Adiabatic" => Ok(BoundaryConditionKind::Adiabatic),
            other => Err(PhxError::unknown(
                "boundary condition",
                other,
                BoundaryConditionKind::ACCEPTED,
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FaceType {
    Wall,
    Floor,
    RoofCeiling,
    AirBoundary,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApertureProperties {
    #[serde(default)]
    pub energy: ApertureEnergyProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Aperture {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub geometry: Face3D,
    pub boundary_condition: BoundaryCondition,
    #[serde(default)]
    pub is_operable: bool,
    #[serde(default)]
    pub properties: ApertureProperties,
}

impl Aperture {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FaceProperties {
    #[serde(default)]
    pub energy: FaceEnergyProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Face {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub geometry: Face3D,
    pub face_type: FaceType,
    pub boundary_condition: BoundaryCondition,
    #[serde(default)]
    pub apertures: Vec<Aperture>,
    #[serde(default)]
    pub properties: FaceProperties,
}

impl Face {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    /// Opaque area: face area less its apertures.
    pub fn net_area(&self) -> f64 {
        let openings: f64 = self.apertures.iter().map(|a| a.geometry.area()).sum();
        (self.geometry.area() - openings).max(0.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomProperties {
    #[serde(default)]
    pub energy: RoomEnergyProperties,
    #[serde(default)]
    pub ph: RoomPhProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Room {
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub faces: Vec<Face>,
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    #[serde(default)]
    pub properties: RoomProperties,
}

fn default_multiplier() -> u32 {
    1
}

impl Room {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    pub fn floor_area(&self) -> f64 {
        self.faces
            .iter()
            .filter(|f| f.face_type == FaceType::Floor)
            .map(|f| f.geometry.area())
            .sum()
    }

    /// Volume enclosed by the room's faces.
    pub fn volume(&self) -> f64 {
        let loops: Vec<Vec<DVec3>> = self.faces.iter().map(|f| f.geometry.points()).collect();
        shell_volume(loops.iter().map(Vec::as_slice))
    }

    /// Mean floor-to-ceiling height, `None` for a room without floors.
    pub fn average_height(&self) -> Option<f64> {
        let area = self.floor_area();
        (area > 0.0).then(|| self.volume() / area)
    }

    pub fn segment_identifier(&self) -> Option<&str> {
        self.properties
            .ph
            .ph_bldg_segment
            .as_ref()
            .map(|s| s.identifier.as_str())
    }
}
