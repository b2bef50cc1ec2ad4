//! Typed view of the source JSON model.
//!
//! Only the parts the assembler reads are modelled; unknown fields are
//! ignored. Model-level libraries (materials, constructions, schedules,
//! HVAC and hot-water systems) are referenced from rooms by identifier.

pub mod energy;
pub mod geometry;
pub mod hvac;
pub mod ph;
pub mod schedule;

use serde::Deserialize;

pub use energy::{Construction, ConstructionSet, Material};
pub use geometry::{Aperture, BoundaryConditionKind, Face, FaceType, Room};
pub use hvac::{Hvac, Shw};
pub use schedule::Schedule;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelEnergyProperties {
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub constructions: Vec<Construction>,
    #[serde(default)]
    pub construction_sets: Vec<ConstructionSet>,
    /// Set used by rooms that name none, and for entries a room's set lacks.
    #[serde(default)]
    pub global_construction_set: Option<String>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub hvacs: Vec<Hvac>,
    #[serde(default)]
    pub shws: Vec<Shw>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelProperties {
    #[serde(default)]
    pub energy: ModelEnergyProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HbModel {
    #[serde(rename = "type")]
    pub kind: String,
    pub identifier: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub properties: ModelProperties,
}

impl HbModel {
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.identifier)
    }

    fn energy(&self) -> &ModelEnergyProperties {
        &self.properties.energy
    }

    pub fn material(&self, identifier: &str) -> Option<&Material> {
        self.energy()
            .materials
            .iter()
            .find(|m| m.identifier() == Some(identifier))
    }

    pub fn construction(&self, identifier: &str) -> Option<&Construction> {
        self.energy()
            .constructions
            .iter()
            .find(|c| c.identifier() == Some(identifier))
    }

    pub fn construction_set(&self, identifier: &str) -> Option<&ConstructionSet> {
        self.energy()
            .construction_sets
            .iter()
            .find(|c| c.identifier == identifier)
    }

    pub fn global_construction_set(&self) -> Option<&ConstructionSet> {
        self.energy()
            .global_construction_set
            .as_deref()
            .and_then(|id| self.construction_set(id))
    }

    pub fn schedule(&self, identifier: &str) -> Option<&Schedule> {
        self.energy()
            .schedules
            .iter()
            .find(|s| s.identifier() == Some(identifier))
    }

    pub fn hvac(&self, identifier: &str) -> Option<&Hvac> {
        self.energy().hvacs.iter().find(|h| h.identifier == identifier)
    }

    pub fn shw(&self, identifier: &str) -> Option<&Shw> {
        self.energy().shws.iter().find(|s| s.identifier == identifier)
    }
}
