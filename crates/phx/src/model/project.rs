use indexmap::IndexMap;

use crate::model::building::PhxBuilding;
use crate::model::certification::PhxPhBuildingData;
use crate::model::climate::PhxSite;
use crate::model::constructions::{PhxConstructionOpaque, PhxConstructionWindow};
use crate::model::geometry::PhxGraphics3D;
use crate::model::mechanical::PhxMechanicalSystemCollection;
use crate::model::schedules::UtilizationPatternCollectionVent;

/// Contact details of one party to the project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDataAgent {
    pub name: String,
    pub street: String,
    pub city: String,
    pub post_code: String,
    pub telephone: String,
    pub email: String,
    pub license_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxProjectData {
    pub customer: ProjectDataAgent,
    pub building: ProjectDataAgent,
    pub owner: ProjectDataAgent,
    pub designer: ProjectDataAgent,
    pub project_date: String,
    pub year_constructed: i32,
    pub owner_is_client: bool,
    pub image: Option<String>,
}

impl Default for PhxProjectData {
    fn default() -> Self {
        Self {
            customer: ProjectDataAgent::default(),
            building: ProjectDataAgent::default(),
            owner: ProjectDataAgent::default(),
            designer: ProjectDataAgent::default(),
            project_date: String::new(),
            year_constructed: 0,
            owner_is_client: false,
            image: None,
        }
    }
}

/// One design alternative: geometry, building, climate, certification and
/// mechanical equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct PhxVariant {
    pub id_num: u32,
    pub name: String,
    pub remarks: String,
    pub plugin: String,
    pub graphics3d: PhxGraphics3D,
    pub building: PhxBuilding,
    pub phius_cert: PhxPhBuildingData,
    pub site: PhxSite,
    pub mech_collections: Vec<PhxMechanicalSystemCollection>,
}

impl PhxVariant {
    pub fn new(id_num: u32, name: impl Into<String>) -> Self {
        Self {
            id_num,
            name: name.into(),
            remarks: String::new(),
            plugin: "Honeybee-PH".to_string(),
            graphics3d: PhxGraphics3D::default(),
            building: PhxBuilding::default(),
            phius_cert: PhxPhBuildingData::default(),
            site: PhxSite::default(),
            mech_collections: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxProject {
    pub data_version: i32,
    pub unit_system: i32,
    pub program_version: String,
    pub scope: i32,
    pub visualized_geometry: i32,
    pub project_data: PhxProjectData,
    pub variants: Vec<PhxVariant>,
    /// Opaque constructions keyed by source identifier.
    pub assembly_types: IndexMap<String, PhxConstructionOpaque>,
    /// Window constructions keyed by source identifier.
    pub window_types: IndexMap<String, PhxConstructionWindow>,
    pub utilization_patterns_ventilation: UtilizationPatternCollectionVent,
}

impl Default for PhxProject {
    fn default() -> Self {
        Self {
            data_version: 48,
            unit_system: 1,
            program_version: "3.2.0.1".to_string(),
            scope: 3,
            visualized_geometry: 2,
            project_data: PhxProjectData::default(),
            variants: Vec::new(),
            assembly_types: IndexMap::new(),
            window_types: IndexMap::new(),
            utilization_patterns_ventilation: UtilizationPatternCollectionVent::default(),
        }
    }
}

impl PhxProject {
    pub fn add_assembly_type(&mut self, construction: PhxConstructionOpaque) -> u32 {
        self.assembly_types
            .entry(construction.identifier.clone())
            .or_insert(construction)
            .id_num
    }

    pub fn add_window_type(&mut self, construction: PhxConstructionWindow) -> u32 {
        self.window_types
            .entry(construction.identifier.clone())
            .or_insert(construction)
            .id_num
    }

    pub fn assembly_by_id(&self, id_num: u32) -> Option<&PhxConstructionOpaque> {
        self.assembly_types.values().find(|c| c.id_num == id_num)
    }

    pub fn window_type_by_id(&self, id_num: u32) -> Option<&PhxConstructionWindow> {
        self.window_types.values().find(|c| c.id_num == id_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_maps_keep_first_entry() {
        let mut p = PhxProject::default();
        assert_eq!(p.add_assembly_type(PhxConstructionOpaque::new(1, "wall", "A")), 1);
        assert_eq!(p.add_assembly_type(PhxConstructionOpaque::new(2, "wall", "B")), 1);
        assert_eq!(p.assembly_types.len(), 1);
        assert_eq!(p.assembly_by_id(1).unwrap().display_name, "A");

        assert_eq!(p.add_window_type(PhxConstructionWindow::new(1, "win", "W")), 1);
        assert!(p.window_type_by_id(2).is_none());
    }
}
