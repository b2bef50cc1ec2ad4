//! Schema table: entity type name to the ordered writables of its element.
//!
//! Every schema is a plain function from an [`Entity`] to its children.
//! The emitter looks schemas up by the entity's type name, or by the
//! override an [`object_as`](crate::writable::object_as) carries, so one
//! record can be written in more than one shape.

/// Pull the record out of `$entity`, or fail with `SchemaMismatch`.
macro_rules! expect_entity {
    ($entity:expr, $variant:ident, $key:expr) => {
        match $entity {
            $crate::writable::Entity::$variant(inner) => *inner,
            other => {
                return Err($crate::error::XmlError::SchemaMismatch {
                    entity: other.type_name(),
                    key: $key,
                });
            }
        }
    };
}

mod building;
mod climate;
mod constructions;
mod geometry;
mod hvac;
mod project;

use crate::error::Result;
use crate::writable::{Entity, Writable};

pub type SchemaFn = for<'a> fn(&Entity<'a>) -> Result<Vec<Writable<'a>>>;

static WUFI_SCHEMAS: &[(&str, SchemaFn)] = &[
    ("PhxProject", project::project as SchemaFn),
    ("PhxProjectData", project::project_data),
    ("UtilizationPatternVent", project::vent_pattern),
    ("PhxVariant", project::variant),
    ("PhxVariant_HVAC", hvac::variant_hvac),
    ("PhxGraphics3D", geometry::graphics3d),
    ("PhxVertex", geometry::vertex),
    ("PhxPolygon", geometry::polygon),
    ("PhxBuilding", building::building),
    ("PhxComponent", building::component),
    ("PhxZone", building::zone),
    ("PhxRoomVentilation", building::room_ventilation),
    ("PhxElectricalDevice", building::home_device),
    ("PhxConstructionOpaque", constructions::assembly),
    ("PhxLayer", constructions::layer),
    ("PhxLayer_Material", constructions::material),
    ("PhxConstructionWindow", constructions::window_type),
    ("PhxSite", climate::site),
    ("PhxSite_PH_ClimateLocation", climate::ph_climate_location),
    ("PhxPhBuildingData", climate::passivehouse_data),
    ("PhxPhBuildingData_PH_Building", climate::ph_building),
    ("PhxMechanicalSystemCollection", hvac::system),
    ("PhxMechanicalSystemCollection_PHDistribution", hvac::distribution),
    ("PhxZoneCoverage", hvac::zone_coverage),
    ("PhxMechanicalSubsystem", hvac::device),
    ("PhxMechanicalSubsystem_Ventilation", hvac::ventilation),
    ("PhxMechanicalSubsystem_PH_Parameters", hvac::ph_parameters),
    ("PhxDuctElement", hvac::duct),
    ("PhxPipeElement", hvac::pipe),
];

#[derive(Debug, Clone, Copy)]
pub struct SchemaTable {
    entries: &'static [(&'static str, SchemaFn)],
}

impl SchemaTable {
    /// Schemas of the WUFI-Passive project file.
    pub fn wufi() -> Self {
        Self {
            entries: WUFI_SCHEMAS,
        }
    }

    pub fn get(&self, key: &str) -> Option<SchemaFn> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, f)| *f)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        self.entries.iter().map(|(k, _)| *k)
    }
}

impl Default for SchemaTable {
    fn default() -> Self {
        Self::wufi()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use phx::model::geometry::PhxVertex;

    use super::*;
    use crate::error::XmlError;

    #[test]
    fn keys_are_unique() {
        let table = SchemaTable::wufi();
        let keys: HashSet<_> = table.keys().collect();
        assert_eq!(keys.len(), table.keys().count());
    }

    #[test]
    fn every_entity_has_a_default_schema() {
        let table = SchemaTable::wufi();
        for key in [
            "PhxProject",
            "PhxVariant",
            "PhxPolygon",
            "PhxComponent",
            "PhxZone",
            "PhxMechanicalSubsystem",
            "PhxDuctElement",
        ] {
            assert!(table.get(key).is_some(), "{key}");
        }
    }

    #[test]
    fn schema_rejects_the_wrong_entity() {
        let vertex = PhxVertex {
            id_num: 1,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        };
        let schema = SchemaTable::wufi().get("PhxPolygon").unwrap();
        let err = schema(&Entity::Vertex(&vertex)).unwrap_err();
        assert!(matches!(
            err,
            XmlError::SchemaMismatch {
                entity: "PhxVertex",
                key: "PhxPolygon"
            }
        ));
    }
}
