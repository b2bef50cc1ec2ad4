//! The writable tree handed from schemas to the emitter.
//!
//! A schema turns one entity into an ordered list of [`Writable`]s. Nodes
//! carry a scalar, lists wrap child writables in a parent element, and
//! objects defer to the schema of another entity.

use phx::model::building::{PhxBuilding, PhxComponent, PhxZone};
use phx::model::certification::PhxPhBuildingData;
use phx::model::climate::PhxSite;
use phx::model::constructions::{PhxConstructionOpaque, PhxConstructionWindow, PhxLayer};
use phx::model::elec_equip::PhxElectricalDevice;
use phx::model::geometry::{PhxGraphics3D, PhxPolygon, PhxVertex};
use phx::model::loads::PhxRoomVentilation;
use phx::model::mechanical::distribution::{PhxDuctElement, PhxPipeElement};
use phx::model::mechanical::{PhxMechanicalSubsystem, PhxMechanicalSystemCollection, PhxZoneCoverage};
use phx::model::project::{PhxProject, PhxProjectData, PhxVariant};
use phx::model::schedules::UtilizationPatternVent;

/// Scalar content of a node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => format_float(*f),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// Shortest representation that reads back to the same value, keeping a
/// `.0` on whole numbers so floats stay distinguishable from integers.
/// Negative zero prints as `0.0`.
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        return "0.0".to_string();
    }
    if value.is_finite() && value.fract() == 0.0 {
        return format!("{value:.1}");
    }
    format!("{value}")
}

/// `value` rounded to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i.into())
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Int(i.into())
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Self::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub name: &'static str,
    pub value: String,
}

impl Attr {
    pub fn new(name: &'static str, value: impl ToString) -> Self {
        Self {
            name,
            value: value.to_string(),
        }
    }
}

/// A PHX record a schema knows how to write.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Project(&'a PhxProject),
    ProjectData(&'a PhxProjectData),
    VentPattern(&'a UtilizationPatternVent),
    Variant(&'a PhxVariant),
    Graphics3D(&'a PhxGraphics3D),
    Vertex(&'a PhxVertex),
    Polygon(&'a PhxPolygon),
    Building(&'a PhxBuilding),
    Component(&'a PhxComponent),
    Zone(&'a PhxZone),
    RoomVentilation(&'a PhxRoomVentilation),
    HomeDevice(&'a PhxElectricalDevice),
    Assembly(&'a PhxConstructionOpaque),
    Layer(&'a PhxLayer),
    WindowType(&'a PhxConstructionWindow),
    Site(&'a PhxSite),
    Certification(&'a PhxPhBuildingData),
    MechCollection(&'a PhxMechanicalSystemCollection),
    ZoneCoverage(&'a PhxZoneCoverage),
    Subsystem(&'a PhxMechanicalSubsystem),
    /// A duct and the ventilation unit it serves.
    Duct(&'a PhxDuctElement, u32),
    Pipe(&'a PhxPipeElement),
}

impl Entity<'_> {
    /// Default schema key of this entity.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Project(_) => "PhxProject",
            Self::ProjectData(_) => "PhxProjectData",
            Self::VentPattern(_) => "UtilizationPatternVent",
            Self::Variant(_) => "PhxVariant",
            Self::Graphics3D(_) => "PhxGraphics3D",
            Self::Vertex(_) => "PhxVertex",
            Self::Polygon(_) => "PhxPolygon",
            Self::Building(_) => "PhxBuilding",
            Self::Component(_) => "PhxComponent",
            Self::Zone(_) => "PhxZone",
            Self::RoomVentilation(_) => "PhxRoomVentilation",
            Self::HomeDevice(_) => "PhxElectricalDevice",
            Self::Assembly(_) => "PhxConstructionOpaque",
            Self::Layer(_) => "PhxLayer",
            Self::WindowType(_) => "PhxConstructionWindow",
            Self::Site(_) => "PhxSite",
            Self::Certification(_) => "PhxPhBuildingData",
            Self::MechCollection(_) => "PhxMechanicalSystemCollection",
            Self::ZoneCoverage(_) => "PhxZoneCoverage",
            Self::Subsystem(_) => "PhxMechanicalSubsystem",
            Self::Duct(..) => "PhxDuctElement",
            Self::Pipe(_) => "PhxPipeElement",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Writable<'a> {
    Node {
        name: &'static str,
        value: Value,
        attr: Option<Attr>,
    },
    List {
        name: &'static str,
        items: Vec<Writable<'a>>,
        attr: Option<Attr>,
    },
    Object {
        name: &'static str,
        entity: Entity<'a>,
        /// Overrides the entity's own schema key.
        schema: Option<&'static str>,
        attr: Option<Attr>,
    },
}

impl<'a> Writable<'a> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Node { name, .. } | Self::List { name, .. } | Self::Object { name, .. } => name,
        }
    }

    pub fn attr(&self) -> Option<&Attr> {
        match self {
            Self::Node { attr, .. } | Self::List { attr, .. } | Self::Object { attr, .. } => {
                attr.as_ref()
            }
        }
    }

    /// Set the attribute unless one is already present.
    fn with_default_attr(mut self, default: Attr) -> Self {
        let slot = match &mut self {
            Self::Node { attr, .. } | Self::List { attr, .. } | Self::Object { attr, .. } => attr,
        };
        slot.get_or_insert(default);
        self
    }
}

pub fn node<'a>(name: &'static str, value: impl Into<Value>) -> Writable<'a> {
    Writable::Node {
        name,
        value: value.into(),
        attr: None,
    }
}

/// Node with a `unit` attribute.
pub fn node_unit<'a>(name: &'static str, value: impl Into<Value>, unit: &'static str) -> Writable<'a> {
    Writable::Node {
        name,
        value: value.into(),
        attr: Some(Attr::new("unit", unit)),
    }
}

/// Node with a `choice` attribute naming the selected option.
pub fn node_choice<'a>(name: &'static str, value: impl Into<Value>, choice: &str) -> Writable<'a> {
    Writable::Node {
        name,
        value: value.into(),
        attr: Some(Attr::new("choice", choice)),
    }
}

/// List element with `count` set to the number of items. Items without an
/// attribute of their own get `index` set to their position.
pub fn list<'a>(name: &'static str, items: impl IntoIterator<Item = Writable<'a>>) -> Writable<'a> {
    let items: Vec<Writable<'a>> = items
        .into_iter()
        .enumerate()
        .map(|(i, item)| item.with_default_attr(Attr::new("index", i)))
        .collect();
    Writable::List {
        name,
        attr: Some(Attr::new("count", items.len())),
        items,
    }
}

pub fn object<'a>(name: &'static str, entity: Entity<'a>) -> Writable<'a> {
    Writable::Object {
        name,
        entity,
        schema: None,
        attr: None,
    }
}

/// Object written with the schema `schema` instead of the entity's own.
pub fn object_as<'a>(name: &'static str, entity: Entity<'a>, schema: &'static str) -> Writable<'a> {
    Writable::Object {
        name,
        entity,
        schema: Some(schema),
        attr: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_render_like_the_simulator_expects() {
        assert_eq!(Value::from(true).render(), "true");
        assert_eq!(Value::from(-1).render(), "-1");
        assert_eq!(Value::from(0.84).render(), "0.84");
        assert_eq!(Value::from(3.0).render(), "3.0");
        assert_eq!(Value::from(-12.0).render(), "-12.0");
        assert_eq!(Value::from(2.5e-5).render(), "0.000025");
        assert_eq!(Value::from(-0.0).render(), "0.0");
        assert_eq!(Value::from(3).render(), "3");
        assert_eq!(Value::from("a&b").render(), "a&b");
    }

    #[test]
    fn rounding() {
        assert_eq!(round_to(57.6049, 2), 57.6);
        assert_eq!(round_to(12.345678, 2), 12.35);
    }

    #[test]
    fn list_counts_and_indexes_items() {
        let l = list("IdentNrPoints", [node("IdentNr", 4u32), node("IdentNr", 5u32)]);
        let Writable::List { items, attr, .. } = &l else {
            panic!("expected a list");
        };
        assert_eq!(attr.as_ref().unwrap(), &Attr::new("count", 2));
        assert_eq!(items[1].attr().unwrap(), &Attr::new("index", 1));
    }

    #[test]
    fn list_keeps_existing_item_attributes() {
        let l = list("Items", [node_unit("Item", 1.0, "m")]);
        let Writable::List { items, .. } = &l else {
            panic!("expected a list");
        };
        assert_eq!(items[0].attr().unwrap().name, "unit");
    }
}
