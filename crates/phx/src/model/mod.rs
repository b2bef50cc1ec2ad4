//! The PHX intermediate model: passive records created by the assembler and
//! read by the output writers.

pub mod building;
pub mod certification;
pub mod climate;
pub mod constructions;
pub mod elec_equip;
pub mod geometry;
pub mod loads;
pub mod mechanical;
pub mod project;
pub mod schedules;

pub use building::{PhxBuilding, PhxComponent, PhxZone};
pub use constructions::{PhxConstructionOpaque, PhxConstructionWindow};
pub use geometry::{PhxGraphics3D, PhxPolygon, PhxVertex};
pub use project::{PhxProject, PhxVariant};
