//! Assembly of a [`PhxProject`] from a source model.
//!
//! The source graph is never mutated. IDs handed out during assembly are
//! recorded in a [`SourceIdMap`] keyed by source identifier, and later
//! steps look them up there:
//!
//! 1. constructions (opaque and window types) are deduplicated into the
//!    project maps,
//! 2. ventilation utilization patterns are built per room and
//!    deduplicated by schedule,
//! 3. rooms are grouped by building segment and each group becomes one
//!    variant with its geometry, building, mechanical equipment, site and
//!    certification data.

mod building;
mod climate;
mod constructions;
mod elec_equip;
mod mechanical;
mod merge;
mod schedules;

use std::collections::HashMap;

use log::info;

use crate::error::Result;
use crate::hbjson::HbModel;
use crate::ids::IdRegistry;
use crate::model::project::PhxProject;

pub use merge::{HostedFace, HostedSpace, MergedRoom, RoomGroup, group_rooms};

/// Knobs of the assembly pass.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyOptions {
    /// Merge rooms sharing a building segment into one variant. When off,
    /// every room becomes its own variant.
    pub merge_by_segment: bool,
    /// Room type code of spaces synthesized for rooms without any.
    pub default_room_type: i32,
    /// Frame factor of window types without detailed frame/glazing data.
    pub default_frame_factor: f64,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            merge_by_segment: true,
            default_room_type: 99,
            default_frame_factor: 0.75,
        }
    }
}

/// IDs assigned to source entities, by source identifier.
#[derive(Debug, Clone, Default)]
pub struct SourceIdMap {
    pub opaque_constructions: HashMap<String, u32>,
    pub window_constructions: HashMap<String, u32>,
    /// Ventilation pattern of each room.
    pub room_patterns: HashMap<String, u32>,
    /// Variant each room ended up in.
    pub room_variants: HashMap<String, u32>,
    /// Ventilator serving each room.
    pub room_ventilators: HashMap<String, u32>,
    /// Polygon of each face and aperture.
    pub polygons: HashMap<String, u32>,
}

/// State threaded through one assembly pass.
pub(crate) struct Assembly<'a> {
    pub model: &'a HbModel,
    pub options: &'a AssemblyOptions,
    pub ids: &'a mut IdRegistry,
    pub source_ids: SourceIdMap,
}

/// Assemble `model` into a PHX project with a fresh ID registry.
pub fn convert_hbjson_model(model: &HbModel, options: &AssemblyOptions) -> Result<PhxProject> {
    let mut ids = IdRegistry::new();
    convert_hbjson_model_with(model, options, &mut ids).map(|(project, _)| project)
}

/// Assemble `model`, allocating IDs from `ids`. Also returns the IDs given
/// to source entities.
pub fn convert_hbjson_model_with(
    model: &HbModel,
    options: &AssemblyOptions,
    ids: &mut IdRegistry,
) -> Result<(PhxProject, SourceIdMap)> {
    let mut asm = Assembly {
        model,
        options,
        ids,
        source_ids: SourceIdMap::default(),
    };
    let mut project = PhxProject::default();

    constructions::add_constructions(&mut asm, &mut project)?;
    schedules::add_ventilation_patterns(&mut asm, &mut project)?;

    for group in group_rooms(&model.rooms, options.merge_by_segment) {
        let variant = building::build_variant(&mut asm, &group)?;
        info!(
            "Variant '{}': {} zone(s), {} component(s), {} polygon(s)",
            variant.name,
            variant.building.zones.len(),
            variant.building.components.len(),
            variant.graphics3d.polygons.len()
        );
        project.variants.push(variant);
    }

    Ok((project, asm.source_ids))
}
