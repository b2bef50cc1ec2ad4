use log::debug;

use crate::calc::peak_airflow_m3h;
use crate::error::{PhxError, Result};
use crate::from_hbjson::constructions::{aperture_construction_id, face_construction_id};
use crate::from_hbjson::schedules::room_peak_occupancy;
use crate::from_hbjson::{Assembly, HostedFace, HostedSpace, MergedRoom, RoomGroup};
use crate::from_hbjson::{climate, elec_equip, mechanical};
use crate::hbjson::ph::option_code;
use crate::hbjson::{Aperture, BoundaryConditionKind, FaceType, Room};
use crate::ids::IdClass;
use crate::model::building::{
    ComponentColor, ComponentExposureExterior, ComponentFaceOpacity, NO_REFERENCE, PhxComponent,
    PhxZone, SpecificHeatCapacity,
};
use crate::model::geometry::PhxPolygon;
use crate::model::loads::{PhxRoomVentilation, PhxVentilationFlows};
use crate::model::project::PhxVariant;

const DEFAULT_CLEAR_HEIGHT: f64 = 2.5;

const HEAT_CAPACITY: &[&str] = &["1-LIGHTWEIGHT", "2-MIXED", "3-MASSIVE"];

/// Interior and exterior colors of an opaque component.
fn opaque_colors(face_type: FaceType, bc: BoundaryConditionKind) -> (ComponentColor, ComponentColor) {
    use BoundaryConditionKind as Bc;
    use ComponentColor as C;
    match (face_type, bc) {
        (FaceType::AirBoundary, _) | (_, Bc::Surface) => (C::InnerWall, C::InnerWall),
        (_, Bc::Adiabatic) => (C::ExtWallInner, C::AdiabaticWallOuter),
        (FaceType::Wall, Bc::Outdoors) => (C::ExtWallInner, C::ExtWallOuter),
        (FaceType::Wall, Bc::Ground) => (C::ExtWallInner, C::SurfaceGroundContact),
        (FaceType::RoofCeiling, Bc::Outdoors) => (C::ExtWallInner, C::SlopedRoofOuter),
        (FaceType::RoofCeiling, Bc::Ground) => (C::ExtWallInner, C::SurfaceGroundContact),
        (FaceType::Floor, Bc::Outdoors) => (C::ExtWallInner, C::FloorSlab),
        (FaceType::Floor, Bc::Ground) => (C::ExtWallInner, C::FloorSlab),
    }
}

fn exposure(bc: BoundaryConditionKind) -> ComponentExposureExterior {
    match bc {
        BoundaryConditionKind::Outdoors => ComponentExposureExterior::Exterior,
        BoundaryConditionKind::Ground => ComponentExposureExterior::Ground,
        BoundaryConditionKind::Surface | BoundaryConditionKind::Adiabatic => {
            ComponentExposureExterior::Surface
        }
    }
}

fn zone_ref(zone: &PhxZone) -> i32 {
    zone.id_num as i32
}

fn lookup_id(map: &std::collections::HashMap<String, u32>, key: Option<&str>) -> i32 {
    key.and_then(|k| map.get(k))
        .map_or(NO_REFERENCE, |&id| id as i32)
}

fn aperture_component(
    asm: &mut Assembly<'_>,
    zone: &PhxZone,
    host: &Room,
    aperture: &Aperture,
    polygon_id: u32,
) -> Result<PhxComponent> {
    let bc = aperture.boundary_condition.parse_kind()?;
    let construction = aperture_construction_id(asm.model, host, aperture)?;
    Ok(PhxComponent {
        id_num: asm.ids.allocate(IdClass::Component),
        display_name: aperture.display_name().to_string(),
        face_opacity: ComponentFaceOpacity::Transparent,
        color_interior: ComponentColor::Window,
        color_exterior: ComponentColor::Window,
        exposure_exterior: exposure(bc),
        exposure_interior: zone_ref(zone),
        interior_attachment_id: NO_REFERENCE,
        assembly_type_id_num: NO_REFERENCE,
        window_type_id_num: lookup_id(
            &asm.source_ids.window_constructions,
            Some(construction.as_str()),
        ),
        polygon_ids: vec![polygon_id],
    })
}

/// Polygons and components of one face, apertures first so the face
/// polygon can list them as children.
fn add_face(
    asm: &mut Assembly<'_>,
    variant: &mut PhxVariant,
    zone: &PhxZone,
    hosted: &HostedFace<'_>,
) -> Result<()> {
    let HostedFace { host, face } = *hosted;
    let bc = face.boundary_condition.parse_kind()?;

    let mut child_ids = Vec::with_capacity(face.apertures.len());
    let mut aperture_components = Vec::with_capacity(face.apertures.len());
    for aperture in &face.apertures {
        let polygon = PhxPolygon::new(
            asm.ids,
            aperture.display_name(),
            &aperture.geometry.points(),
            Vec::new(),
        );
        let polygon_id = polygon.id_num;
        asm.source_ids
            .polygons
            .insert(aperture.identifier.clone(), polygon_id);
        variant.graphics3d.add_polygon(polygon);
        child_ids.push(polygon_id);
        aperture_components.push((aperture, polygon_id));
    }

    let polygon = PhxPolygon::new(asm.ids, face.display_name(), &face.geometry.points(), child_ids);
    let polygon_id = polygon.id_num;
    asm.source_ids
        .polygons
        .insert(face.identifier.clone(), polygon_id);
    variant.graphics3d.add_polygon(polygon);

    let construction = face_construction_id(asm.model, host, face)?;
    let opacity = if face.face_type == FaceType::AirBoundary {
        ComponentFaceOpacity::AirBoundary
    } else {
        ComponentFaceOpacity::Opaque
    };
    let (color_interior, color_exterior) = opaque_colors(face.face_type, bc);
    let component = PhxComponent {
        id_num: asm.ids.allocate(IdClass::Component),
        display_name: face.display_name().to_string(),
        face_opacity: opacity,
        color_interior,
        color_exterior,
        exposure_exterior: exposure(bc),
        exposure_interior: zone_ref(zone),
        interior_attachment_id: NO_REFERENCE,
        assembly_type_id_num: lookup_id(
            &asm.source_ids.opaque_constructions,
            construction.as_deref(),
        ),
        window_type_id_num: NO_REFERENCE,
        polygon_ids: vec![polygon_id],
    };
    variant.building.components.push(component);

    for (aperture, polygon_id) in aperture_components {
        let component = aperture_component(asm, zone, host, aperture, polygon_id)?;
        variant.building.components.push(component);
    }
    Ok(())
}

/// Floor area, weighted floor area, net volume and clear height of a
/// space. Stand-in spaces take their host room's figures.
fn space_figures(hosted: &HostedSpace<'_>) -> (f64, f64, f64, f64) {
    match hosted.space {
        Some(space) => (
            space.net_floor_area(),
            space.weighted_floor_area(),
            space.net_volume(),
            space.avg_clear_height().unwrap_or(DEFAULT_CLEAR_HEIGHT),
        ),
        None => {
            let area = hosted.host.floor_area();
            (
                area,
                area,
                hosted.host.volume(),
                hosted.host.average_height().unwrap_or(DEFAULT_CLEAR_HEIGHT),
            )
        }
    }
}

fn specific_heat_capacity(room: &Room) -> Result<SpecificHeatCapacity> {
    let Some(value) = room.properties.ph.specific_heat_capacity.as_deref() else {
        return Ok(SpecificHeatCapacity::default());
    };
    match option_code("specific heat capacity", value, HEAT_CAPACITY)? {
        1 => Ok(SpecificHeatCapacity::Lightweight),
        2 => Ok(SpecificHeatCapacity::Mixed),
        3 => Ok(SpecificHeatCapacity::Massive),
        _ => Err(PhxError::unknown("specific heat capacity", value, HEAT_CAPACITY)),
    }
}

fn occupants(room: &Room) -> (f64, u32) {
    let Some(people) = &room.properties.energy.people else {
        return (0.0, 0);
    };
    match &people.properties.ph {
        Some(ph) => (ph.number_people, ph.number_bedrooms),
        None => (room_peak_occupancy(room), 0),
    }
}

fn fill_zone(zone: &mut PhxZone, merged: &MergedRoom<'_>) -> Result<()> {
    zone.volume_gross = merged.members.iter().map(|r| r.volume()).sum();
    zone.specific_heat_capacity = specific_heat_capacity(merged.reference)?;

    let mut floor_area = 0.0;
    let mut height_area = 0.0;
    for hosted in &merged.spaces {
        let (area, weighted, volume, height) = space_figures(hosted);
        floor_area += area;
        height_area += area * height;
        zone.weighted_net_floor_area += weighted;
        zone.volume_net += volume;
    }
    if floor_area > 0.0 {
        zone.clearance_height = height_area / floor_area;
    }

    for room in &merged.members {
        let (people, bedrooms) = occupants(room);
        zone.res_occupant_quantity += people;
        zone.res_number_bedrooms += bedrooms;
    }
    Ok(())
}

fn room_peak_airflow(room: &Room) -> f64 {
    let rates = room
        .properties
        .energy
        .ventilation
        .as_ref()
        .map(|v| v.rates());
    peak_airflow_m3h(
        rates.as_ref(),
        room.floor_area(),
        room.volume(),
        room_peak_occupancy(room),
    )
}

/// Ventilation rooms of one member room. Flows the source leaves open are
/// the host's peak airflow split by weighted floor area.
fn ventilation_rooms(
    asm: &mut Assembly<'_>,
    merged: &MergedRoom<'_>,
    room: &Room,
) -> Vec<PhxRoomVentilation> {
    let spaces: Vec<&HostedSpace<'_>> = merged.spaces_of(room).collect();
    let peak = room_peak_airflow(room);
    let figures: Vec<_> = spaces.iter().map(|s| space_figures(s)).collect();
    let total_weighted: f64 = figures.iter().map(|f| f.1).sum();

    let pattern = asm.source_ids.room_patterns.get(&room.identifier).copied();
    let ventilator = asm.source_ids.room_ventilators.get(&room.identifier).copied();

    spaces
        .iter()
        .zip(figures)
        .map(|(hosted, (area, weighted, volume, height))| {
            let share = if total_weighted > 0.0 {
                weighted / total_weighted
            } else {
                1.0 / spaces.len() as f64
            };
            let derived = peak * share;
            let id_num = asm.ids.allocate(IdClass::VentilationRoom);
            let mut vent_room = match hosted.space {
                Some(space) => {
                    let mut r = PhxRoomVentilation::new(id_num, space.full_name());
                    r.wufi_type = space.wufi_type;
                    r.quantity = space.quantity;
                    let ph = &space.properties.ph;
                    r.flows = PhxVentilationFlows {
                        supply: ph.v_sup.map_or(derived, |v| v * 3600.0),
                        extract: ph.v_eta.map_or(derived, |v| v * 3600.0),
                        transfer: ph.v_tran.map_or(0.0, |v| v * 3600.0),
                    };
                    r
                }
                None => {
                    let mut r = PhxRoomVentilation::new(id_num, room.display_name());
                    r.wufi_type = asm.options.default_room_type;
                    r.quantity = room.multiplier;
                    r.flows = PhxVentilationFlows {
                        supply: derived,
                        extract: derived,
                        transfer: 0.0,
                    };
                    r
                }
            };
            vent_room.floor_area = area;
            vent_room.weighted_floor_area = weighted;
            vent_room.net_volume = volume;
            vent_room.clear_height = height;
            vent_room.vent_pattern_id_num = pattern;
            vent_room.ventilation_unit_id_num = ventilator;
            vent_room
        })
        .collect()
}

/// One variant per room group: geometry, building, mechanical equipment,
/// site and certification data.
pub(crate) fn build_variant(asm: &mut Assembly<'_>, group: &RoomGroup<'_>) -> Result<PhxVariant> {
    let merged = group.merge();
    let name = group.display_name();

    let mut variant = PhxVariant::new(asm.ids.allocate(IdClass::Variant), name);
    for room in &merged.members {
        asm.source_ids
            .room_variants
            .insert(room.identifier.clone(), variant.id_num);
    }

    let mut zone = PhxZone::new(asm.ids.allocate(IdClass::Zone), name);

    let collection = mechanical::build_collection(asm, &merged, name, zone.id_num)?;
    debug!(
        "Variant '{}': mechanical collection with {} subsystem(s)",
        name,
        collection.len()
    );
    variant.mech_collections.push(collection);

    for hosted in &merged.faces {
        add_face(asm, &mut variant, &zone, hosted)?;
    }

    fill_zone(&mut zone, &merged)?;
    for room in &merged.members {
        let rooms = ventilation_rooms(asm, &merged, room);
        zone.wufi_rooms.extend(rooms);
        elec_equip::add_room_equipment(&mut zone.elec_equipment, room)?;
    }
    variant.building.zones.push(zone);

    if let Some(segment) = group.segment() {
        variant.site = climate::build_site(&segment.site);
    }
    variant.phius_cert = climate::build_certification(group.segment())?;
    Ok(variant)
}
