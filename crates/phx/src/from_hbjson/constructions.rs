use log::{debug, warn};

use crate::calc::iso_10077_1_reference;
use crate::error::{PhxError, Result};
use crate::from_hbjson::Assembly;
use crate::hbjson::energy::{OpaqueConstruction, WindowConstruction};
use crate::hbjson::ph::PhFrameElement;
use crate::hbjson::{
    Aperture, Construction, ConstructionSet, Face, FaceType, HbModel, Material, Room,
};
use crate::ids::IdClass;
use crate::model::constructions::{
    PhxConstructionOpaque, PhxConstructionWindow, PhxLayer, PhxMaterial, PhxWindowFrameElement,
    WindowFrames,
};
use crate::model::project::PhxProject;

/// Thickness given to no-mass layers, m.
const NO_MASS_THICKNESS: f64 = 0.1;

/// The room's own construction set, then the model's global one.
fn construction_sets<'m>(model: &'m HbModel, room: &Room) -> impl Iterator<Item = &'m ConstructionSet> {
    let own = room
        .properties
        .energy
        .construction_set
        .as_deref()
        .and_then(|id| model.construction_set(id));
    own.into_iter().chain(model.global_construction_set())
}

/// Identifier of the construction a face uses: its own, else the one its
/// room's construction set (or the global set) assigns. Air boundaries may
/// have none.
pub(crate) fn face_construction_id(model: &HbModel, room: &Room, face: &Face) -> Result<Option<String>> {
    if let Some(id) = &face.properties.energy.construction {
        return Ok(Some(id.clone()));
    }
    if face.face_type == FaceType::AirBoundary {
        return Ok(None);
    }
    let bc = face.boundary_condition.parse_kind()?;
    construction_sets(model, room)
        .find_map(|set| set.face_construction(face.face_type, bc))
        .map(|id| Some(id.to_string()))
        .ok_or_else(|| PhxError::missing(face.display_name(), "energy.construction"))
}

pub(crate) fn aperture_construction_id(model: &HbModel, room: &Room, aperture: &Aperture) -> Result<String> {
    if let Some(id) = &aperture.properties.energy.construction {
        return Ok(id.clone());
    }
    construction_sets(model, room)
        .find_map(|set| set.aperture_construction(aperture.is_operable))
        .map(str::to_string)
        .ok_or_else(|| PhxError::missing(aperture.display_name(), "energy.construction"))
}

fn unresolved(entity: &str, kind: &'static str, identifier: &str) -> PhxError {
    PhxError::UnresolvedReference {
        entity: entity.to_string(),
        kind,
        identifier: identifier.to_string(),
    }
}

fn build_layer(model: &HbModel, construction: &str, material_id: &str) -> Result<PhxLayer> {
    let material = model
        .material(material_id)
        .ok_or_else(|| unresolved(construction, "material", material_id))?;
    match material {
        Material::Mass(m) => Ok(PhxLayer {
            thickness_m: m.thickness,
            material: PhxMaterial {
                display_name: m.display_name.clone().unwrap_or_else(|| m.identifier.clone()),
                conductivity: m.conductivity,
                density: m.density,
                heat_capacity: m.specific_heat,
                ..Default::default()
            },
        }),
        Material::NoMass(m) => Ok(PhxLayer {
            thickness_m: NO_MASS_THICKNESS,
            material: PhxMaterial {
                display_name: m.display_name.clone().unwrap_or_else(|| m.identifier.clone()),
                conductivity: if m.r_value > 0.0 {
                    NO_MASS_THICKNESS / m.r_value
                } else {
                    0.0
                },
                ..Default::default()
            },
        }),
        Material::SimpleGlazing(_) | Material::Unsupported => {
            Err(unresolved(construction, "opaque material", material_id))
        }
    }
}

pub(crate) fn build_opaque(
    model: &HbModel,
    id_num: u32,
    source: &OpaqueConstruction,
) -> Result<PhxConstructionOpaque> {
    let mut construction = PhxConstructionOpaque::new(id_num, &source.identifier, source.display_name());
    for material_id in &source.materials {
        construction
            .layers
            .push(build_layer(model, &source.identifier, material_id)?);
    }
    Ok(construction)
}

fn frame_element(e: &PhFrameElement) -> PhxWindowFrameElement {
    PhxWindowFrameElement {
        width: e.width,
        u_value: e.u_factor,
        psi_glazing: e.psi_glazing,
        psi_install: e.psi_install,
    }
}

pub(crate) fn build_window(
    model: &HbModel,
    id_num: u32,
    default_frame_factor: f64,
    source: &WindowConstruction,
) -> PhxConstructionWindow {
    let mut window = PhxConstructionWindow::new(id_num, &source.identifier, source.display_name());

    let simple = source.materials.iter().find_map(|id| match model.material(id) {
        Some(Material::SimpleGlazing(m)) => Some(m),
        _ => None,
    });
    if let Some(m) = simple {
        window.u_value_glass = m.u_factor;
        window.u_value_window = m.u_factor;
        window.glass_g_value = m.shgc;
    }

    let ph = &source.properties.ph;
    match (&ph.ph_frame, &ph.ph_glazing) {
        (Some(frame), Some(glazing)) => {
            window.frames = WindowFrames {
                top: frame_element(&frame.top),
                right: frame_element(&frame.right),
                bottom: frame_element(&frame.bottom),
                left: frame_element(&frame.left),
            };
            window.u_value_glass = glazing.u_factor;
            window.glass_g_value = glazing.g_value;
            window.frame_name = Some(frame.display_name().to_string());
            window.glazing_name = Some(glazing.display_name().to_string());

            let perf = iso_10077_1_reference(&window.frames, glazing.u_factor);
            window.u_value_window = perf.u_w;
            window.frame_factor = perf.frame_factor;
        }
        _ => {
            if simple.is_none() {
                warn!(
                    "Window construction '{}' has no simple glazing material; assuming U = {}",
                    source.identifier, window.u_value_window
                );
            }
            window.use_detailed_uw = false;
            window.use_detailed_frame = false;
            window.frame_factor = default_frame_factor;
        }
    }
    window
}

/// Deduplicate every construction used by a face or aperture into the
/// project maps.
pub(crate) fn add_constructions(asm: &mut Assembly<'_>, project: &mut PhxProject) -> Result<()> {
    let model = asm.model;
    for room in &model.rooms {
        for face in &room.faces {
            if let Some(id) = face_construction_id(model, room, face)? {
                add_opaque(asm, project, face.display_name(), &id)?;
            }
            for aperture in &face.apertures {
                let id = aperture_construction_id(model, room, aperture)?;
                add_window(asm, project, aperture.display_name(), &id)?;
            }
        }
    }
    debug!(
        "{} assembly type(s), {} window type(s)",
        project.assembly_types.len(),
        project.window_types.len()
    );
    Ok(())
}

fn add_opaque(asm: &mut Assembly<'_>, project: &mut PhxProject, entity: &str, id: &str) -> Result<()> {
    if asm.source_ids.opaque_constructions.contains_key(id) {
        return Ok(());
    }
    let Some(Construction::Opaque(source)) = asm.model.construction(id) else {
        return Err(unresolved(entity, "opaque construction", id));
    };
    let id_num = asm.ids.allocate(IdClass::OpaqueConstruction);
    let construction = build_opaque(asm.model, id_num, source)?;
    let id_num = project.add_assembly_type(construction);
    asm.source_ids
        .opaque_constructions
        .insert(id.to_string(), id_num);
    Ok(())
}

fn add_window(asm: &mut Assembly<'_>, project: &mut PhxProject, entity: &str, id: &str) -> Result<()> {
    if asm.source_ids.window_constructions.contains_key(id) {
        return Ok(());
    }
    let Some(Construction::Window(source)) = asm.model.construction(id) else {
        return Err(unresolved(entity, "window construction", id));
    };
    let id_num = asm.ids.allocate(IdClass::WindowConstruction);
    let window = build_window(asm.model, id_num, asm.options.default_frame_factor, source);
    let id_num = project.add_window_type(window);
    asm.source_ids
        .window_constructions
        .insert(id.to_string(), id_num);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::parse_hbjson_str;

    fn model() -> HbModel {
        parse_hbjson_str(
            r#"{
                "type": "Model",
                "identifier": "m",
                "properties": {"energy": {
                    "materials": [
                        {"type": "EnergyMaterial", "identifier": "insulation", "thickness": 0.2, "conductivity": 0.04, "density": 30, "specific_heat": 1400},
                        {"type": "EnergyMaterialNoMass", "identifier": "air gap", "r_value": 0.5},
                        {"type": "EnergyWindowMaterialSimpleGlazSys", "identifier": "glass", "u_factor": 1.4, "shgc": 0.5}
                    ],
                    "constructions": [
                        {"type": "OpaqueConstructionAbridged", "identifier": "wall", "materials": ["insulation", "air gap"]},
                        {"type": "WindowConstructionAbridged", "identifier": "plain", "materials": ["glass"]},
                        {"type": "WindowConstructionAbridged", "identifier": "ph", "materials": ["glass"],
                         "properties": {"ph": {
                            "ph_frame": {"identifier": "frame",
                                "top": {"width": 0.1, "u_factor": 1.0, "psi_glazing": 0.04, "psi_install": 0.04},
                                "right": {"width": 0.1, "u_factor": 1.0, "psi_glazing": 0.04, "psi_install": 0.04},
                                "bottom": {"width": 0.1, "u_factor": 1.0, "psi_glazing": 0.04, "psi_install": 0.04},
                                "left": {"width": 0.1, "u_factor": 1.0, "psi_glazing": 0.04, "psi_install": 0.04}},
                            "ph_glazing": {"identifier": "glazing", "display_name": "Triple", "u_factor": 1.0, "g_value": 0.5}
                         }}}
                    ]
                }}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn opaque_layers_from_materials() {
        let model = model();
        let Some(Construction::Opaque(source)) = model.construction("wall") else {
            panic!("wall is opaque");
        };
        let c = build_opaque(&model, 1, source).unwrap();
        assert_eq!(c.layers.len(), 2);
        assert_eq!(c.layers[0].material.heat_capacity, 1400.0);
        // no-mass layer keeps its R-value
        assert_eq!(c.layers[1].thickness_m, 0.1);
        assert!((c.layers[1].r_value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn window_without_ph_data_uses_defaults() {
        let model = model();
        let Some(Construction::Window(source)) = model.construction("plain") else {
            panic!("plain is a window");
        };
        let w = build_window(&model, 1, 0.75, source);
        assert_eq!(w.frame_factor, 0.75);
        assert_eq!(w.u_value_window, 1.4);
        assert_eq!(w.glass_g_value, 0.5);
        assert!(!w.use_detailed_uw);
    }

    #[test]
    fn window_with_ph_data_runs_iso_10077() {
        let model = model();
        let Some(Construction::Window(source)) = model.construction("ph") else {
            panic!("ph is a window");
        };
        let w = build_window(&model, 1, 0.75, source);
        let expected = iso_10077_1_reference(&WindowFrames::default(), 1.0);
        assert_eq!(w.u_value_window, expected.u_w);
        assert_eq!(w.frame_factor, expected.frame_factor);
        assert_eq!(w.glazing_display_name(), "Triple");
        assert_eq!(w.frame_display_name(), "frame");
    }
}
