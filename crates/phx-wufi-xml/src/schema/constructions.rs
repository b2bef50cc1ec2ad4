use phx::model::constructions::PhxWindowFrameElement;

use crate::error::Result;
use crate::writable::{Entity, Writable, list, node, object, object_as};

pub(super) fn assembly<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let a = expect_entity!(e, Assembly, "PhxConstructionOpaque");
    Ok(vec![
        node("IdentNr", a.id_num),
        node("Name", &a.display_name),
        node("Order_Layers", a.layer_order),
        node("Grid_Kind", a.grid_kind),
        list(
            "Layers",
            a.layers.iter().map(|l| object("Layer", Entity::Layer(l))),
        ),
    ])
}

pub(super) fn layer<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let l = expect_entity!(e, Layer, "PhxLayer");
    Ok(vec![
        node("Thickness", l.thickness_m),
        object_as("Material", Entity::Layer(l), "PhxLayer_Material"),
    ])
}

pub(super) fn material<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let l = expect_entity!(e, Layer, "PhxLayer_Material");
    let m = &l.material;
    Ok(vec![
        node("Name", &m.display_name),
        node("ThermalConductivity", m.conductivity),
        node("BulkDensity", m.density),
        node("Porosity", m.porosity),
        node("HeatCapacity", m.heat_capacity),
        node("WaterVaporResistance", m.water_vapor_resistance),
        node("ReferenceWaterContent", m.reference_water),
    ])
}

fn frame_nodes<'a>(
    frame: &PhxWindowFrameElement,
    [width, psi_frame, u_frame, psi_glazing]: [&'static str; 4],
) -> [Writable<'a>; 4] {
    [
        node(width, frame.width),
        node(psi_frame, frame.psi_install),
        node(u_frame, frame.u_value),
        node(psi_glazing, frame.psi_glazing),
    ]
}

pub(super) fn window_type<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let w = expect_entity!(e, WindowType, "PhxConstructionWindow");
    let mut out = vec![
        node("IdentNr", w.id_num),
        node("Name", &w.display_name),
        node("Uw_Detailed", w.use_detailed_uw),
        node("GlazingFrameDetailed", w.use_detailed_frame),
        node("FrameFactor", w.frame_factor),
        node("U_Value", w.u_value_window),
        node("U_Value_Glazing", w.u_value_glass),
        node("MeanEmissivity", w.glass_mean_emissivity),
        node("g_Value", w.glass_g_value),
    ];
    let f = &w.frames;
    out.extend(frame_nodes(
        &f.left,
        ["Frame_Width_Left", "Frame_Psi_Left", "Frame_U_Left", "Glazing_Psi_Left"],
    ));
    out.extend(frame_nodes(
        &f.right,
        ["Frame_Width_Right", "Frame_Psi_Right", "Frame_U_Right", "Glazing_Psi_Right"],
    ));
    out.extend(frame_nodes(
        &f.top,
        ["Frame_Width_Top", "Frame_Psi_Top", "Frame_U_Top", "Glazing_Psi_Top"],
    ));
    out.extend(frame_nodes(
        &f.bottom,
        ["Frame_Width_Bottom", "Frame_Psi_Bottom", "Frame_U_Bottom", "Glazing_Psi_Bottom"],
    ));
    Ok(out)
}
