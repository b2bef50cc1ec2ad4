use crate::error::Result;
use crate::writable::{Entity, Writable, list, node, object};

pub(super) fn graphics3d<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let g = expect_entity!(e, Graphics3D, "PhxGraphics3D");
    Ok(vec![
        list(
            "Vertices",
            g.vertices()
                .into_iter()
                .map(|v| object("Vertix", Entity::Vertex(v))),
        ),
        list(
            "Polygons",
            g.polygons
                .iter()
                .map(|p| object("Polygon", Entity::Polygon(p))),
        ),
    ])
}

pub(super) fn vertex<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let v = expect_entity!(e, Vertex, "PhxVertex");
    Ok(vec![
        node("IdentNr", v.id_num),
        node("X", v.x),
        node("Y", v.y),
        node("Z", v.z),
    ])
}

pub(super) fn polygon<'a>(e: &Entity<'a>) -> Result<Vec<Writable<'a>>> {
    let p = expect_entity!(e, Polygon, "PhxPolygon");
    Ok(vec![
        node("IdentNr", p.id_num),
        node("NormalVectorX", p.normal_vector.x),
        node("NormalVectorY", p.normal_vector.y),
        node("NormalVectorZ", p.normal_vector.z),
        list("IdentNrPoints", p.vertex_ids().map(|id| node("IdentNr", id))),
        list(
            "IdentNrPolygonsInside",
            p.child_polygon_ids.iter().map(|id| node("IdentNr", *id)),
        ),
    ])
}
