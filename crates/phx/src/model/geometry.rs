use glam::DVec3;

use crate::ids::{IdClass, IdRegistry};

/// Normal of a planar polygon by Newell's method. Robust for concave
/// outlines; returns `DVec3::ZERO` for degenerate input.
pub fn newell_normal(points: &[DVec3]) -> DVec3 {
    let mut n = DVec3::ZERO;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        n.x += (a.y - b.y) * (a.z + b.z);
        n.y += (a.z - b.z) * (a.x + b.x);
        n.z += (a.x - b.x) * (a.y + b.y);
    }
    n.try_normalize().unwrap_or(DVec3::ZERO)
}

/// Area of a planar polygon.
pub fn polygon_area(points: &[DVec3]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = DVec3::ZERO;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        sum += a.cross(b);
    }
    0.5 * sum.length()
}

/// Enclosed volume of a closed shell given as outward-facing planar loops
/// (divergence theorem over fan triangles).
pub fn shell_volume<'a>(loops: impl IntoIterator<Item = &'a [DVec3]>) -> f64 {
    let mut volume = 0.0;
    for points in loops {
        if points.len() < 3 {
            continue;
        }
        let origin = points[0];
        for pair in points[1..].windows(2) {
            volume += origin.dot(pair[0].cross(pair[1])) / 6.0;
        }
    }
    volume.abs()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxVertex {
    pub id_num: u32,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl PhxVertex {
    pub fn new(ids: &mut IdRegistry, point: DVec3) -> Self {
        Self {
            id_num: ids.allocate(IdClass::Vertex),
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }

    pub fn point(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

/// Local coordinate frame lying in a polygon's plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalPlane {
    pub origin: DVec3,
    pub normal: DVec3,
    pub x_axis: DVec3,
    pub y_axis: DVec3,
}

/// Width/height view of a four-sided polygon, used where the target needs
/// window dimensions rather than vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangularPolygon {
    pub width: f64,
    pub height: f64,
    pub center: DVec3,
    pub plane: LocalPlane,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhxPolygon {
    pub id_num: u32,
    pub display_name: String,
    pub normal_vector: DVec3,
    /// Owned outline, in order.
    pub vertices: Vec<PhxVertex>,
    /// Polygons (apertures) lying inside this one.
    pub child_polygon_ids: Vec<u32>,
}

impl PhxPolygon {
    /// Build a polygon from an outline, allocating IDs for the polygon and
    /// each of its vertices.
    pub fn new(
        ids: &mut IdRegistry,
        display_name: impl Into<String>,
        points: &[DVec3],
        child_polygon_ids: Vec<u32>,
    ) -> Self {
        let vertices: Vec<PhxVertex> = points.iter().map(|p| PhxVertex::new(ids, *p)).collect();
        Self {
            id_num: ids.allocate(IdClass::Polygon),
            display_name: display_name.into(),
            normal_vector: newell_normal(points),
            vertices,
            child_polygon_ids,
        }
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.vertices.iter().map(|v| v.id_num)
    }

    pub fn points(&self) -> Vec<DVec3> {
        self.vertices.iter().map(PhxVertex::point).collect()
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.points())
    }

    pub fn center(&self) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        self.points().iter().sum::<DVec3>() / self.vertices.len() as f64
    }

    /// Angle from vertical (0 = facing straight up, 90 = wall), degrees.
    pub fn inclination_deg(&self) -> f64 {
        self.normal_vector
            .z
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
    }

    /// Clockwise angle of the horizontal projection of the normal from
    /// north (+Y), degrees in `[0, 360)`.
    pub fn cardinal_orientation_deg(&self) -> f64 {
        let n = self.normal_vector;
        if n.x.abs() < 1e-9 && n.y.abs() < 1e-9 {
            return 0.0;
        }
        n.x.atan2(n.y).to_degrees().rem_euclid(360.0)
    }

    /// Width/height view when the polygon has exactly four vertices. The
    /// edge closer to horizontal is taken as the width.
    pub fn as_rectangular(&self) -> Option<RectangularPolygon> {
        let [a, b, c, _] = self.points()[..] else {
            return None;
        };
        let e1 = b - a;
        let e2 = c - b;
        let (width_edge, height_edge) = if e1.z.abs() <= e2.z.abs() {
            (e1, e2)
        } else {
            (e2, e1)
        };
        let x_axis = width_edge.try_normalize()?;
        let normal = self.normal_vector;
        let center = self.center();
        Some(RectangularPolygon {
            width: width_edge.length(),
            height: height_edge.length(),
            center,
            plane: LocalPlane {
                origin: center,
                normal,
                x_axis,
                y_axis: normal.cross(x_axis),
            },
        })
    }
}

/// Container of every polygon in a variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhxGraphics3D {
    pub polygons: Vec<PhxPolygon>,
}

impl PhxGraphics3D {
    pub fn add_polygon(&mut self, polygon: PhxPolygon) {
        self.polygons.push(polygon);
    }

    /// Union of the vertices of all polygons, ordered by ID.
    pub fn vertices(&self) -> Vec<&PhxVertex> {
        let mut vertices: Vec<&PhxVertex> =
            self.polygons.iter().flat_map(|p| p.vertices.iter()).collect();
        vertices.sort_by_key(|v| v.id_num);
        vertices.dedup_by_key(|v| v.id_num);
        vertices
    }

    pub fn polygon_by_id(&self, id_num: u32) -> Option<&PhxPolygon> {
        self.polygons.iter().find(|p| p.id_num == id_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_wall() -> Vec<DVec3> {
        // South facing wall (normal -Y), counter-clockwise seen from outside.
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 0.0, 1.0),
        ]
    }

    #[test]
    fn newell_normal_of_wall() {
        let n = newell_normal(&unit_square_wall());
        assert!((n - DVec3::new(0.0, -1.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn area_of_square() {
        assert!((polygon_area(&unit_square_wall()) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn volume_of_unit_cube() {
        let p = |x: f64, y: f64, z: f64| DVec3::new(x, y, z);
        let faces = [
            vec![p(0., 0., 0.), p(0., 1., 0.), p(1., 1., 0.), p(1., 0., 0.)],
            vec![p(0., 0., 1.), p(1., 0., 1.), p(1., 1., 1.), p(0., 1., 1.)],
            vec![p(0., 0., 0.), p(1., 0., 0.), p(1., 0., 1.), p(0., 0., 1.)],
            vec![p(1., 0., 0.), p(1., 1., 0.), p(1., 1., 1.), p(1., 0., 1.)],
            vec![p(1., 1., 0.), p(0., 1., 0.), p(0., 1., 1.), p(1., 1., 1.)],
            vec![p(0., 1., 0.), p(0., 0., 0.), p(0., 0., 1.), p(0., 1., 1.)],
        ];
        let volume = shell_volume(faces.iter().map(|f| f.as_slice()));
        assert!((volume - 1.0).abs() < 1e-12);
    }

    #[test]
    fn polygon_allocates_vertex_and_polygon_ids() {
        let mut ids = IdRegistry::new();
        let poly = PhxPolygon::new(&mut ids, "wall", &unit_square_wall(), vec![]);
        assert_eq!(poly.id_num, 1);
        assert_eq!(poly.vertex_ids().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        assert!((poly.inclination_deg() - 90.0).abs() < 1e-9);
        assert!((poly.cardinal_orientation_deg() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn rectangular_view_of_window() {
        let mut ids = IdRegistry::new();
        let points = vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 1.5),
            DVec3::new(0.0, 0.0, 1.5),
        ];
        let poly = PhxPolygon::new(&mut ids, "window", &points, vec![]);
        let rect = poly.as_rectangular().unwrap();
        assert!((rect.width - 2.0).abs() < 1e-12);
        assert!((rect.height - 1.5).abs() < 1e-12);
        assert!((rect.center - DVec3::new(1.0, 0.0, 0.75)).length() < 1e-12);
        assert!((rect.plane.x_axis - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn non_quad_has_no_rectangular_view() {
        let mut ids = IdRegistry::new();
        let tri = [DVec3::ZERO, DVec3::X, DVec3::Z];
        let poly = PhxPolygon::new(&mut ids, "tri", &tri, vec![]);
        assert!(poly.as_rectangular().is_none());
    }

    #[test]
    fn graphics_vertices_are_union_of_polygons() {
        let mut ids = IdRegistry::new();
        let mut g = PhxGraphics3D::default();
        g.add_polygon(PhxPolygon::new(&mut ids, "a", &unit_square_wall(), vec![]));
        g.add_polygon(PhxPolygon::new(&mut ids, "b", &unit_square_wall(), vec![]));
        let ids: Vec<u32> = g.vertices().iter().map(|v| v.id_num).collect();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }
}
