//! 2D regions in the XY plane and their extrusion into solids.

use crate::float_types::{EPSILON, Real};
use crate::mesh::{Mesh, polygon::Polygon};
use crate::traits::CSGOps;
use geo::orient::Direction;
use geo::{
    AffineOps, AffineTransform, BooleanOps, BoundingRect, Coord, LineString, MultiPolygon,
    Orient, TriangulateEarcut,
};
use nalgebra::{Matrix4, Point3};
use parry3d_f64::bounding_volume::Aabb;

pub mod shapes;
pub mod text;

/// A planar region, possibly with holes and disjoint islands.
#[derive(Clone, Debug)]
pub struct Sketch {
    pub geometry: MultiPolygon<Real>,
}

impl Default for Sketch {
    fn default() -> Self {
        Sketch {
            geometry: MultiPolygon(Vec::new()),
        }
    }
}

impl Sketch {
    pub const fn from_geo(geometry: MultiPolygon<Real>) -> Self {
        Sketch { geometry }
    }

    pub fn is_empty(&self) -> bool {
        self.geometry.0.is_empty()
    }

    /// Extrude the region along +Z by `height`, or downwards from z = 0 when
    /// `height` is negative.
    ///
    /// Caps are ear-cut into triangles so every emitted polygon is convex.
    /// Side walls get one quad per ring edge. Exterior rings are wound CCW and
    /// holes CW before walls are emitted, so all normals face out of the solid.
    pub fn extrude(&self, height: Real) -> Mesh {
        if height.abs() < EPSILON {
            return Mesh::new();
        }
        let (z0, z1) = if height > 0.0 { (0.0, height) } else { (height, 0.0) };

        let oriented = self.geometry.orient(Direction::Default);
        let mut polygons = Vec::new();

        for poly2d in &oriented.0 {
            for ring in std::iter::once(poly2d.exterior()).chain(poly2d.interiors()) {
                let coords = open_ring(ring);
                for (i, a) in coords.iter().enumerate() {
                    let b = coords[(i + 1) % coords.len()];
                    polygons.extend(Polygon::from_points(&[
                        Point3::new(a.x, a.y, z0),
                        Point3::new(b.x, b.y, z0),
                        Point3::new(b.x, b.y, z1),
                        Point3::new(a.x, a.y, z1),
                    ]));
                }
            }

            let triangulation = poly2d.earcut_triangles_raw();
            let flat = &triangulation.vertices;
            let at = |i: usize| (flat[2 * i], flat[2 * i + 1]);
            for tri in triangulation.triangle_indices.chunks_exact(3) {
                let (mut p, q, mut r) = (at(tri[0]), at(tri[1]), at(tri[2]));
                let cross = (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0);
                if cross < 0.0 {
                    std::mem::swap(&mut p, &mut r);
                }
                polygons.extend(Polygon::from_points(&[
                    Point3::new(p.0, p.1, z1),
                    Point3::new(q.0, q.1, z1),
                    Point3::new(r.0, r.1, z1),
                ]));
                polygons.extend(Polygon::from_points(&[
                    Point3::new(r.0, r.1, z0),
                    Point3::new(q.0, q.1, z0),
                    Point3::new(p.0, p.1, z0),
                ]));
            }
        }

        Mesh::from_polygons(polygons)
    }

    /// Total enclosed area.
    pub fn area(&self) -> Real {
        use geo::Area;
        self.geometry.unsigned_area()
    }
}

/// Ring coordinates without the duplicated closing point.
fn open_ring(ring: &LineString<Real>) -> Vec<Coord<Real>> {
    let mut coords = ring.0.clone();
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    coords
}

impl CSGOps for Sketch {
    fn new() -> Self {
        Sketch::default()
    }

    fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Sketch::from_geo(self.geometry.union(&other.geometry))
    }

    fn difference(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }
        Sketch::from_geo(self.geometry.difference(&other.geometry))
    }

    fn intersection(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Sketch::new();
        }
        Sketch::from_geo(self.geometry.intersection(&other.geometry))
    }

    /// Applies the XY part of `matrix`; anything involving Z is dropped.
    fn transform(&self, matrix: &Matrix4<Real>) -> Self {
        let affine = AffineTransform::new(
            matrix[(0, 0)],
            matrix[(0, 1)],
            matrix[(0, 3)],
            matrix[(1, 0)],
            matrix[(1, 1)],
            matrix[(1, 3)],
        );
        Sketch::from_geo(self.geometry.affine_transform(&affine))
    }

    fn bounding_box(&self) -> Aabb {
        match self.geometry.bounding_rect() {
            Some(rect) => Aabb::new(
                Point3::new(rect.min().x, rect.min().y, 0.0),
                Point3::new(rect.max().x, rect.max().y, 0.0),
            ),
            None => Aabb::new(Point3::origin(), Point3::origin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn extruded_square_volume() {
        let mesh = Sketch::rectangle(2.0, 3.0).extrude(4.0);
        assert_relative_eq!(mesh.volume(), 24.0, epsilon = 1e-9);
        let bb = mesh.bounding_box();
        assert_relative_eq!(bb.mins.x, -1.0);
        assert_relative_eq!(bb.maxs.z, 4.0);
    }

    #[test]
    fn negative_extrusion_goes_down() {
        let mesh = Sketch::rectangle(1.0, 1.0).extrude(-2.0);
        let bb = mesh.bounding_box();
        assert_relative_eq!(bb.mins.z, -2.0);
        assert_relative_eq!(bb.maxs.z, 0.0);
        assert_relative_eq!(mesh.volume(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn extrusion_with_hole() {
        let frame = Sketch::rectangle(10.0, 10.0).difference(&Sketch::rectangle(4.0, 4.0));
        assert_relative_eq!(frame.area(), 84.0, epsilon = 1e-9);
        assert_relative_eq!(frame.extrude(1.0).volume(), 84.0, epsilon = 1e-6);
    }

    #[test]
    fn default_is_empty() {
        let empty = Sketch::default();
        assert!(empty.is_empty());
        assert_eq!(empty.area(), 0.0);
        assert!(empty.extrude(1.0).is_empty());
        let square = Sketch::rectangle(2.0, 2.0);
        assert_relative_eq!(Sketch::new().union(&square).area(), 4.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_height_is_empty() {
        assert!(Sketch::rectangle(1.0, 1.0).extrude(0.0).is_empty());
    }
}
