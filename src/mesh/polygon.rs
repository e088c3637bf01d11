//! Convex planar polygons, the unit of work for the BSP booleans.

use crate::float_types::Real;
use crate::mesh::plane::Plane;
use crate::mesh::vertex::Vertex;
use nalgebra::Point3;
use parry3d_f64::bounding_volume::Aabb;

/// A convex polygon with its supporting plane cached.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Vertices in counter-clockwise order seen from the front of `plane`.
    pub vertices: Vec<Vertex>,
    pub plane: Plane,
}

impl Polygon {
    /// Create a polygon from its vertices, computing the plane from the winding.
    ///
    /// Vertex normals are replaced by the face normal. Returns `None` for
    /// polygons with fewer than three vertices or zero area.
    pub fn new(mut vertices: Vec<Vertex>) -> Option<Self> {
        let plane = Plane::from_vertices(&vertices)?;
        for v in &mut vertices {
            v.normal = plane.normal;
        }
        Some(Polygon { vertices, plane })
    }

    /// Create a polygon from bare positions.
    pub fn from_points(points: &[Point3<Real>]) -> Option<Self> {
        Self::new(
            points
                .iter()
                .map(|&p| Vertex::new(p, nalgebra::Vector3::zeros()))
                .collect(),
        )
    }

    /// Create a polygon that reuses an already known plane (used after splits).
    pub const fn with_plane(vertices: Vec<Vertex>, plane: Plane) -> Self {
        Polygon { vertices, plane }
    }

    /// Reverse winding, vertex normals and plane.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Axis-aligned bounds of this polygon.
    pub fn bounding_box(&self) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in &self.vertices {
            mins = mins.inf(&v.pos);
            maxs = maxs.sup(&v.pos);
        }
        Aabb::new(mins, maxs)
    }

    /// Fan-triangulate. Valid because polygons are kept convex.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        if self.vertices.len() < 3 {
            return Vec::new();
        }
        let anchor = self.vertices[0];
        self.vertices
            .windows(2)
            .skip(1)
            .map(|pair| [anchor, pair[0], pair[1]])
            .collect()
    }
}
