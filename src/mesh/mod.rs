//! `Mesh` struct and implementations of the `CSGOps` trait for `Mesh`

use crate::float_types::{EPSILON, Real};
use crate::mesh::{bsp::Node, polygon::Polygon, vertex::Vertex};
use crate::traits::CSGOps;
use nalgebra::{Isometry3, Matrix4, Point3, Vector3};
use parry3d_f64::bounding_volume::{Aabb, BoundingVolume};
use parry3d_f64::query::{Ray, RayCast};
use parry3d_f64::shape::Triangle;
use std::sync::OnceLock;

pub mod bsp;
pub mod plane;
pub mod polygon;
pub mod shapes;
pub mod vertex;

/// A closed solid represented as a soup of convex polygons.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    /// 3D polygons for volumetric shapes
    pub polygons: Vec<Polygon>,

    /// Lazily calculated AABB that spans `polygons`.
    pub bounding_box: OnceLock<Aabb>,
}

impl Mesh {
    /// Build a Mesh from an existing polygon list
    pub fn from_polygons(polygons: Vec<Polygon>) -> Self {
        Mesh {
            polygons,
            bounding_box: OnceLock::new(),
        }
    }

    /// Split polygons into (may_touch, cannot_touch) using bounding‑box tests
    fn partition_polys(polys: &[Polygon], other_bb: &Aabb) -> (Vec<Polygon>, Vec<Polygon>) {
        let grown = other_bb.loosened(EPSILON);
        polys
            .iter()
            .cloned()
            .partition(|p| p.bounding_box().intersects(&grown))
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Helper to collect all vertices.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.polygons
            .iter()
            .flat_map(|p| p.vertices.iter().copied())
            .collect()
    }

    /// Triangulate each polygon, returning a Mesh containing only triangles.
    pub fn triangulate(&self) -> Mesh {
        let triangles = self
            .polygons
            .iter()
            .flat_map(|poly| {
                poly.triangulate().into_iter().map(|tri| {
                    Polygon::with_plane(tri.to_vec(), poly.plane.clone())
                })
            })
            .collect();
        Mesh::from_polygons(triangles)
    }

    /// Number of triangles this mesh exports as.
    pub fn triangle_count(&self) -> usize {
        self.polygons
            .iter()
            .map(|p| p.vertices.len().saturating_sub(2))
            .sum()
    }

    /// Enclosed volume via the divergence theorem.
    ///
    /// Only meaningful for closed, consistently wound meshes. T-junctions left
    /// by BSP splitting do not affect the result.
    pub fn volume(&self) -> Real {
        self.polygons
            .iter()
            .flat_map(|p| p.triangulate())
            .map(|[a, b, c]| a.pos.coords.dot(&b.pos.coords.cross(&c.pos.coords)))
            .sum::<Real>()
            / 6.0
    }

    /// Concatenate polygon soups without any boolean.
    ///
    /// Only correct as a solid when the inputs do not overlap. Used for
    /// preview assemblies where parts sit side by side.
    pub fn merge(&self, other: &Mesh) -> Mesh {
        let mut polygons = self.polygons.clone();
        polygons.extend(other.polygons.iter().cloned());
        Mesh::from_polygons(polygons)
    }

    /// Whether `point` lies inside the solid, by the parity of the faces a ray
    /// from it crosses. Only meaningful for closed meshes.
    ///
    /// The ray is skewed off every axis so it does not run along the edges
    /// of axis-aligned parts. Hits on a shared edge count once.
    pub fn contains_point(&self, point: &Point3<Real>) -> bool {
        let ray = Ray::new(*point, Vector3::new(0.5413, 0.6137, 0.5747));
        let iso = Isometry3::identity();

        let mut hits: Vec<Real> = self
            .polygons
            .iter()
            .flat_map(|poly| poly.triangulate())
            .filter_map(|tri| {
                Triangle::new(tri[0].pos, tri[1].pos, tri[2].pos).cast_ray(&iso, &ray, Real::MAX, true)
            })
            .collect();
        hits.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        hits.dedup_by(|a, b| (*a - *b).abs() < EPSILON);

        hits.len() % 2 == 1
    }

    /// Invert this Mesh (flip inside vs. outside)
    pub fn inverse(&self) -> Mesh {
        let mut mesh = self.clone();
        for p in &mut mesh.polygons {
            p.flip();
        }
        mesh.bounding_box = OnceLock::new();
        mesh
    }
}

impl CSGOps for Mesh {
    /// Returns a new empty Mesh
    fn new() -> Self {
        Mesh::default()
    }

    /// Return a new Mesh representing union of the two Meshes.
    ///
    /// ```text
    /// let c = a.union(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |       +----+
    ///     +----+--+    |       +----+       |
    ///          |   b   |            |   c   |
    ///          |       |            |       |
    ///          +-------+            +-------+
    /// ```
    fn union(&self, other: &Mesh) -> Mesh {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }

        // avoid splitting obvious non‑intersecting faces
        let (a_clip, a_passthru) = Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, b_passthru) = Self::partition_polys(&other.polygons, &self.bounding_box());

        // No surface of one operand near the other: the other sits wholly
        // inside or wholly outside it.
        if a_clip.is_empty() {
            return if self.contains_point(&other.bounding_box().center()) {
                self.clone()
            } else {
                self.merge(other)
            };
        }
        if b_clip.is_empty() {
            return if other.contains_point(&self.bounding_box().center()) {
                other.clone()
            } else {
                self.merge(other)
            };
        }

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());

        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);
        final_polys.extend(b_passthru);
        Mesh::from_polygons(final_polys)
    }

    /// Return a new Mesh representing difference of the two Meshes.
    ///
    /// ```text
    /// let c = a.difference(b);
    ///     +-------+            +-------+
    ///     |       |            |       |
    ///     |   a   |            |   c   |
    ///     |    +--+----+   =   |    +--+
    ///     +----+--+    |       +----+
    ///          |   b   |
    ///          |       |
    ///          +-------+
    /// ```
    fn difference(&self, other: &Mesh) -> Mesh {
        if self.is_empty() || other.is_empty() {
            return self.clone();
        }

        let (a_clip, a_passthru) = Self::partition_polys(&self.polygons, &other.bounding_box());
        let (b_clip, _b_passthru) = Self::partition_polys(&other.polygons, &self.bounding_box());

        // A tool with no surface inside `self`'s box either misses it or
        // swallows it; one that meets no surface of `self` is a cavity or air.
        if b_clip.is_empty() {
            return if other.contains_point(&self.bounding_box().center()) {
                Mesh::new()
            } else {
                self.clone()
            };
        }
        if a_clip.is_empty() {
            return if self.contains_point(&other.bounding_box().center()) {
                self.merge(&other.inverse())
            } else {
                self.clone()
            };
        }

        let mut a = Node::from_polygons(&a_clip);
        let mut b = Node::from_polygons(&b_clip);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(&b.all_polygons());
        a.invert();

        let mut final_polys = a.all_polygons();
        final_polys.extend(a_passthru);
        Mesh::from_polygons(final_polys)
    }

    /// Return a new Mesh representing intersection of the two Meshes.
    fn intersection(&self, other: &Mesh) -> Mesh {
        if self.is_empty() || other.is_empty() {
            return Mesh::new();
        }

        let mut a = Node::from_polygons(&self.polygons);
        let mut b = Node::from_polygons(&other.polygons);

        a.invert();
        b.clip_to(&a);
        b.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        a.build(&b.all_polygons());
        a.invert();

        Mesh::from_polygons(a.all_polygons())
    }

    /// Apply an affine 3D transform (as a 4x4 matrix) to the mesh.
    ///
    /// Planes are recomputed from the moved vertices. A mirroring transform
    /// reverses winding, so polygons are flipped back to keep normals outward.
    fn transform(&self, mat: &Matrix4<Real>) -> Mesh {
        let mirrors = mat.fixed_view::<3, 3>(0, 0).determinant() < 0.0;

        let polygons = self
            .polygons
            .iter()
            .filter_map(|poly| {
                let vertices = poly
                    .vertices
                    .iter()
                    .map(|v| Vertex::new(mat.transform_point(&v.pos), v.normal))
                    .collect();
                let mut moved = Polygon::new(vertices)?;
                if mirrors {
                    moved.flip();
                }
                Some(moved)
            })
            .collect();

        Mesh::from_polygons(polygons)
    }

    /// Returns a [`parry3d_f64::bounding_volume::Aabb`] spanning all `polygons`.
    fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for poly in &self.polygons {
                for v in &poly.vertices {
                    mins = mins.inf(&v.pos);
                    maxs = maxs.sup(&v.pos);
                }
            }

            // No polygons => trivial AABB at origin
            if mins.x > maxs.x {
                return Aabb::new(Point3::origin(), Point3::origin());
            }
            Aabb::new(mins, maxs)
        })
    }
}
