//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use nalgebra::{Point3, Vector3};
use pidcase::{
    EnclosureConfig,
    float_types::Real,
    mesh::{Mesh, polygon::Polygon, vertex::Vertex},
    traits::CSGOps,
};
use std::path::PathBuf;

/// Returns the approximate bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`
/// for a set of polygons.
pub fn bounding_box(polygons: &[Polygon]) -> [Real; 6] {
    let mut min = [Real::MAX; 3];
    let mut max = [Real::MIN; 3];
    for v in polygons.iter().flat_map(|p| &p.vertices) {
        for axis in 0..3 {
            min[axis] = min[axis].min(v.pos[axis]);
            max[axis] = max[axis].max(v.pos[axis]);
        }
    }
    [min[0], min[1], min[2], max[0], max[1], max[2]]
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Helper to make a simple Polygon in 3D with given vertices.
pub fn make_polygon_3d(points: &[[Real; 3]]) -> Polygon {
    let verts = points
        .iter()
        .map(|p| Vertex::new(Point3::new(p[0], p[1], p[2]), Vector3::z()))
        .collect();
    Polygon::new(verts).expect("test polygon has area")
}

/// Axis-aligned cube of edge `size` with its minimum corner at `(x, y, z)`.
pub fn cube_at(size: Real, x: Real, y: Real, z: Real) -> Mesh {
    Mesh::cuboid(size, size, size).translate(x, y, z)
}

/// Whether `point` is inside the closed `mesh`, by majority over three
/// skewed rays, each counting face crossings.
pub fn contains(mesh: &Mesh, point: [Real; 3]) -> bool {
    let origin = Point3::new(point[0], point[1], point[2]);
    let directions = [
        Vector3::new(0.31, 0.53, 0.79),
        Vector3::new(-0.67, 0.23, 0.41),
        Vector3::new(0.19, -0.71, -0.37),
    ];
    let triangles: Vec<_> = mesh.polygons.iter().flat_map(|p| p.triangulate()).collect();
    let inside = directions
        .iter()
        .filter(|dir| {
            let dir = dir.normalize();
            let hits = triangles.iter().filter(|t| ray_hits(&origin, &dir, t)).count();
            hits % 2 == 1
        })
        .count();
    inside >= 2
}

fn ray_hits(origin: &Point3<Real>, dir: &Vector3<Real>, tri: &[Vertex; 3]) -> bool {
    let e1 = tri[1].pos - tri[0].pos;
    let e2 = tri[2].pos - tri[0].pos;
    let h = dir.cross(&e2);
    let det = e1.dot(&h);
    if det.abs() < 1e-12 {
        return false;
    }
    let s = *origin - tri[0].pos;
    let u = s.dot(&h) / det;
    let q = s.cross(&e1);
    let v = dir.dot(&q) / det;
    u >= 0.0 && v >= 0.0 && u + v <= 1.0 && e2.dot(&q) / det > 1e-9
}

/// Asserts that `mesh` stays inside the box `mins`..`maxs`, within `tol`.
pub fn assert_within(name: &str, mesh: &Mesh, mins: [Real; 3], maxs: [Real; 3], tol: Real) {
    let bb = mesh.bounding_box();
    for axis in 0..3 {
        assert!(
            bb.mins[axis] >= mins[axis] - tol && bb.maxs[axis] <= maxs[axis] + tol,
            "{name} spans {:?}..{:?} on axis {axis}, outside {mins:?}..{maxs:?}",
            bb.mins,
            bb.maxs
        );
    }
}

/// Defaults with coarse circles so full part builds stay quick.
pub fn coarse_config() -> EnclosureConfig {
    let mut config = EnclosureConfig::default();
    config.output.circle_segments = 12;
    config
}

/// Fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pidcase-it-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}
