mod support;

use approx::assert_relative_eq;
use pidcase::{
    float_types::{PI, Real},
    mesh::{
        Mesh,
        shapes::{Align, CENTER, ON_FLOOR, UNDER},
    },
    traits::CSGOps,
};
use nalgebra::{Matrix4, Point3, Vector3};

use crate::support::bounding_box;

fn regular_polygon_area(radius: Real, segments: usize) -> Real {
    0.5 * segments as Real * radius * radius * (2.0 * PI / segments as Real).sin()
}

#[test]
fn cuboid_is_closed_box() {
    let b = Mesh::cuboid(2.0, 3.0, 4.0);
    assert_eq!(b.polygons.len(), 6);
    assert_eq!(b.triangle_count(), 12);
    assert_relative_eq!(b.volume(), 24.0, epsilon = 1e-12);
    assert_eq!(bounding_box(&b.polygons), [0.0, 0.0, 0.0, 2.0, 3.0, 4.0]);
}

#[test]
fn aligned_box_placement() {
    let size = Vector3::new(4.0, 6.0, 2.0);
    let centred = Mesh::aligned_box(size, CENTER).bounding_box();
    assert_relative_eq!(centred.mins.x, -2.0);
    assert_relative_eq!(centred.maxs.y, 3.0);
    assert_relative_eq!(centred.mins.z, -1.0);

    let floor = Mesh::aligned_box(size, ON_FLOOR).bounding_box();
    assert_relative_eq!(floor.mins.z, 0.0);
    assert_relative_eq!(floor.maxs.z, 2.0);

    let under = Mesh::aligned_box(size, UNDER).bounding_box();
    assert_relative_eq!(under.mins.z, -2.0);
    assert_relative_eq!(under.maxs.z, 0.0);

    let corner = Mesh::aligned_box(size, (Align::Min, Align::Max, Align::Center)).bounding_box();
    assert_relative_eq!(corner.mins.x, 0.0);
    assert_relative_eq!(corner.maxs.y, 0.0);
    assert_relative_eq!(corner.mins.y, -6.0);
}

#[test]
fn cylinder_volume_matches_prism() {
    let segments = 24;
    let c = Mesh::cylinder(3.0, 5.0, segments);
    assert_eq!(c.polygons.len(), segments + 2);
    assert_relative_eq!(
        c.volume(),
        regular_polygon_area(3.0, segments) * 5.0,
        epsilon = 1e-9
    );
}

#[test]
fn aligned_cylinder_heights() {
    let top = Mesh::aligned_cylinder(1.0, 4.0, 12, Align::Max).bounding_box();
    assert_relative_eq!(top.mins.z, -4.0);
    assert_relative_eq!(top.maxs.z, 0.0);

    let mid = Mesh::aligned_cylinder(1.0, 4.0, 12, Align::Center).bounding_box();
    assert_relative_eq!(mid.mins.z, -2.0);
    assert_relative_eq!(mid.maxs.z, 2.0);
}

#[test]
fn too_few_segments_are_raised_to_three() {
    let c = Mesh::cylinder(1.0, 1.0, 1);
    assert_eq!(c.polygons.len(), 5);
}

#[test]
fn translate_moves_bounds() {
    let b = Mesh::cuboid(1.0, 1.0, 1.0).translate(5.0, -2.0, 3.0);
    assert_eq!(bounding_box(&b.polygons), [5.0, -2.0, 3.0, 6.0, -1.0, 4.0]);
}

#[test]
fn rotate_about_x_turns_z_into_minus_y() {
    let rod = Mesh::cuboid(1.0, 1.0, 10.0).rotate(90.0, 0.0, 0.0);
    let bb = rod.bounding_box();
    assert_relative_eq!(bb.mins.y, -10.0, epsilon = 1e-9);
    assert_relative_eq!(bb.maxs.y, 0.0, epsilon = 1e-9);
    assert_relative_eq!(bb.maxs.z, 1.0, epsilon = 1e-9);
    assert_relative_eq!(rod.volume(), 10.0, epsilon = 1e-9);
}

#[test]
fn mirroring_keeps_normals_outward() {
    let mirror = Matrix4::new_nonuniform_scaling(&Vector3::new(-1.0, 1.0, 1.0));
    let b = Mesh::cuboid(2.0, 2.0, 2.0).transform(&mirror);
    assert_relative_eq!(b.volume(), 8.0, epsilon = 1e-12);
    let bb = b.bounding_box();
    assert_relative_eq!(bb.mins.x, -2.0);
}

#[test]
fn triangulate_preserves_volume() {
    let c = Mesh::cylinder(2.0, 3.0, 16);
    let tris = c.triangulate();
    assert!(tris.polygons.iter().all(|p| p.vertices.len() == 3));
    assert_eq!(tris.polygons.len(), c.triangle_count());
    assert_relative_eq!(tris.volume(), c.volume(), epsilon = 1e-9);
}

#[test]
fn merge_concatenates() {
    let a = Mesh::cuboid(1.0, 1.0, 1.0);
    let b = a.translate(3.0, 0.0, 0.0);
    let both = a.merge(&b);
    assert_eq!(both.polygons.len(), 12);
    assert_relative_eq!(both.volume(), 2.0, epsilon = 1e-12);
    assert_relative_eq!(both.bounding_box().maxs.x, 4.0);
}

#[test]
fn empty_mesh_bounds_at_origin() {
    let empty = Mesh::new();
    assert!(empty.is_empty());
    let bb = empty.bounding_box();
    assert_eq!(bb.mins, bb.maxs);
    assert_eq!(empty.volume(), 0.0);
}

#[test]
fn contains_point_by_ray_parity() {
    let b = Mesh::cuboid(2.0, 3.0, 4.0);
    assert!(b.contains_point(&Point3::new(1.0, 1.5, 2.0)));
    assert!(b.contains_point(&Point3::new(0.1, 0.1, 3.9)));
    assert!(!b.contains_point(&Point3::new(3.0, 1.5, 2.0)));
    assert!(!b.contains_point(&Point3::new(1.0, 1.5, -0.5)));

    let ring = Mesh::cylinder(3.0, 1.0, 16).difference(&Mesh::cylinder(1.0, 3.0, 16).translate(0.0, 0.0, -1.0));
    assert!(!ring.contains_point(&Point3::new(0.0, 0.0, 0.5)));
    assert!(ring.contains_point(&Point3::new(2.0, 0.0, 0.5)));
    assert!(!Mesh::new().contains_point(&Point3::origin()));
}
