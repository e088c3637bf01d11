mod support;

use pidcase::{
    float_types::EPSILON,
    mesh::{polygon::Polygon, vertex::Vertex},
};
use nalgebra::{Point3, Vector3};

use crate::support::{approx_eq, make_polygon_3d};

#[test]
fn construction() {
    let poly = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 1.0], [1.0, 0.0, -1.0]]);
    assert_eq!(poly.vertices.len(), 3);
    assert!(
        approx_eq(poly.plane.normal().dot(&Vector3::y()).abs(), 1.0, 1e-8),
        "Expected plane normal to match ±Y"
    );
}

#[test]
fn new_sets_face_normals() {
    let poly = Polygon::new(vec![
        Vertex::new(Point3::origin(), Vector3::x()),
        Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::x()),
        Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::x()),
    ])
    .unwrap();
    assert!(approx_eq(poly.plane.normal().z, 1.0, EPSILON));
    for v in &poly.vertices {
        assert!(approx_eq(v.normal.z, 1.0, EPSILON));
    }
}

#[test]
fn new_rejects_degenerate() {
    let two = vec![
        Vertex::new(Point3::origin(), Vector3::z()),
        Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
    ];
    assert!(Polygon::new(two).is_none());
    assert!(
        Polygon::from_points(&[
            Point3::origin(),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ])
        .is_none()
    );
}

#[test]
fn flip() {
    let mut poly = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let first = poly.vertices[0].pos;
    poly.flip();
    assert!(approx_eq(poly.plane.normal().z, -1.0, EPSILON));
    assert!(poly.vertices.iter().all(|v| approx_eq(v.normal.z, -1.0, EPSILON)));
    assert_eq!(poly.vertices[2].pos, first);
}

#[test]
fn triangulate() {
    let poly = make_polygon_3d(&[
        [0.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [3.0, 1.0, 0.0],
        [2.0, 2.0, 0.0],
        [0.0, 2.0, 0.0],
    ]);
    let tris = poly.triangulate();
    assert_eq!(tris.len(), 3);
    for tri in &tris {
        assert_eq!(tri[0].pos, Point3::origin());
    }
}

#[test]
fn bounding_box() {
    let poly = make_polygon_3d(&[[-1.0, 2.0, 3.0], [4.0, 2.0, 3.0], [4.0, 5.0, 3.0]]);
    let bb = poly.bounding_box();
    assert_eq!(bb.mins, Point3::new(-1.0, 2.0, 3.0));
    assert_eq!(bb.maxs, Point3::new(4.0, 5.0, 3.0));
}

#[test]
fn vertex_interpolate() {
    let a = Vertex::new(Point3::origin(), Vector3::x());
    let b = Vertex::new(Point3::new(4.0, 0.0, 2.0), Vector3::y());
    let mid = a.interpolate(&b, 0.25);
    assert_eq!(mid.pos, Point3::new(1.0, 0.0, 0.5));
    assert!(approx_eq(mid.normal.x, 0.75, EPSILON));
}
