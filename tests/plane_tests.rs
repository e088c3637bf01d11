use pidcase::{
    float_types::EPSILON,
    mesh::{
        plane::{BACK, COPLANAR, FRONT, Plane, SPANNING},
        polygon::Polygon,
        vertex::Vertex,
    },
};
use nalgebra::{Point3, Vector3};

fn square_at_z(z: f64) -> Polygon {
    Polygon::from_points(&[
        Point3::new(-1.0, -1.0, z),
        Point3::new(1.0, -1.0, z),
        Point3::new(1.0, 1.0, z),
        Point3::new(-1.0, 1.0, z),
    ])
    .unwrap()
}

#[test]
fn flip() {
    let mut plane = Plane::from_normal_point(Vector3::y(), &Point3::new(0.0, 2.0, 0.0));
    plane.flip();
    assert_eq!(plane.normal(), Vector3::new(0.0, -1.0, 0.0));
    assert_eq!(plane.offset(), -2.0);
}

#[test]
fn normal_is_unit() {
    let plane = Plane::from_normal_point(Vector3::new(0.0, 0.0, 5.0), &Point3::new(0.0, 0.0, 3.0));
    assert!((plane.normal().norm() - 1.0).abs() < EPSILON);
    assert!((plane.offset() - 3.0).abs() < EPSILON);
}

#[test]
fn from_vertices_follows_winding() {
    let ccw = [
        Vertex::new(Point3::origin(), Vector3::zeros()),
        Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::zeros()),
        Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::zeros()),
    ];
    let up = Plane::from_vertices(&ccw).unwrap();
    assert!((up.normal().z - 1.0).abs() < EPSILON);

    let mut cw = ccw;
    cw.reverse();
    let down = Plane::from_vertices(&cw).unwrap();
    assert!((down.normal().z + 1.0).abs() < EPSILON);
}

#[test]
fn from_vertices_rejects_degenerate() {
    let collinear = [
        Vertex::new(Point3::origin(), Vector3::zeros()),
        Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::zeros()),
        Vertex::new(Point3::new(2.0, 0.0, 0.0), Vector3::zeros()),
    ];
    assert!(Plane::from_vertices(&collinear).is_none());
    assert!(Plane::from_vertices(&collinear[..2]).is_none());
}

#[test]
fn orient_point_respects_tolerance() {
    let plane = Plane::from_normal_point(Vector3::z(), &Point3::origin());
    assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, 1.0)), FRONT);
    assert_eq!(plane.orient_point(&Point3::new(0.0, 0.0, -1.0)), BACK);
    assert_eq!(plane.orient_point(&Point3::new(3.0, 4.0, EPSILON / 2.0)), COPLANAR);
}

#[test]
fn classify_polygon() {
    let plane = Plane::from_normal_point(Vector3::z(), &Point3::origin());
    assert_eq!(plane.classify_polygon(&square_at_z(0.0)), COPLANAR);
    assert_eq!(plane.classify_polygon(&square_at_z(2.0)), FRONT);
    assert_eq!(plane.classify_polygon(&square_at_z(-2.0)), BACK);

    let upright = Polygon::from_points(&[
        Point3::new(0.0, 0.0, -1.0),
        Point3::new(1.0, 0.0, -1.0),
        Point3::new(1.0, 0.0, 1.0),
        Point3::new(0.0, 0.0, 1.0),
    ])
    .unwrap();
    assert_eq!(plane.classify_polygon(&upright), SPANNING);
}

#[test]
fn split_polygon() {
    let plane = Plane::from_normal_point(Vector3::y(), &Point3::origin());
    let poly = square_at_z(0.0);

    let (cf, cb, f, b) = plane.split_polygon(&poly);
    assert_eq!(cf.len(), 0);
    assert_eq!(cb.len(), 0);
    assert_eq!(f.len(), 1);
    assert_eq!(b.len(), 1);

    assert!(f[0].vertices.iter().all(|v| v.pos.y >= -EPSILON));
    assert!(b[0].vertices.iter().all(|v| v.pos.y <= EPSILON));
    assert_eq!(f[0].vertices.len(), 4);
    // Halves keep the source plane.
    assert_eq!(f[0].plane, poly.plane);
}

#[test]
fn split_coplanar_by_facing() {
    let plane = Plane::from_normal_point(Vector3::z(), &Point3::origin());
    let up = square_at_z(0.0);
    let mut down = up.clone();
    down.flip();

    let (cf, cb, f, b) = plane.split_polygon(&up);
    assert_eq!((cf.len(), cb.len(), f.len(), b.len()), (1, 0, 0, 0));
    let (cf, cb, f, b) = plane.split_polygon(&down);
    assert_eq!((cf.len(), cb.len(), f.len(), b.len()), (0, 1, 0, 0));
}

#[test]
fn split_through_vertex() {
    // Diagonal plane x = y passes through two corners of the square.
    let plane = Plane::from_normal_point(Vector3::new(1.0, -1.0, 0.0), &Point3::origin());
    let (_, _, f, b) = plane.split_polygon(&square_at_z(0.0));
    assert_eq!(f.len(), 1);
    assert_eq!(b.len(), 1);
    assert_eq!(f[0].vertices.len(), 3);
    assert_eq!(b[0].vertices.len(), 3);
}
