mod support;

use pidcase::{
    float_types::EPSILON,
    mesh::{Mesh, bsp::Node},
};

use crate::support::{approx_eq, cube_at, make_polygon_3d};

#[test]
fn new_and_build() {
    let p = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let node = Node::from_polygons(&[p]);
    assert!(node.plane.is_some());
    assert_eq!(node.polygons.len(), 1);
    assert!(node.front.is_none());
    assert!(node.back.is_none());
}

#[test]
fn empty_node_has_no_plane() {
    let node = Node::from_polygons(&[]);
    assert!(node.plane.is_none());
    assert!(node.all_polygons().is_empty());
}

#[test]
fn invert() {
    let p = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
    let mut node = Node::from_polygons(&[p]);
    let original = node.plane.clone().unwrap().normal();
    node.invert();
    let flipped = node.plane.clone().unwrap().normal();
    assert!(approx_eq(flipped.z, -original.z, EPSILON));
    assert_eq!(node.polygons.len(), 1);
    assert!(approx_eq(node.polygons[0].plane.normal().z, -1.0, EPSILON));
}

#[test]
fn convex_solid_builds_without_splits() {
    let cube = Mesh::cuboid(2.0, 2.0, 2.0);
    let node = Node::from_polygons(&cube.polygons);
    assert_eq!(node.all_polygons().len(), 6);
    // Every face of a convex solid lies behind every other face's plane.
    assert!(node.front.is_none());
}

#[test]
fn picks_plane_that_splits_nothing() {
    // Two separate squares at z = 0 and z = 5 plus a wall crossing both heights.
    let low = make_polygon_3d(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]);
    let high = make_polygon_3d(&[[0.0, 0.0, 5.0], [1.0, 0.0, 5.0], [1.0, 1.0, 5.0], [0.0, 1.0, 5.0]]);
    let wall = make_polygon_3d(&[[3.0, 0.0, -1.0], [3.0, 1.0, -1.0], [3.0, 1.0, 6.0], [3.0, 0.0, 6.0]]);
    let polys = [wall, low, high];
    let plane = Node::new().pick_best_splitting_plane(&polys);
    assert!(approx_eq(plane.normal().x.abs(), 1.0, EPSILON));
}

#[test]
fn clip_polygons_removes_inside() {
    let cube = Mesh::cuboid(2.0, 2.0, 2.0);
    let node = Node::from_polygons(&cube.polygons);

    let inside = make_polygon_3d(&[[0.5, 0.5, 1.0], [1.5, 0.5, 1.0], [1.5, 1.5, 1.0]]);
    let outside = make_polygon_3d(&[[5.0, 5.0, 1.0], [6.0, 5.0, 1.0], [6.0, 6.0, 1.0]]);
    let crossing = make_polygon_3d(&[[1.0, 1.0, 1.0], [3.0, 1.0, 1.0], [3.0, 1.5, 1.0]]);

    assert!(node.clip_polygons(&[inside]).is_empty());
    assert_eq!(node.clip_polygons(&[outside]).len(), 1);

    let kept = node.clip_polygons(&[crossing]);
    assert_eq!(kept.len(), 1);
    assert!(kept[0].vertices.iter().all(|v| v.pos.x >= 2.0 - EPSILON));
}

#[test]
fn clip_to_drops_overlap() {
    let a = cube_at(2.0, 0.0, 0.0, 0.0);
    let b = cube_at(2.0, 1.0, 0.0, 0.0);
    let mut node_a = Node::from_polygons(&a.polygons);
    let node_b = Node::from_polygons(&b.polygons);

    node_a.clip_to(&node_b);
    let kept = node_a.all_polygons();
    // Nothing of A strictly inside B survives.
    for poly in &kept {
        let inside = poly.vertices.iter().all(|v| {
            v.pos.x > 1.0 + EPSILON && v.pos.y > EPSILON && v.pos.y < 2.0 - EPSILON
        });
        assert!(!inside);
    }
    // The +X face of A is entirely inside B.
    assert!(
        kept.iter()
            .all(|p| !(approx_eq(p.plane.normal().x, 1.0, EPSILON)
                && p.vertices.iter().all(|v| approx_eq(v.pos.x, 2.0, EPSILON))))
    );
}
