mod support;

use pidcase::{
    io::{StlFormat, write_stl},
    mesh::Mesh,
    traits::CSGOps,
};

use crate::support::scratch_dir;

#[test]
fn mesh_to_stl_ascii() {
    let cube = Mesh::cuboid(2.0, 2.0, 2.0);
    let stl = cube.to_stl_ascii("test_cube");
    assert!(stl.contains("solid test_cube"));
    assert!(stl.contains("endsolid test_cube"));
    assert_eq!(stl.matches("facet normal").count(), 12);
    assert_eq!(stl.matches("vertex").count(), 36);
    // header, seven lines per facet, footer
    assert_eq!(stl.lines().count(), 2 + 12 * 7);
    assert!(stl.starts_with("solid test_cube\n  facet normal "));
    assert!(stl.ends_with("  endfacet\nendsolid test_cube\n"));
}

#[test]
fn binary_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let cube = Mesh::cuboid(2.0, 2.0, 2.0);
    let bytes = cube.to_stl_binary()?;
    assert_eq!(bytes.len(), 84 + 12 * 50);

    let back = Mesh::from_stl(&bytes)?;
    // 6 quads -> 12 triangles, one polygon each
    assert_eq!(back.polygons.len(), 12);
    assert!((back.volume() - 8.0).abs() < 1e-4);
    Ok(())
}

#[test]
fn ascii_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let shape = Mesh::cylinder(1.0, 2.0, 12).translate(3.0, 0.0, 0.0);
    let text = shape.to_stl_ascii("cyl");
    let back = Mesh::from_stl(text.as_bytes())?;
    assert_eq!(back.polygons.len(), shape.triangle_count());
    let bb = back.bounding_box();
    assert!((bb.mins.x - 2.0).abs() < 1e-4);
    Ok(())
}

#[test]
fn write_stl_reports_triangles() -> Result<(), Box<dyn std::error::Error>> {
    let dir = scratch_dir("stl");
    std::fs::create_dir_all(&dir)?;
    let cube = Mesh::cuboid(1.0, 1.0, 1.0);

    let binary = dir.join("cube.stl");
    assert_eq!(write_stl(&cube, "cube", &binary, StlFormat::Binary)?, 12);
    assert_eq!(std::fs::metadata(&binary)?.len(), 84 + 12 * 50);

    let ascii = dir.join("cube_ascii.stl");
    write_stl(&cube, "cube", &ascii, StlFormat::Ascii)?;
    assert!(std::fs::read_to_string(&ascii)?.starts_with("solid cube"));

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[test]
fn write_to_missing_directory_fails() {
    let path = scratch_dir("missing").join("nope").join("cube.stl");
    let err = write_stl(&Mesh::cuboid(1.0, 1.0, 1.0), "cube", &path, StlFormat::Binary);
    assert!(matches!(err, Err(pidcase::errors::Error::Write { .. })));
}

#[test]
fn garbage_is_rejected() {
    assert!(Mesh::from_stl(b"definitely not an stl").is_err());
}
