use crate::errors::{Error, Result};
use crate::float_types::Real;
use crate::mesh::{Mesh, polygon::Polygon};
use crate::triangulated::Triangulated3D;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use std::path::Path;

/// Encoding used for written STL files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    /// Compact little-endian binary STL; what slicers expect.
    #[default]
    Binary,
    /// Human-readable text STL.
    Ascii,
}

/// Export to ASCII STL
/// Convert this shape to an **ASCII STL** string with the given `name`.
pub fn to_stl_ascii<T: Triangulated3D>(shape: &T, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for v in &tri {
            let p = v.pos;
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    });

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Export to BINARY STL (returns `Vec<u8>`)
///
/// Positions are narrowed to `f32`, as the format requires.
pub fn to_stl_binary<T: Triangulated3D>(shape: &T) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Triangle, Vertex, write_stl};

    let mut triangles = Vec::<Triangle>::new();

    shape.visit_triangles(|tri| {
        let n = tri[0].normal;
        triangles.push(Triangle {
            normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
            vertices: tri.map(|v| {
                let p = v.pos;
                Vertex::new([p.x as f32, p.y as f32, p.z as f32])
            }),
        });
    });

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self)
    }

    /// Read an STL (binary or ASCII) back into a mesh of triangles.
    ///
    /// Degenerate facets are dropped.
    pub fn from_stl(data: &[u8]) -> std::io::Result<Mesh> {
        let mut cursor = Cursor::new(data);
        let stl = stl_io::read_stl(&mut cursor)?;

        let point = |i: usize| {
            let v = &stl.vertices[i];
            Point3::new(v[0] as Real, v[1] as Real, v[2] as Real)
        };

        let polygons = stl
            .faces
            .iter()
            .filter_map(|face| Polygon::from_points(&face.vertices.map(point)))
            .collect();

        Ok(Mesh::from_polygons(polygons))
    }
}

/// Write `mesh` to `path`, returning the number of triangles written.
pub fn write_stl(mesh: &Mesh, name: &str, path: &Path, format: StlFormat) -> Result<usize> {
    let bytes = match format {
        StlFormat::Binary => mesh.to_stl_binary()?,
        StlFormat::Ascii => mesh.to_stl_ascii(name).into_bytes(),
    };
    std::fs::write(path, bytes).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(mesh.triangle_count())
}
