//! 3D primitives and their placement relative to the origin.

use crate::float_types::{Real, TAU};
use crate::mesh::{Mesh, polygon::Polygon};
use crate::traits::CSGOps;
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Where a primitive sits relative to the origin along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Align {
    /// The primitive's minimum coordinate is at 0.
    Min,
    /// The primitive is centred on 0.
    #[default]
    Center,
    /// The primitive's maximum coordinate is at 0.
    Max,
}

impl Align {
    /// Offset that moves a span `[0, extent]` into this alignment.
    pub fn offset(self, extent: Real) -> Real {
        match self {
            Align::Min => 0.0,
            Align::Center => -extent / 2.0,
            Align::Max => -extent,
        }
    }
}

/// Per-axis alignment `(x, y, z)`.
pub type Align3 = (Align, Align, Align);

/// Centred on all three axes.
pub const CENTER: Align3 = (Align::Center, Align::Center, Align::Center);
/// Centred in XY, resting on z = 0.
pub const ON_FLOOR: Align3 = (Align::Center, Align::Center, Align::Min);
/// Centred in XY, hanging from z = 0.
pub const UNDER: Align3 = (Align::Center, Align::Center, Align::Max);

impl Mesh {
    /// Axis-aligned box spanning `[0, width] × [0, length] × [0, height]`.
    ///
    /// ```text
    ///       4-------5
    ///      /|      /|
    ///     7-------6 |
    ///     | 0-----|-1
    ///     |/      |/
    ///     3-------2
    /// ```
    pub fn cuboid(width: Real, length: Real, height: Real) -> Mesh {
        let corners = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, length, 0.0),
            Point3::new(0.0, length, 0.0),
            Point3::new(0.0, 0.0, height),
            Point3::new(width, 0.0, height),
            Point3::new(width, length, height),
            Point3::new(0.0, length, height),
        ];

        // CCW seen from outside
        let faces: [[usize; 4]; 6] = [
            [0, 3, 2, 1], // bottom
            [4, 5, 6, 7], // top
            [0, 1, 5, 4], // front (-Y)
            [3, 7, 6, 2], // back (+Y)
            [0, 4, 7, 3], // left (-X)
            [1, 2, 6, 5], // right (+X)
        ];

        let polygons = faces
            .iter()
            .filter_map(|face| Polygon::from_points(&face.map(|i| corners[i])))
            .collect();
        Mesh::from_polygons(polygons)
    }

    /// Box of the given size placed by `align` relative to the origin.
    pub fn aligned_box(size: Vector3<Real>, align: Align3) -> Mesh {
        Mesh::cuboid(size.x, size.y, size.z).translate(
            align.0.offset(size.x),
            align.1.offset(size.y),
            align.2.offset(size.z),
        )
    }

    /// Cylinder on the Z axis from z = 0 to z = `height`.
    ///
    /// Caps are single convex polygons, sides are one quad per segment.
    pub fn cylinder(radius: Real, height: Real, segments: usize) -> Mesh {
        let segments = segments.max(3);
        let ring: Vec<(Real, Real)> = (0..segments)
            .map(|i| {
                let angle = TAU * i as Real / segments as Real;
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect();

        let bottom = |&(x, y): &(Real, Real)| Point3::new(x, y, 0.0);
        let top = |&(x, y): &(Real, Real)| Point3::new(x, y, height);

        let mut polygons = Vec::with_capacity(segments + 2);
        polygons.extend(Polygon::from_points(&ring.iter().rev().map(bottom).collect::<Vec<_>>()));
        polygons.extend(Polygon::from_points(&ring.iter().map(top).collect::<Vec<_>>()));

        for i in 0..segments {
            let j = (i + 1) % segments;
            polygons.extend(Polygon::from_points(&[
                bottom(&ring[i]),
                bottom(&ring[j]),
                top(&ring[j]),
                top(&ring[i]),
            ]));
        }

        Mesh::from_polygons(polygons)
    }

    /// Cylinder on the Z axis, its height range placed by `align`.
    pub fn aligned_cylinder(radius: Real, height: Real, segments: usize, align: Align) -> Mesh {
        Mesh::cylinder(radius, height, segments).translate(0.0, 0.0, align.offset(height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cuboid_volume_and_bounds() {
        let cube = Mesh::cuboid(2.0, 3.0, 4.0);
        assert_eq!(cube.polygons.len(), 6);
        assert_relative_eq!(cube.volume(), 24.0, epsilon = 1e-9);
        let bb = cube.bounding_box();
        assert_eq!(bb.maxs, Point3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn aligned_box_offsets() {
        let b = Mesh::aligned_box(Vector3::new(4.0, 2.0, 6.0), (Align::Center, Align::Max, Align::Min));
        let bb = b.bounding_box();
        assert_relative_eq!(bb.mins.x, -2.0);
        assert_relative_eq!(bb.maxs.y, 0.0);
        assert_relative_eq!(bb.mins.y, -2.0);
        assert_relative_eq!(bb.mins.z, 0.0);
    }

    #[test]
    fn cylinder_volume_matches_prism() {
        let n = 32;
        let cyl = Mesh::cylinder(2.0, 5.0, n);
        let area = 0.5 * n as Real * 4.0 * (TAU / n as Real).sin();
        assert_relative_eq!(cyl.volume(), area * 5.0, epsilon = 1e-9);
    }

    #[test]
    fn hanging_cylinder() {
        let cyl = Mesh::aligned_cylinder(1.0, 3.0, 12, Align::Max);
        let bb = cyl.bounding_box();
        assert_relative_eq!(bb.maxs.z, 0.0);
        assert_relative_eq!(bb.mins.z, -3.0);
    }
}
