//! Printable parts for each enclosure variant, plus the helpers they share.

use crate::float_types::Real;
use crate::locations;
use crate::mesh::{Mesh, shapes::Align};
use crate::sketch::Sketch;
use crate::traits::CSGOps;

pub mod inverted;
pub mod tabletop;

pub use inverted::Inverted;
pub use tabletop::Tabletop;

/// Segments used for a quarter-circle fillet when a full circle uses `segments`.
pub(crate) fn corner_segments(segments: usize) -> usize {
    (segments / 4).max(1)
}

/// Plan-view rounded rectangle extruded from z = 0 to `height`.
pub(crate) fn rounded_plate(
    width: Real,
    length: Real,
    radius: Real,
    height: Real,
    segments: usize,
) -> Mesh {
    Sketch::rounded_rectangle(width, length, radius, corner_segments(segments)).extrude(height)
}

/// Cylinder whose axis runs along Y.
///
/// `align` places the axial extent before the turn, so `Align::Min` spans
/// `y ∈ [-length, 0]` and `Align::Max` spans `y ∈ [0, length]`.
pub(crate) fn y_cylinder(radius: Real, length: Real, segments: usize, align: Align) -> Mesh {
    Mesh::aligned_cylinder(radius, length, segments, align).rotate(90.0, 0.0, 0.0)
}

/// A row of `count` stadium slots running along Y, centred on the origin and
/// spaced `pitch` apart in X.
pub(crate) fn slot_row(
    length: Real,
    width: Real,
    pitch: Real,
    count: usize,
    segments: usize,
) -> Sketch {
    let slot = Sketch::slot_overall(length, width, segments).rotate(0.0, 0.0, 90.0);
    let slots: Vec<Sketch> = locations::grid(pitch, 0.0, count, 1)
        .into_iter()
        .map(|(x, y)| slot.translate(x, y, 0.0))
        .collect();
    Sketch::union_all(&slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn y_cylinder_extents() {
        let c = y_cylinder(1.0, 10.0, 12, Align::Min);
        let bb = c.bounding_box();
        assert_relative_eq!(bb.mins.y, -10.0, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.z, 1.0, epsilon = 1e-9);

        let centred = y_cylinder(1.0, 10.0, 12, Align::Center).bounding_box();
        assert_relative_eq!(centred.mins.y, -5.0, epsilon = 1e-9);
    }

    #[test]
    fn slot_row_spans() {
        let row = slot_row(30.0, 3.0, 6.0, 6, 16);
        assert_eq!(row.geometry.0.len(), 6);
        let bb = row.bounding_box();
        assert_relative_eq!(bb.mins.x, -16.5, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.x, 16.5, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.y, 15.0, epsilon = 1e-9);
    }

    #[test]
    fn plate_height() {
        let plate = rounded_plate(20.0, 10.0, 2.0, 3.0, 16);
        let bb = plate.bounding_box();
        assert_relative_eq!(bb.maxs.z, 3.0);
        assert_relative_eq!(bb.maxs.x, 10.0, epsilon = 1e-9);
    }
}
