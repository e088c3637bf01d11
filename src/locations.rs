//! Placement patterns: lists of XY offsets at which a feature is repeated.

use crate::float_types::Real;

/// An XY offset.
pub type Offset = (Real, Real);

/// `x_count × y_count` grid centred on the origin.
///
/// Offsets are emitted row by row starting from the lowest X and Y.
pub fn grid(x_spacing: Real, y_spacing: Real, x_count: usize, y_count: usize) -> Vec<Offset> {
    let x0 = -x_spacing * (x_count.saturating_sub(1)) as Real / 2.0;
    let y0 = -y_spacing * (y_count.saturating_sub(1)) as Real / 2.0;
    (0..y_count)
        .flat_map(|j| {
            (0..x_count).map(move |i| (x0 + i as Real * x_spacing, y0 + j as Real * y_spacing))
        })
        .collect()
}

/// The four mirrored corners `(±dx, ±dy)`.
pub fn corners(dx: Real, dy: Real) -> Vec<Offset> {
    vec![(dx, dy), (-dx, dy), (dx, -dy), (-dx, -dy)]
}

/// Two offsets `(±dx, 0)`.
pub fn pairs_x(dx: Real) -> Vec<Offset> {
    vec![(dx, 0.0), (-dx, 0.0)]
}

/// Two offsets `(0, ±dy)`.
pub fn pairs_y(dy: Real) -> Vec<Offset> {
    vec![(0.0, dy), (0.0, -dy)]
}

/// Shift every offset by `(x, y)`.
pub fn shifted(offsets: &[Offset], x: Real, y: Real) -> Vec<Offset> {
    offsets.iter().map(|&(dx, dy)| (x + dx, y + dy)).collect()
}
