//! 2D Shapes as `Sketch`s. All shapes are centred on the origin.

use crate::float_types::{EPSILON, FRAC_PI_2, PI, Real, TAU};
use crate::sketch::Sketch;
use geo::{LineString, MultiPolygon, Polygon as GeoPolygon};

impl Sketch {
    fn from_ring(mut coords: Vec<(Real, Real)>) -> Self {
        if let Some(&first) = coords.first() {
            coords.push(first);
        }
        let polygon_2d = GeoPolygon::new(LineString::from(coords), vec![]);
        Sketch::from_geo(MultiPolygon(vec![polygon_2d]))
    }

    /// Rectangle of `width` (X) by `length` (Y).
    pub fn rectangle(width: Real, length: Real) -> Self {
        let (hx, hy) = (width / 2.0, length / 2.0);
        Self::from_ring(vec![(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)])
    }

    /// Rectangle with every vertex filleted to `corner_radius`.
    ///
    /// The radius is clamped to half the shorter side. A radius at or below
    /// zero gives a sharp rectangle.
    pub fn rounded_rectangle(
        width: Real,
        length: Real,
        corner_radius: Real,
        corner_segments: usize,
    ) -> Self {
        let r = corner_radius.min(width * 0.5).min(length * 0.5);
        if r <= EPSILON {
            return Sketch::rectangle(width, length);
        }
        let corner_segments = corner_segments.max(1);
        let step = FRAC_PI_2 / corner_segments as Real;
        let (hx, hy) = (width / 2.0 - r, length / 2.0 - r);

        let corner = |cx: Real, cy: Real, start_angle: Real| {
            (0..=corner_segments).map(move |i| {
                let angle = start_angle + (i as Real) * step;
                (cx + r * angle.cos(), cy + r * angle.sin())
            })
        };

        let mut coords: Vec<(Real, Real)> = corner(-hx, -hy, PI) // Bottom-left
            .chain(corner(hx, -hy, 1.5 * PI)) // Bottom-right
            .chain(corner(hx, hy, 0.0)) // Top-right
            .chain(corner(-hx, hy, 0.5 * PI)) // Top-left
            .collect();
        coords.dedup_by(|a, b| (a.0 - b.0).abs() < EPSILON && (a.1 - b.1).abs() < EPSILON);

        Self::from_ring(coords)
    }

    /// Regular `segments`-gon inscribed in a circle of `radius`.
    pub fn circle(radius: Real, segments: usize) -> Self {
        if segments < 3 || radius <= EPSILON {
            return Sketch::default();
        }
        let coords = (0..segments)
            .map(|i| {
                let theta = TAU * (i as Real) / (segments as Real);
                (radius * theta.cos(), radius * theta.sin())
            })
            .collect();
        Self::from_ring(coords)
    }

    /// Stadium slot along X with the given overall length and width.
    ///
    /// `segments` is the resolution of a full circle; each rounded end uses half.
    pub fn slot_overall(length: Real, width: Real, segments: usize) -> Self {
        let r = width / 2.0;
        let straight = (length - width).max(0.0) / 2.0;
        let half = (segments / 2).max(2);

        let end = |cx: Real, start: Real| {
            (0..=half).map(move |i| {
                let angle = start + PI * i as Real / half as Real;
                (cx + r * angle.cos(), r * angle.sin())
            })
        };

        let mut coords: Vec<(Real, Real)> =
            end(straight, -FRAC_PI_2).chain(end(-straight, FRAC_PI_2)).collect();
        coords.dedup_by(|a, b| (a.0 - b.0).abs() < EPSILON && (a.1 - b.1).abs() < EPSILON);
        Self::from_ring(coords)
    }
}
