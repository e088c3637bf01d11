//! Single-line stroke lettering as a filled `Sketch`.
//!
//! Glyphs are polylines on a grid with a cap height of 10 units, x-height 6
//! and descenders to -3, in the manner of the Hershey simplex fonts. Each
//! stroke is thickened into a square-capped band and the bands of a glyph
//! are unioned into its outline.

use crate::float_types::{EPSILON, Real};
use crate::sketch::Sketch;
use crate::traits::CSGOps;
use geo::{LineString, MultiPolygon, Polygon as GeoPolygon};

const CAP_HEIGHT: Real = 10.0;
/// Cap height as a fraction of the font size.
const CAP_RATIO: Real = 0.7;
/// Stroke width as a fraction of the font size.
const STROKE_RATIO: Real = 0.1;
/// Gap added after every glyph, in grid units.
const TRACKING: Real = 3.0;

type Stroke = &'static [(Real, Real)];

struct Glyph {
    width: Real,
    strokes: &'static [Stroke],
}

const fn glyph(width: Real, strokes: &'static [Stroke]) -> Option<Glyph> {
    Some(Glyph { width, strokes })
}

const RING: Stroke = &[
    (2.0, 0.0),
    (4.0, 0.0),
    (6.0, 2.0),
    (6.0, 8.0),
    (4.0, 10.0),
    (2.0, 10.0),
    (0.0, 8.0),
    (0.0, 2.0),
    (2.0, 0.0),
];
const LOWER_BOWL_RIGHT: Stroke = &[
    (5.0, 4.0),
    (3.0, 6.0),
    (2.0, 6.0),
    (0.0, 4.0),
    (0.0, 2.0),
    (2.0, 0.0),
    (3.0, 0.0),
    (5.0, 2.0),
];
const LOWER_BOWL_LEFT: Stroke = &[
    (0.0, 4.0),
    (2.0, 6.0),
    (3.0, 6.0),
    (5.0, 4.0),
    (5.0, 2.0),
    (3.0, 0.0),
    (2.0, 0.0),
    (0.0, 2.0),
];
const UPPER_LOOP: Stroke = &[
    (0.0, 0.0),
    (0.0, 10.0),
    (4.0, 10.0),
    (6.0, 8.0),
    (6.0, 7.0),
    (4.0, 5.0),
    (0.0, 5.0),
];

const fn lookup(c: char) -> Option<Glyph> {
    match c {
        ' ' => glyph(3.0, &[]),
        '+' => glyph(6.0, &[&[(3.0, 2.0), (3.0, 8.0)], &[(0.0, 5.0), (6.0, 5.0)]]),
        '-' => glyph(6.0, &[&[(0.0, 5.0), (6.0, 5.0)]]),
        '.' => glyph(0.0, &[&[(0.0, 0.0), (0.0, 1.0)]]),
        '0' => glyph(6.0, &[RING, &[(0.0, 2.0), (6.0, 8.0)]]),
        '1' => glyph(6.0, &[&[(1.0, 8.0), (3.0, 10.0), (3.0, 0.0)], &[(1.0, 0.0), (5.0, 0.0)]]),
        '2' => glyph(
            6.0,
            &[&[(0.0, 8.0), (2.0, 10.0), (4.0, 10.0), (6.0, 8.0), (6.0, 6.0), (0.0, 0.0), (6.0, 0.0)]],
        ),
        '3' => glyph(
            6.0,
            &[
                &[(0.0, 8.0), (2.0, 10.0), (4.0, 10.0), (6.0, 8.0), (6.0, 7.0), (4.0, 5.0), (2.0, 5.0)],
                &[(4.0, 5.0), (6.0, 3.0), (6.0, 2.0), (4.0, 0.0), (2.0, 0.0), (0.0, 2.0)],
            ],
        ),
        '4' => glyph(6.0, &[&[(5.0, 0.0), (5.0, 10.0), (0.0, 3.0), (6.0, 3.0)]]),
        '5' => glyph(
            6.0,
            &[&[
                (6.0, 10.0),
                (0.0, 10.0),
                (0.0, 6.0),
                (4.0, 6.0),
                (6.0, 4.0),
                (6.0, 2.0),
                (4.0, 0.0),
                (2.0, 0.0),
                (0.0, 2.0),
            ]],
        ),
        '6' => glyph(
            6.0,
            &[&[
                (6.0, 8.0),
                (4.0, 10.0),
                (2.0, 10.0),
                (0.0, 8.0),
                (0.0, 2.0),
                (2.0, 0.0),
                (4.0, 0.0),
                (6.0, 2.0),
                (6.0, 4.0),
                (4.0, 6.0),
                (2.0, 6.0),
                (0.0, 4.0),
            ]],
        ),
        '7' => glyph(6.0, &[&[(0.0, 10.0), (6.0, 10.0), (2.0, 0.0)]]),
        '8' => glyph(
            6.0,
            &[
                &[(2.0, 5.0), (0.0, 7.0), (0.0, 8.0), (2.0, 10.0), (4.0, 10.0), (6.0, 8.0), (6.0, 7.0), (4.0, 5.0)],
                &[(2.0, 5.0), (0.0, 3.0), (0.0, 2.0), (2.0, 0.0), (4.0, 0.0), (6.0, 2.0), (6.0, 3.0), (4.0, 5.0)],
                &[(2.0, 5.0), (4.0, 5.0)],
            ],
        ),
        '9' => glyph(
            6.0,
            &[&[
                (6.0, 6.0),
                (4.0, 4.0),
                (2.0, 4.0),
                (0.0, 6.0),
                (0.0, 8.0),
                (2.0, 10.0),
                (4.0, 10.0),
                (6.0, 8.0),
                (6.0, 2.0),
                (4.0, 0.0),
                (2.0, 0.0),
                (0.0, 2.0),
            ]],
        ),
        'A' => glyph(6.0, &[&[(0.0, 0.0), (3.0, 10.0), (6.0, 0.0)], &[(1.0, 3.0), (5.0, 3.0)]]),
        'B' => glyph(
            6.0,
            &[UPPER_LOOP, &[(4.0, 5.0), (6.0, 3.0), (6.0, 2.0), (4.0, 0.0), (0.0, 0.0)]],
        ),
        'C' => glyph(
            6.0,
            &[&[(6.0, 8.0), (4.0, 10.0), (2.0, 10.0), (0.0, 8.0), (0.0, 2.0), (2.0, 0.0), (4.0, 0.0), (6.0, 2.0)]],
        ),
        'D' => glyph(
            6.0,
            &[&[(0.0, 0.0), (0.0, 10.0), (3.0, 10.0), (6.0, 7.0), (6.0, 3.0), (3.0, 0.0), (0.0, 0.0)]],
        ),
        'E' => glyph(6.0, &[&[(6.0, 10.0), (0.0, 10.0), (0.0, 0.0), (6.0, 0.0)], &[(0.0, 5.0), (4.0, 5.0)]]),
        'F' => glyph(6.0, &[&[(6.0, 10.0), (0.0, 10.0), (0.0, 0.0)], &[(0.0, 5.0), (4.0, 5.0)]]),
        'G' => glyph(
            6.0,
            &[&[
                (6.0, 8.0),
                (4.0, 10.0),
                (2.0, 10.0),
                (0.0, 8.0),
                (0.0, 2.0),
                (2.0, 0.0),
                (4.0, 0.0),
                (6.0, 2.0),
                (6.0, 4.0),
                (3.0, 4.0),
            ]],
        ),
        'H' => glyph(
            6.0,
            &[&[(0.0, 0.0), (0.0, 10.0)], &[(6.0, 0.0), (6.0, 10.0)], &[(0.0, 5.0), (6.0, 5.0)]],
        ),
        'I' => glyph(
            4.0,
            &[&[(2.0, 0.0), (2.0, 10.0)], &[(0.0, 10.0), (4.0, 10.0)], &[(0.0, 0.0), (4.0, 0.0)]],
        ),
        'J' => glyph(6.0, &[&[(6.0, 10.0), (6.0, 2.0), (4.0, 0.0), (2.0, 0.0), (0.0, 2.0)]]),
        'K' => glyph(
            6.0,
            &[&[(0.0, 0.0), (0.0, 10.0)], &[(6.0, 10.0), (0.0, 4.0)], &[(2.0, 6.0), (6.0, 0.0)]],
        ),
        'L' => glyph(6.0, &[&[(0.0, 10.0), (0.0, 0.0), (6.0, 0.0)]]),
        'M' => glyph(8.0, &[&[(0.0, 0.0), (0.0, 10.0), (4.0, 3.0), (8.0, 10.0), (8.0, 0.0)]]),
        'N' => glyph(6.0, &[&[(0.0, 0.0), (0.0, 10.0), (6.0, 0.0), (6.0, 10.0)]]),
        'O' => glyph(6.0, &[RING]),
        'P' => glyph(6.0, &[UPPER_LOOP]),
        'Q' => glyph(6.0, &[RING, &[(3.0, 3.0), (6.0, 0.0)]]),
        'R' => glyph(6.0, &[UPPER_LOOP, &[(3.0, 5.0), (6.0, 0.0)]]),
        'S' => glyph(
            6.0,
            &[&[
                (6.0, 8.0),
                (4.0, 10.0),
                (2.0, 10.0),
                (0.0, 8.0),
                (0.0, 7.0),
                (2.0, 5.0),
                (4.0, 5.0),
                (6.0, 3.0),
                (6.0, 2.0),
                (4.0, 0.0),
                (2.0, 0.0),
                (0.0, 2.0),
            ]],
        ),
        'T' => glyph(6.0, &[&[(0.0, 10.0), (6.0, 10.0)], &[(3.0, 10.0), (3.0, 0.0)]]),
        'U' => glyph(
            6.0,
            &[&[(0.0, 10.0), (0.0, 2.0), (2.0, 0.0), (4.0, 0.0), (6.0, 2.0), (6.0, 10.0)]],
        ),
        'V' => glyph(6.0, &[&[(0.0, 10.0), (3.0, 0.0), (6.0, 10.0)]]),
        'W' => glyph(8.0, &[&[(0.0, 10.0), (2.0, 0.0), (4.0, 7.0), (6.0, 0.0), (8.0, 10.0)]]),
        'X' => glyph(6.0, &[&[(0.0, 0.0), (6.0, 10.0)], &[(0.0, 10.0), (6.0, 0.0)]]),
        'Y' => glyph(6.0, &[&[(0.0, 10.0), (3.0, 5.0), (6.0, 10.0)], &[(3.0, 5.0), (3.0, 0.0)]]),
        'Z' => glyph(6.0, &[&[(0.0, 10.0), (6.0, 10.0), (0.0, 0.0), (6.0, 0.0)]]),
        'a' => glyph(5.0, &[&[(5.0, 6.0), (5.0, 0.0)], LOWER_BOWL_RIGHT]),
        'b' => glyph(5.0, &[&[(0.0, 10.0), (0.0, 0.0)], LOWER_BOWL_LEFT]),
        'c' => glyph(
            5.0,
            &[&[(5.0, 5.0), (4.0, 6.0), (1.0, 6.0), (0.0, 5.0), (0.0, 1.0), (1.0, 0.0), (4.0, 0.0), (5.0, 1.0)]],
        ),
        'd' => glyph(5.0, &[&[(5.0, 10.0), (5.0, 0.0)], LOWER_BOWL_RIGHT]),
        'e' => glyph(
            5.0,
            &[&[
                (0.0, 3.0),
                (5.0, 3.0),
                (5.0, 5.0),
                (4.0, 6.0),
                (1.0, 6.0),
                (0.0, 5.0),
                (0.0, 1.0),
                (1.0, 0.0),
                (4.0, 0.0),
                (5.0, 1.0),
            ]],
        ),
        'f' => glyph(
            4.0,
            &[&[(4.0, 9.0), (3.0, 10.0), (2.0, 10.0), (1.0, 9.0), (1.0, 0.0)], &[(0.0, 6.0), (3.0, 6.0)]],
        ),
        'g' => glyph(
            5.0,
            &[&[(5.0, 6.0), (5.0, -2.0), (4.0, -3.0), (1.0, -3.0), (0.0, -2.0)], LOWER_BOWL_RIGHT],
        ),
        'h' => glyph(
            5.0,
            &[&[(0.0, 10.0), (0.0, 0.0)], &[(0.0, 4.0), (2.0, 6.0), (4.0, 6.0), (5.0, 5.0), (5.0, 0.0)]],
        ),
        'i' => glyph(0.0, &[&[(0.0, 0.0), (0.0, 6.0)], &[(0.0, 8.0), (0.0, 9.0)]]),
        'j' => glyph(2.0, &[&[(2.0, 6.0), (2.0, -2.0), (1.0, -3.0), (0.0, -3.0)], &[(2.0, 8.0), (2.0, 9.0)]]),
        'k' => glyph(
            5.0,
            &[&[(0.0, 10.0), (0.0, 0.0)], &[(4.0, 6.0), (0.0, 2.0)], &[(2.0, 4.0), (5.0, 0.0)]],
        ),
        'l' => glyph(1.0, &[&[(0.0, 10.0), (0.0, 1.0), (1.0, 0.0)]]),
        'm' => glyph(
            8.0,
            &[
                &[(0.0, 0.0), (0.0, 6.0)],
                &[(0.0, 4.0), (2.0, 6.0), (3.0, 6.0), (4.0, 5.0), (4.0, 0.0)],
                &[(4.0, 5.0), (5.0, 6.0), (7.0, 6.0), (8.0, 5.0), (8.0, 0.0)],
            ],
        ),
        'n' => glyph(
            5.0,
            &[&[(0.0, 0.0), (0.0, 6.0)], &[(0.0, 4.0), (2.0, 6.0), (4.0, 6.0), (5.0, 5.0), (5.0, 0.0)]],
        ),
        'o' => glyph(
            5.0,
            &[&[
                (1.0, 0.0),
                (4.0, 0.0),
                (5.0, 1.0),
                (5.0, 5.0),
                (4.0, 6.0),
                (1.0, 6.0),
                (0.0, 5.0),
                (0.0, 1.0),
                (1.0, 0.0),
            ]],
        ),
        'p' => glyph(5.0, &[&[(0.0, 6.0), (0.0, -3.0)], LOWER_BOWL_LEFT]),
        'q' => glyph(5.0, &[&[(5.0, 6.0), (5.0, -3.0)], LOWER_BOWL_RIGHT]),
        'r' => glyph(4.0, &[&[(0.0, 0.0), (0.0, 6.0)], &[(0.0, 3.0), (3.0, 6.0), (4.0, 6.0)]]),
        's' => glyph(
            5.0,
            &[&[
                (5.0, 5.0),
                (4.0, 6.0),
                (1.0, 6.0),
                (0.0, 5.0),
                (0.0, 4.0),
                (1.0, 3.0),
                (4.0, 3.0),
                (5.0, 2.0),
                (5.0, 1.0),
                (4.0, 0.0),
                (1.0, 0.0),
                (0.0, 1.0),
            ]],
        ),
        't' => glyph(4.0, &[&[(1.0, 9.0), (1.0, 1.0), (2.0, 0.0), (4.0, 0.0)], &[(0.0, 6.0), (3.0, 6.0)]]),
        'u' => glyph(
            5.0,
            &[&[(0.0, 6.0), (0.0, 1.0), (1.0, 0.0), (3.0, 0.0), (5.0, 2.0)], &[(5.0, 6.0), (5.0, 0.0)]],
        ),
        'v' => glyph(6.0, &[&[(0.0, 6.0), (3.0, 0.0), (6.0, 6.0)]]),
        'w' => glyph(8.0, &[&[(0.0, 6.0), (2.0, 0.0), (4.0, 5.0), (6.0, 0.0), (8.0, 6.0)]]),
        'x' => glyph(5.0, &[&[(0.0, 0.0), (5.0, 6.0)], &[(0.0, 6.0), (5.0, 0.0)]]),
        'y' => glyph(
            6.0,
            &[&[(0.0, 6.0), (3.0, 0.0)], &[(6.0, 6.0), (2.0, -2.0), (1.0, -3.0), (0.0, -3.0)]],
        ),
        'z' => glyph(5.0, &[&[(0.0, 6.0), (5.0, 6.0), (0.0, 0.0), (5.0, 0.0)]]),
        _ => None,
    }
}

/// Square-capped band of `width` around the segment `a`-`b`.
fn band(a: (Real, Real), b: (Real, Real), width: Real) -> Sketch {
    let half = width / 2.0;
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len = dx.hypot(dy);
    // A zero-length stroke is a dot.
    let (ux, uy) = if len < EPSILON { (1.0, 0.0) } else { (dx / len, dy / len) };
    let (nx, ny) = (-uy * half, ux * half);
    let (a0, a1) = (a.0 - ux * half, a.1 - uy * half);
    let (b0, b1) = (b.0 + ux * half, b.1 + uy * half);
    let ring = LineString::from(vec![
        (a0 - nx, a1 - ny),
        (b0 - nx, b1 - ny),
        (b0 + nx, b1 + ny),
        (a0 + nx, a1 + ny),
        (a0 - nx, a1 - ny),
    ]);
    Sketch::from_geo(MultiPolygon(vec![GeoPolygon::new(ring, vec![])]))
}

impl Sketch {
    /// Filled outline of `text` in a bold stroke face, centred on the origin.
    ///
    /// `size` is the font size in millimetres; capitals stand 0.7 of it tall.
    /// Characters outside printable ASCII letters, digits, space and `+-.`
    /// are skipped with a warning.
    pub fn text(text: &str, size: Real) -> Sketch {
        let scale = size * CAP_RATIO / CAP_HEIGHT;
        let stroke = size * STROKE_RATIO / scale;

        let mut polygons = Vec::new();
        let mut cursor = 0.0;
        for c in text.chars() {
            let Some(glyph) = lookup(c) else {
                log::warn!("no glyph for {c:?} in {text:?}; skipped");
                continue;
            };
            let bands: Vec<Sketch> = glyph
                .strokes
                .iter()
                .flat_map(|s| s.windows(2))
                .map(|pair| band(pair[0], pair[1], stroke))
                .collect();
            // Glyphs never overlap, so their outlines are simply collected.
            let outline = Sketch::union_all(&bands).translate(cursor, 0.0, 0.0);
            polygons.extend(outline.geometry.0);
            cursor += glyph.width + TRACKING;
        }

        let lettering = Sketch::from_geo(MultiPolygon(polygons));
        if lettering.is_empty() {
            return lettering;
        }
        let bb = lettering.bounding_box();
        let (cx, cy) = ((bb.mins.x + bb.maxs.x) / 2.0, (bb.mins.y + bb.maxs.y) / 2.0);
        lettering.translate(-cx, -cy, 0.0).scale(scale, scale, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn every_glyph_fills_its_box() {
        let chars = ('A'..='Z').chain('a'..='z').chain('0'..='9').chain("+-.".chars());
        for c in chars {
            let sketch = Sketch::text(&c.to_string(), 10.0);
            assert!(!sketch.is_empty(), "{c:?} has no outline");
            assert!(sketch.area() > 0.5, "{c:?} is too thin");
        }
    }

    #[test]
    fn capitals_scale_with_font_size() {
        let bb = Sketch::text("H", 10.0).bounding_box();
        // cap height 7 mm plus one 1 mm stroke
        assert_relative_eq!(bb.maxs.y - bb.mins.y, 8.0, epsilon = 1e-4);
        assert_relative_eq!(bb.mins.y, -bb.maxs.y, epsilon = 1e-4);
        assert_relative_eq!(bb.mins.x, -bb.maxs.x, epsilon = 1e-4);
    }

    #[test]
    fn letters_do_not_touch() {
        let word = Sketch::text("HH", 10.0);
        assert_eq!(word.geometry.0.len(), 2);
        let one = Sketch::text("H", 10.0).area();
        assert_relative_eq!(word.area(), 2.0 * one, epsilon = 1e-6);
    }

    #[test]
    fn spaces_and_unknown_characters() {
        assert!(Sketch::text(" ", 10.0).is_empty());
        assert!(Sketch::text("", 10.0).is_empty());
        let plain = Sketch::text("AB", 10.0).area();
        assert_relative_eq!(Sketch::text("A~B", 10.0).area(), plain, epsilon = 1e-6);
    }

    #[test]
    fn minus_is_a_single_bar() {
        let minus = Sketch::text("-", 10.0);
        let bb = minus.bounding_box();
        // 6 units long plus square caps, at 0.7 mm per unit
        assert_relative_eq!(bb.maxs.x - bb.mins.x, 4.2 + 1.0, epsilon = 1e-6);
        assert_relative_eq!(bb.maxs.y - bb.mins.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(minus.area(), 5.2, epsilon = 1e-6);
    }
}
