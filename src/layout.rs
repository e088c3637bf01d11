//! Derived positions and outer dimensions.
//!
//! Pure arithmetic over a parameter table; no geometry is built here. The
//! origin is the centre of the footprint at floor level, +Y points to the rear
//! wall and +Z up.

use crate::float_types::Real;
use crate::params::{InvertedParams, TabletopParams};
use nalgebra::Vector3;

/// Layout of the inverted (base plate + shell) enclosure.
#[derive(Debug, Clone, PartialEq)]
pub struct InvertedLayout {
    pub internal_w: Real,
    pub internal_l: Real,
    pub internal_h: Real,
    pub box_w: Real,
    pub box_l: Real,
    pub box_h: Real,

    pub pid_x: Real,
    pub pid_y: Real,
    pub pid_z_start: Real,
    pub pid_z_end: Real,
    pub pid_z_center: Real,

    pub ssr_x: Real,
    pub ssr_y: Real,
    /// Underside of the SSR, on top of its rails.
    pub ssr_z: Real,

    pub socket_x: Real,
    pub socket_y: Real,

    pub c14_x: Real,
    /// Outer face of the rear wall.
    pub c14_y: Real,
    pub c14_z: Real,

    pub term_x: Real,
    pub term_y: Real,

    /// Centres of the corner posts and base clearance holes.
    pub corner_x: Real,
    pub corner_y: Real,
    /// Y of the clamp and brace, against the inside of the front wall.
    pub clamp_y: Real,
    /// Underside of the roof.
    pub roof_inner_z: Real,
}

impl InvertedLayout {
    pub fn new(p: &InvertedParams) -> Self {
        let internal_w = p.side_margin + p.pid_bezel_w + p.pid_ssr_gap + p.ssr_w + p.side_margin;
        let internal_l = p.internal_l;
        let internal_h = p.internal_h;
        let box_w = internal_w + 2.0 * p.wall;
        let box_l = internal_l + 2.0 * p.wall;
        let box_h = internal_h + p.roof;

        let pid_cut_h = p.pid_body_h + p.fit_tolerance;
        let pid_x = -internal_w / 2.0 + p.side_margin + p.pid_body_w / 2.0;
        let ssr_x = internal_w / 2.0 - p.side_margin - p.ssr_w / 2.0;

        InvertedLayout {
            internal_w,
            internal_l,
            internal_h,
            box_w,
            box_l,
            box_h,

            pid_x,
            pid_y: -internal_l / 2.0 + p.pid_body_d / 2.0,
            pid_z_start: p.pid_z_start,
            pid_z_end: p.pid_z_start + pid_cut_h,
            pid_z_center: p.pid_z_start + pid_cut_h / 2.0,

            ssr_x,
            ssr_y: -internal_l / 2.0 + p.ssr_front_gap + p.ssr_l / 2.0,
            ssr_z: p.base + p.ssr_platform_height,

            socket_x: pid_x + p.socket_offset_x,
            socket_y: p.socket_y,

            c14_x: ssr_x,
            c14_y: box_l / 2.0,
            c14_z: p.c14_z,

            term_x: pid_x,
            term_y: internal_l / 2.0 - p.term_rear_offset,

            corner_x: box_w / 2.0 - p.corner_inset,
            corner_y: box_l / 2.0 - p.corner_inset,
            clamp_y: -box_l / 2.0 + p.wall + p.clamp_d / 2.0,
            roof_inner_z: box_h - p.roof,
        }
    }

    /// Outer size of the assembled case.
    pub fn dimensions(&self) -> Vector3<Real> {
        Vector3::new(self.box_w, self.box_l, self.box_h)
    }
}

/// Layout of the tabletop (body + lid) enclosure.
#[derive(Debug, Clone, PartialEq)]
pub struct TabletopLayout {
    pub internal_w: Real,
    pub internal_l: Real,
    pub internal_h: Real,
    pub box_w: Real,
    pub box_l: Real,
    pub box_h: Real,

    pub front_inner_y: Real,
    pub pid_x: Real,
    pub pid_y: Real,
    pub pid_z: Real,
    pub bezel_y: Real,

    pub ssr_x: Real,
    pub ssr_y: Real,
    pub ssr_platform_h: Real,
    /// Lid vent slots over the SSR: as many whole pitches as fit across it,
    /// rounded down.
    pub lid_vents: usize,

    pub cable_xs: [Real; 2],
    /// Floor of the keyhole cable entries, level with the anchor tops.
    pub shelf_z: Real,

    pub mains_x: Real,
    pub mains_y: Real,
    pub mains_z: Real,

    pub porch_x: Real,
    pub porch_y: Real,
    pub porch_w: Real,
    pub porch_d: Real,
    pub porch_floor_z: Real,
    pub porch_wall_h: Real,
    /// Centre of the terminal block sitting on the porch floor.
    pub term_y: Real,

    pub cover_depth: Real,
    /// Cover centre when fitted, in body coordinates.
    pub cover_y: Real,
    /// Cover screw hole Y in the cover's own frame.
    pub cover_hole_y: Real,

    /// Corner boss centres (±x, ±y).
    pub boss_x: Real,
    pub boss_y: Real,
}

impl TabletopLayout {
    pub fn new(p: &TabletopParams) -> Self {
        let internal_w = p.side_margin + p.pid_bezel_w + p.pid_ssr_gap + p.ssr_w + p.side_margin;
        let internal_l = p.pid_body_d.max(p.ssr_front_gap + p.ssr_l) + p.rear_wiring_gap;
        let internal_h = (p.ssr_h + 5.0).max(p.pid_floor_clearance + p.pid_body_h + 5.0);
        let box_w = internal_w + 2.0 * p.wall;
        let box_l = internal_l + 2.0 * p.wall;
        let box_h = internal_h + p.wall;

        let front_inner_y = -internal_l / 2.0;
        let pid_x = -internal_w / 2.0 + p.side_margin + p.pid_bezel_w / 2.0;
        let pid_y = front_inner_y + p.pid_body_d / 2.0;
        let ssr_x = internal_w / 2.0 - p.side_margin - p.ssr_w / 2.0;

        let pid_back_y = pid_y + p.pid_body_d / 2.0;
        let rear_wall_y = internal_l / 2.0;

        let porch_w = p.term_w + p.porch_side_allowance;
        let porch_d = p.term_d + 6.0 + p.porch_free_space;
        let porch_y = box_l / 2.0 + porch_d / 2.0 - 2.0;

        // The cover spans from just off the case wall to 2 mm short of the porch end.
        let cover_start = box_l / 2.0 + p.cover_gap;
        let cover_end = box_l / 2.0 + porch_d - 2.0;
        let cover_depth = cover_end - cover_start;
        let cover_y = (cover_start + cover_end) / 2.0;

        TabletopLayout {
            internal_w,
            internal_l,
            internal_h,
            box_w,
            box_l,
            box_h,

            front_inner_y,
            pid_x,
            pid_y,
            pid_z: p.wall + p.pid_floor_clearance + p.pid_body_h / 2.0,
            bezel_y: front_inner_y - p.pid_bezel_d / 2.0,

            ssr_x,
            ssr_y: front_inner_y + p.ssr_front_gap + p.ssr_l / 2.0,
            ssr_platform_h: p.wall.max(p.ssr_screw_depth) - p.wall,
            lid_vents: (p.ssr_w / p.vent_pitch).floor() as usize,

            cable_xs: [ssr_x - p.cable_spacing / 2.0, ssr_x + p.cable_spacing / 2.0],
            shelf_z: p.wall + p.anchor_height,

            mains_x: pid_x,
            mains_y: (pid_back_y + rear_wall_y) / 2.0,
            mains_z: p.wall + p.mains_blk_h / 2.0,

            porch_x: pid_x,
            porch_y,
            porch_w,
            porch_d,
            porch_floor_z: p.wall.max(p.term_screw_depth),
            porch_wall_h: p.term_h + 5.0,
            term_y: box_l / 2.0 + p.term_d / 2.0,

            cover_depth,
            cover_y,
            cover_hole_y: (porch_y - cover_y) - p.cover_hole_asymmetry,

            boss_x: internal_w / 2.0 - p.boss_size / 2.0,
            boss_y: internal_l / 2.0 - p.boss_size / 2.0,
        }
    }

    pub fn porch_top_z(&self) -> Real {
        self.porch_floor_z + self.porch_wall_h
    }

    /// Outer size of the body, without the porch.
    pub fn dimensions(&self) -> Vector3<Real> {
        Vector3::new(self.box_w, self.box_l, self.box_h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn inverted_reference_numbers() {
        let l = InvertedLayout::new(&InvertedParams::default());
        assert_relative_eq!(l.internal_w, 158.0);
        assert_relative_eq!(l.dimensions(), Vector3::new(164.0, 161.0, 103.0));
        assert_relative_eq!(l.pid_x, -36.5);
        assert_relative_eq!(l.pid_y, -27.5);
        assert_relative_eq!(l.pid_z_end, 65.3, epsilon = 1e-9);
        assert_relative_eq!(l.pid_z_center, 42.65, epsilon = 1e-9);
        assert_relative_eq!(l.ssr_x, 34.0);
        assert_relative_eq!(l.ssr_y, -17.5);
        assert_relative_eq!(l.ssr_z, 9.0);
        assert_relative_eq!(l.socket_x, -31.5);
        assert_relative_eq!(l.term_y, 37.5);
        assert_relative_eq!(l.c14_y, 80.5);
        assert_relative_eq!(l.corner_x, 76.0);
        assert_relative_eq!(l.corner_y, 74.5);
        assert_relative_eq!(l.clamp_y, -73.5);
        assert_relative_eq!(l.roof_inner_z, 100.0);
    }

    #[test]
    fn tabletop_reference_numbers() {
        let l = TabletopLayout::new(&TabletopParams::default());
        assert_relative_eq!(l.dimensions(), Vector3::new(162.0, 154.0, 80.0));
        assert_relative_eq!(l.internal_l, 150.0);
        assert_relative_eq!(l.internal_h, 78.0);
        assert_relative_eq!(l.pid_x, -35.0);
        assert_relative_eq!(l.pid_y, -35.0);
        assert_relative_eq!(l.pid_z, 36.0);
        assert_relative_eq!(l.ssr_y, -15.0);
        assert_relative_eq!(l.ssr_platform_h, 5.0);
        assert_eq!(l.lid_vents, 8);
        assert_eq!(l.cable_xs, [23.0, 45.0]);
        assert_relative_eq!(l.mains_y, 40.0);
        assert_relative_eq!(l.porch_w, 52.0);
        assert_relative_eq!(l.porch_d, 32.0);
        assert_relative_eq!(l.porch_y, 91.0);
        assert_relative_eq!(l.porch_top_z(), 25.0);
        assert_relative_eq!(l.cover_depth, 29.0);
        assert_relative_eq!(l.cover_hole_y, -4.5);
        assert_relative_eq!(l.boss_x, 74.0);
        assert_relative_eq!(l.boss_y, 70.0);
    }

    #[test]
    fn lid_vent_count_rounds_down() {
        let p = TabletopParams {
            vent_pitch: 7.0,
            ..TabletopParams::default()
        };
        assert_eq!(TabletopLayout::new(&p).lid_vents, 7);
        let p = TabletopParams {
            vent_pitch: 5.0,
            ..TabletopParams::default()
        };
        assert_eq!(TabletopLayout::new(&p).lid_vents, 10);
    }

    #[test]
    fn tabletop_height_follows_tallest_component() {
        let p = TabletopParams {
            pid_floor_clearance: 40.0,
            ..TabletopParams::default()
        };
        let l = TabletopLayout::new(&p);
        assert_relative_eq!(l.internal_h, 40.0 + 44.0 + 5.0);
    }
}
