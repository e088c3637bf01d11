//! Dimensional parameter tables for both enclosure variants.
//!
//! Every table's `Default` is the reference design. All lengths are in
//! millimetres. Tables deserialize with `#[serde(default)]`, so a partial JSON
//! file only overrides the fields it names.

use crate::errors::{Error, Result};
use crate::fasteners::{FastenerSizes, InsertConfig};
use crate::float_types::Real;
use serde::{Deserialize, Serialize};

/// Reject NaN, infinities and anything `<= 0`.
pub fn positive(name: &'static str, value: Real) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(Error::invalid(name, value, "must be greater than zero"));
    }
    Ok(())
}

/// Reject NaN, infinities and negative values.
pub fn non_negative(name: &'static str, value: Real) -> Result<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(Error::invalid(name, value, "must not be negative"));
    }
    Ok(())
}

fn finite(name: &'static str, value: Real) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid(name, value, "must be finite"))
    }
}

fn positive_count(name: &'static str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::invalid(name, 0.0, "count must be at least one"));
    }
    Ok(())
}

fn check_all(dims: &[(&'static str, Real)]) -> Result<()> {
    dims.iter().try_for_each(|&(name, value)| positive(name, value))
}

/// A flat ring washer. The default is the M3 washer of the inverted case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WasherParams {
    pub outer_dia: Real,
    pub inner_dia: Real,
    pub thickness: Real,
}

impl Default for WasherParams {
    fn default() -> Self {
        WasherParams {
            outer_dia: 9.0,
            inner_dia: 3.4,
            thickness: 1.5,
        }
    }
}

/// The tabletop case's washer, which differs from the M3 default.
const TABLETOP_WASHER: WasherParams = WasherParams {
    outer_dia: 8.0,
    inner_dia: 3.5,
    thickness: 2.0,
};

/// Washer fields named in a config file, laid over the tabletop washer.
fn tabletop_washer<'de, D>(deserializer: D) -> std::result::Result<WasherParams, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Named {
        outer_dia: Option<Real>,
        inner_dia: Option<Real>,
        thickness: Option<Real>,
    }
    let named = Named::deserialize(deserializer)?;
    Ok(WasherParams {
        outer_dia: named.outer_dia.unwrap_or(TABLETOP_WASHER.outer_dia),
        inner_dia: named.inner_dia.unwrap_or(TABLETOP_WASHER.inner_dia),
        thickness: named.thickness.unwrap_or(TABLETOP_WASHER.thickness),
    })
}

impl WasherParams {
    pub fn validate(&self) -> Result<()> {
        check_all(&[
            ("washer.outer_dia", self.outer_dia),
            ("washer.inner_dia", self.inner_dia),
            ("washer.thickness", self.thickness),
        ])?;
        if self.inner_dia >= self.outer_dia {
            return Err(Error::invalid(
                "washer.inner_dia",
                self.inner_dia,
                "must be smaller than the outer diameter",
            ));
        }
        Ok(())
    }
}

/// Two-part "inverted" enclosure: a thick base plate carrying the SSR and
/// terminal block, with a shell lowered over it from above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvertedParams {
    pub wall: Real,
    pub roof: Real,
    pub base: Real,
    /// Plan-view corner radius of plate and shell.
    pub fillet: Real,
    pub fit_tolerance: Real,

    pub foot_dia: Real,
    pub foot_depth: Real,
    pub foot_offset: Real,

    pub fasteners: FastenerSizes,
    pub inserts: InsertConfig,

    pub pid_body_w: Real,
    pub pid_body_h: Real,
    pub pid_body_d: Real,
    pub pid_bezel_w: Real,
    pub pid_bezel_h: Real,
    /// Height of the PID cutout's lower edge above the bottom of the shell.
    pub pid_z_start: Real,
    pub clamp_w: Real,
    pub clamp_d: Real,
    pub clamp_h: Real,

    pub ssr_w: Real,
    pub ssr_l: Real,
    pub ssr_h: Real,
    pub ssr_mount_spacing: Real,
    pub ssr_platform_height: Real,
    pub ssr_rail_width: Real,
    pub ssr_grill_slots: usize,
    pub ssr_grill_length: Real,
    pub roof_vent_slots: usize,
    pub roof_vent_length: Real,
    pub slot_pitch: Real,
    pub slot_width: Real,

    pub socket_cutout: Real,
    pub socket_pitch: Real,
    pub socket_boss_dia: Real,
    pub socket_boss_depth: Real,
    /// Socket centre relative to the PID centre line.
    pub socket_offset_x: Real,
    pub socket_y: Real,

    pub c14_body_w: Real,
    pub c14_body_h: Real,
    pub c14_screw_pitch: Real,
    pub c14_boss_depth: Real,
    pub c14_pilaster_w: Real,
    pub c14_z: Real,
    /// Inlet body plus the plugged-in cable, for the preview envelope.
    pub c14_ghost_depth: Real,

    pub term_w: Real,
    pub term_d: Real,
    pub term_h: Real,
    pub term_mount_x: Real,
    pub term_mount_y: Real,
    pub term_boss_height: Real,
    /// Distance from the rear inner wall to the terminal block centre.
    pub term_rear_offset: Real,
    pub mouse_hole_dia: Real,

    pub side_margin: Real,
    pub pid_ssr_gap: Real,
    pub ssr_front_gap: Real,
    pub internal_l: Real,
    pub internal_h: Real,

    pub corner_inset: Real,
    pub corner_post_radius: Real,

    pub washer: WasherParams,
}

impl Default for InvertedParams {
    fn default() -> Self {
        InvertedParams {
            wall: 3.0,
            roof: 3.0,
            base: 5.0,
            fillet: 4.0,
            fit_tolerance: 0.3,

            foot_dia: 12.0,
            foot_depth: 2.0,
            foot_offset: 15.0,

            fasteners: FastenerSizes::default(),
            inserts: InsertConfig::default(),

            pid_body_w: 45.0,
            pid_body_h: 45.0,
            pid_body_d: 100.0,
            pid_bezel_w: 48.0,
            pid_bezel_h: 48.0,
            pid_z_start: 20.0,
            clamp_w: 50.0,
            clamp_d: 8.0,
            clamp_h: 10.0,

            ssr_w: 50.0,
            ssr_l: 80.0,
            ssr_h: 73.0,
            ssr_mount_spacing: 72.0,
            ssr_platform_height: 4.0,
            ssr_rail_width: 12.0,
            ssr_grill_slots: 6,
            ssr_grill_length: 30.0,
            roof_vent_slots: 6,
            roof_vent_length: 40.0,
            slot_pitch: 6.0,
            slot_width: 3.0,

            socket_cutout: 73.0,
            socket_pitch: 60.3,
            socket_boss_dia: 12.0,
            socket_boss_depth: 8.0,
            socket_offset_x: 5.0,
            socket_y: 10.0,

            c14_body_w: 28.0,
            c14_body_h: 48.0,
            c14_screw_pitch: 40.0,
            c14_boss_depth: 10.0,
            c14_pilaster_w: 12.0,
            c14_z: 45.0,
            c14_ghost_depth: 45.0,

            term_w: 36.0,
            term_d: 21.0,
            term_h: 13.0,
            term_mount_x: 28.0,
            term_mount_y: 8.0,
            term_boss_height: 5.0,
            term_rear_offset: 40.0,
            mouse_hole_dia: 7.0,

            side_margin: 20.0,
            pid_ssr_gap: 20.0,
            ssr_front_gap: 20.0,
            internal_l: 155.0,
            internal_h: 100.0,

            corner_inset: 6.0,
            corner_post_radius: 5.0,

            washer: WasherParams::default(),
        }
    }
}

impl InvertedParams {
    pub fn validate(&self) -> Result<()> {
        check_all(&[
            ("wall", self.wall),
            ("roof", self.roof),
            ("base", self.base),
            ("fillet", self.fillet),
            ("foot_dia", self.foot_dia),
            ("foot_depth", self.foot_depth),
            ("foot_offset", self.foot_offset),
            ("pid_body_w", self.pid_body_w),
            ("pid_body_h", self.pid_body_h),
            ("pid_body_d", self.pid_body_d),
            ("pid_bezel_w", self.pid_bezel_w),
            ("pid_bezel_h", self.pid_bezel_h),
            ("pid_z_start", self.pid_z_start),
            ("clamp_w", self.clamp_w),
            ("clamp_d", self.clamp_d),
            ("clamp_h", self.clamp_h),
            ("ssr_w", self.ssr_w),
            ("ssr_l", self.ssr_l),
            ("ssr_h", self.ssr_h),
            ("ssr_mount_spacing", self.ssr_mount_spacing),
            ("ssr_platform_height", self.ssr_platform_height),
            ("ssr_rail_width", self.ssr_rail_width),
            ("ssr_grill_length", self.ssr_grill_length),
            ("roof_vent_length", self.roof_vent_length),
            ("slot_pitch", self.slot_pitch),
            ("slot_width", self.slot_width),
            ("socket_cutout", self.socket_cutout),
            ("socket_pitch", self.socket_pitch),
            ("socket_boss_dia", self.socket_boss_dia),
            ("socket_boss_depth", self.socket_boss_depth),
            ("c14_body_w", self.c14_body_w),
            ("c14_body_h", self.c14_body_h),
            ("c14_screw_pitch", self.c14_screw_pitch),
            ("c14_boss_depth", self.c14_boss_depth),
            ("c14_pilaster_w", self.c14_pilaster_w),
            ("c14_z", self.c14_z),
            ("c14_ghost_depth", self.c14_ghost_depth),
            ("term_w", self.term_w),
            ("term_d", self.term_d),
            ("term_h", self.term_h),
            ("term_mount_x", self.term_mount_x),
            ("term_mount_y", self.term_mount_y),
            ("term_boss_height", self.term_boss_height),
            ("term_rear_offset", self.term_rear_offset),
            ("mouse_hole_dia", self.mouse_hole_dia),
            ("side_margin", self.side_margin),
            ("pid_ssr_gap", self.pid_ssr_gap),
            ("ssr_front_gap", self.ssr_front_gap),
            ("internal_l", self.internal_l),
            ("internal_h", self.internal_h),
            ("corner_inset", self.corner_inset),
            ("corner_post_radius", self.corner_post_radius),
        ])?;
        non_negative("fit_tolerance", self.fit_tolerance)?;
        finite("socket_offset_x", self.socket_offset_x)?;
        finite("socket_y", self.socket_y)?;
        positive_count("ssr_grill_slots", self.ssr_grill_slots)?;
        positive_count("roof_vent_slots", self.roof_vent_slots)?;
        self.fasteners.validate()?;
        self.washer.validate()?;

        // The cavity is a fillet offset inwards by the wall; it needs a radius.
        if self.fillet <= self.wall {
            return Err(Error::invalid(
                "fillet",
                self.fillet,
                "must exceed the wall thickness so the inner cavity keeps a corner radius",
            ));
        }
        if self.slot_width >= self.slot_pitch {
            return Err(Error::invalid(
                "slot_width",
                self.slot_width,
                "slots would merge; must be narrower than slot_pitch",
            ));
        }
        if self.pid_z_start + self.pid_body_h + self.fit_tolerance >= self.internal_h {
            return Err(Error::Inconsistent(format!(
                "PID cutout top ({:.1} mm) reaches the roof at {:.1} mm",
                self.pid_z_start + self.pid_body_h + self.fit_tolerance,
                self.internal_h
            )));
        }
        if self.clamp_h >= self.pid_z_start {
            return Err(Error::Inconsistent(format!(
                "clamp block ({:.1} mm) does not fit below the PID at {:.1} mm",
                self.clamp_h, self.pid_z_start
            )));
        }
        Ok(())
    }
}

/// Single-body "tabletop" enclosure with a removable lid, a rear terminal
/// porch and its safety cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabletopParams {
    pub wall: Real,
    pub lid: Real,
    pub fit_tolerance: Real,
    pub fillet: Real,

    pub side_margin: Real,
    pub pid_ssr_gap: Real,
    pub ssr_front_gap: Real,
    pub rear_wiring_gap: Real,

    pub pid_body_w: Real,
    pub pid_body_h: Real,
    pub pid_body_d: Real,
    pub pid_bezel_w: Real,
    pub pid_bezel_h: Real,
    pub pid_bezel_d: Real,
    pub pid_floor_clearance: Real,

    pub ssr_w: Real,
    pub ssr_l: Real,
    pub ssr_h: Real,
    pub ssr_mount_spacing: Real,
    pub ssr_screw_depth: Real,
    pub vent_pitch: Real,
    pub vent_width: Real,

    pub term_w: Real,
    pub term_d: Real,
    pub term_h: Real,
    pub term_mount_x: Real,
    pub term_mount_y: Real,
    pub term_screw_depth: Real,

    pub mains_blk_w: Real,
    pub mains_blk_d: Real,
    pub mains_blk_h: Real,

    pub porch_free_space: Real,
    /// Porch width beyond the terminal block width.
    pub porch_side_allowance: Real,
    pub porch_wall: Real,
    pub cover_gap: Real,
    /// Shift of the cover screw holes away from the case wall.
    pub cover_hole_asymmetry: Real,
    pub cover_fillet: Real,
    pub mark_depth: Real,
    /// Height of the lettering raised on the lid.
    pub label_height: Real,

    pub cable_dia: Real,
    pub cable_spacing: Real,
    pub boss_size: Real,
    pub anchor_height: Real,
    pub anchor_hole_w: Real,
    pub anchor_hole_h: Real,

    pub lid_rebate_depth: Real,
    pub lid_rebate_tolerance: Real,
    pub pilot_dia: Real,
    pub clearance_dia: Real,
    pub counterbore_dia: Real,
    pub counterbore_depth: Real,

    #[serde(deserialize_with = "tabletop_washer")]
    pub washer: WasherParams,
}

impl Default for TabletopParams {
    fn default() -> Self {
        TabletopParams {
            wall: 2.0,
            lid: 4.0,
            fit_tolerance: 0.3,
            fillet: 4.0,

            side_margin: 20.0,
            pid_ssr_gap: 20.0,
            ssr_front_gap: 20.0,
            rear_wiring_gap: 50.0,

            pid_body_w: 44.0,
            pid_body_h: 44.0,
            pid_body_d: 80.0,
            pid_bezel_w: 48.0,
            pid_bezel_h: 48.0,
            pid_bezel_d: 9.0,
            pid_floor_clearance: 12.0,

            ssr_w: 50.0,
            ssr_l: 80.0,
            ssr_h: 73.0,
            ssr_mount_spacing: 72.0,
            ssr_screw_depth: 7.0,
            vent_pitch: 6.0,
            vent_width: 3.0,

            term_w: 36.0,
            term_d: 21.0,
            term_h: 13.0,
            term_mount_x: 28.0,
            term_mount_y: 8.0,
            term_screw_depth: 7.0,

            mains_blk_w: 20.0,
            mains_blk_d: 15.0,
            mains_blk_h: 15.0,

            porch_free_space: 5.0,
            porch_side_allowance: 16.0,
            porch_wall: 4.0,
            cover_gap: 1.0,
            cover_hole_asymmetry: 3.0,
            cover_fillet: 2.0,
            mark_depth: 0.6,
            label_height: 0.6,

            cable_dia: 8.0,
            cable_spacing: 22.0,
            boss_size: 10.0,
            anchor_height: 8.0,
            anchor_hole_w: 5.0,
            anchor_hole_h: 3.5,

            lid_rebate_depth: 2.0,
            lid_rebate_tolerance: 0.4,
            pilot_dia: 2.8,
            clearance_dia: 3.4,
            counterbore_dia: 6.2,
            counterbore_depth: 2.0,

            washer: TABLETOP_WASHER,
        }
    }
}

impl TabletopParams {
    pub fn validate(&self) -> Result<()> {
        check_all(&[
            ("wall", self.wall),
            ("lid", self.lid),
            ("fillet", self.fillet),
            ("side_margin", self.side_margin),
            ("pid_body_w", self.pid_body_w),
            ("pid_body_h", self.pid_body_h),
            ("pid_body_d", self.pid_body_d),
            ("pid_bezel_w", self.pid_bezel_w),
            ("pid_bezel_h", self.pid_bezel_h),
            ("pid_bezel_d", self.pid_bezel_d),
            ("pid_floor_clearance", self.pid_floor_clearance),
            ("ssr_w", self.ssr_w),
            ("ssr_l", self.ssr_l),
            ("ssr_h", self.ssr_h),
            ("ssr_mount_spacing", self.ssr_mount_spacing),
            ("ssr_screw_depth", self.ssr_screw_depth),
            ("vent_pitch", self.vent_pitch),
            ("vent_width", self.vent_width),
            ("term_w", self.term_w),
            ("term_d", self.term_d),
            ("term_h", self.term_h),
            ("term_mount_x", self.term_mount_x),
            ("term_mount_y", self.term_mount_y),
            ("term_screw_depth", self.term_screw_depth),
            ("mains_blk_w", self.mains_blk_w),
            ("mains_blk_d", self.mains_blk_d),
            ("mains_blk_h", self.mains_blk_h),
            ("porch_side_allowance", self.porch_side_allowance),
            ("porch_wall", self.porch_wall),
            ("cover_fillet", self.cover_fillet),
            ("mark_depth", self.mark_depth),
            ("label_height", self.label_height),
            ("cable_dia", self.cable_dia),
            ("cable_spacing", self.cable_spacing),
            ("boss_size", self.boss_size),
            ("anchor_height", self.anchor_height),
            ("anchor_hole_w", self.anchor_hole_w),
            ("anchor_hole_h", self.anchor_hole_h),
            ("lid_rebate_depth", self.lid_rebate_depth),
            ("pilot_dia", self.pilot_dia),
            ("clearance_dia", self.clearance_dia),
            ("counterbore_dia", self.counterbore_dia),
            ("counterbore_depth", self.counterbore_depth),
        ])?;
        for (name, value) in [
            ("fit_tolerance", self.fit_tolerance),
            ("pid_ssr_gap", self.pid_ssr_gap),
            ("ssr_front_gap", self.ssr_front_gap),
            ("rear_wiring_gap", self.rear_wiring_gap),
            ("porch_free_space", self.porch_free_space),
            ("cover_gap", self.cover_gap),
            ("cover_hole_asymmetry", self.cover_hole_asymmetry),
            ("lid_rebate_tolerance", self.lid_rebate_tolerance),
        ] {
            non_negative(name, value)?;
        }
        self.washer.validate()?;

        if self.porch_side_allowance <= 2.0 * self.porch_wall {
            return Err(Error::Inconsistent(format!(
                "porch side allowance {:.1} mm leaves no room between {:.1} mm walls for the terminal block",
                self.porch_side_allowance, self.porch_wall
            )));
        }
        if self.counterbore_dia <= self.clearance_dia {
            return Err(Error::invalid(
                "counterbore_dia",
                self.counterbore_dia,
                "must be wider than the clearance hole",
            ));
        }
        if self.counterbore_depth >= self.lid {
            return Err(Error::invalid(
                "counterbore_depth",
                self.counterbore_depth,
                "must be shallower than the lid",
            ));
        }
        if self.mark_depth >= self.lid {
            return Err(Error::invalid("mark_depth", self.mark_depth, "must be shallower than the lid"));
        }
        if self.vent_width >= self.vent_pitch {
            return Err(Error::invalid(
                "vent_width",
                self.vent_width,
                "slots would merge; must be narrower than vent_pitch",
            ));
        }
        if self.vent_pitch > self.ssr_w {
            return Err(Error::Inconsistent(format!(
                "vent pitch {:.1} mm fits no lid slot across the {:.1} mm SSR",
                self.vent_pitch, self.ssr_w
            )));
        }
        if self.ssr_l <= 10.0 {
            return Err(Error::invalid("ssr_l", self.ssr_l, "too short for lid vent slots"));
        }
        Ok(())
    }
}
