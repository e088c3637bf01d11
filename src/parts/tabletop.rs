//! The tabletop enclosure: one open-top body with a rear terminal porch, a
//! screw-down lid, a safety cover over the porch and a small washer.

use super::{rounded_plate, slot_row, y_cylinder};
use crate::errors::Result;
use crate::float_types::Real;
use crate::layout::TabletopLayout;
use crate::locations::{self, Offset};
use crate::mesh::Mesh;
use crate::mesh::shapes::{Align, CENTER, ON_FLOOR};
use crate::params::TabletopParams;
use crate::part::{PartBuilder, pattern};
use crate::sketch::Sketch;
use crate::traits::CSGOps;
use nalgebra::Vector3;

/// Gap between the top of the body and the lid in the preview assembly.
pub const PREVIEW_LID_GAP: Real = 5.0;

/// Two lines embossed on the lid above the PID.
const LID_LABEL: [&str; 2] = ["PID Temp", "Controller"];
const LID_LABEL_SIZE: Real = 12.0;
const LID_LABEL_LINE_OFFSET: Real = 9.0;

/// Supply polarity engraved on the terminal cover, left then right.
const POLARITY_LABELS: [&str; 2] = ["+", "-"];
const POLARITY_SIZE: Real = 10.0;
const POLARITY_OFFSET_X: Real = 12.0;

/// Builds the parts of the tabletop enclosure.
#[derive(Debug, Clone)]
pub struct Tabletop<'a> {
    params: &'a TabletopParams,
    layout: TabletopLayout,
    segments: usize,
}

impl<'a> Tabletop<'a> {
    pub fn new(params: &'a TabletopParams, segments: usize) -> Self {
        if params.fillet <= params.wall {
            log::warn!(
                "fillet {:.1} mm does not exceed wall {:.1} mm; the cavity gets sharp corners",
                params.fillet,
                params.wall
            );
        }
        Tabletop {
            params,
            layout: TabletopLayout::new(params),
            segments: segments.max(3),
        }
    }

    pub const fn layout(&self) -> &TabletopLayout {
        &self.layout
    }

    fn pilot(&self, depth: Real) -> Mesh {
        Mesh::aligned_cylinder(self.params.pilot_dia / 2.0, depth, self.segments, Align::Max)
    }

    fn boss_centres(&self) -> Vec<Offset> {
        locations::corners(self.layout.boss_x, self.layout.boss_y)
    }

    /// Screw clearance plus counterbore, both cut from the top face at
    /// `top` down through a plate of thickness `through`.
    fn counterbored(&self, part: &mut PartBuilder, at: &[Offset], top: Real, through: Real) {
        let p = self.params;
        let seg = self.segments;
        let clearance = Mesh::aligned_cylinder(p.clearance_dia / 2.0, through + 2.0, seg, Align::Max);
        let bore = Mesh::aligned_cylinder(
            p.counterbore_dia / 2.0,
            p.counterbore_depth + 1.0,
            seg,
            Align::Max,
        );
        part.subtract("clearance holes", &pattern(&clearance, at, top + 1.0))
            .subtract("counterbores", &pattern(&bore, at, top + 1.0));
    }

    /// Case body with every internal mount and the rear porch.
    pub fn body(&self) -> Result<Mesh> {
        let (p, l, seg) = (self.params, &self.layout, self.segments);
        let mut part = PartBuilder::new("body", rounded_plate(l.box_w, l.box_l, p.fillet, l.box_h, seg));

        let cavity = rounded_plate(l.internal_w, l.internal_l, p.fillet - p.wall, l.box_h - p.wall, seg);
        part.subtract("hollow", &cavity.translate(0.0, 0.0, p.wall));

        if l.ssr_platform_h > 0.0 {
            let platform = Sketch::rectangle(p.ssr_w + 4.0, p.ssr_l + 4.0)
                .translate(l.ssr_x, l.ssr_y, 0.0)
                .extrude(l.ssr_platform_h)
                .translate(0.0, 0.0, p.wall);
            part.add("ssr platform", &platform);
        }
        let ssr_mounts = locations::shifted(
            &locations::pairs_y(p.ssr_mount_spacing / 2.0),
            l.ssr_x,
            l.ssr_y,
        );
        part.subtract(
            "ssr holes",
            &pattern(&self.pilot(p.ssr_screw_depth), &ssr_mounts, p.wall + l.ssr_platform_h),
        );

        let mains_boss = Mesh::aligned_cylinder(4.0, 6.0, seg, Align::Min);
        part.add("mains block boss", &mains_boss.translate(l.mains_x, l.mains_y, p.wall))
            .subtract(
                "mains block hole",
                &self.pilot(8.0).translate(l.mains_x, l.mains_y, p.wall + 6.0),
            );

        self.porch(&mut part);

        let pass_through = Mesh::aligned_box(Vector3::new(p.term_w - 4.0, p.wall * 4.0, p.term_h), CENTER);
        part.subtract(
            "wire pass-through",
            &pass_through.translate(l.porch_x, l.box_l / 2.0, p.wall + p.term_h / 2.0),
        );

        let front = Mesh::aligned_box(
            Vector3::new(
                p.pid_body_w + p.fit_tolerance,
                p.wall * 4.0,
                p.pid_body_h + p.fit_tolerance,
            ),
            CENTER,
        );
        part.subtract("pid front cutout", &front.translate(l.pid_x, -l.box_l / 2.0, l.pid_z));

        self.cable_entries(&mut part);

        let boss = Sketch::rectangle(p.boss_size, p.boss_size).extrude(l.box_h - p.wall);
        part.add("corner bosses", &pattern(&boss, &self.boss_centres(), p.wall))
            .subtract("corner boss holes", &pattern(&self.pilot(15.0), &self.boss_centres(), l.box_h));

        let vents = locations::shifted(&locations::grid(0.0, 10.0, 1, 4), l.box_w / 2.0, l.ssr_y);
        let vent = Mesh::aligned_box(Vector3::new(p.wall * 4.0, 6.0, 4.0), CENTER);
        part.subtract("side intake vents", &pattern(&vent, &vents, p.wall + 6.0));

        part.finish()
    }

    /// Floor and side walls behind the rear wall that hold the external
    /// terminal block, with screw holes for its cover. The walls stop at the
    /// floor's rear edge, so the open end between them is the wire exit.
    fn porch(&self, part: &mut PartBuilder) {
        let (p, l) = (self.params, &self.layout);
        let outline = Sketch::rectangle(l.porch_w, l.porch_d);

        let floor = outline.translate(l.porch_x, l.porch_y, 0.0).extrude(l.porch_floor_z);
        part.add("porch floor", &floor);

        let inner = Sketch::rectangle(l.porch_w - 2.0 * p.porch_wall, l.porch_d + 4.0).translate(0.0, -2.0, 0.0);
        let walls = outline
            .difference(&inner)
            .translate(l.porch_x, l.porch_y, 0.0)
            .extrude(l.porch_wall_h)
            .translate(0.0, 0.0, l.porch_floor_z);
        part.add("porch walls", &walls);

        let term_mounts = locations::shifted(
            &locations::grid(p.term_mount_x, p.term_mount_y, 2, 2),
            l.porch_x,
            l.term_y,
        );
        part.subtract(
            "terminal holes",
            &pattern(&self.pilot(p.term_screw_depth), &term_mounts, l.porch_floor_z),
        );

        let cover_mounts = locations::shifted(
            &locations::grid(l.porch_w - 2.0 * p.porch_wall, 0.0, 2, 1),
            l.porch_x,
            l.porch_y,
        );
        part.subtract(
            "cover screw holes",
            &pattern(&self.pilot(10.0), &cover_mounts, l.porch_top_z()),
        );

    }

    /// Keyhole cable entries through the rear wall, each with a tie-down
    /// anchor on the floor in front of it.
    fn cable_entries(&self, part: &mut PartBuilder) {
        let (p, l, seg) = (self.params, &self.layout, self.segments);
        let entries: Vec<Offset> = l.cable_xs.iter().map(|&x| (x, l.box_l / 2.0)).collect();

        let slot = Mesh::aligned_box(Vector3::new(p.cable_dia, p.wall * 4.0, p.cable_dia), ON_FLOOR);
        let round = y_cylinder(p.cable_dia / 2.0, p.wall * 4.0, seg, Align::Center);
        part.subtract("cable entry slots", &pattern(&slot, &entries, l.shelf_z))
            .subtract("cable entry rounds", &pattern(&round, &entries, l.shelf_z + p.cable_dia));

        let anchors: Vec<Offset> = l
            .cable_xs
            .iter()
            .map(|&x| (x, l.box_l / 2.0 - p.wall))
            .collect();
        part.add("cable anchors", &pattern(&self.anchor(), &anchors, p.wall));
    }

    /// Cable-tie anchor: a block against the wall with a tunnel through it
    /// along X. Its origin is the wall-side bottom edge.
    fn anchor(&self) -> Mesh {
        let p = self.params;
        let block = Mesh::aligned_box(
            Vector3::new(12.0, 15.0, p.anchor_height),
            (Align::Center, Align::Max, Align::Min),
        );
        let tunnel = Mesh::aligned_box(Vector3::new(20.0, p.anchor_hole_w, p.anchor_hole_h), CENTER)
            .translate(0.0, -7.5, p.anchor_height / 2.0);
        block.difference(&tunnel)
    }

    /// Lid: plate with a locating rebate underneath, counterbored screws into
    /// the corner bosses, vent slots over the SSR and a raised label over the
    /// PID.
    pub fn lid(&self) -> Result<Mesh> {
        let (p, l, seg) = (self.params, &self.layout, self.segments);
        let mut part = PartBuilder::new("lid", rounded_plate(l.box_w, l.box_l, p.fillet, p.lid, seg));

        let reliefs: Vec<Sketch> = self
            .boss_centres()
            .into_iter()
            .map(|(x, y)| {
                Sketch::circle(p.boss_size / 2.0 + p.lid_rebate_tolerance, seg).translate(x, y, 0.0)
            })
            .collect();
        let rebate = Sketch::rectangle(
            l.internal_w - 2.0 * p.lid_rebate_tolerance,
            l.internal_l - 2.0 * p.lid_rebate_tolerance,
        )
        .difference(&Sketch::union_all(&reliefs))
        .extrude(-p.lid_rebate_depth);
        part.add("rebate", &rebate);

        self.counterbored(&mut part, &self.boss_centres(), p.lid, p.lid + p.lid_rebate_depth);

        let vents = slot_row(p.ssr_l - 10.0, p.vent_width, p.vent_pitch, l.lid_vents, seg)
            .translate(l.ssr_x, l.ssr_y, 0.0)
            .extrude(-(p.lid + p.lid_rebate_depth))
            .translate(0.0, 0.0, p.lid);
        part.subtract("ssr vents", &vents);

        // Rooted 0.5 mm into the plate so no face of the union is coplanar.
        let [upper, lower] = LID_LABEL;
        let label = Sketch::text(upper, LID_LABEL_SIZE)
            .translate(0.0, LID_LABEL_LINE_OFFSET, 0.0)
            .union(&Sketch::text(lower, LID_LABEL_SIZE).translate(0.0, -LID_LABEL_LINE_OFFSET, 0.0))
            .translate(l.pid_x, l.ssr_y, 0.0)
            .extrude(p.label_height + 0.5)
            .translate(0.0, 0.0, p.lid - 0.5);
        part.add("label", &label);

        part.finish()
    }

    /// Safety cover screwed onto the porch walls over the terminal block.
    pub fn terminal_cover(&self) -> Result<Mesh> {
        let (p, l, seg) = (self.params, &self.layout, self.segments);
        let mut part = PartBuilder::new(
            "terminal cover",
            rounded_plate(l.porch_w, l.cover_depth, p.cover_fillet, p.lid, seg),
        );

        let holes = locations::shifted(
            &locations::grid(l.porch_w - 2.0 * p.porch_wall, 0.0, 2, 1),
            0.0,
            l.cover_hole_y,
        );
        self.counterbored(&mut part, &holes, p.lid, p.lid);

        let [left, right] = POLARITY_LABELS;
        let marks = Sketch::text(left, POLARITY_SIZE)
            .translate(-POLARITY_OFFSET_X, l.cover_hole_y, 0.0)
            .union(&Sketch::text(right, POLARITY_SIZE).translate(POLARITY_OFFSET_X, l.cover_hole_y, 0.0))
            .extrude(p.mark_depth + 1.0)
            .translate(0.0, 0.0, p.lid - p.mark_depth);
        part.subtract("polarity marks", &marks);

        let notch = Mesh::aligned_cylinder(3.0, p.lid + 2.0, seg, Align::Center)
            .translate(0.0, l.cover_depth / 2.0, p.lid / 2.0);
        part.subtract("finger notch", &notch);

        part.finish()
    }

    /// Small washer, centred on z = 0.
    pub fn washer(&self) -> Result<Mesh> {
        let w = &self.params.washer;
        let mut part = PartBuilder::new(
            "washer",
            Mesh::aligned_cylinder(w.outer_dia / 2.0, w.thickness, self.segments, Align::Center),
        );
        part.subtract(
            "bore",
            &Mesh::aligned_cylinder(w.inner_dia / 2.0, w.thickness + 2.0, self.segments, Align::Center),
        );
        part.finish()
    }

    /// Envelopes of the bought-in components, for checking clearances.
    pub fn ghosts(&self) -> Vec<(&'static str, Mesh)> {
        let (p, l) = (self.params, &self.layout);
        let block = |w, d, h, x, y, z| Mesh::aligned_box(Vector3::new(w, d, h), CENTER).translate(x, y, z);
        vec![
            (
                "pid body",
                block(p.pid_body_w, p.pid_body_d, p.pid_body_h, l.pid_x, l.pid_y, l.pid_z),
            ),
            (
                "pid bezel",
                block(p.pid_bezel_w, p.pid_bezel_d, p.pid_bezel_h, l.pid_x, l.bezel_y, l.pid_z),
            ),
            (
                "ssr",
                block(p.ssr_w, p.ssr_l, p.ssr_h, l.ssr_x, l.ssr_y, p.wall + p.ssr_h / 2.0),
            ),
            (
                "terminal block",
                block(
                    p.term_w,
                    p.term_d,
                    p.term_h,
                    l.porch_x,
                    l.term_y,
                    l.porch_floor_z + p.term_h / 2.0,
                ),
            ),
            (
                "mains block",
                block(p.mains_blk_w, p.mains_blk_d, p.mains_blk_h, l.mains_x, l.mains_y, l.mains_z),
            ),
        ]
    }

    /// Body with the lid floating above it, the cover on the porch and the
    /// washer behind, plus ghosts.
    pub fn preview(&self, body: &Mesh, lid: &Mesh, cover: &Mesh, washer: &Mesh) -> Mesh {
        let l = &self.layout;
        let assembly = body
            .merge(&lid.translate(0.0, 0.0, l.box_h + PREVIEW_LID_GAP))
            .merge(&cover.translate(l.porch_x, l.cover_y, l.porch_top_z()))
            .merge(&washer.translate(0.0, l.box_l / 2.0 + 20.0, 0.0));
        self.ghosts()
            .iter()
            .fold(assembly, |acc, (_, ghost)| acc.merge(ghost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn anchor_has_a_tunnel() {
        let params = TabletopParams::default();
        let anchor = Tabletop::new(&params, 8).anchor();
        let solid = 12.0 * 15.0 * params.anchor_height;
        let tunnel = 12.0 * params.anchor_hole_w * params.anchor_hole_h;
        assert_relative_eq!(anchor.volume(), solid - tunnel, epsilon = 1e-6);
        let bb = anchor.bounding_box();
        assert_relative_eq!(bb.maxs.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bb.mins.y, -15.0, epsilon = 1e-9);
    }

    #[test]
    fn washer_is_centred() {
        let params = TabletopParams::default();
        let washer = Tabletop::new(&params, 12).washer().expect("washer");
        let bb = washer.bounding_box();
        assert_relative_eq!(bb.mins.z, -1.0, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.z, 1.0, epsilon = 1e-9);
        let expected = 3.0 * (4.0 * 4.0 - 1.75 * 1.75) * 2.0;
        assert_relative_eq!(washer.volume(), expected, epsilon = 1e-6);
    }

    #[test]
    fn cover_fits_its_porch() {
        let params = TabletopParams::default();
        let cover = Tabletop::new(&params, 12).terminal_cover().expect("cover");
        let bb = cover.bounding_box();
        assert_relative_eq!(bb.maxs.x - bb.mins.x, 52.0, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.y - bb.mins.y, 29.0, epsilon = 1e-9);
        assert_relative_eq!(bb.maxs.z, params.lid, epsilon = 1e-9);
    }
}
