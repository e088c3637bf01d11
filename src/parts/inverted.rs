//! The inverted enclosure: a thick base plate carrying SSR and terminal block,
//! and a shell that drops over it and screws into the base from below.

use super::{rounded_plate, slot_row, y_cylinder};
use crate::errors::Result;
use crate::fasteners::{FastenerMode, ThreadSize};
use crate::float_types::Real;
use crate::layout::InvertedLayout;
use crate::locations::{self, Offset};
use crate::mesh::Mesh;
use crate::mesh::shapes::{Align, CENTER, ON_FLOOR};
use crate::params::InvertedParams;
use crate::part::{PartBuilder, pattern};
use crate::sketch::Sketch;
use crate::traits::CSGOps;
use nalgebra::Vector3;

/// How far the shell is lifted off the base in the preview assembly.
pub const PREVIEW_LIFT: Real = 60.0;

/// Builds the parts of the inverted enclosure.
#[derive(Debug, Clone)]
pub struct Inverted<'a> {
    params: &'a InvertedParams,
    layout: InvertedLayout,
    segments: usize,
}

impl<'a> Inverted<'a> {
    pub fn new(params: &'a InvertedParams, segments: usize) -> Self {
        Inverted {
            params,
            layout: InvertedLayout::new(params),
            segments: segments.max(3),
        }
    }

    pub const fn layout(&self) -> &InvertedLayout {
        &self.layout
    }

    fn hole(&self, size: ThreadSize, use_insert: bool, depth: Real, align: Align) -> Mesh {
        let mode = FastenerMode::from_insert(use_insert);
        let dia = self.params.fasteners.hole_diameter(size, mode);
        Mesh::aligned_cylinder(dia / 2.0, depth, self.segments, align)
    }

    fn insert_chamfer(&self, size: ThreadSize, align: Align) -> Mesh {
        let fx = &self.params.fasteners;
        Mesh::aligned_cylinder(
            fx.insert_chamfer_diameter(size) / 2.0,
            fx.insert_chamfer_depth,
            self.segments,
            align,
        )
    }

    fn corners(&self) -> Vec<Offset> {
        locations::corners(self.layout.corner_x, self.layout.corner_y)
    }

    fn ssr_mounts(&self) -> Vec<Offset> {
        let spacing = self.params.ssr_mount_spacing;
        locations::shifted(
            &locations::pairs_y(spacing / 2.0),
            self.layout.ssr_x,
            self.layout.ssr_y,
        )
    }

    /// Base plate: SSR rails and grill, terminal platform, strain-relief pins,
    /// feet and counterbored corner screws.
    pub fn base(&self) -> Result<Mesh> {
        let (p, l, seg) = (self.params, &self.layout, self.segments);
        let mut part = PartBuilder::new("base", rounded_plate(l.box_w, l.box_l, p.fillet, p.base, seg));

        let ssr_mounts = self.ssr_mounts();
        let rail = Mesh::aligned_box(
            Vector3::new(p.ssr_w, p.ssr_rail_width, p.ssr_platform_height),
            ON_FLOOR,
        );
        part.add("ssr rails", &pattern(&rail, &ssr_mounts, p.base));

        let grill = slot_row(p.ssr_grill_length, p.slot_width, p.slot_pitch, p.ssr_grill_slots, seg)
            .translate(l.ssr_x, l.ssr_y, 0.0)
            .extrude(p.base);
        part.subtract("ssr grill", &grill);

        let ssr_top = p.base + p.ssr_platform_height;
        let ssr_hole = self.hole(ThreadSize::M3, p.inserts.ssr, ssr_top + 1.0, Align::Min);
        part.subtract("ssr holes", &pattern(&ssr_hole, &ssr_mounts, 0.0));
        if p.inserts.ssr {
            let chamfer = self.insert_chamfer(ThreadSize::M3, Align::Max);
            part.subtract("ssr insert chamfers", &pattern(&chamfer, &ssr_mounts, ssr_top));
        }

        let platform = Mesh::aligned_box(
            Vector3::new(p.term_w + 4.0, p.term_d + 4.0, p.term_boss_height),
            ON_FLOOR,
        );
        part.add("terminal platform", &platform.translate(l.term_x, l.term_y, p.base));

        let term_top = p.base + p.term_boss_height;
        let term_mounts = locations::shifted(
            &locations::grid(p.term_mount_x, p.term_mount_y, 2, 2),
            l.term_x,
            l.term_y,
        );
        let term_hole = self.hole(ThreadSize::M3, p.inserts.terminal, term_top + 1.0, Align::Min);
        part.subtract("terminal holes", &pattern(&term_hole, &term_mounts, 0.0));
        if p.inserts.terminal {
            let chamfer = self.insert_chamfer(ThreadSize::M3, Align::Max);
            part.subtract("terminal insert chamfers", &pattern(&chamfer, &term_mounts, term_top));
        }

        // Cable weaves between three pins behind the terminal block.
        let lab_y = l.internal_l / 2.0 - 8.0;
        let pins = locations::shifted(&[(0.0, 0.0), (-7.0, -5.0), (7.0, -5.0)], l.term_x, lab_y);
        let pin = Mesh::aligned_cylinder(2.5, 12.0, seg, Align::Min);
        part.add("strain relief pins", &pattern(&pin, &pins, p.base));

        let feet = locations::corners(
            l.box_w / 2.0 - p.foot_offset,
            l.box_l / 2.0 - p.foot_offset,
        );
        let foot = Sketch::circle(p.foot_dia / 2.0, seg).extrude(p.foot_depth);
        part.subtract("feet indents", &pattern(&foot, &feet, 0.0));

        let fx = &p.fasteners;
        let clearance = Mesh::aligned_cylinder(fx.m3_clearance / 2.0, p.base + 1.0, seg, Align::Min);
        let head = Mesh::aligned_cylinder(fx.m3_head_dia / 2.0, fx.m3_head_height, seg, Align::Min);
        part.subtract("corner clearance holes", &pattern(&clearance, &self.corners(), 0.0))
            .subtract("corner head counterbores", &pattern(&head, &self.corners(), 0.0));

        part.finish()
    }

    /// Shell: hollow filleted hull with corner posts, PID window and clamp,
    /// socket aperture and bosses, C14 inlet, roof vents and a cable notch.
    pub fn shell(&self) -> Result<Mesh> {
        let (p, l, seg) = (self.params, &self.layout, self.segments);
        let mut part = PartBuilder::new("shell", rounded_plate(l.box_w, l.box_l, p.fillet, l.box_h, seg));

        let cavity = rounded_plate(
            l.box_w - 2.0 * p.wall,
            l.box_l - 2.0 * p.wall,
            p.fillet - p.wall,
            l.roof_inner_z,
            seg,
        );
        part.subtract("cavity", &cavity);

        let corners = self.corners();
        let post_h = l.roof_inner_z;
        let post = Mesh::aligned_cylinder(p.corner_post_radius, post_h, seg, Align::Max);
        let post_hole = self.hole(ThreadSize::M3, p.inserts.corners, post_h, Align::Max);
        part.add("corner posts", &pattern(&post, &corners, l.roof_inner_z))
            .subtract("corner post holes", &pattern(&post_hole, &corners, l.roof_inner_z));
        if p.inserts.corners {
            let chamfer = self.insert_chamfer(ThreadSize::M3, Align::Min);
            part.subtract("corner insert chamfers", &pattern(&chamfer, &corners, 0.0));
        }

        let pid_window = Mesh::aligned_box(
            Vector3::new(
                p.pid_body_w + p.fit_tolerance,
                p.wall * 4.0,
                p.pid_body_h + p.fit_tolerance,
            ),
            CENTER,
        );
        part.subtract("pid cutout", &pid_window.translate(l.pid_x, -l.box_l / 2.0, l.pid_z_center));

        // The brace holds the PID from above; the clamp screw pushes up from below.
        let brace_h = l.roof_inner_z - l.pid_z_end;
        let brace = Mesh::aligned_box(Vector3::new(p.clamp_w, p.clamp_d, brace_h), CENTER);
        part.add("pid brace", &brace.translate(l.pid_x, l.clamp_y, l.pid_z_end + brace_h / 2.0));

        let clamp_z = l.pid_z_start - p.clamp_h / 2.0;
        let clamp = Mesh::aligned_box(Vector3::new(p.clamp_w, p.clamp_d, p.clamp_h), CENTER);
        let clamp_hole = self.hole(ThreadSize::M3, p.inserts.pid_clamp, p.clamp_h + 20.0, Align::Center);
        part.add("pid clamp", &clamp.translate(l.pid_x, l.clamp_y, clamp_z))
            .subtract("pid clamp hole", &clamp_hole.translate(l.pid_x, l.clamp_y, clamp_z));
        if p.inserts.pid_clamp {
            let chamfer = self.insert_chamfer(ThreadSize::M3, Align::Min);
            part.subtract(
                "pid clamp insert chamfer",
                &chamfer.translate(l.pid_x, l.clamp_y, l.pid_z_start - p.clamp_h),
            );
        }

        self.socket_mounts(&mut part);
        self.c14_inlet(&mut part);

        let vents = slot_row(p.roof_vent_length, p.slot_width, p.slot_pitch, p.roof_vent_slots, seg)
            .translate(l.ssr_x, l.ssr_y, 0.0)
            .extrude(-p.roof)
            .translate(0.0, 0.0, l.box_h);
        part.subtract("roof vents", &vents);

        let mouse_hole = y_cylinder(p.mouse_hole_dia / 2.0, 10.0, seg, Align::Center);
        part.subtract("mouse hole", &mouse_hole.translate(l.term_x, l.box_l / 2.0, 0.0));

        part.finish()
    }

    /// Square socket aperture in the roof, with two bosses hung beneath it on
    /// bridges back to the roof and the left wall.
    fn socket_mounts(&self, part: &mut PartBuilder) {
        let (p, l, seg) = (self.params, &self.layout, self.segments);
        let z = l.roof_inner_z;

        let cutout = Mesh::aligned_box(
            Vector3::new(p.socket_cutout, p.socket_cutout, p.roof * 4.0),
            CENTER,
        );
        part.subtract("socket cutout", &cutout.translate(l.socket_x, l.socket_y, z));

        let right_x = l.socket_x + p.socket_pitch / 2.0;
        let left_x = l.socket_x - p.socket_pitch / 2.0;
        let left_wall_x = -l.box_w / 2.0 + p.wall;
        let bridge_len = (left_x - left_wall_x).abs() + 2.0;
        let depth = p.socket_boss_depth;
        let bridge_z = z - depth / 2.0;

        let boss = Mesh::aligned_cylinder(p.socket_boss_dia / 2.0, depth, seg, Align::Max);
        let right_bridge = Mesh::aligned_box(Vector3::new(15.0, p.socket_boss_dia, depth), CENTER)
            .translate(right_x + 7.5, l.socket_y, bridge_z);
        let left_bridge = Mesh::aligned_box(Vector3::new(bridge_len, p.socket_boss_dia, depth), CENTER)
            .translate(left_x - bridge_len / 2.0, l.socket_y, bridge_z);

        let screws = [(right_x, l.socket_y), (left_x, l.socket_y)];
        let hole = self.hole(ThreadSize::M3_5, p.inserts.socket, depth, Align::Max);
        part.add("socket bosses", &pattern(&boss, &screws, z))
            .add("socket right bridge", &right_bridge)
            .add("socket left bridge", &left_bridge)
            .subtract("socket boss holes", &pattern(&hole, &screws, z));
        if p.inserts.socket {
            let chamfer = self.insert_chamfer(ThreadSize::M3_5, Align::Min);
            part.subtract("socket insert chamfers", &pattern(&chamfer, &screws, z - depth));
        }
    }

    /// C14 inlet in the rear wall, screwed into two full-height pilasters.
    fn c14_inlet(&self, part: &mut PartBuilder) {
        let (p, l, seg) = (self.params, &self.layout, self.segments);
        let screws = locations::shifted(&locations::pairs_x(p.c14_screw_pitch / 2.0), l.c14_x, 0.0);

        let pilaster = Mesh::aligned_box(
            Vector3::new(p.c14_pilaster_w, p.c14_boss_depth, l.roof_inner_z),
            (Align::Center, Align::Max, Align::Min),
        );
        let inner_wall_y = l.box_l / 2.0 - p.wall;
        part.add(
            "c14 pilasters",
            &pattern(&pilaster, &screws, 0.0).translate(0.0, inner_wall_y, 0.0),
        );

        let body = Mesh::aligned_box(Vector3::new(p.c14_body_w, p.wall * 4.0, p.c14_body_h), CENTER);
        part.subtract("c14 cutout", &body.translate(l.c14_x, l.c14_y, l.c14_z));

        let hole_dia = p
            .fasteners
            .hole_diameter(ThreadSize::M3, FastenerMode::from_insert(p.inserts.c14));
        let hole = y_cylinder(hole_dia / 2.0, 30.0, seg, Align::Center);
        part.subtract(
            "c14 screw holes",
            &pattern(&hole, &screws, l.c14_z).translate(0.0, l.c14_y, 0.0),
        );
        if p.inserts.c14 {
            let fx = &p.fasteners;
            let chamfer = y_cylinder(
                fx.insert_chamfer_diameter(ThreadSize::M3) / 2.0,
                fx.insert_chamfer_depth,
                seg,
                Align::Min,
            );
            part.subtract(
                "c14 insert chamfers",
                &pattern(&chamfer, &screws, l.c14_z).translate(0.0, l.c14_y, 0.0),
            );
        }
    }

    /// Flat washer for the corner screws.
    pub fn washer(&self) -> Result<Mesh> {
        let w = &self.params.washer;
        let mut part = PartBuilder::new(
            "washer",
            Mesh::aligned_cylinder(w.outer_dia / 2.0, w.thickness, self.segments, Align::Min),
        );
        part.subtract(
            "bore",
            &Mesh::aligned_cylinder(w.inner_dia / 2.0, w.thickness + 1.0, self.segments, Align::Center)
                .translate(0.0, 0.0, w.thickness / 2.0),
        );
        part.finish()
    }

    /// Envelopes of the bought-in components, for checking clearances.
    pub fn ghosts(&self) -> Vec<(&'static str, Mesh)> {
        let (p, l) = (self.params, &self.layout);
        let block = |w, d, h, x, y, z| Mesh::aligned_box(Vector3::new(w, d, h), CENTER).translate(x, y, z);
        vec![
            (
                "pid",
                block(p.pid_body_w, p.pid_body_d, p.pid_body_h, l.pid_x, l.pid_y, l.pid_z_center),
            ),
            (
                "ssr",
                block(p.ssr_w, p.ssr_l, p.ssr_h, l.ssr_x, l.ssr_y, l.ssr_z + p.ssr_h / 2.0),
            ),
            (
                "terminal block",
                block(
                    p.term_w,
                    p.term_d,
                    p.term_h,
                    l.term_x,
                    l.term_y,
                    p.base + p.term_boss_height + p.term_h / 2.0,
                ),
            ),
            (
                "c14 with cable",
                block(
                    p.c14_body_w,
                    p.c14_ghost_depth,
                    p.c14_body_h,
                    l.c14_x,
                    l.box_l / 2.0 - p.c14_ghost_depth / 2.0,
                    l.c14_z,
                ),
            ),
        ]
    }

    /// Base in place, shell lifted clear, washer to the side, plus ghosts.
    pub fn preview(&self, base: &Mesh, shell: &Mesh, washer: &Mesh) -> Mesh {
        let assembly = base
            .merge(&shell.translate(0.0, 0.0, PREVIEW_LIFT))
            .merge(&washer.translate(self.layout.box_w / 2.0 + 20.0, 0.0, 0.0));
        self.ghosts()
            .iter()
            .fold(assembly, |acc, (_, ghost)| acc.merge(ghost))
    }
}
