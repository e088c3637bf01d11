//! The two enclosure designs and the parts each one produces.

use crate::config::EnclosureConfig;
use crate::errors::{Error, Result};
use crate::float_types::Real;
use crate::layout::{InvertedLayout, TabletopLayout};
use crate::mesh::Mesh;
use crate::part::{Part, PartKind};
use crate::parts::{Inverted, Tabletop};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Base plate plus a shell lowered over it, with a UK socket in the roof.
    #[default]
    Inverted,
    /// Open-top body with lid and a rear terminal porch.
    Tabletop,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Inverted, Variant::Tabletop];

    /// Parts in the order they are built and exported.
    pub const fn parts(self) -> &'static [PartKind] {
        match self {
            Variant::Inverted => &[PartKind::Base, PartKind::Shell, PartKind::Washer],
            Variant::Tabletop => &[
                PartKind::Body,
                PartKind::Lid,
                PartKind::TerminalCover,
                PartKind::Washer,
            ],
        }
    }

    /// STL file name for `kind`, or `None` if this variant has no such part.
    pub const fn file_name(self, kind: PartKind) -> Option<&'static str> {
        match (self, kind) {
            (Variant::Inverted, PartKind::Base) => Some("pid_inv_base.stl"),
            (Variant::Inverted, PartKind::Shell) => Some("pid_inv_shell.stl"),
            (Variant::Inverted, PartKind::Washer) => Some("pid_m3_washer.stl"),
            (Variant::Tabletop, PartKind::Body) => Some("pid_case_body.stl"),
            (Variant::Tabletop, PartKind::Lid) => Some("pid_lid.stl"),
            (Variant::Tabletop, PartKind::TerminalCover) => Some("pid_term_cover.stl"),
            (Variant::Tabletop, PartKind::Washer) => Some("pid_washer.stl"),
            _ => None,
        }
    }

    pub const fn preview_file_name(self) -> &'static str {
        match self {
            Variant::Inverted => "pid_inv_preview.stl",
            Variant::Tabletop => "pid_case_preview.stl",
        }
    }

    /// Outer size of the case body for `config`.
    pub fn dimensions(self, config: &EnclosureConfig) -> Vector3<Real> {
        match self {
            Variant::Inverted => InvertedLayout::new(&config.inverted).dimensions(),
            Variant::Tabletop => TabletopLayout::new(&config.tabletop).dimensions(),
        }
    }

    /// Validate `config` and build every part of this variant.
    pub fn build(self, config: &EnclosureConfig) -> Result<Vec<Part>> {
        let mut checked = config.clone();
        checked.variant = self;
        checked.validate()?;

        let segments = config.output.circle_segments;
        match self {
            Variant::Inverted => {
                let inv = Inverted::new(&config.inverted, segments);
                collect_parts(self, |kind| match kind {
                    PartKind::Base => inv.base(),
                    PartKind::Shell => inv.shell(),
                    PartKind::Washer => inv.washer(),
                    other => Err(not_in_variant(self, other)),
                })
            },
            Variant::Tabletop => {
                let tab = Tabletop::new(&config.tabletop, segments);
                collect_parts(self, |kind| match kind {
                    PartKind::Body => tab.body(),
                    PartKind::Lid => tab.lid(),
                    PartKind::TerminalCover => tab.terminal_cover(),
                    PartKind::Washer => tab.washer(),
                    other => Err(not_in_variant(self, other)),
                })
            },
        }
    }

    /// Inspection assembly of already built `parts`, with component ghosts.
    pub fn preview(self, config: &EnclosureConfig, parts: &[Part]) -> Result<Mesh> {
        let find = |kind: PartKind| {
            parts
                .iter()
                .find(|p| p.kind == kind)
                .map(|p| &p.mesh)
                .ok_or_else(|| Error::Inconsistent(format!("preview needs the {} part", kind.name())))
        };
        let segments = config.output.circle_segments;
        let assembly = match self {
            Variant::Inverted => Inverted::new(&config.inverted, segments).preview(
                find(PartKind::Base)?,
                find(PartKind::Shell)?,
                find(PartKind::Washer)?,
            ),
            Variant::Tabletop => Tabletop::new(&config.tabletop, segments).preview(
                find(PartKind::Body)?,
                find(PartKind::Lid)?,
                find(PartKind::TerminalCover)?,
                find(PartKind::Washer)?,
            ),
        };
        Ok(assembly)
    }

    /// Human-readable dimensions, washer and fastener summary.
    pub fn report(self, config: &EnclosureConfig) -> String {
        let d = self.dimensions(config);
        let mut out = String::new();
        let (label, washer) = match self {
            Variant::Inverted => ("Shell", &config.inverted.washer),
            Variant::Tabletop => ("Case", &config.tabletop.washer),
        };
        out.push_str(&format!(
            "{label} Dimensions: {:.1} x {:.1} x {:.1} mm\n",
            d.x, d.y, d.z
        ));
        out.push_str(&format!(
            "Washer: {:.1}mm OD × {:.1}mm ID × {:.1}mm thick",
            washer.outer_dia, washer.inner_dia, washer.thickness
        ));
        if self == Variant::Inverted {
            out.push_str(&format!(" (for M3 bolts)\n{}", config.inverted.inserts.summary()));
        }
        out
    }
}

fn not_in_variant(variant: Variant, kind: PartKind) -> Error {
    Error::Inconsistent(format!("the {variant} enclosure has no {} part", kind.name()))
}

fn build_one<F>(variant: Variant, kind: PartKind, build: &F) -> Result<Part>
where
    F: Fn(PartKind) -> Result<Mesh>,
{
    let file_name = variant.file_name(kind).ok_or_else(|| not_in_variant(variant, kind))?;
    let start = Instant::now();
    let mesh = build(kind)?;
    log::info!(
        "built {variant} {} in {:.2?}: {} polygons",
        kind.name(),
        start.elapsed(),
        mesh.polygons.len()
    );
    Ok(Part {
        kind,
        file_name,
        mesh,
    })
}

#[cfg(not(feature = "parallel"))]
fn collect_parts<F>(variant: Variant, build: F) -> Result<Vec<Part>>
where
    F: Fn(PartKind) -> Result<Mesh>,
{
    variant
        .parts()
        .iter()
        .map(|&kind| build_one(variant, kind, &build))
        .collect()
}

#[cfg(feature = "parallel")]
fn collect_parts<F>(variant: Variant, build: F) -> Result<Vec<Part>>
where
    F: Fn(PartKind) -> Result<Mesh> + Sync,
{
    use rayon::prelude::*;

    variant
        .parts()
        .par_iter()
        .map(|&kind| build_one(variant, kind, &build))
        .collect()
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Inverted => write!(f, "inverted"),
            Variant::Tabletop => write!(f, "tabletop"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inverted" => Ok(Variant::Inverted),
            "tabletop" => Ok(Variant::Tabletop),
            other => Err(format!("unknown variant `{other}` (expected inverted or tabletop)")),
        }
    }
}
