//! Sequential feature-based construction of a single printable part.

use crate::errors::{Error, Result};
use crate::float_types::{EPSILON, Real};
use crate::locations::Offset;
use crate::mesh::Mesh;
use crate::traits::CSGOps;

/// The printable parts across both enclosure variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Base,
    Shell,
    Body,
    Lid,
    TerminalCover,
    Washer,
}

impl PartKind {
    pub const fn name(self) -> &'static str {
        match self {
            PartKind::Base => "base",
            PartKind::Shell => "shell",
            PartKind::Body => "body",
            PartKind::Lid => "lid",
            PartKind::TerminalCover => "terminal cover",
            PartKind::Washer => "washer",
        }
    }
}

/// A finished solid and the file it is exported to.
#[derive(Debug, Clone)]
pub struct Part {
    pub kind: PartKind,
    pub file_name: &'static str,
    pub mesh: Mesh,
}

impl Part {
    /// Solid name written into STL headers: the file name without extension.
    pub fn solid_name(&self) -> &'static str {
        self.file_name.strip_suffix(".stl").unwrap_or(self.file_name)
    }
}

/// Applies named additive and subtractive features to a base solid, in order.
///
/// ```ignore
/// let mut plate = PartBuilder::new("washer", Mesh::cylinder(4.5, 1.5, 32));
/// plate.subtract("bore", &Mesh::cylinder(1.7, 2.5, 32));
/// let washer = plate.finish()?;
/// ```
#[derive(Debug)]
pub struct PartBuilder {
    name: &'static str,
    mesh: Mesh,
    last_feature: &'static str,
}

impl PartBuilder {
    pub fn new(name: &'static str, base: Mesh) -> Self {
        log::debug!("{name}: base solid, {} polygons", base.polygons.len());
        PartBuilder {
            name,
            mesh: base,
            last_feature: "base",
        }
    }

    /// Union `tool` into the part. Empty tools are skipped.
    pub fn add(&mut self, feature: &'static str, tool: &Mesh) -> &mut Self {
        if tool.is_empty() {
            log::debug!("{}: skipping empty feature `{feature}`", self.name);
            return self;
        }
        self.mesh = self.mesh.union(tool);
        self.record(feature, '+');
        self
    }

    /// Cut `tool` out of the part. Empty tools are skipped.
    pub fn subtract(&mut self, feature: &'static str, tool: &Mesh) -> &mut Self {
        if tool.is_empty() {
            log::debug!("{}: skipping empty feature `{feature}`", self.name);
            return self;
        }
        self.mesh = self.mesh.difference(tool);
        self.record(feature, '-');
        self
    }

    fn record(&mut self, feature: &'static str, op: char) {
        self.last_feature = feature;
        log::debug!(
            "{}: {op} {feature}, {} polygons",
            self.name,
            self.mesh.polygons.len()
        );
    }

    /// The solid so far. Fails if the features consumed all of it.
    pub fn finish(self) -> Result<Mesh> {
        if self.mesh.is_empty() || self.mesh.volume() <= EPSILON {
            return Err(Error::DegenerateShape {
                part: self.name.to_string(),
                feature: self.last_feature.to_string(),
            });
        }
        Ok(self.mesh)
    }
}

/// Copies of `tool` at each XY offset, raised by `z`.
///
/// Copies are concatenated, not unioned, so they must not overlap one
/// another.
pub fn pattern(tool: &Mesh, offsets: &[Offset], z: Real) -> Mesh {
    offsets
        .iter()
        .fold(Mesh::new(), |acc, &(x, y)| acc.merge(&tool.translate(x, y, z)))
}
