//! Threaded-hole sizing: heat-set inserts versus screws tapped straight into
//! the plastic, chosen per mounting location.

use crate::errors::{Error, Result};
use crate::float_types::Real;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a threaded hole receives its screw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FastenerMode {
    /// Larger hole with an entry chamfer for a heat-set insert.
    Insert,
    /// Pilot hole the screw cuts its own thread into.
    Tap,
}

impl FastenerMode {
    pub const fn from_insert(use_insert: bool) -> Self {
        if use_insert {
            FastenerMode::Insert
        } else {
            FastenerMode::Tap
        }
    }

    pub const fn is_insert(self) -> bool {
        matches!(self, FastenerMode::Insert)
    }
}

impl fmt::Display for FastenerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastenerMode::Insert => write!(f, "INSERTS"),
            FastenerMode::Tap => write!(f, "SCREWS"),
        }
    }
}

/// Metric thread sizes used by the enclosure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreadSize {
    M3,
    /// M3.5, used by UK socket faceplates.
    M3_5,
}

impl fmt::Display for ThreadSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThreadSize::M3 => write!(f, "M3"),
            ThreadSize::M3_5 => write!(f, "M3.5"),
        }
    }
}

/// Hole diameters for each thread size and fastening mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FastenerSizes {
    /// Hole for an M3 heat-set insert (4.0 OD × 5.7 L).
    pub m3_insert: Real,
    /// Hole for an M3.5 heat-set insert (4.6 OD × 6.0 L).
    pub m35_insert: Real,
    pub m3_tap: Real,
    pub m35_tap: Real,
    /// Entry counterbore that guides an M3 insert in straight.
    pub m3_insert_chamfer: Real,
    pub m35_insert_chamfer: Real,
    pub insert_chamfer_depth: Real,
    pub m3_clearance: Real,
    pub m3_head_dia: Real,
    pub m3_head_height: Real,
}

impl Default for FastenerSizes {
    fn default() -> Self {
        FastenerSizes {
            m3_insert: 4.2,
            m35_insert: 4.8,
            m3_tap: 2.8,
            m35_tap: 2.8,
            m3_insert_chamfer: 5.5,
            m35_insert_chamfer: 5.8,
            insert_chamfer_depth: 0.8,
            m3_clearance: 3.4,
            m3_head_dia: 6.0,
            m3_head_height: 3.0,
        }
    }
}

impl FastenerSizes {
    pub fn hole_diameter(&self, size: ThreadSize, mode: FastenerMode) -> Real {
        match (size, mode) {
            (ThreadSize::M3, FastenerMode::Insert) => self.m3_insert,
            (ThreadSize::M3_5, FastenerMode::Insert) => self.m35_insert,
            (ThreadSize::M3, FastenerMode::Tap) => self.m3_tap,
            (ThreadSize::M3_5, FastenerMode::Tap) => self.m35_tap,
        }
    }

    pub fn insert_chamfer_diameter(&self, size: ThreadSize) -> Real {
        match size {
            ThreadSize::M3 => self.m3_insert_chamfer,
            ThreadSize::M3_5 => self.m35_insert_chamfer,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("m3_insert", self.m3_insert),
            ("m35_insert", self.m35_insert),
            ("m3_tap", self.m3_tap),
            ("m35_tap", self.m35_tap),
            ("m3_insert_chamfer", self.m3_insert_chamfer),
            ("m35_insert_chamfer", self.m35_insert_chamfer),
            ("insert_chamfer_depth", self.insert_chamfer_depth),
            ("m3_clearance", self.m3_clearance),
            ("m3_head_dia", self.m3_head_dia),
            ("m3_head_height", self.m3_head_height),
        ];
        for (name, value) in dims {
            crate::params::positive(name, value)?;
        }
        if self.m3_insert_chamfer <= self.m3_insert {
            return Err(Error::invalid(
                "m3_insert_chamfer",
                self.m3_insert_chamfer,
                "must be wider than the M3 insert hole",
            ));
        }
        if self.m35_insert_chamfer <= self.m35_insert {
            return Err(Error::invalid(
                "m35_insert_chamfer",
                self.m35_insert_chamfer,
                "must be wider than the M3.5 insert hole",
            ));
        }
        if self.m3_head_dia <= self.m3_clearance {
            return Err(Error::invalid(
                "m3_head_dia",
                self.m3_head_dia,
                "screw head must be wider than its clearance hole",
            ));
        }
        Ok(())
    }
}

/// Which mounting locations get heat-set inserts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsertConfig {
    /// SSR mounting, 2× M3 on the base.
    pub ssr: bool,
    /// Terminal block, 4× M3 on the base.
    pub terminal: bool,
    /// Corner posts, 4× M3 holding the shell to the base.
    pub corners: bool,
    /// UK socket, 2× M3.5 under the roof.
    pub socket: bool,
    /// C14 inlet, 2× M3 in the back wall.
    pub c14: bool,
    /// PID clamp screw, 1× M3 in the front wall.
    pub pid_clamp: bool,
}

impl Default for InsertConfig {
    fn default() -> Self {
        Preset::Reference.config()
    }
}

/// Named combinations of [`InsertConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Inserts everywhere except the terminal block.
    #[default]
    Reference,
    AllInserts,
    AllScrews,
    /// Inserts only in the structural corner posts.
    Structural,
}

impl Preset {
    pub const fn config(self) -> InsertConfig {
        match self {
            Preset::Reference => InsertConfig {
                ssr: true,
                terminal: false,
                corners: true,
                socket: true,
                c14: true,
                pid_clamp: true,
            },
            Preset::AllInserts => InsertConfig {
                ssr: true,
                terminal: true,
                corners: true,
                socket: true,
                c14: true,
                pid_clamp: true,
            },
            Preset::AllScrews => InsertConfig {
                ssr: false,
                terminal: false,
                corners: false,
                socket: false,
                c14: false,
                pid_clamp: false,
            },
            Preset::Structural => InsertConfig {
                ssr: false,
                terminal: false,
                corners: true,
                socket: false,
                c14: false,
                pid_clamp: false,
            },
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" => Ok(Preset::Reference),
            "all-inserts" => Ok(Preset::AllInserts),
            "all-screws" => Ok(Preset::AllScrews),
            "structural" => Ok(Preset::Structural),
            other => Err(format!(
                "unknown preset `{other}` (expected reference, all-inserts, all-screws or structural)"
            )),
        }
    }
}

/// One group of identical threaded holes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastenerLocation {
    pub name: &'static str,
    pub count: u32,
    pub size: ThreadSize,
    pub mode: FastenerMode,
}

impl InsertConfig {
    pub fn locations(&self) -> Vec<FastenerLocation> {
        let loc = |name, count, size, insert| FastenerLocation {
            name,
            count,
            size,
            mode: FastenerMode::from_insert(insert),
        };
        vec![
            loc("SSR", 2, ThreadSize::M3, self.ssr),
            loc("Terminal", 4, ThreadSize::M3, self.terminal),
            loc("Corners", 4, ThreadSize::M3, self.corners),
            loc("Socket", 2, ThreadSize::M3_5, self.socket),
            loc("C14", 2, ThreadSize::M3, self.c14),
            loc("PID Clamp", 1, ThreadSize::M3, self.pid_clamp),
        ]
    }

    pub fn summary(&self) -> FastenerSummary {
        FastenerSummary {
            locations: self.locations(),
        }
    }
}

/// Report of which holes take inserts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastenerSummary {
    pub locations: Vec<FastenerLocation>,
}

impl FastenerSummary {
    pub fn total_holes(&self) -> u32 {
        self.locations.iter().map(|l| l.count).sum()
    }

    pub fn insert_count(&self) -> u32 {
        self.locations
            .iter()
            .filter(|l| l.mode.is_insert())
            .map(|l| l.count)
            .sum()
    }

    pub fn mode_line(&self) -> String {
        let inserts = self.insert_count();
        let total = self.total_holes();
        if inserts == 0 {
            "ALL DIRECT SCREW TAPPING".to_string()
        } else if inserts == total {
            "ALL HEAT SET INSERTS".to_string()
        } else {
            format!("HYBRID ({inserts}/{total} locations use inserts)")
        }
    }
}

impl fmt::Display for FastenerSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Fastener Configuration:")?;
        for loc in &self.locations {
            let label = format!("{} ({}x):", loc.name, loc.count);
            writeln!(f, "  {label:<17}{}", loc.mode)?;
        }
        write!(f, "Mode: {}", self.mode_line())
    }
}
