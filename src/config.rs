//! Top-level configuration: which variant to build, its parameter tables and
//! where the output goes. Stored as JSON.

use crate::errors::{Error, Result};
use crate::io::StlFormat;
use crate::params::{InvertedParams, TabletopParams};
use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Below this many segments per circle, holes print visibly faceted.
const COARSE_SEGMENTS: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub format: StlFormat,
    /// Facets per full circle for holes, bosses and fillets.
    pub circle_segments: usize,
    /// Also write an assembly with component envelopes for inspection.
    pub preview: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: PathBuf::from("."),
            format: StlFormat::Binary,
            circle_segments: 48,
            preview: false,
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<()> {
        if self.circle_segments < 3 {
            return Err(Error::invalid(
                "circle_segments",
                self.circle_segments as f64,
                "a circle needs at least three segments",
            ));
        }
        if self.circle_segments < COARSE_SEGMENTS {
            log::warn!(
                "circle_segments = {}; round features will be coarse",
                self.circle_segments
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnclosureConfig {
    pub variant: Variant,
    pub inverted: InvertedParams,
    pub tabletop: TabletopParams,
    pub output: OutputConfig,
}

impl EnclosureConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a JSON configuration file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Check the output settings and the selected variant's parameters.
    pub fn validate(&self) -> Result<()> {
        self.output.validate()?;
        match self.variant {
            Variant::Inverted => self.inverted.validate(),
            Variant::Tabletop => self.tabletop.validate(),
        }
    }
}
