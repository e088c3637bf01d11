//! Error types

use crate::float_types::Real;
use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a parameter table and a file on disk.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dimension or count in a parameter table is unusable.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: Real,
        reason: &'static str,
    },

    /// Two parameters conflict with each other.
    #[error("inconsistent parameters: {0}")]
    Inconsistent(String),

    /// A shape operation produced (or was handed) something with no volume.
    #[error("degenerate shape in `{part}` at step `{feature}`")]
    DegenerateShape {
        part: String,
        feature: String,
    },

    /// Failed to create or write an output file.
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a configuration file.
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Other I/O errors (STL encoding into memory, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration JSON.
    #[error("configuration error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidParameter`].
    pub const fn invalid(name: &'static str, value: Real, reason: &'static str) -> Self {
        Error::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
