//! Parametric generator for a 3D-printable **PID temperature-controller enclosure**.
//!
//! The enclosure houses a 1/16 DIN PID controller, a solid-state relay on its
//! heatsink, a terminal block, an IEC C14 inlet and (in the inverted design) a
//! UK mains socket. Each design is a [`Variant`]: a parameter table is turned
//! into a [`layout`], the layout into parts built by sequential Boolean
//! operations on [BSP](mesh::bsp) trees, and the parts into STL files.
//!
//! ```no_run
//! use pidcase::{EnclosureConfig, Variant};
//!
//! let mut config = EnclosureConfig::default();
//! config.variant = Variant::Tabletop;
//! let report = pidcase::export::build_and_export(&config)?;
//! println!("{report}");
//! # Ok::<(), pidcase::errors::Error>(())
//! ```
//!
//! # Features
//! - **parallel**: build the parts of a variant concurrently with rayon

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod errors;
pub mod float_types;
pub mod traits;

pub mod locations;
pub mod mesh;
pub mod sketch;
pub mod triangulated;

pub mod io;

pub mod config;
pub mod export;
pub mod fasteners;
pub mod layout;
pub mod params;
pub mod part;
pub mod parts;
pub mod variant;

pub use config::{EnclosureConfig, OutputConfig};
pub use mesh::Mesh;
pub use sketch::Sketch;
pub use traits::CSGOps;
pub use variant::Variant;
