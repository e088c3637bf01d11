//! Mesh file formats.
//!
//! Only STL is supported. The kernel is polygon based with no B-rep, so there
//! is nothing to write a STEP file from.

pub mod stl;

pub use stl::{StlFormat, write_stl};
