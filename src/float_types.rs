//! Scalar type and numeric constants. All lengths are millimetres.

pub type Real = f64;

/// Tolerance used by plane classification and degenerate-shape checks.
///
/// The largest part spans roughly 200 mm, so this sits well below printer
/// resolution while staying clear of f64 noise accumulated through repeated
/// BSP splits.
pub const EPSILON: Real = 1e-5;

/// Archimedes' constant (π)
pub const PI: Real = core::f64::consts::PI;

/// π/2
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

/// The full circle constant (τ)
pub const TAU: Real = core::f64::consts::TAU;
