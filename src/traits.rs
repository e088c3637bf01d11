use crate::float_types::Real;
use nalgebra::{Matrix4, Rotation3, Translation3, Vector3};
use parry3d_f64::bounding_volume::Aabb;

/// Boolean operations + transformations shared by solids and sketches.
pub trait CSGOps: Sized + Clone {
    fn new() -> Self;
    fn union(&self, other: &Self) -> Self;
    fn difference(&self, other: &Self) -> Self;
    fn intersection(&self, other: &Self) -> Self;
    fn transform(&self, matrix: &Matrix4<Real>) -> Self;
    fn bounding_box(&self) -> Aabb;

    /// Returns a new Self translated by vector.
    fn translate_vector(&self, vector: Vector3<Real>) -> Self {
        self.transform(&Translation3::from(vector).to_homogeneous())
    }

    /// Returns a new Self translated by x, y, and z.
    fn translate(&self, x: Real, y: Real, z: Real) -> Self {
        self.translate_vector(Vector3::new(x, y, z))
    }

    /// Returns a new Self scaled by sx, sy, sz about the origin.
    fn scale(&self, sx: Real, sy: Real, sz: Real) -> Self {
        self.transform(&Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)))
    }

    /// Rotates by x_deg, y_deg, z_deg, applied about X first, then Y, then Z.
    fn rotate(&self, x_deg: Real, y_deg: Real, z_deg: Real) -> Self {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), x_deg.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), y_deg.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), z_deg.to_radians());
        let rot = rz * ry * rx;
        self.transform(&rot.to_homogeneous())
    }

    /// Union of every item, left to right. Empty input gives an empty shape.
    fn union_all<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a,
    {
        items
            .into_iter()
            .fold(None, |acc: Option<Self>, item| match acc {
                None => Some(item.clone()),
                Some(acc) => Some(acc.union(item)),
            })
            .unwrap_or_else(Self::new)
    }
}
