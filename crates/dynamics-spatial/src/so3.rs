//! Defines the skew-symmetric matrix representation of so(3).

use crate::vector3d::Vector3D;
use nalgebra::Matrix3;

/// The skew-symmetric cross-product matrix `[v]_x` of a 3D vector, such that
/// `[v]_x w == v.cross(w)` for any vector `w`.
pub struct SO3(pub(crate) Matrix3<f64>);

impl SO3 {
    /// Returns the identity rotation.
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    pub fn from_vector3d(vec: &Vector3D) -> Self {
        let v = vec.as_slice();
        Self(Matrix3::new(
            0.0, -v[2], v[1], v[2], 0.0, -v[0], -v[1], v[0], 0.0,
        ))
    }

    /// Returns the underlying skew-symmetric 3x3 matrix.
    pub fn matrix(&self) -> Matrix3<f64> {
        self.0
    }
}
