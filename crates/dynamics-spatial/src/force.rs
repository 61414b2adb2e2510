//! Defines spatial **force** and related operations.
//!
//! A spatial force is the dual of a spatial motion: it pairs a linear force
//! with a moment (torque) about the same reference point. It is a distinct
//! quantity from [`crate::motion::SpatialMotion`] because it transforms
//! under a change of frame by the *co-adjoint* rule rather than the adjoint
//! rule motion uses — the two only agree on rotation-only transforms, not on
//! transforms involving translation.

use nalgebra::Vector6;

use crate::{
    se3::{ActSE3, SE3},
    vector3d::Vector3D,
    vector6d::Vector6D,
};
use std::{
    fmt::Display,
    ops::{Add, AddAssign, Mul},
};

#[derive(Clone, Debug, PartialEq, Default)]
/// Spatial force vector, combining a linear force with a moment.
///
/// The first three elements represent the linear force, and the last three
/// represent the moment (torque) about the same point.
pub struct SpatialForce(pub(crate) Vector6<f64>);

impl SpatialForce {
    /// Creates a `SpatialForce` from linear force and moment components.
    #[must_use]
    pub fn from_parts(linear: Vector3D, angular: Vector3D) -> Self {
        let mut v = Vector6::zeros();
        v.fixed_rows_mut::<3>(0).copy_from(&linear.0);
        v.fixed_rows_mut::<3>(3).copy_from(&angular.0);
        Self(v)
    }

    /// Zero spatial force.
    #[must_use]
    pub fn zero() -> Self {
        Self(Vector6::zeros())
    }

    /// Extracts the linear force component.
    #[must_use]
    pub fn translation(&self) -> Vector3D {
        Vector3D(self.0.fixed_rows::<3>(0).into())
    }

    /// Extracts the moment (torque) component.
    #[must_use]
    pub fn rotation(&self) -> Vector3D {
        Vector3D(self.0.fixed_rows::<3>(3).into())
    }

    /// Returns the underlying 6D vector (linear force followed by moment).
    #[must_use]
    pub fn as_vector6d(&self) -> Vector6D {
        Vector6D::new(
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5],
        )
    }

    /// Returns the spatial force as a slice of 6 elements (linear followed by angular).
    pub fn as_slice(&self) -> &[f64; 6] {
        self.0
            .as_slice()
            .try_into()
            .expect("Vector6 should have exactly 6 elements")
    }

    /// Returns the raw 6-vector (linear force followed by moment), for
    /// interop with dense 6x6 spatial operators such as an articulated-body
    /// inertia.
    #[must_use]
    pub fn as_vector6(&self) -> Vector6<f64> {
        self.0
    }

    /// Builds a spatial force directly from a raw 6-vector (linear force followed by moment).
    #[must_use]
    pub fn from_vector6(v: Vector6<f64>) -> Self {
        Self(v)
    }
}

impl Add for SpatialForce {
    type Output = SpatialForce;

    fn add(self, rhs: Self) -> Self::Output {
        SpatialForce(self.0 + rhs.0)
    }
}

impl Add<&SpatialForce> for SpatialForce {
    type Output = SpatialForce;

    fn add(self, rhs: &Self) -> Self::Output {
        SpatialForce(self.0 + rhs.0)
    }
}

impl AddAssign for SpatialForce {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl AddAssign<&SpatialForce> for SpatialForce {
    fn add_assign(&mut self, rhs: &Self) {
        self.0 += rhs.0;
    }
}

impl Mul<f64> for SpatialForce {
    type Output = SpatialForce;

    fn mul(self, rhs: f64) -> Self::Output {
        SpatialForce(self.0 * rhs)
    }
}

impl Mul<f64> for &SpatialForce {
    type Output = SpatialForce;

    fn mul(self, rhs: f64) -> Self::Output {
        SpatialForce(self.0 * rhs)
    }
}

impl ActSE3 for SpatialForce {
    fn act(&self, se3: &SE3) -> Self {
        let linear = se3.rotation() * &self.translation();
        let angular = se3.rotation() * &self.rotation() + se3.translation().cross(&linear);
        SpatialForce::from_parts(linear, angular)
    }

    fn act_inv(&self, se3: &SE3) -> Self {
        let f_prime = self.translation();
        let n_prime = self.rotation();
        let cross_term = se3.translation().cross(&f_prime);
        let linear = se3.rotation().transpose() * &f_prime;
        let angular = se3.rotation().transpose() * &(n_prime - cross_term);
        SpatialForce::from_parts(linear, angular)
    }
}

impl Display for SpatialForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpatialForce(force: [{:.4}, {:.4}, {:.4}], moment: [{:.4}, {:.4}, {:.4}])",
            self.translation().0[0],
            self.translation().0[1],
            self.translation().0[2],
            self.rotation().0[0],
            self.rotation().0[1],
            self.rotation().0[2],
        )
    }
}
