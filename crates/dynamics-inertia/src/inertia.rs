//! Structures to represent the inertia of a rigid body.

use dynamics_spatial::{
    force::SpatialForce,
    motion::SpatialMotion,
    se3::{ActSE3, SE3},
    symmetric3::Symmetric3,
    vector3d::Vector3D,
};
use std::ops::{Add, Mul};

use crate::error::InertiaError;

/// A data structure that contains the information about the inertia of a rigid body (mass, center of mass, and inertia matrix).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inertia {
    /// The mass of the object.
    pub mass: f64,
    /// The center of mass of the object, expressed in the body's local frame.
    pub com: Vector3D,
    /// Rotational inertia matrix at the center of mass.
    pub inertia: Symmetric3,
}

impl Inertia {
    /// Creates a new `Inertia` object with the given parameters.
    ///
    /// # Arguments
    ///
    /// * `mass` - The mass of the object.
    /// * `com` - The center of mass of the object.
    /// * `inertia` - The rotational inertia matrix of the object at the center of mass.
    pub fn new(mass: f64, com: Vector3D, inertia: Symmetric3) -> Self {
        Self { mass, com, inertia }
    }

    /// Creates a new `Inertia` object with zero mass, zero center of mass, and zero inertia matrix.
    ///
    /// # Returns
    /// A new `Inertia` object with all properties set to zero.
    pub fn zeros() -> Self {
        Self {
            mass: 0.0,
            com: Vector3D::zeros(),
            inertia: Symmetric3::zeros(),
        }
    }

    /// Creates a new `Inertia` object representing an ellipsoid with the given mass and semi-axis lengths.
    ///
    /// # Arguments
    /// * `mass` - The mass of the ellipsoid.
    /// * `x` - The semi-axis length along the x-axis.
    /// * `y` - The semi-axis length along the y-axis.
    /// * `z` - The semi-axis length along the z-axis.
    ///
    /// # Returns
    /// A new `Inertia` object representing an ellipsoid.
    pub fn from_ellipsoid(mass: f64, x: f64, y: f64, z: f64) -> Result<Self, InertiaError> {
        if mass <= 0.0 {
            return Err(InertiaError::InvalidParameter("mass".to_string()));
        }
        if x <= 0.0 {
            return Err(InertiaError::InvalidParameter("x".to_string()));
        }
        if y <= 0.0 {
            return Err(InertiaError::InvalidParameter("y".to_string()));
        }
        if z <= 0.0 {
            return Err(InertiaError::InvalidParameter("z".to_string()));
        }

        let a = mass * (y.powi(2) + z.powi(2)) / 5.0;
        let b = mass * (x.powi(2) + z.powi(2)) / 5.0;
        let c = mass * (x.powi(2) + y.powi(2)) / 5.0;
        let inertia_matrix = Symmetric3::new(a, b, c, 0.0, 0.0, 0.0);
        Ok(Self::new(mass, Vector3D::zeros(), inertia_matrix))
    }

    /// Creates a new `Inertia` object representing a sphere with the given mass and radius.
    ///
    /// # Arguments
    ///
    /// * `mass` - The mass of the sphere.
    /// * `radius` - The radius of the sphere.
    ///
    /// # Returns
    /// A new `Inertia` object representing a sphere.
    pub fn from_sphere(mass: f64, radius: f64) -> Result<Self, InertiaError> {
        Inertia::from_ellipsoid(mass, radius, radius, radius)
    }

    /// Returns this inertia's 6x6 spatial-inertia matrix (linear rows/columns
    /// first, angular rows/columns last), the dense operator mapping a
    /// spatial velocity to the spatial momentum `h = I v`. The articulated
    /// body algorithm seeds its per-joint articulated inertia from this
    /// matrix before reducing and propagating it up the tree.
    #[must_use]
    pub fn as_matrix6(&self) -> nalgebra::Matrix6<f64> {
        use nalgebra::{Matrix3, Matrix6};
        let skew_c = dynamics_spatial::so3::SO3::from_vector3d(&self.com).matrix();
        let mut m = Matrix6::zeros();
        m.fixed_view_mut::<3, 3>(0, 0)
            .copy_from(&(Matrix3::identity() * self.mass));
        m.fixed_view_mut::<3, 3>(0, 3)
            .copy_from(&(-skew_c * self.mass));
        m.fixed_view_mut::<3, 3>(3, 0)
            .copy_from(&(skew_c * self.mass));
        m.fixed_view_mut::<3, 3>(3, 3)
            .copy_from(&(self.inertia.matrix() - self.mass * (skew_c * skew_c)));
        m
    }
}

impl Mul<&SpatialMotion> for &Inertia {
    type Output = SpatialForce;

    fn mul(self, rhs: &SpatialMotion) -> Self::Output {
        let linear = self.mass * (rhs.translation() - self.com.cross(&rhs.rotation()));
        let angular = &self.inertia * &rhs.rotation() + self.com.cross(&linear);
        SpatialForce::from_parts(linear, angular)
    }
}

impl ActSE3 for Inertia {
    /// Re-expresses this inertia, given in a body's local frame, in a
    /// different reference frame related by `se3` (the body's placement in
    /// that frame): the center of mass is carried to the new frame and the
    /// rotational tensor is conjugated by the rotation. Used by the
    /// composite-rigid-body algorithm to fold a child link's inertia into
    /// its parent's frame before accumulating it.
    fn act(&self, se3: &SE3) -> Self {
        let rotation = se3.rotation();
        let new_com = rotation * &self.com + se3.translation();
        let r = rotation.matrix();
        let rotated_tensor = r * self.inertia.matrix() * r.transpose();
        Inertia::new(self.mass, new_com, Symmetric3::from_matrix(&rotated_tensor))
    }

    fn act_inv(&self, se3: &SE3) -> Self {
        self.act(&se3.inverse())
    }
}

impl Add for Inertia {
    type Output = Inertia;

    /// Combines two rigid bodies' inertias, both expressed in the *same*
    /// reference frame, into the inertia of their rigid union: masses add,
    /// the combined center of mass is the mass-weighted average, and each
    /// tensor is shifted to the combined center of mass (parallel axis
    /// theorem) before summing.
    fn add(self, rhs: Self) -> Self::Output {
        let mass = self.mass + rhs.mass;
        let com = if mass > 0.0 {
            (&self.com * self.mass + &rhs.com * rhs.mass) * (1.0 / mass)
        } else {
            Vector3D::zeros()
        };

        let shift = |body: &Inertia| -> nalgebra::Matrix3<f64> {
            let d = body.com - com;
            let skew = dynamics_spatial::so3::SO3::from_vector3d(&d).matrix();
            body.inertia.matrix() - body.mass * (skew * skew)
        };

        let tensor = shift(&self) + shift(&rhs);
        Inertia::new(mass, com, Symmetric3::from_matrix(&tensor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn combining_with_zero_is_a_no_op() {
        let body = Inertia::from_sphere(2.0, 0.5).unwrap();
        let combined = body.clone() + Inertia::zeros();
        assert_relative_eq!(combined.mass, body.mass);
        assert_relative_eq!(combined.com.0, body.com.0);
        assert_relative_eq!(combined.inertia.matrix(), body.inertia.matrix());
    }

    #[test]
    fn combining_two_point_masses_gives_the_midpoint_com() {
        let a = Inertia::new(1.0, Vector3D::new(-1.0, 0.0, 0.0), Symmetric3::zeros());
        let b = Inertia::new(1.0, Vector3D::new(1.0, 0.0, 0.0), Symmetric3::zeros());
        let combined = a + b;
        assert_relative_eq!(combined.mass, 2.0);
        assert_relative_eq!(combined.com.0, Vector3D::zeros().0);
    }

    #[test]
    fn act_preserves_mass_and_conjugates_the_tensor_by_rotation() {
        let body = Inertia::from_ellipsoid(3.0, 1.0, 2.0, 0.5).unwrap();
        let se3 = SE3::new(Vector3D::new(1.0, 0.0, 0.0), Vector3D::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
        let transformed = body.act(&se3);
        assert_relative_eq!(transformed.mass, body.mass);
        let back = transformed.act_inv(&se3);
        assert_relative_eq!(back.com.0, body.com.0, epsilon = 1e-10);
        assert_relative_eq!(back.inertia.matrix(), body.inertia.matrix(), epsilon = 1e-10);
    }

    #[test]
    fn as_matrix6_agrees_with_the_momentum_product() {
        let body = Inertia::new(2.0, Vector3D::new(0.3, -0.1, 0.2), Symmetric3::new(1.0, 2.0, 3.0, 0.1, 0.2, 0.3));
        let v = SpatialMotion::from_parts(Vector3D::new(0.4, 0.1, -0.2), Vector3D::new(0.5, -0.3, 0.2));
        let h = &body * &v;
        let h_matrix = body.as_matrix6() * v.as_vector6();
        assert_relative_eq!(h.as_slice().as_slice(), h_matrix.as_slice(), epsilon = 1e-10);
    }
}
