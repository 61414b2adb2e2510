//! Continuous joint, constraining two objects to rotate about a given axis, without limits.
//!
//! This can be seen as a revolute joint without limits. On top of that, the
//! parametrization of the configuration is different: instead of using an
//! angle `theta`, continuous joints use the unit-circle parametrization
//! `(cos(theta), sin(theta))`, so `nq=2` while `nv=1`.

use dynamics_spatial::{
    configuration::Configuration,
    force::SpatialForce,
    motion::{SpatialMotion, SpatialRotation},
    se3::SE3,
    vector3d::Vector3D,
};
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::{
    joint::{JointModel, JointType, JointWrapper},
    joint_data::{JointData, JointDataWrapper, JointError},
    limits::JointLimits,
};

/// Model of a continuous joint.
///
/// This joint constrains two objects to rotate about a given axis, with no
/// position limits.
#[derive(Clone, Debug)]
pub struct JointModelContinuous {
    /// The axis of rotation, expressed in the local frame of the joint.
    pub axis: Vector3D,
    /// The joint limits (velocity/effort only; the configuration is
    /// unbounded by construction).
    pub limits: JointLimits,
}

impl JointModelContinuous {
    /// Creates a new `JointModelContinuous` with the given axis of rotation.
    #[must_use]
    pub fn new(axis: Vector3D) -> Self {
        JointModelContinuous {
            axis,
            limits: JointLimits::new_unbounded(1),
        }
    }

    /// Creates a new continuous joint model with `x` as axis of rotation.
    #[must_use]
    pub fn new_rux() -> Self {
        Self::new(Vector3D::x())
    }

    /// Creates a new continuous joint model with `y` as axis of rotation.
    #[must_use]
    pub fn new_ruy() -> Self {
        Self::new(Vector3D::y())
    }

    /// Creates a new continuous joint model with `z` as axis of rotation.
    #[must_use]
    pub fn new_ruz() -> Self {
        Self::new(Vector3D::z())
    }
}

impl JointModel for JointModelContinuous {
    fn get_joint_type(&self) -> JointType {
        JointType::Continuous
    }

    fn nq(&self) -> usize {
        2
    }

    fn nv(&self) -> usize {
        1
    }

    fn neutral(&self) -> Configuration {
        Configuration::from_row_slice(&[1.0, 0.0])
    }

    fn create_joint_data(&self) -> JointDataWrapper {
        JointDataWrapper::continuous(JointDataContinuous::new(self))
    }

    fn get_axis(&self) -> Vec<SpatialMotion> {
        vec![SpatialMotion::from_rotational_axis(&self.axis)]
    }

    fn random_configuration(&self, rng: &mut ThreadRng) -> Configuration {
        let angle: f64 = rng.random_range(0.0..(2.0 * std::f64::consts::PI));
        Configuration::from_row_slice(&[angle.cos(), angle.sin()])
    }

    fn subspace(&self, v: &Configuration) -> SpatialMotion {
        SpatialMotion::from_rotational_axis(&self.axis) * v[0]
    }

    fn subspace_dual(&self, f: &SpatialForce) -> Configuration {
        Configuration::from_row_slice(&[f.rotation().dot(&self.axis)])
    }

    fn bias(&self) -> SpatialMotion {
        SpatialMotion::zero()
    }

    fn transform(&self, q: &Configuration) -> SE3 {
        let angle = q[1].atan2(q[0]);
        SE3::from_parts(
            Vector3D::zeros(),
            SpatialRotation::from_axis_angle(&self.axis, angle),
        )
    }

    fn limits(&self) -> JointLimits {
        self.limits.clone()
    }

    fn integrate(&self, q: &Configuration, v: &Configuration) -> Configuration {
        // Rotate (cos, sin) by the angle v[0] using the angle-addition
        // formulas; stays on the unit circle without a separate renormalize.
        let (cos, sin) = (q[0], q[1]);
        let (dcos, dsin) = (v[0].cos(), v[0].sin());
        Configuration::from_row_slice(&[cos * dcos - sin * dsin, sin * dcos + cos * dsin])
    }
}

/// Data associated to a continuous joint.
#[derive(Clone, Debug)]
pub struct JointDataContinuous {
    /// The joint configuration vector (cos, sin of the angle).
    pub joint_q: Configuration,
    /// The joint velocity vector (a single angular velocity).
    pub joint_v: Configuration,
    /// The placement of the joint in the local frame.
    pub placement: SE3,
    /// The velocity of the joint, as a spatial motion.
    pub joint_velocity: SpatialMotion,
}

impl JointDataContinuous {
    /// Creates a new `JointDataContinuous` associated to the given joint model.
    #[must_use]
    pub fn new(_model: &JointModelContinuous) -> Self {
        JointDataContinuous {
            joint_q: Configuration::from_row_slice(&[1.0, 0.0]),
            joint_v: Configuration::zeros(1),
            placement: SE3::identity(),
            joint_velocity: SpatialMotion::zero(),
        }
    }

    /// Returns the cosine of the joint angle.
    #[must_use]
    pub fn cos(&self) -> f64 {
        self.joint_q[0]
    }

    /// Returns the sine of the joint angle.
    #[must_use]
    pub fn sin(&self) -> f64 {
        self.joint_q[1]
    }
}

impl JointData for JointDataContinuous {
    fn get_joint_q(&self) -> &Configuration {
        &self.joint_q
    }

    fn get_joint_v(&self) -> &Configuration {
        &self.joint_v
    }

    fn get_joint_placement(&self) -> SE3 {
        self.placement
    }

    fn update(
        &mut self,
        joint_model: &JointWrapper,
        joint_q: &Configuration,
        joint_v: Option<&Configuration>,
    ) -> Result<(), JointError> {
        if joint_q.len() != 2 {
            return Err(JointError::DimensionMismatch {
                name: "joint_q",
                expected: 2,
                got: joint_q.len(),
            });
        }
        if let Some(joint_v) = joint_v {
            if joint_v.len() != 1 {
                return Err(JointError::DimensionMismatch {
                    name: "joint_v",
                    expected: 1,
                    got: joint_v.len(),
                });
            }
            self.joint_v = joint_v.clone();
            self.joint_velocity = joint_model.subspace(joint_v);
        }

        // Renormalize to the unit circle: callers may pass an unnormalized
        // (cos, sin) pair (e.g. an IK step's raw angle update).
        let norm = (joint_q[0] * joint_q[0] + joint_q[1] * joint_q[1]).sqrt();
        let (cos, sin) = if norm > 0.0 {
            (joint_q[0] / norm, joint_q[1] / norm)
        } else {
            (1.0, 0.0)
        };
        self.joint_q = Configuration::from_row_slice(&[cos, sin]);
        self.placement = joint_model.transform(&self.joint_q);
        Ok(())
    }

    fn get_joint_velocity(&self) -> &SpatialMotion {
        &self.joint_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn continuous_joint_has_two_q_and_one_v() {
        let joint = JointModelContinuous::new_ruz();
        assert_eq!(joint.nq(), 2);
        assert_eq!(joint.nv(), 1);
    }

    #[test]
    fn neutral_configuration_is_angle_zero() {
        let joint = JointModelContinuous::new_ruz();
        let se3 = joint.transform(&joint.neutral());
        assert_relative_eq!(se3.rotation().angle(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn update_renormalizes_a_non_unit_configuration() {
        let joint = JointModelContinuous::new_ruz();
        let wrapper = JointWrapper::continuous(joint.clone());
        let mut data = JointDataContinuous::new(&joint);
        let q = Configuration::from_row_slice(&[2.0, 0.0]);
        data.update(&wrapper, &q, None).unwrap();
        assert_relative_eq!(data.cos(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(data.sin(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn integrate_advances_the_angle_and_stays_on_the_unit_circle() {
        let joint = JointModelContinuous::new_ruz();
        let q = joint.neutral();
        let v = Configuration::from_row_slice(&[std::f64::consts::FRAC_PI_2]);
        let q1 = joint.integrate(&q, &v);
        assert_relative_eq!(q1[0] * q1[0] + q1[1] * q1[1], 1.0, epsilon = 1e-12);
        let se3 = joint.transform(&q1);
        assert_relative_eq!(se3.rotation().angle(), std::f64::consts::FRAC_PI_2, epsilon = 1e-10);
    }

    #[test]
    fn quarter_turn_has_the_requested_angle() {
        let joint = JointModelContinuous::new_ruz();
        let q = Configuration::from_row_slice(&[0.0, 1.0]);
        let se3 = joint.transform(&q);
        assert_relative_eq!(
            se3.rotation().angle(),
            std::f64::consts::FRAC_PI_2,
            epsilon = 1e-10
        );
    }
}
