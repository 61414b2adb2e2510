//! Fixed joint, rigidly attaching two objects together with no degrees of freedom.

use dynamics_spatial::{configuration::Configuration, motion::SpatialMotion, se3::SE3};
use rand::rngs::ThreadRng;

use crate::{
    joint::{JointModel, JointType, JointWrapper},
    joint_data::{JointData, JointDataWrapper, JointError},
};

/// Model of a fixed joint.
///
/// A fixed joint has no degrees of freedom: it rigidly welds its child frame
/// to its parent frame.
#[derive(Clone, Debug, Default)]
pub struct JointModelFixed {}

impl JointModelFixed {
    /// Creates a new `JointModelFixed`.
    #[must_use]
    pub fn new() -> Self {
        JointModelFixed {}
    }
}

impl JointModel for JointModelFixed {
    fn get_joint_type(&self) -> JointType {
        JointType::Fixed
    }

    fn nq(&self) -> usize {
        0
    }

    fn nv(&self) -> usize {
        0
    }

    fn neutral(&self) -> Configuration {
        Configuration::zeros(0)
    }

    fn create_joint_data(&self) -> JointDataWrapper {
        JointDataWrapper::fixed(JointDataFixed::new(self))
    }

    fn get_axis(&self) -> Vec<SpatialMotion> {
        vec![]
    }

    fn random_configuration(&self, _rng: &mut ThreadRng) -> Configuration {
        Configuration::zeros(0)
    }

    fn subspace(&self, _v: &Configuration) -> SpatialMotion {
        SpatialMotion::zero()
    }

    fn subspace_dual(&self, _f: &dynamics_spatial::force::SpatialForce) -> Configuration {
        Configuration::zeros(0)
    }

    fn bias(&self) -> SpatialMotion {
        SpatialMotion::zero()
    }

    fn transform(&self, _q: &Configuration) -> SE3 {
        SE3::identity()
    }

    fn limits(&self) -> crate::limits::JointLimits {
        crate::limits::JointLimits::new_unbounded(0)
    }

    fn integrate(&self, _q: &Configuration, _v: &Configuration) -> Configuration {
        Configuration::zeros(0)
    }
}

/// Data associated to a fixed joint.
#[derive(Clone, Debug)]
pub struct JointDataFixed {
    /// The (empty) position configuration of the joint.
    pub joint_q: Configuration,
    /// The (empty) velocity configuration of the joint.
    pub joint_v: Configuration,
    /// The placement of the joint in the local frame.
    pub placement: SE3,
    /// The velocity of the joint, as a spatial motion.
    pub joint_velocity: SpatialMotion,
}

impl JointDataFixed {
    /// Creates a new `JointDataFixed` associated to the given joint model.
    #[must_use]
    pub fn new(_model: &JointModelFixed) -> Self {
        JointDataFixed {
            joint_q: Configuration::zeros(0),
            joint_v: Configuration::zeros(0),
            placement: SE3::identity(),
            joint_velocity: SpatialMotion::zero(),
        }
    }
}

impl JointData for JointDataFixed {
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
        _joint_model: &JointWrapper,
        _joint_q: &Configuration,
        _joint_v: Option<&Configuration>,
    ) -> Result<(), JointError> {
        Ok(())
    }

    fn get_joint_velocity(&self) -> &SpatialMotion {
        &self.joint_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_joint_has_no_degrees_of_freedom() {
        let joint = JointModelFixed::new();
        assert_eq!(joint.nq(), 0);
        assert_eq!(joint.nv(), 0);
        assert!(joint.get_axis().is_empty());
    }

    #[test]
    fn fixed_joint_transform_is_always_identity() {
        let joint = JointModelFixed::new();
        let identity = joint.transform(&Configuration::zeros(0));
        assert_eq!(identity, SE3::identity());
    }
}
