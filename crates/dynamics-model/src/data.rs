//! `Data`: mutable per-query scratch state for a [`crate::model::Model`].

use nalgebra::{DMatrix, Matrix6};

use dynamics_inertia::Inertia;
use dynamics_joint::joint_data::JointDataWrapper;
use dynamics_spatial::{
    configuration::Configuration, force::SpatialForce, jacobian::Jacobian, motion::SpatialMotion,
    se3::SE3, vector3d::Vector3D,
};

use crate::model::Model;

/// Mutable scratch state produced by a query over a [`Model`].
///
/// Every numerical routine in this crate takes `&Model, &mut Data` and
/// overwrites `Data`'s buffers in place; nothing here survives meaningfully
/// between unrelated calls. One `Data` belongs to exactly one worker/thread.
pub struct Data {
    /// Per-joint mutable state (own `q`/`v`/placement).
    pub joint_data: Vec<JointDataWrapper>,
    /// Placement of each joint in the world frame (`oMi`).
    pub oMi: Vec<SE3>,
    /// Placement of each joint relative to its parent (`liMi`).
    pub liMi: Vec<SE3>,
    /// Spatial velocity of each joint, in its own local frame.
    pub v: Vec<SpatialMotion>,
    /// Spatial (classical) acceleration of each joint, in its own local
    /// frame. The root entry is initialized to `-gravity` so that RNEA/ABA
    /// pick up gravity loading for free.
    pub a: Vec<SpatialMotion>,
    /// Spatial momentum of each joint (`h = I v`), in its own local frame.
    pub h: Vec<SpatialForce>,
    /// Spatial force of each joint, in its own local frame.
    pub f: Vec<SpatialForce>,
    /// Joint torques/forces produced by RNEA (length `nv`).
    pub tau: Configuration,
    /// Joint accelerations produced by ABA (length `nv`).
    pub ddq: Configuration,
    /// Joint-space mass matrix produced by CRBA (`nv x nv`, symmetric).
    pub mass_matrix: DMatrix<f64>,
    /// Composite rigid-body inertia of the subtree rooted at each joint,
    /// expressed in that joint's own frame. Scratch for CRBA.
    pub composite_inertia: Vec<Inertia>,
    /// Articulated-body inertia of each joint's subtree, expressed in that
    /// joint's own frame. Scratch for ABA.
    pub articulated_inertia: Vec<Matrix6<f64>>,
    /// Articulated bias force of each joint. Scratch for ABA.
    pub bias_force: Vec<SpatialForce>,
    /// Velocity-product acceleration `c_j = v_j x S_j qdot_j`. Scratch for ABA.
    pub bias_acceleration: Vec<SpatialMotion>,
    /// Per-joint `D = S^T U` scalar. Scratch for ABA.
    pub d_aba: Vec<f64>,
    /// Per-joint `U = Y^A S` spatial force. Scratch for ABA.
    pub u_aba: Vec<SpatialForce>,
    /// Per-joint apparent torque `u = tau - S^T p^A`. Scratch for ABA.
    pub apparent_torque: Vec<f64>,
    /// Jacobian matrix scratch, reused by [`crate::jacobian::compute_joint_jacobian`].
    pub jacobian: Jacobian,
}

impl Data {
    /// Preallocates all scratch buffers for `model`.
    #[must_use]
    pub fn from(model: &Model) -> Self {
        let njoints = model.njoints();
        let mut a = vec![SpatialMotion::zero(); njoints];
        a[0] = SpatialMotion::from_parts(-model.gravity, Vector3D::zeros());

        Data {
            joint_data: model.joints.iter().map(|j| j.create_joint_data()).collect(),
            oMi: vec![SE3::identity(); njoints],
            liMi: vec![SE3::identity(); njoints],
            v: vec![SpatialMotion::zero(); njoints],
            a,
            h: vec![SpatialForce::zero(); njoints],
            f: vec![SpatialForce::zero(); njoints],
            tau: Configuration::zeros(model.nv),
            ddq: Configuration::zeros(model.nv),
            mass_matrix: DMatrix::zeros(model.nv, model.nv),
            composite_inertia: model.inertias.clone(),
            articulated_inertia: vec![Matrix6::zeros(); njoints],
            bias_force: vec![SpatialForce::zero(); njoints],
            bias_acceleration: vec![SpatialMotion::zero(); njoints],
            d_aba: vec![0.0; njoints],
            u_aba: vec![SpatialForce::zero(); njoints],
            apparent_torque: vec![0.0; njoints],
            jacobian: Jacobian::zero(model.nv.max(1)),
        }
    }
}
