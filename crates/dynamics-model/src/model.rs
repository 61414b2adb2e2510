//! [`Model`]: the immutable kinematic/inertial description of a robot.

use std::sync::LazyLock;

use dynamics_inertia::Inertia;
use dynamics_joint::{
    continuous::JointModelContinuous,
    fixed::JointModelFixed,
    joint::{JointModel, JointType, JointWrapper},
    limits::JointLimits,
    prismatic::JointModelPrismatic,
    revolute::JointModelRevolute,
};
use dynamics_spatial::{configuration::Configuration, se3::SE3, vector3d::Vector3D};

use crate::error::ModelError;

/// Index of the universe (fixed root) joint. It is always present, has no
/// parent, and contributes zero degrees of freedom.
pub const WORLD_ID: usize = 0;

/// Standard gravity vector, `(0, 0, -9.81)`.
pub static STANDARD_GRAVITY: LazyLock<Vector3D> = LazyLock::new(|| Vector3D::new(0.0, 0.0, -9.81));

/// The immutable kinematic and inertial description of a robot.
///
/// A `Model` is built incrementally with [`Model::add_joint`] and
/// [`Model::append_body`], then frozen with [`Model::finalize`]. Once
/// finalized it is read-only and safe to share by reference across threads;
/// per-query scratch state lives in a separate [`crate::data::Data`].
#[derive(Clone)]
pub struct Model {
    /// Name of the model.
    pub name: String,
    /// Names of the joints (index 0 is the universe, `"__WORLD__"`).
    pub joint_names: Vec<String>,
    /// Parent joint index of each joint; `parents[j] < j` for all `j > 0`.
    pub parents: Vec<usize>,
    /// Placement of each joint's frame relative to its parent joint's frame
    /// (the constant part of the joint's placement, independent of `q`).
    pub placements: Vec<SE3>,
    /// Joint models, tagged by type and dispatched via [`JointWrapper`].
    pub joints: Vec<JointWrapper>,
    /// Spatial inertia of the body rigidly attached at each joint.
    pub inertias: Vec<Inertia>,
    /// Configuration-vector offset of each joint.
    pub idx_q: Vec<usize>,
    /// Velocity-vector offset of each joint.
    pub idx_v: Vec<usize>,
    /// Total length of the configuration vector.
    pub nq: usize,
    /// Total length of the velocity vector.
    pub nv: usize,
    /// Per-velocity-index lower joint limits (unlimited ⇒ `-inf`).
    pub lower: Vec<f64>,
    /// Per-velocity-index upper joint limits (unlimited ⇒ `+inf`).
    pub upper: Vec<f64>,
    /// Gravity, expressed in the world frame.
    pub gravity: Vector3D,
    finalized: bool,
}

impl Model {
    /// Creates a new, empty model containing only the universe joint.
    #[must_use]
    pub fn empty() -> Self {
        Model {
            name: String::new(),
            joint_names: vec!["__WORLD__".to_string()],
            parents: vec![WORLD_ID],
            placements: vec![SE3::identity()],
            joints: vec![JointWrapper::fixed(JointModelFixed::new())],
            inertias: vec![Inertia::zeros()],
            idx_q: vec![0],
            idx_v: vec![0],
            nq: 0,
            nv: 0,
            lower: Vec::new(),
            upper: Vec::new(),
            gravity: *STANDARD_GRAVITY,
            finalized: false,
        }
    }

    /// Creates a new, empty model with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let mut model = Self::empty();
        model.name = name.into();
        model
    }

    /// Adds a joint to the model.
    ///
    /// # Arguments
    /// * `parent` — index of the parent joint (`0` for a joint attached directly to the universe).
    /// * `joint_type` — the joint's kinematic type.
    /// * `axis` — the joint's motion axis, in its own local frame (ignored for `Fixed`).
    /// * `placement` — the constant placement of the joint's frame relative to its parent.
    /// * `limits` — the joint's velocity-space limits; ignored (zero-length) for `Fixed`.
    /// * `name` — a unique name for the joint.
    ///
    /// # Errors
    /// [`ModelError::ParentJointDoesNotExist`] if `parent` is out of range,
    /// [`ModelError::DegenerateAxis`] if `axis` has norm below `1e-10` for a
    /// non-fixed joint type.
    pub fn add_joint(
        &mut self,
        parent: usize,
        joint_type: JointType,
        axis: Vector3D,
        placement: SE3,
        limits: JointLimits,
        name: impl Into<String>,
    ) -> Result<usize, ModelError> {
        if parent >= self.joints.len() {
            return Err(ModelError::ParentJointDoesNotExist(parent));
        }

        let joint = match joint_type {
            JointType::Fixed => JointWrapper::fixed(JointModelFixed::new()),
            JointType::Revolute | JointType::Continuous | JointType::Prismatic => {
                if axis.norm() < 1e-10 {
                    return Err(ModelError::DegenerateAxis);
                }
                let unit_axis = axis.normalize().ok_or(ModelError::DegenerateAxis)?;
                match joint_type {
                    JointType::Revolute => {
                        JointWrapper::revolute(JointModelRevolute::new(unit_axis, limits))
                    }
                    JointType::Continuous => {
                        JointWrapper::continuous(JointModelContinuous::new(unit_axis))
                    }
                    JointType::Prismatic => {
                        JointWrapper::prismatic(JointModelPrismatic::new(unit_axis, limits))
                    }
                    JointType::Fixed => unreachable!(),
                }
            }
        };

        let id = self.joints.len();
        self.idx_q.push(self.nq);
        self.idx_v.push(self.nv);
        self.nq += joint.nq();
        self.nv += joint.nv();

        self.joint_names.push(name.into());
        self.parents.push(parent);
        self.placements.push(placement);
        self.joints.push(joint);
        self.inertias.push(Inertia::zeros());

        Ok(id)
    }

    /// Folds a body's spatial inertia into the joint it is rigidly attached to.
    ///
    /// `inertia` is expressed in a frame placed at `child_placement` relative
    /// to the joint's own frame (as in URDF, where `<inertial><origin>` need
    /// not coincide with the joint origin). Multiple calls for the same
    /// joint accumulate (rigid union of the bodies welded there).
    ///
    /// # Errors
    /// [`ModelError::InvalidJoint`] if `joint` is out of range.
    pub fn append_body(
        &mut self,
        joint: usize,
        inertia: Inertia,
        child_placement: SE3,
    ) -> Result<(), ModelError> {
        if joint >= self.joints.len() {
            return Err(ModelError::InvalidJoint { index: joint });
        }
        self.inertias[joint] = self.inertias[joint].clone() + child_placement.act(&inertia);
        Ok(())
    }

    /// Validates the topology and freezes the model.
    ///
    /// Checks: joints are in topological order (`parents[j] < j`), every
    /// `idx_q[j] + nq_j <= nq`. Assembles the per-velocity-index `lower`/
    /// `upper` limit arrays from each joint's own limits.
    ///
    /// # Errors
    /// [`ModelError::ParentJointDoesNotExist`] should a stored parent index
    /// ever be out of order (defensive; `add_joint` already prevents this).
    pub fn finalize(mut self) -> Result<Self, ModelError> {
        for j in 1..self.joints.len() {
            if self.parents[j] >= j {
                return Err(ModelError::ParentJointDoesNotExist(self.parents[j]));
            }
            if self.idx_q[j] + self.joints[j].nq() > self.nq {
                return Err(ModelError::DimensionMismatch {
                    expected: self.nq,
                    got: self.idx_q[j] + self.joints[j].nq(),
                    arg: "idx_q",
                });
            }
        }

        let mut lower = vec![0.0; self.nv];
        let mut upper = vec![0.0; self.nv];
        for j in 0..self.joints.len() {
            let nv_j = self.joints[j].nv();
            if nv_j == 0 {
                continue;
            }
            let limits = self.joints[j].limits();
            for k in 0..nv_j {
                lower[self.idx_v[j] + k] = limits.min_configuration[k];
                upper[self.idx_v[j] + k] = limits.max_configuration[k];
            }
        }
        self.lower = lower;
        self.upper = upper;
        self.finalized = true;
        Ok(self)
    }

    /// Whether [`Model::finalize`] has been called successfully.
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of joints, including the universe joint at index 0.
    #[must_use]
    pub fn njoints(&self) -> usize {
        self.joints.len()
    }

    /// Looks up a joint's index by name.
    #[must_use]
    pub fn get_joint_id(&self, name: &str) -> Option<usize> {
        self.joint_names.iter().position(|n| n == name)
    }
}

/// Returns the canonical (neutral) configuration of `model`: `0` for scalar
/// (revolute/prismatic) joints, `(1, 0)` for continuous joints, nothing for
/// fixed joints.
#[must_use]
pub fn neutral(model: &Model) -> Configuration {
    let mut q = Configuration::zeros(model.nq);
    for j in 0..model.joints.len() {
        let q_joint = model.joints[j].neutral();
        if q_joint.len() > 0 {
            q.update_rows(model.idx_q[j], &q_joint);
        }
    }
    q
}

/// Draws a configuration uniformly within the joint limits (unbounded
/// entries sampled from `[-1, 1]`), using the given random source.
#[must_use]
pub fn random_configuration(model: &Model, rng: &mut rand::rngs::ThreadRng) -> Configuration {
    let mut q = Configuration::zeros(model.nq);
    for j in 0..model.joints.len() {
        let q_joint = model.joints[j].random_configuration(rng);
        if q_joint.len() > 0 {
            q.update_rows(model.idx_q[j], &q_joint);
        }
    }
    q
}
