//! Flat re-export of the types and functions most callers need, so a host
//! can `use dynamics_rs::prelude::*;` instead of reaching into each
//! sub-crate module.

// Linear algebra
pub use crate::linalg::Ldlt;

// Model
pub use crate::model::data::Data;
pub use crate::model::model::{neutral, random_configuration, Model, WORLD_ID};

// Parse
pub use crate::parse::urdf::parse_urdf;

// Kinematics/dynamics kernel
pub use crate::model::center_of_mass::center_of_mass;
pub use crate::model::crba::crba;
pub use crate::model::energy::{kinetic_energy, potential_energy};
pub use crate::model::forward_dynamics::aba;
pub use crate::model::forward_kinematics::{forward_kinematics, forward_kinematics_velocity};
pub use crate::model::inverse_dynamics::rnea;
pub use crate::model::integrate::integrate;
pub use crate::model::jacobian::{compute_joint_jacobian, JacobianFrame};

// Inverse kinematics
pub use crate::ik::{solve_ik, IkOptions, IkResult};

// Workspace sampling
pub use crate::workspace::{
    convex_hull, fibonacci_sphere, sample_workspace, BoundingBox, HullMesh, WorkspaceOptions,
    WorkspaceResult,
};

// Max-torque sampling
pub use crate::torque::{max_torques, MaxTorqueOptions, MaxTorqueResult};

// Configurations
pub use crate::spatial::configuration::Configuration;

// Spatial
pub use crate::spatial::force::SpatialForce;
pub use crate::spatial::motion::SpatialMotion;
pub use crate::spatial::se3::SE3;
pub use crate::spatial::vector3d::Vector3D;
