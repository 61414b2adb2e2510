//! Spatial vector algebra: SE(3) transforms and the spatial motion/force
//! duals used throughout the rigid-body dynamics algorithms.

pub mod configuration;
pub mod force;
pub mod jacobian;
pub mod motion;
pub mod se3;
pub mod so3;
pub mod symmetric3;
pub mod vector3d;
pub mod vector6d;

pub use configuration::Configuration;
pub use force::SpatialForce;
pub use jacobian::Jacobian;
pub use motion::{SpatialMotion, SpatialRotation};
pub use se3::{ActSE3, SE3};
pub use vector3d::Vector3D;
