//! This crate is part of the `dynamics` ecosystem, and is not intended for direct use.
//!
//! This module provides structures and traits to represent joints in a robot model.

pub mod joint;
pub mod joint_data;
pub mod limits;

pub mod continuous;
pub mod fixed;
pub mod prismatic;
pub mod revolute;

pub use joint::{JointBias, JointModel, JointType, JointWrapper};
pub use joint_data::{JointData, JointDataWrapper, JointError};
pub use limits::JointLimits;
