//! Max-torque sampling: corner, stratified-random and fixed-pattern sweeps
//! of RNEA to bound each joint's worst-case torque.

pub mod error;
pub mod sampler;

pub use error::TorqueError;
pub use sampler::{max_torques, MaxTorqueOptions, MaxTorqueResult};
