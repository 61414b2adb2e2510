//! Position-only damped least-squares (DLS) inverse kinematics.
//!
//! This crate is part of the `dynamics` ecosystem and is not intended for
//! direct use outside it; see the `dynamics-rs` facade crate instead.

pub mod error;
pub mod solver;

pub use error::IkError;
pub use solver::{solve_ik, IkOptions, IkResult};
