//! Errors for [`crate::solver::solve_ik`].
//!
//! Per the kernel's error-handling convention, only genuine API misuse is
//! surfaced as an error here; numerical failure during the iteration itself
//! (a singular damped Jacobian, a non-finite step) downgrades the returned
//! [`crate::solver::IkResult::converged`] to `false` rather than erroring.

use std::fmt::Display;

use dynamics_model::ModelError;

/// Errors returned by [`crate::solver::solve_ik`] before any iteration runs.
#[derive(Debug, Clone, PartialEq)]
pub enum IkError {
    /// `q0` (or, internally, a target) had the wrong length.
    DimensionMismatch {
        expected: usize,
        got: usize,
        arg: &'static str,
    },
    /// `options.ee_joint` is out of range for the model.
    InvalidJoint { index: usize },
    /// `target` contains a non-finite component.
    InvalidInput { reason: String },
}

impl Display for IkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IkError::DimensionMismatch { expected, got, arg } => {
                write!(f, "argument '{arg}' has length {got}, expected {expected}")
            }
            IkError::InvalidJoint { index } => write!(f, "joint index {index} is out of range"),
            IkError::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
        }
    }
}

impl std::error::Error for IkError {}

impl From<ModelError> for IkError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::DimensionMismatch { expected, got, arg } => {
                IkError::DimensionMismatch { expected, got, arg }
            }
            ModelError::InvalidJoint { index } => IkError::InvalidJoint { index },
            ModelError::InvalidInput { reason } => IkError::InvalidInput { reason },
            other => IkError::InvalidInput {
                reason: other.to_string(),
            },
        }
    }
}
