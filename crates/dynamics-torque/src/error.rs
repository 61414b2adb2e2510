//! Error types for max-torque sampling.

use std::fmt;

/// Errors reported by [`crate::sampler::max_torques`].
#[derive(Debug, Clone, PartialEq)]
pub enum TorqueError {
    /// A `q`/`v`/`a` argument had the wrong length.
    DimensionMismatch {
        expected: usize,
        got: usize,
        arg: &'static str,
    },
    /// An input contained a non-finite value.
    InvalidInput { reason: String },
}

impl fmt::Display for TorqueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TorqueError::DimensionMismatch { expected, got, arg } => {
                write!(f, "'{arg}' has length {got}, expected {expected}")
            }
            TorqueError::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
        }
    }
}

impl std::error::Error for TorqueError {}

impl From<dynamics_model::ModelError> for TorqueError {
    fn from(err: dynamics_model::ModelError) -> Self {
        match err {
            dynamics_model::ModelError::DimensionMismatch { expected, got, arg } => {
                TorqueError::DimensionMismatch { expected, got, arg }
            }
            dynamics_model::ModelError::InvalidInput { reason } => {
                TorqueError::InvalidInput { reason }
            }
            other => TorqueError::InvalidInput {
                reason: other.to_string(),
            },
        }
    }
}
