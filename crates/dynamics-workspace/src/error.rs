//! Error types for workspace reachability sampling.

use std::fmt;

/// Errors reported by [`crate::sampler::sample_workspace`].
///
/// Per-ray failures inside the sampling loop (a non-converging IK probe, an
/// unreachable origin) are not errors: they simply shrink the returned point
/// cloud. Only misuse of the call itself — a malformed `q0`, an
/// out-of-range end-effector joint, zero requested rays — is reported here.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkspaceError {
    /// A configuration-shaped argument had the wrong length.
    DimensionMismatch {
        expected: usize,
        got: usize,
        arg: &'static str,
    },
    /// A joint index was out of range for the model.
    InvalidJoint { index: usize },
    /// `options.num_rays` was zero, or another option was out of its valid
    /// range.
    InvalidOptions { reason: String },
}

impl fmt::Display for WorkspaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkspaceError::DimensionMismatch { expected, got, arg } => {
                write!(f, "'{arg}' has length {got}, expected {expected}")
            }
            WorkspaceError::InvalidJoint { index } => {
                write!(f, "joint index {index} is out of range")
            }
            WorkspaceError::InvalidOptions { reason } => {
                write!(f, "invalid workspace options: {reason}")
            }
        }
    }
}

impl std::error::Error for WorkspaceError {}

impl From<dynamics_model::ModelError> for WorkspaceError {
    fn from(err: dynamics_model::ModelError) -> Self {
        match err {
            dynamics_model::ModelError::DimensionMismatch { expected, got, arg } => {
                WorkspaceError::DimensionMismatch { expected, got, arg }
            }
            dynamics_model::ModelError::InvalidJoint { index } => {
                WorkspaceError::InvalidJoint { index }
            }
            other => WorkspaceError::InvalidOptions {
                reason: other.to_string(),
            },
        }
    }
}

impl From<dynamics_ik::IkError> for WorkspaceError {
    fn from(err: dynamics_ik::IkError) -> Self {
        match err {
            dynamics_ik::IkError::DimensionMismatch { expected, got, arg } => {
                WorkspaceError::DimensionMismatch { expected, got, arg }
            }
            dynamics_ik::IkError::InvalidJoint { index } => {
                WorkspaceError::InvalidJoint { index }
            }
            dynamics_ik::IkError::InvalidInput { reason } => {
                WorkspaceError::InvalidOptions { reason }
            }
        }
    }
}
