//! Errors produced by the model builder and the kinematics/dynamics kernel.

use std::fmt::Display;

/// Errors that can occur while building a [`crate::model::Model`] or running
/// one of its numerical queries.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// `add_joint` was given a parent index that does not exist yet.
    ParentJointDoesNotExist(usize),
    /// `add_joint` was given an axis whose norm is below `1e-10`.
    DegenerateAxis,
    /// A configuration/velocity/acceleration/torque argument had the wrong length.
    DimensionMismatch {
        expected: usize,
        got: usize,
        arg: &'static str,
    },
    /// A joint index passed to a query was out of range.
    InvalidJoint { index: usize },
    /// An input contained a non-finite (`NaN`/`inf`) value where a finite
    /// one was required.
    InvalidInput { reason: String },
    /// ABA encountered an articulated inertia whose scalar `D` was at or
    /// below machine epsilon at the named joint; the caller may retry with
    /// a different configuration.
    SingularArticulatedInertia { joint: usize },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::ParentJointDoesNotExist(id) => {
                write!(f, "parent joint {id} does not exist")
            }
            ModelError::DegenerateAxis => {
                write!(f, "joint axis norm is below the 1e-10 validity threshold")
            }
            ModelError::DimensionMismatch { expected, got, arg } => write!(
                f,
                "argument '{arg}' has length {got}, expected {expected}"
            ),
            ModelError::InvalidJoint { index } => write!(f, "joint index {index} is out of range"),
            ModelError::InvalidInput { reason } => write!(f, "invalid input: {reason}"),
            ModelError::SingularArticulatedInertia { joint } => write!(
                f,
                "singular articulated inertia at joint {joint}"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

/// Checks that `got` matches `expected`, returning
/// [`ModelError::DimensionMismatch`] otherwise.
pub(crate) fn check_len(arg: &'static str, got: usize, expected: usize) -> Result<(), ModelError> {
    if got != expected {
        return Err(ModelError::DimensionMismatch { expected, got, arg });
    }
    Ok(())
}

/// Checks that every element of `values` is finite, returning
/// [`ModelError::InvalidInput`] otherwise.
pub(crate) fn check_finite(arg: &'static str, values: &[f64]) -> Result<(), ModelError> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::InvalidInput {
            reason: format!("'{arg}' contains a non-finite value"),
        });
    }
    Ok(())
}
