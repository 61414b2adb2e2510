//! Errors for the linear algebra primitives.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
/// Errors that can occur during a linear algebra computation.
pub enum LinalgError {
    /// The matrix is singular (a zero pivot was found) and cannot be
    /// inverted or factorized.
    Singular,
    /// An argument had an incorrect dimension.
    DimensionMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

impl Display for LinalgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::DimensionMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "incorrect size for argument '{}': expected {}, got {}",
                name, expected, got
            ),
        }
    }
}

impl std::error::Error for LinalgError {}
