//! Defines **symmetric matrices** of size 3x3 and related operations.

use nalgebra::Matrix3;
use std::ops::{Index, Mul};

use crate::vector3d::Vector3D;

/// A symmetric 3x3 matrix.
///
/// The matrix is stored in a compact form, only keeping the unique elements.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Symmetric3 {
    /// The unique elements of the symmetric matrix, stored in the order:
    /// [m11, m22, m33, m12, m13, m23]
    data: [f64; 6],
}

impl Symmetric3 {
    /// Creates a new `Symmetric3` matrix from the given elements.
    ///
    /// # Arguments
    ///
    /// * `m11`, `m22`, `m33` - The diagonal elements.
    /// * `m12`, `m13`, `m23` - The off-diagonal elements.
    pub fn new(m11: f64, m22: f64, m33: f64, m12: f64, m13: f64, m23: f64) -> Self {
        Self {
            data: [m11, m22, m33, m12, m13, m23],
        }
    }

    /// Returns the element at the specified row and column.
    ///
    /// # Arguments
    ///
    /// * `row` - The row index (0-based).
    /// * `col` - The column index (0-based).
    ///
    /// # Panics
    ///
    /// Panics if the row or column index is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> &f64 {
        match (row, col) {
            (0, 0) => &self.data[0],
            (1, 1) => &self.data[1],
            (2, 2) => &self.data[2],
            (0, 1) | (1, 0) => &self.data[3],
            (0, 2) | (2, 0) => &self.data[4],
            (1, 2) | (2, 1) => &self.data[5],
            _ => panic!("Index out of bounds"),
        }
    }

    /// Returns the zero symmetric matrix.
    pub fn zeros() -> Self {
        Self { data: [0.0; 6] }
    }

    /// Returns the identity symmetric matrix.
    pub fn identity() -> Self {
        Self {
            data: [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        }
    }

    /// Creates a diagonal symmetric matrix from the given diagonal elements.
    ///
    /// # Arguments
    /// * `diag` - A vector containing the diagonal elements [m11, m22, m33].
    pub fn from_diagonal(diag: &[f64; 3]) -> Self {
        Self {
            data: [diag[0], diag[1], diag[2], 0.0, 0.0, 0.0],
        }
    }

    /// Convert the symmetric matrix to a full 3x3 matrix.
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.data[0],
            self.data[3],
            self.data[4],
            self.data[3],
            self.data[1],
            self.data[5],
            self.data[4],
            self.data[5],
            self.data[2],
        )
    }

    /// Returns the trace of the matrix.
    pub fn trace(&self) -> f64 {
        self.data[0] + self.data[1] + self.data[2]
    }

    /// Builds a `Symmetric3` from a full 3x3 matrix, reading only its lower
    /// triangle (the caller is responsible for the matrix being symmetric,
    /// e.g. the result of an `R * I * R^T` conjugation).
    pub fn from_matrix(m: &Matrix3<f64>) -> Self {
        Self::new(
            m[(0, 0)],
            m[(1, 1)],
            m[(2, 2)],
            m[(1, 0)],
            m[(2, 0)],
            m[(2, 1)],
        )
    }
}

impl Index<(usize, usize)> for Symmetric3 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        self.get(index.0, index.1)
    }
}

impl std::ops::Add for Symmetric3 {
    type Output = Symmetric3;

    fn add(self, rhs: Self) -> Self::Output {
        Symmetric3::new(
            self.data[0] + rhs.data[0],
            self.data[1] + rhs.data[1],
            self.data[2] + rhs.data[2],
            self.data[3] + rhs.data[3],
            self.data[4] + rhs.data[4],
            self.data[5] + rhs.data[5],
        )
    }
}

impl Mul<&Vector3D> for &Symmetric3 {
    type Output = Vector3D;

    fn mul(self, rhs: &Vector3D) -> Self::Output {
        Vector3D::new(
            self[(0, 0)] * rhs.0[0] + self[(0, 1)] * rhs.0[1] + self[(0, 2)] * rhs.0[2],
            self[(1, 0)] * rhs.0[0] + self[(1, 1)] * rhs.0[1] + self[(1, 2)] * rhs.0[2],
            self[(2, 0)] * rhs.0[0] + self[(2, 1)] * rhs.0[1] + self[(2, 2)] * rhs.0[2],
        )
    }
}
