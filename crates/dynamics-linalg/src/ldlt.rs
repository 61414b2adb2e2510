//! Symmetric LDL^T factorization with an explicit zero-pivot failure.

use nalgebra::DMatrix;

use crate::error::LinalgError;

/// An `L D L^T` factorization of a symmetric matrix, where `L` is unit lower
/// triangular and `D` is diagonal.
///
/// Built without partial pivoting: the joint-space mass matrix this is used
/// on (`spec.md` component E's CRBA output) is symmetric positive-definite
/// for any well-formed model, so a zero or near-zero pivot indicates a
/// genuinely singular input rather than a numerical-ordering artifact.
#[derive(Debug, Clone)]
pub struct Ldlt {
    /// Unit lower triangular factor, strictly-lower entries only meaningful.
    l: DMatrix<f64>,
    /// Diagonal factor.
    d: Vec<f64>,
}

impl Ldlt {
    /// Factorizes a symmetric matrix `a` (only the lower triangle is read).
    ///
    /// # Errors
    /// Returns [`LinalgError::Singular`] as soon as a pivot's magnitude falls
    /// at or below a tolerance scaled by the matrix's diagonal magnitude.
    pub fn new(a: &DMatrix<f64>) -> Result<Self, LinalgError> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(LinalgError::DimensionMismatch {
                name: "a".to_string(),
                expected: n,
                got: a.ncols(),
            });
        }

        let scale = (0..n).map(|i| a[(i, i)].abs()).fold(0.0_f64, f64::max);
        let tol = f64::EPSILON * scale.max(1.0) * (n as f64);

        let mut l = DMatrix::<f64>::identity(n, n);
        let mut d = vec![0.0; n];

        for j in 0..n {
            let mut sum = a[(j, j)];
            for k in 0..j {
                sum -= l[(j, k)] * l[(j, k)] * d[k];
            }
            if sum.abs() <= tol {
                return Err(LinalgError::Singular);
            }
            d[j] = sum;

            for i in (j + 1)..n {
                let mut sum = a[(i, j)];
                for k in 0..j {
                    sum -= l[(i, k)] * l[(j, k)] * d[k];
                }
                l[(i, j)] = sum / d[j];
            }
        }

        Ok(Ldlt { l, d })
    }

    /// The diagonal factor `D`'s entries. All strictly positive for a
    /// symmetric positive-definite input.
    #[must_use]
    pub fn pivots(&self) -> &[f64] {
        &self.d
    }

    /// Solves `A x = b` using the factorization, via forward, diagonal and
    /// backward substitution.
    pub fn solve(&self, b: &nalgebra::DVector<f64>) -> nalgebra::DVector<f64> {
        let n = self.d.len();

        // Forward substitution: L y = b.
        let mut y = b.clone();
        for i in 0..n {
            let mut sum = y[i];
            for k in 0..i {
                sum -= self.l[(i, k)] * y[k];
            }
            y[i] = sum;
        }

        // Diagonal scaling: D z = y.
        for i in 0..n {
            y[i] /= self.d[i];
        }

        // Backward substitution: L^T x = z.
        let mut x = y;
        for i in (0..n).rev() {
            let mut sum = x[i];
            for k in (i + 1)..n {
                sum -= self.l[(k, i)] * x[k];
            }
            x[i] = sum;
        }

        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DVector;

    #[test]
    fn solves_a_spd_system() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 2.0, 0.0, 2.0, 5.0, 1.0, 0.0, 1.0, 3.0]);
        let b = DVector::from_row_slice(&[6.0, 8.0, 4.0]);
        let ldlt = Ldlt::new(&a).unwrap();
        let x = ldlt.solve(&b);
        assert_relative_eq!(a * &x, b, epsilon = 1e-10);
    }

    #[test]
    fn rejects_a_singular_matrix() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Ldlt::new(&a).unwrap_err(), LinalgError::Singular);
    }
}
