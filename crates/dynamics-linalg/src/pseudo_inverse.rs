//! Damped least-squares pseudo-inverse for the position-only IK Jacobian.

use nalgebra::{DMatrix, Matrix3};

use crate::mat3::inverse3;

/// Damped-least-squares right pseudo-inverse of a 3xN matrix `j`:
/// `j^+ = j^T (j j^T + lambda^2 I_3)^-1`, returned as an Nx3 matrix.
///
/// `j j^T` is always 3x3 regardless of `N` (the number of velocity degrees
/// of freedom), so the only matrix that needs inverting is 3x3 and the
/// closed-form [`crate::mat3::inverse3`] applies directly.
///
/// Unlike a bare [`inverse3`] call, this never fails: the damping term keeps
/// `j j^T + lambda^2 I` non-singular for any `lambda > 0`, which is the whole
/// point of damping a near-singular Jacobian rather than inverting it
/// directly.
///
/// # Panics
/// Panics if `j` does not have exactly 3 rows.
pub fn damped_pseudo_inverse(j: &DMatrix<f64>, lambda: f64) -> DMatrix<f64> {
    assert_eq!(j.nrows(), 3, "pseudo-inverse expects a 3xN Jacobian block");

    let jt = j.transpose();
    let jjt = j * &jt;
    let jjt = Matrix3::new(
        jjt[(0, 0)],
        jjt[(0, 1)],
        jjt[(0, 2)],
        jjt[(1, 0)],
        jjt[(1, 1)],
        jjt[(1, 2)],
        jjt[(2, 0)],
        jjt[(2, 1)],
        jjt[(2, 2)],
    );

    let damped = jjt + Matrix3::identity() * (lambda * lambda);
    let inv = match inverse3(&damped) {
        Ok(inv) => inv,
        // lambda > 0 should always keep jjt invertible; fall back to a
        // slightly larger damping term rather than propagating a NaN.
        Err(_) => {
            let damped = jjt + Matrix3::identity() * (lambda * lambda + 1e-6);
            inverse3(&damped).unwrap_or_else(|_| Matrix3::identity())
        }
    };

    let inv = DMatrix::from_row_slice(
        3,
        3,
        &[
            inv[(0, 0)],
            inv[(0, 1)],
            inv[(0, 2)],
            inv[(1, 0)],
            inv[(1, 1)],
            inv[(1, 2)],
            inv[(2, 0)],
            inv[(2, 1)],
            inv[(2, 2)],
        ],
    );
    jt * inv
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn approximates_true_inverse_for_well_conditioned_jacobian() {
        let j = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        let pinv = damped_pseudo_inverse(&j, 1e-8);
        assert_relative_eq!(pinv, j, epsilon = 1e-5);
    }

    #[test]
    fn stays_finite_for_a_singular_jacobian() {
        let j = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let pinv = damped_pseudo_inverse(&j, 1e-3);
        assert!(pinv.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn handles_a_non_square_jacobian() {
        let j = DMatrix::from_row_slice(
            3,
            2,
            &[1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        );
        let pinv = damped_pseudo_inverse(&j, 1e-6);
        assert_eq!(pinv.nrows(), 2);
        assert_eq!(pinv.ncols(), 3);
        assert!(pinv.iter().all(|x| x.is_finite()));
    }
}
