//! Closed-form 3x3 determinant and inverse.

use nalgebra::Matrix3;

use crate::error::LinalgError;

/// Closed-form determinant of a 3x3 matrix, via cofactor expansion along the
/// first row.
pub fn det3(m: &Matrix3<f64>) -> f64 {
    m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
        - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
        + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
}

/// Closed-form inverse of a 3x3 matrix via the adjugate divided by the
/// determinant.
///
/// # Errors
/// Returns [`LinalgError::Singular`] if the determinant is zero (within
/// `f64::EPSILON` scaled by the matrix's magnitude).
pub fn inverse3(m: &Matrix3<f64>) -> Result<Matrix3<f64>, LinalgError> {
    let det = det3(m);
    let scale = m.abs().max();
    if det.abs() <= f64::EPSILON * scale.max(1.0) {
        return Err(LinalgError::Singular);
    }

    let adj = Matrix3::new(
        m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
        m[(0, 2)] * m[(2, 1)] - m[(0, 1)] * m[(2, 2)],
        m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)],
        m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)],
        m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)],
        m[(0, 2)] * m[(1, 0)] - m[(0, 0)] * m[(1, 2)],
        m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
        m[(0, 1)] * m[(2, 0)] - m[(0, 0)] * m[(2, 1)],
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
    );
    Ok(adj / det)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_inverts_to_identity() {
        let m = Matrix3::identity();
        let inv = inverse3(&m).unwrap();
        assert_relative_eq!(inv, m);
    }

    #[test]
    fn roundtrip_on_a_generic_matrix() {
        let m = Matrix3::new(2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0);
        let inv = inverse3(&m).unwrap();
        assert_relative_eq!(m * inv, Matrix3::identity(), epsilon = 1e-10);
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 1.0, 1.0, 1.0);
        assert_eq!(inverse3(&m), Err(LinalgError::Singular));
    }
}
