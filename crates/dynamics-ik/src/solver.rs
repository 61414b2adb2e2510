//! Position-only damped least-squares inverse kinematics.

use dynamics_joint::joint::JointModel;
use dynamics_linalg::damped_pseudo_inverse;
use dynamics_model::{
    compute_joint_jacobian, integrate, Data, JacobianFrame, Model,
};
use dynamics_spatial::{configuration::Configuration, vector3d::Vector3D};

use crate::error::IkError;

/// Options controlling [`solve_ik`].
#[derive(Clone, Debug, PartialEq)]
pub struct IkOptions {
    /// Stop once the end-effector's position error falls below this norm.
    pub tol: f64,
    /// Maximum number of iterations before giving up.
    pub max_iter: usize,
    /// Damping term `lambda` in `A = J J^T + lambda^2 I3`; regularizes the
    /// inversion near a singular Jacobian. A larger value trades accuracy
    /// near the target for robustness near singularities.
    pub damping: f64,
    /// Fraction of the computed step taken on each iteration, in `(0, 1]`.
    pub step: f64,
    /// Index of the joint whose placement is the end effector.
    pub ee_joint: usize,
    /// If set, clamp each revolute/prismatic DoF back into the model's
    /// joint limits after every step. The source this engine descends from
    /// does not clamp; this is off by default to match that behavior, but
    /// callers that need a limit-respecting solve can opt in.
    pub clamp_to_limits: bool,
}

impl IkOptions {
    /// Default options for the given model: `tol=1e-4`, `max_iter=200`,
    /// `damping=1e-6`, `step=0.5`, `ee_joint` is the model's last joint,
    /// `clamp_to_limits=false`.
    #[must_use]
    pub fn new(model: &Model) -> Self {
        IkOptions {
            tol: 1e-4,
            max_iter: 200,
            damping: 1e-6,
            step: 0.5,
            ee_joint: model.njoints() - 1,
            clamp_to_limits: false,
        }
    }
}

/// Result of [`solve_ik`].
#[derive(Clone, Debug, PartialEq)]
pub struct IkResult {
    /// Final configuration reached (whether or not it converged).
    pub q: Configuration,
    /// Whether the position error fell below `tol` within `max_iter` steps.
    pub converged: bool,
    /// Final measured position error norm; `+inf` only if the loop broke
    /// before a single error evaluation (e.g. an invalid starting `q0`).
    pub error: f64,
    /// Number of iterations actually run.
    pub iters: usize,
}

/// Solves for a configuration whose end-effector (`options.ee_joint`) world
/// translation reaches `target`, starting from `q0`, by damped least-squares
/// Gauss-Newton on the translational Jacobian block.
///
/// Each iteration: forward-kinematics at the current `q`; if the position
/// error is below `options.tol`, converged. Otherwise take the `3 x nv`
/// translational block of the `LOCAL_WORLD_ALIGNED` Jacobian at
/// `options.ee_joint`, invert it via [`damped_pseudo_inverse`], and take a
/// `options.step`-scaled Gauss-Newton step, integrated through
/// [`dynamics_model::integrate`] so continuous joints stay on the unit
/// circle. No joint-limit clamping is applied unless
/// [`IkOptions::clamp_to_limits`] is set. A non-finite step, or a failure to
/// integrate, ends the loop early with `converged = false` rather than
/// propagating an error — only misuse of the call itself (wrong-length
/// `q0`, an out-of-range `ee_joint`, a non-finite `target`) is an
/// [`IkError`].
///
/// # Errors
/// [`IkError::DimensionMismatch`] if `q0` has the wrong length,
/// [`IkError::InvalidJoint`] if `options.ee_joint` is out of range,
/// [`IkError::InvalidInput`] if `target` contains a non-finite value.
pub fn solve_ik(
    model: &Model,
    data: &mut Data,
    target: Vector3D,
    q0: &Configuration,
    options: &IkOptions,
) -> Result<IkResult, IkError> {
    if q0.len() != model.nq {
        return Err(IkError::DimensionMismatch {
            expected: model.nq,
            got: q0.len(),
            arg: "q0",
        });
    }
    if target.as_slice().iter().any(|v| !v.is_finite()) {
        return Err(IkError::InvalidInput {
            reason: "'target' contains a non-finite value".to_string(),
        });
    }
    if options.ee_joint >= model.njoints() {
        return Err(IkError::InvalidJoint {
            index: options.ee_joint,
        });
    }

    let mut q = q0.clone();
    let mut last_error = f64::INFINITY;

    for iter in 0..options.max_iter {
        let jacobian = match compute_joint_jacobian(
            model,
            data,
            &q,
            options.ee_joint,
            JacobianFrame::LocalWorldAligned,
        ) {
            Ok(jacobian) => jacobian.as_matrix().clone(),
            Err(_) => break,
        };

        let position = data.oMi[options.ee_joint].translation();
        let err = position - target;
        let err_norm = err.norm();
        last_error = err_norm;

        if err_norm < options.tol {
            return Ok(IkResult {
                q,
                converged: true,
                error: err_norm,
                iters: iter,
            });
        }

        let j_t = jacobian.rows(0, 3).into_owned();
        let pinv = damped_pseudo_inverse(&j_t, options.damping);
        let err_vec = nalgebra::Vector3::new(err.as_slice()[0], err.as_slice()[1], err.as_slice()[2]);
        let delta = pinv * err_vec;

        if delta.iter().any(|v| !v.is_finite()) {
            break;
        }

        let step_v = Configuration::from_row_slice(
            &delta.iter().map(|d| -options.step * d).collect::<Vec<_>>(),
        );
        q = match integrate(model, &q, &step_v) {
            Ok(q1) => q1,
            Err(_) => break,
        };

        if options.clamp_to_limits {
            q = clamp_to_limits(model, &q);
        }
    }

    Ok(IkResult {
        q,
        converged: false,
        error: last_error,
        iters: options.max_iter,
    })
}

/// Clamps every scalar (revolute/prismatic) DoF of `q` back into the
/// model's velocity-indexed joint limits. Continuous joints have no
/// meaningful position-space limit (their default range is the whole
/// circle) and fixed joints contribute no configuration slot, so both are
/// left untouched.
fn clamp_to_limits(model: &Model, q: &Configuration) -> Configuration {
    let mut out = q.clone();
    for j in 0..model.njoints() {
        let nq_j = model.joints[j].nq();
        let nv_j = model.joints[j].nv();
        if nq_j != 1 || nv_j != 1 {
            continue;
        }
        let idx_q = model.idx_q[j];
        let idx_v = model.idx_v[j];
        let lower = model.lower[idx_v];
        let upper = model.upper[idx_v];
        let clamped = out[idx_q].clamp(lower, upper);
        out.update_rows(idx_q, &Configuration::from_row_slice(&[clamped]));
    }
    out
}
