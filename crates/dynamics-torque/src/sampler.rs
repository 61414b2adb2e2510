//! Max-torque sampling: sweeps a fixed battery of configurations (corner,
//! stratified-random and deterministic patterns) through RNEA to bound each
//! joint's worst-case torque at a given velocity/acceleration.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dynamics_joint::joint::JointModel;
use dynamics_model::{integrate, neutral, rnea, Data, Model};
use dynamics_spatial::configuration::Configuration;

use crate::error::TorqueError;

const STRATIFIED_SAMPLES: usize = 300;
const STRATA: usize = 10;
const SAMPLES_PER_STRATUM: usize = STRATIFIED_SAMPLES / STRATA;

/// Options controlling [`max_torques`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaxTorqueOptions {
    /// Seed for the stratified-grid phase's PRNG. Fixed at `0` by default so
    /// repeated calls are reproducible.
    pub seed: u64,
}

impl Default for MaxTorqueOptions {
    fn default() -> Self {
        MaxTorqueOptions { seed: 0 }
    }
}

/// Result of [`max_torques`].
#[derive(Clone, Debug, PartialEq)]
pub struct MaxTorqueResult {
    /// Per-joint (velocity-indexed) maximum `|tau|` observed across every
    /// sampled configuration.
    pub max: Vec<f64>,
    /// The full configuration at which each entry of `max` was achieved.
    pub at: Vec<Configuration>,
    /// Torque at the literal input `(q, v, a)`.
    pub current: Vec<f64>,
    /// Joint name for each velocity-indexed entry above.
    pub names: Vec<String>,
}

/// Bounds each joint's worst-case torque magnitude at the given velocity
/// `v` and acceleration `a`, by evaluating RNEA over a corner sweep, a
/// stratified random grid, and 12 fixed deterministic patterns over the
/// configuration space (see module docs for the exact battery).
///
/// The baseline `(q, v, a)` itself seeds every entry of `max`/`at`, so the
/// returned maxima are never below [`MaxTorqueResult::current`].
///
/// # Errors
/// [`TorqueError::DimensionMismatch`] if `q`, `v` or `a` has the wrong
/// length; [`TorqueError::InvalidInput`] if any contains a non-finite
/// value.
pub fn max_torques(
    model: &Model,
    data: &mut Data,
    q: &Configuration,
    v: &Configuration,
    a: &Configuration,
    options: &MaxTorqueOptions,
) -> Result<MaxTorqueResult, TorqueError> {
    let current_tau = rnea(model, data, q, v, a)?.as_slice().to_vec();

    let mut max = current_tau.clone();
    let mut at = vec![q.clone(); model.nv];

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut candidates = corner_configurations(model);
    candidates.extend(stratified_configurations(model, &mut rng));
    candidates.extend(fixed_pattern_configurations(model));

    for q_s in candidates {
        let Ok(tau) = rnea(model, data, &q_s, v, a) else {
            continue;
        };
        for i in 0..model.nv {
            let magnitude = tau.as_slice()[i].abs();
            if magnitude > max[i] {
                max[i] = magnitude;
                at[i] = q_s.clone();
            }
        }
    }

    let names = joint_names_by_dof(model);

    Ok(MaxTorqueResult {
        max,
        at,
        current: current_tau,
        names,
    })
}

/// Velocity-space bounds for DoF `i`: the model's own finite limits, or
/// `[-pi, pi]` for an unbounded joint.
fn effective_bounds(model: &Model, i: usize) -> (f64, f64) {
    let (lo, hi) = (model.lower[i], model.upper[i]);
    if lo.is_finite() && hi.is_finite() {
        (lo, hi)
    } else {
        (-PI, PI)
    }
}

/// Builds a full configuration from a velocity-space value per DoF, via
/// [`dynamics_model::integrate`] from neutral (so continuous joints land on
/// the unit circle rather than being assigned raw angle components).
fn configuration_from_values(model: &Model, values: &[f64]) -> Configuration {
    let v = Configuration::from_row_slice(values);
    integrate(model, &neutral(model), &v)
        .expect("'values' has nv length by construction, matching integrate's requirement")
}

/// All `2^min(nv, 6)` sign patterns over the first `min(nv, 6)` DoFs (each
/// either its lower or upper bound); remaining DoFs are pinned to their
/// lower bound.
fn corner_configurations(model: &Model) -> Vec<Configuration> {
    let k = model.nv.min(6);
    let mut base = vec![0.0; model.nv];
    for (i, value) in base.iter_mut().enumerate() {
        *value = effective_bounds(model, i).0;
    }

    (0..(1usize << k))
        .map(|pattern| {
            let mut values = base.clone();
            for (j, value) in values.iter_mut().enumerate().take(k) {
                let (lo, hi) = effective_bounds(model, j);
                *value = if (pattern >> j) & 1 == 1 { hi } else { lo };
            }
            configuration_from_values(model, &values)
        })
        .collect()
}

/// 300 stratified-random samples: for sample `i`, DoF `j` is drawn from
/// stratum `s = i / 30` of its range, jittered uniformly within the
/// stratum.
fn stratified_configurations(model: &Model, rng: &mut StdRng) -> Vec<Configuration> {
    (0..STRATIFIED_SAMPLES)
        .map(|i| {
            let stratum = (i / SAMPLES_PER_STRATUM) as f64;
            let values: Vec<f64> = (0..model.nv)
                .map(|j| {
                    let (lo, hi) = effective_bounds(model, j);
                    let jitter: f64 = rng.random_range(-0.5..0.5);
                    lo + (stratum + 0.5 + jitter) * (hi - lo) / STRATA as f64
                })
                .collect();
            configuration_from_values(model, &values)
        })
        .collect()
}

/// The 12 fixed deterministic patterns: all-lower, all-upper, two
/// alternating lower/upper patterns, uniform 25/50/75% of range, two
/// alternating 25%/75% patterns, and three "thirds" patterns (`j % 3 == k`
/// at upper, others at lower).
fn fixed_pattern_configurations(model: &Model) -> Vec<Configuration> {
    let patterns: [fn(usize) -> f64; 12] = [
        |_| 0.0,
        |_| 1.0,
        |j| if j % 2 == 0 { 0.0 } else { 1.0 },
        |j| if j % 2 == 0 { 1.0 } else { 0.0 },
        |_| 0.25,
        |_| 0.5,
        |_| 0.75,
        |j| if j % 2 == 0 { 0.25 } else { 0.75 },
        |j| if j % 2 == 0 { 0.75 } else { 0.25 },
        |j| if j % 3 == 0 { 1.0 } else { 0.0 },
        |j| if j % 3 == 1 { 1.0 } else { 0.0 },
        |j| if j % 3 == 2 { 1.0 } else { 0.0 },
    ];

    patterns
        .iter()
        .map(|pattern| {
            let values: Vec<f64> = (0..model.nv)
                .map(|j| {
                    let (lo, hi) = effective_bounds(model, j);
                    lo + pattern(j) * (hi - lo)
                })
                .collect();
            configuration_from_values(model, &values)
        })
        .collect()
}

fn joint_names_by_dof(model: &Model) -> Vec<String> {
    let mut names = vec![String::new(); model.nv];
    for j in 0..model.njoints() {
        if model.joints[j].nv() == 1 {
            names[model.idx_v[j]] = model.joint_names[j].clone();
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamics_joint::joint::JointType;
    use dynamics_joint::limits::JointLimits;
    use dynamics_spatial::se3::SE3;
    use dynamics_spatial::vector3d::Vector3D;

    fn single_revolute_with_limits() -> Model {
        let mut model = Model::empty();
        model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::z(),
                SE3::identity(),
                JointLimits::new(
                    100.0,
                    10.0,
                    Configuration::from_row_slice(&[-1.0]),
                    Configuration::from_row_slice(&[1.0]),
                    0.0,
                    0.0,
                    0.0,
                ),
                "j",
            )
            .unwrap();
        model.finalize().unwrap()
    }

    #[test]
    fn max_torque_is_never_below_the_current_torque() {
        let model = single_revolute_with_limits();
        let mut data = Data::from(&model);
        let q = Configuration::from_row_slice(&[0.0]);
        let v = Configuration::from_row_slice(&[0.0]);
        let a = Configuration::from_row_slice(&[0.0]);
        let result = max_torques(&model, &mut data, &q, &v, &a, &MaxTorqueOptions::default()).unwrap();
        assert!(result.max[0] >= result.current[0].abs() - 1e-12);
    }

    #[test]
    fn torque_grows_with_an_offset_center_of_mass_under_gravity() {
        let model = single_revolute_with_limits();
        let mut data = Data::from(&model);
        let q = Configuration::from_row_slice(&[0.0]);
        let v = Configuration::from_row_slice(&[0.0]);
        let a = Configuration::from_row_slice(&[0.0]);
        let result = max_torques(&model, &mut data, &q, &v, &a, &MaxTorqueOptions::default()).unwrap();
        assert_eq!(result.names, vec!["j".to_string()]);
        assert_eq!(result.at.len(), 1);
        assert_eq!(result.at[0].len(), model.nq);
    }

    #[test]
    fn sampling_is_reproducible_across_identical_seeds() {
        let model = single_revolute_with_limits();
        let mut data_a = Data::from(&model);
        let mut data_b = Data::from(&model);
        let q = Configuration::from_row_slice(&[0.0]);
        let v = Configuration::from_row_slice(&[0.0]);
        let a = Configuration::from_row_slice(&[0.0]);
        let options = MaxTorqueOptions::default();
        let result_a = max_torques(&model, &mut data_a, &q, &v, &a, &options).unwrap();
        let result_b = max_torques(&model, &mut data_b, &q, &v, &a, &options).unwrap();
        assert_eq!(result_a.max, result_b.max);
    }

    #[test]
    fn rejects_a_wrong_sized_velocity() {
        let model = single_revolute_with_limits();
        let mut data = Data::from(&model);
        let q = Configuration::from_row_slice(&[0.0]);
        let v = Configuration::zeros(2);
        let a = Configuration::from_row_slice(&[0.0]);
        let err = max_torques(&model, &mut data, &q, &v, &a, &MaxTorqueOptions::default());
        assert!(err.is_err());
    }
}
