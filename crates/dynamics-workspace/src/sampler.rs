//! Reachable-workspace sampling: Fibonacci-sphere rays from the robot's
//! neutral reach, each walked outward to its reachability boundary by
//! binary search over a DLS inverse-kinematics probe.

use std::f64::consts::PI;

use dynamics_ik::{solve_ik, IkOptions};
use dynamics_model::{forward_kinematics, integrate, neutral, Data, Model};
use dynamics_spatial::{configuration::Configuration, vector3d::Vector3D};

use crate::error::WorkspaceError;

/// An axis-aligned bounding box over the sampled reachable points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Vector3D,
    pub max: Vector3D,
}

/// Options controlling [`sample_workspace`].
#[derive(Clone, Debug, PartialEq)]
pub struct WorkspaceOptions {
    /// Number of Fibonacci-sphere rays to cast. Must be at least 1.
    pub num_rays: usize,
    /// Bisection tolerance on the boundary radius, in meters.
    pub epsilon: f64,
    /// Maximum IK iterations allowed for each reachability probe.
    pub max_ik_iter: usize,
    /// Index of the joint whose placement is the end effector.
    pub ee_joint: usize,
}

impl WorkspaceOptions {
    /// Default options for the given model: `num_rays=500`, `epsilon=1e-3`,
    /// `max_ik_iter=100`, `ee_joint` is the model's last joint.
    #[must_use]
    pub fn new(model: &Model) -> Self {
        WorkspaceOptions {
            num_rays: 500,
            epsilon: 1e-3,
            max_ik_iter: 100,
            ee_joint: model.njoints() - 1,
        }
    }
}

/// Result of [`sample_workspace`].
#[derive(Clone, Debug, PartialEq)]
pub struct WorkspaceResult {
    /// One boundary point per ray that reached a reachable/unreachable
    /// transition; rays whose origin itself was unreachable contribute
    /// nothing.
    pub points: Vec<Vector3D>,
    /// Bounding box of `points`; both corners equal the origin if `points`
    /// is empty.
    pub bbox: BoundingBox,
    /// `points.len() as f64 / rays_cast as f64`, where `rays_cast` is the
    /// number of rays actually processed before any cancellation cut the
    /// sweep short.
    pub success_rate: f64,
}

/// Samples the reachable workspace of `model`'s end effector
/// (`options.ee_joint`) by casting `options.num_rays` rays from the
/// midpoint of its joint range and walking each outward to the boundary
/// between reachable and unreachable.
///
/// `progress`, if given, is called after every ray with `(rays_done,
/// total_rays)`. `cancel`, if given, is polled before every ray; once it
/// returns `true` the sweep stops and the points gathered so far are
/// returned (not an error).
///
/// # Errors
/// [`WorkspaceError::InvalidOptions`] if `options.num_rays` is zero,
/// [`WorkspaceError::InvalidJoint`] if `options.ee_joint` is out of range.
pub fn sample_workspace(
    model: &Model,
    data: &mut Data,
    options: &WorkspaceOptions,
    mut progress: Option<&mut dyn FnMut(usize, usize)>,
    cancel: Option<&dyn Fn() -> bool>,
) -> Result<WorkspaceResult, WorkspaceError> {
    if options.num_rays == 0 {
        return Err(WorkspaceError::InvalidOptions {
            reason: "'num_rays' must be at least 1".to_string(),
        });
    }
    if options.ee_joint >= model.njoints() {
        return Err(WorkspaceError::InvalidJoint {
            index: options.ee_joint,
        });
    }

    let q_mid = midpoint_configuration(model)?;
    forward_kinematics(model, data, &q_mid)?;
    let origin = data.oMi[options.ee_joint].translation();
    let r0 = estimate_reach(model);

    let mut ik_options = IkOptions::new(model);
    ik_options.max_iter = options.max_ik_iter;
    ik_options.ee_joint = options.ee_joint;

    let directions = fibonacci_sphere(options.num_rays);
    let mut points = Vec::new();
    let mut rays_cast = 0usize;

    for (i, direction) in directions.iter().enumerate() {
        if cancel.is_some_and(|c| c()) {
            break;
        }
        rays_cast += 1;

        if let Some(p) = binary_search_boundary(
            model,
            data,
            &ik_options,
            origin,
            *direction,
            r0,
            options.epsilon,
            &q_mid,
        ) {
            points.push(p);
        }

        if let Some(callback) = progress.as_deref_mut() {
            callback(i + 1, options.num_rays);
        }
    }

    let bbox = bounding_box(&points, origin);
    let success_rate = if rays_cast == 0 {
        0.0
    } else {
        points.len() as f64 / rays_cast as f64
    };

    Ok(WorkspaceResult {
        points,
        bbox,
        success_rate,
    })
}

/// Generates `n` unit directions evenly spread over the sphere via the
/// Fibonacci-sphere construction: `y_i = 1 - 2i/(n-1)` and azimuth
/// `theta_i = i * golden_angle`, with `golden_angle = pi * (3 - sqrt(5))`.
/// `i = 0` lands at the north pole `(0, 1, 0)` and `i = n-1` at the south
/// pole `(0, -1, 0)`.
#[must_use]
pub fn fibonacci_sphere(n: usize) -> Vec<Vector3D> {
    if n == 1 {
        return vec![Vector3D::y()];
    }

    let golden_angle = PI * (3.0 - 5.0_f64.sqrt());
    (0..n)
        .map(|i| {
            let y = 1.0 - 2.0 * (i as f64) / ((n - 1) as f64);
            let radius = (1.0 - y * y).max(0.0).sqrt();
            let theta = (i as f64) * golden_angle;
            Vector3D::new(radius * theta.cos(), y, radius * theta.sin())
        })
        .collect()
}

/// Walks outward from `origin` along `direction`, returning the boundary
/// point between IK-reachable and IK-unreachable, or `None` if `origin`
/// itself is unreachable.
///
/// Phase one doubles the radius from `0` up to 10 times while it stays
/// reachable, to bracket the boundary; phase two bisects within the
/// bracket for up to 50 iterations or until the bracket is narrower than
/// `epsilon`.
#[allow(clippy::too_many_arguments)]
fn binary_search_boundary(
    model: &Model,
    data: &mut Data,
    ik_options: &IkOptions,
    origin: Vector3D,
    direction: Vector3D,
    r0: f64,
    epsilon: f64,
    q_seed: &Configuration,
) -> Option<Vector3D> {
    let reachable = |r: f64, data: &mut Data| -> bool {
        solve_ik(model, data, origin + direction * r, q_seed, ik_options)
            .map(|result| result.converged)
            .unwrap_or(false)
    };

    if !reachable(0.0, data) {
        return None;
    }

    let mut low = 0.0;
    let mut high = r0.max(epsilon);
    let mut tries = 0;
    while reachable(high, data) && tries < 10 {
        low = high;
        high *= 2.0;
        tries += 1;
    }

    let mut iters = 0;
    while high - low > epsilon && iters < 50 {
        let mid = 0.5 * (low + high);
        if reachable(mid, data) {
            low = mid;
        } else {
            high = mid;
        }
        iters += 1;
    }

    Some(origin + direction * low)
}

/// The configuration sitting at the midpoint of every finite joint range
/// (unbounded joints contribute `0`), reached by integrating from neutral.
fn midpoint_configuration(model: &Model) -> Result<Configuration, WorkspaceError> {
    let mid_v: Vec<f64> = (0..model.nv)
        .map(|i| {
            let (lo, hi) = (model.lower[i], model.upper[i]);
            if lo.is_finite() && hi.is_finite() {
                0.5 * (lo + hi)
            } else {
                0.0
            }
        })
        .collect();
    let v = Configuration::from_row_slice(&mid_v);
    Ok(integrate(model, &neutral(model), &v)?)
}

/// A conservative estimate of the robot's maximum reach: half the sum of
/// per-DoF ranges (unbounded joints counted as a full `2*pi` turn), floored
/// at `2.0` meters so degenerate (all-fixed) models still bracket.
fn estimate_reach(model: &Model) -> f64 {
    let total: f64 = (0..model.nv)
        .map(|i| {
            let (lo, hi) = (model.lower[i], model.upper[i]);
            if lo.is_finite() && hi.is_finite() {
                (hi - lo).abs()
            } else {
                2.0 * PI
            }
        })
        .sum();
    (0.5 * total).max(2.0)
}

fn bounding_box(points: &[Vector3D], fallback: Vector3D) -> BoundingBox {
    if points.is_empty() {
        return BoundingBox {
            min: fallback,
            max: fallback,
        };
    }
    let mut min = points[0];
    let mut max = points[0];
    for p in points.iter().skip(1) {
        for axis in 0..3 {
            if p.as_slice()[axis] < min.as_slice()[axis] {
                min = replace_axis(min, axis, p.as_slice()[axis]);
            }
            if p.as_slice()[axis] > max.as_slice()[axis] {
                max = replace_axis(max, axis, p.as_slice()[axis]);
            }
        }
    }
    BoundingBox { min, max }
}

fn replace_axis(v: Vector3D, axis: usize, value: f64) -> Vector3D {
    let mut c = *v.as_slice();
    c[axis] = value;
    Vector3D::new(c[0], c[1], c[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamics_joint::joint::JointType;
    use dynamics_joint::limits::JointLimits;
    use dynamics_spatial::se3::SE3;

    fn two_r_planar() -> Model {
        let mut model = Model::empty();
        let j1 = model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::z(),
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j1",
            )
            .unwrap();
        model
            .add_joint(
                j1,
                JointType::Revolute,
                Vector3D::z(),
                SE3::from_parts(
                    Vector3D::new(1.0, 0.0, 0.0),
                    dynamics_spatial::motion::SpatialRotation::identity(),
                ),
                JointLimits::new_unbounded(1),
                "j2",
            )
            .unwrap();
        model.finalize().unwrap()
    }

    #[test]
    fn fibonacci_sphere_directions_are_unit_length() {
        for d in fibonacci_sphere(8) {
            assert!((d.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn fibonacci_sphere_endpoints_are_the_poles() {
        let dirs = fibonacci_sphere(8);
        assert!((dirs[0] - Vector3D::new(0.0, 1.0, 0.0)).norm() < 1e-9);
        assert!((dirs[7] - Vector3D::new(0.0, -1.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn rejects_zero_rays() {
        let model = two_r_planar();
        let mut data = Data::from(&model);
        let mut options = WorkspaceOptions::new(&model);
        options.num_rays = 0;
        let err = sample_workspace(&model, &mut data, &options, None, None);
        assert!(err.is_err());
    }

    #[test]
    fn samples_a_nonempty_workspace_for_a_two_link_arm() {
        let model = two_r_planar();
        let mut data = Data::from(&model);
        let mut options = WorkspaceOptions::new(&model);
        options.num_rays = 40;
        let result = sample_workspace(&model, &mut data, &options, None, None).unwrap();
        assert!(!result.points.is_empty());
        assert!(result.success_rate > 0.0);
        for p in &result.points {
            assert!(p.norm() <= 2.0 + options.epsilon + 1e-6);
        }
    }

    #[test]
    fn a_cancellation_token_stops_the_sweep_early() {
        let model = two_r_planar();
        let mut data = Data::from(&model);
        let mut options = WorkspaceOptions::new(&model);
        options.num_rays = 100;
        let cancel_now = || true;
        let result = sample_workspace(&model, &mut data, &options, None, Some(&cancel_now)).unwrap();
        assert!(result.points.is_empty());
        assert_eq!(result.success_rate, 0.0);
    }
}
