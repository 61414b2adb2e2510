//! Joint limits: effort, velocity, position bounds, and friction properties.

use dynamics_spatial::configuration::Configuration;

/// Physical limits and friction properties of a joint.
#[derive(Clone, Debug)]
pub struct JointLimits {
    /// Maximum effort (force or torque) the joint can exert.
    pub effort: f64,
    /// Maximum velocity of the joint.
    pub velocity: f64,
    /// Minimum position configuration of the joint.
    pub min_configuration: Configuration,
    /// Maximum position configuration of the joint.
    pub max_configuration: Configuration,
    /// Viscous friction of the joint.
    pub friction: f64,
    /// Damping of the joint.
    pub damping: f64,
    /// Static friction loss of the joint.
    pub friction_loss: f64,
}

impl JointLimits {
    /// Creates a new `JointLimits` with the given parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        effort: f64,
        velocity: f64,
        min_configuration: Configuration,
        max_configuration: Configuration,
        friction: f64,
        damping: f64,
        friction_loss: f64,
    ) -> Self {
        JointLimits {
            effort,
            velocity,
            min_configuration,
            max_configuration,
            friction,
            damping,
            friction_loss,
        }
    }

    /// Creates unbounded `JointLimits` for a joint with `nq` position variables.
    pub fn new_unbounded(nq: usize) -> Self {
        JointLimits {
            effort: f64::INFINITY,
            velocity: f64::INFINITY,
            min_configuration: Configuration::from_element(nq, f64::NEG_INFINITY),
            max_configuration: Configuration::from_element(nq, f64::INFINITY),
            friction: 0.0,
            damping: 0.0,
            friction_loss: 0.0,
        }
    }
}
