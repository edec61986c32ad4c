//! Dynamics of the pendulum.
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Physical parameters of the pendulum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendulumParams {
    /// Gravitational acceleration.
    pub gravity: f64,

    /// Mass at the tip of the rod.
    pub mass: f64,

    /// Length of the rod.
    pub length: f64,

    /// Integration step in seconds.
    pub dt: f64,

    /// Bound of the angular velocity.
    pub max_speed: f64,
}

impl Default for PendulumParams {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            mass: 1.0,
            length: 1.0,
            dt: 0.05,
            max_speed: 8.0,
        }
    }
}

/// State of the pendulum.
///
/// `angle` is measured from the upright position and kept in `[-pi, pi)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PendulumState {
    /// Angle from the upright position.
    pub angle: f64,

    /// Angular velocity.
    pub velocity: f64,
}

impl PendulumParams {
    /// Integrates one step with `torque` applied at the pivot.
    ///
    /// Semi-implicit Euler: the velocity is updated and clamped first, the angle
    /// follows with the new velocity.
    pub fn step(&self, state: PendulumState, torque: f64) -> PendulumState {
        let g = self.gravity;
        let (m, l) = (self.mass, self.length);
        let acc = 3.0 * g / (2.0 * l) * state.angle.sin() + 3.0 / (m * l * l) * torque;
        let velocity = (state.velocity + acc * self.dt).clamp(-self.max_speed, self.max_speed);
        let angle = normalize_angle(state.angle + velocity * self.dt);
        PendulumState { angle, velocity }
    }
}

/// Wraps an angle into `[-pi, pi)`.
pub fn normalize_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(2.0 * PI) - PI
}

/// Reward sub-terms of a step, all non-positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cost {
    /// `-angle^2`.
    pub angle: f64,

    /// `-0.1 * velocity^2`.
    pub velocity: f64,

    /// `-0.001 * torque^2`.
    pub torque: f64,
}

impl Cost {
    /// Evaluates the cost of the state reached with `torque`.
    pub fn new(state: &PendulumState, torque: f64) -> Self {
        Self {
            angle: -state.angle.powi(2),
            velocity: -0.1 * state.velocity.powi(2),
            torque: -0.001 * torque.powi(2),
        }
    }

    /// Reward of the step, the sum of the sub-terms.
    pub fn reward(&self) -> f64 {
        self.angle + self.velocity + self.torque
    }
}
