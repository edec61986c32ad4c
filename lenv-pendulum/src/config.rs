//! Configuration of [`Pendulum`](super::Pendulum).
use crate::PendulumParams;
use lenv_core::{EnvConfig, EnvError};
use serde::{Deserialize, Serialize};

/// Configuration of [`Pendulum`](super::Pendulum).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendulumConfig {
    /// Allowed torque magnitudes, as fractions of `max_torque`.
    pub torque_buckets: Vec<f64>,

    /// Largest torque applied at the pivot.
    pub max_torque: f64,

    /// If `true`, actions are a single continuous torque instead of bucket indices.
    pub continuous: bool,

    /// If `true`, the angular velocity is observed next to the angle.
    pub velocity: bool,

    /// Number of trailing steps considered by the stabilization criterion.
    pub window: usize,

    /// Mean reward over the window above which the pendulum is stabilized.
    pub stability_threshold: f64,

    /// Half-width of the uniform noise on the initial angle and velocity.
    pub init_noise: f64,

    /// Physical parameters.
    pub params: PendulumParams,
}

impl Default for PendulumConfig {
    fn default() -> Self {
        Self {
            torque_buckets: vec![0.05, 0.1, 0.2, 0.4, 0.6, 0.8, 1.0],
            max_torque: 2.0,
            continuous: false,
            velocity: true,
            window: 100,
            stability_threshold: -0.05,
            init_noise: 0.1,
            params: PendulumParams::default(),
        }
    }
}

impl PendulumConfig {
    /// Sets the torque buckets.
    pub fn torque_buckets(mut self, v: Vec<f64>) -> Self {
        self.torque_buckets = v;
        self
    }

    /// Sets the largest torque.
    pub fn max_torque(mut self, v: f64) -> Self {
        self.max_torque = v;
        self
    }

    /// Uses a continuous torque action.
    pub fn continuous(mut self, v: bool) -> Self {
        self.continuous = v;
        self
    }

    /// Observes the angular velocity.
    pub fn velocity(mut self, v: bool) -> Self {
        self.velocity = v;
        self
    }

    /// Sets the window of the stabilization criterion.
    pub fn window(mut self, v: usize) -> Self {
        self.window = v;
        self
    }

    /// Sets the threshold of the stabilization criterion.
    pub fn stability_threshold(mut self, v: f64) -> Self {
        self.stability_threshold = v;
        self
    }

    /// Sets the noise on the initial state.
    pub fn init_noise(mut self, v: f64) -> Self {
        self.init_noise = v;
        self
    }

    /// Sets the physical parameters.
    pub fn params(mut self, v: PendulumParams) -> Self {
        self.params = v;
        self
    }

    /// Dimension of the observation.
    pub fn obs_dim(&self) -> usize {
        if self.velocity {
            2
        } else {
            1
        }
    }
}

fn positive(name: &str, v: f64) -> Result<(), EnvError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(EnvError::Config(format!("{} must be positive, got {}", name, v)))
    }
}

impl EnvConfig for PendulumConfig {
    fn validate(&self) -> Result<(), EnvError> {
        if !self.continuous {
            if self.torque_buckets.is_empty() {
                return Err(EnvError::Config("no torque bucket".to_string()));
            }
            if let Some(b) = self
                .torque_buckets
                .iter()
                .find(|b| !(b.is_finite() && **b > 0.0 && **b <= 1.0))
            {
                return Err(EnvError::Config(format!(
                    "torque bucket {} out of (0, 1]",
                    b
                )));
            }
        }
        if self.window < 2 {
            return Err(EnvError::Config(format!(
                "window must be at least 2, got {}",
                self.window
            )));
        }
        if !self.stability_threshold.is_finite() {
            return Err(EnvError::Config("stability threshold is not finite".to_string()));
        }
        if !(self.init_noise.is_finite() && self.init_noise >= 0.0) {
            return Err(EnvError::Config(format!(
                "init_noise must be non-negative, got {}",
                self.init_noise
            )));
        }
        positive("max_torque", self.max_torque)?;
        positive("gravity", self.params.gravity)?;
        positive("mass", self.params.mass)?;
        positive("length", self.params.length)?;
        positive("dt", self.params.dt)?;
        positive("max_speed", self.params.max_speed)
    }
}
