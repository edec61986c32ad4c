//! Configuration of [`LeggedEnv`](super::LeggedEnv).
use lenv_core::{EnvConfig, EnvError};
use serde::{Deserialize, Serialize};

/// Configuration of [`LeggedEnv`](super::LeggedEnv), generic over the
/// configuration `C` of the simulation.
///
/// The defaults reward forward motion of the torso, pay a viability bonus of
/// `1.0` per step and terminate the episode when the torso leaves the height
/// range `[0.2, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeggedConfig<C> {
    /// Weight of the control cost.
    pub ctrl_cost_weight: f64,

    /// If `true`, external contact forces are charged in the reward.
    pub use_contact_forces: bool,

    /// Weight of the contact cost.
    pub contact_cost_weight: f64,

    /// Viability bonus of a step.
    pub healthy_reward: f64,

    /// If `true`, an unhealthy robot ends the episode.
    pub terminate_when_unhealthy: bool,

    /// Range of the torso height of a healthy robot, inclusive.
    pub healthy_z_range: [f64; 2],

    /// Range each contact force component is clamped to in the contact cost.
    pub contact_force_range: [f64; 2],

    /// Scale of the noise added to the nominal state at reset.
    pub reset_noise_scale: f64,

    /// If `true`, the torso position `x, y` is left out of the observation.
    pub exclude_current_positions: bool,

    /// Number of simulation steps per action.
    pub frame_skip: usize,

    /// Configuration of the simulation.
    pub sim: C,
}

impl<C: Default> Default for LeggedConfig<C> {
    fn default() -> Self {
        Self::with_sim(C::default())
    }
}

impl<C> LeggedConfig<C> {
    /// Default parameters over the given simulation.
    pub fn with_sim(sim: C) -> Self {
        Self {
            ctrl_cost_weight: 0.5,
            use_contact_forces: false,
            contact_cost_weight: 5e-4,
            healthy_reward: 1.0,
            terminate_when_unhealthy: true,
            healthy_z_range: [0.2, 1.0],
            contact_force_range: [-1.0, 1.0],
            reset_noise_scale: 0.1,
            exclude_current_positions: false,
            frame_skip: 1,
            sim,
        }
    }

    /// Sets the weight of the control cost.
    pub fn ctrl_cost_weight(mut self, v: f64) -> Self {
        self.ctrl_cost_weight = v;
        self
    }

    /// Charges contact forces in the reward.
    pub fn use_contact_forces(mut self, v: bool) -> Self {
        self.use_contact_forces = v;
        self
    }

    /// Sets the weight of the contact cost.
    pub fn contact_cost_weight(mut self, v: f64) -> Self {
        self.contact_cost_weight = v;
        self
    }

    /// Sets the viability bonus.
    pub fn healthy_reward(mut self, v: f64) -> Self {
        self.healthy_reward = v;
        self
    }

    /// Ends episodes of unhealthy robots.
    pub fn terminate_when_unhealthy(mut self, v: bool) -> Self {
        self.terminate_when_unhealthy = v;
        self
    }

    /// Sets the healthy range of the torso height.
    pub fn healthy_z_range(mut self, low: f64, high: f64) -> Self {
        self.healthy_z_range = [low, high];
        self
    }

    /// Sets the clamping range of the contact forces.
    pub fn contact_force_range(mut self, low: f64, high: f64) -> Self {
        self.contact_force_range = [low, high];
        self
    }

    /// Sets the scale of the reset noise.
    pub fn reset_noise_scale(mut self, v: f64) -> Self {
        self.reset_noise_scale = v;
        self
    }

    /// Leaves the torso position out of the observation.
    pub fn exclude_current_positions(mut self, v: bool) -> Self {
        self.exclude_current_positions = v;
        self
    }

    /// Sets the number of simulation steps per action.
    pub fn frame_skip(mut self, v: usize) -> Self {
        self.frame_skip = v;
        self
    }

    /// Sets the configuration of the simulation.
    pub fn sim(mut self, sim: C) -> Self {
        self.sim = sim;
        self
    }
}

fn check_range(name: &str, [low, high]: [f64; 2]) -> Result<(), EnvError> {
    if low.is_finite() && high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(EnvError::Config(format!(
            "{} [{}, {}] is not a finite range",
            name, low, high
        )))
    }
}

fn check_non_negative(name: &str, v: f64) -> Result<(), EnvError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(EnvError::Config(format!(
            "{} must be non-negative, got {}",
            name, v
        )))
    }
}

impl<C: EnvConfig> EnvConfig for LeggedConfig<C> {
    fn validate(&self) -> Result<(), EnvError> {
        if self.frame_skip == 0 {
            return Err(EnvError::Config("frame_skip must be positive".to_string()));
        }
        if !self.healthy_reward.is_finite() {
            return Err(EnvError::Config("healthy_reward is not finite".to_string()));
        }
        check_non_negative("ctrl_cost_weight", self.ctrl_cost_weight)?;
        check_non_negative("contact_cost_weight", self.contact_cost_weight)?;
        check_non_negative("reset_noise_scale", self.reset_noise_scale)?;
        check_range("healthy_z_range", self.healthy_z_range)?;
        check_range("contact_force_range", self.contact_force_range)?;
        self.sim.validate()
    }
}
