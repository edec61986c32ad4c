use crate::{
    normalize_angle, stabilization_score, Cost, PendulumConfig, PendulumState, Stabilization,
    TorqueActions,
};
use lenv_core::{
    record::{Record, RecordValue},
    Action, ActionSpace, EnvConfig, EnvError, Episode, LearningEnv, LearningMode, Observation,
    Step,
};
use log::info;
use std::f64::consts::PI;

/// An inverted pendulum to swing up and balance.
///
/// Each episode starts hanging down, around `angle = pi`, with a small uniform
/// noise on the angle and the velocity drawn from the episode seed. Each step
/// is rewarded `-(angle^2 + 0.1 * velocity^2 + 0.001 * torque^2)`.
///
/// The episode terminates once the pendulum is stabilized, see
/// [`Stabilization`]. The score is then `10 / ln(steps)`, rewarding fast
/// stabilization. Until then the score is the mean reward since the reset.
///
/// The observation is `[angle]`, or `[angle, velocity]` when the `velocity`
/// flag of [`PendulumConfig`] is set.
#[derive(Debug)]
pub struct Pendulum {
    config: PendulumConfig,
    actions: TorqueActions,
    episode: Episode,
    stabilization: Stabilization,
    state: PendulumState,
    obs: Observation,
}

impl Pendulum {
    /// Angle from the upright position, in `[-pi, pi)`.
    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    /// Angular velocity.
    pub fn velocity(&self) -> f64 {
        self.state.velocity
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PendulumConfig {
        &self.config
    }

    fn update_obs(&mut self) {
        let PendulumState { angle, velocity } = self.state;
        if self.config.velocity {
            self.obs.overwrite(&[angle, velocity]);
        } else {
            self.obs.overwrite(&[angle]);
        }
    }
}

impl LearningEnv for Pendulum {
    type Config = PendulumConfig;

    fn build(config: &Self::Config) -> Result<Self, EnvError> {
        config.validate()?;
        let actions = if config.continuous {
            TorqueActions::continuous(config.max_torque)
        } else {
            TorqueActions::discrete(&config.torque_buckets, config.max_torque)
        };
        info!(
            "Build pendulum, {} actions, velocity observed: {}",
            if config.continuous { "continuous" } else { "discrete" },
            config.velocity
        );

        Ok(Self {
            config: config.clone(),
            actions,
            episode: Episode::default(),
            stabilization: Stabilization::new(config.window, config.stability_threshold),
            state: PendulumState {
                angle: PI,
                velocity: 0.0,
            },
            obs: Observation::zeros(config.obs_dim()),
        })
    }

    fn action_space(&self) -> &ActionSpace {
        self.actions.space()
    }

    fn reset(&mut self, seed: u64, mode: LearningMode) -> Result<(), EnvError> {
        let rng = self.episode.begin(seed, mode);
        let s = self.config.init_noise;
        let noise = || (2.0 * rng.f64() - 1.0) * s;
        self.state = PendulumState {
            angle: normalize_angle(PI + noise()),
            velocity: noise(),
        };
        self.stabilization.clear();
        self.update_obs();
        Ok(())
    }

    fn act(&mut self, action: &Action) -> Result<(Step, Record), EnvError> {
        self.episode.ensure_active()?;
        let torque = self.actions.torque(action)?;

        self.state = self.config.params.step(self.state, torque);
        self.update_obs();

        let cost = Cost::new(&self.state, torque);
        let reward = cost.reward();
        let stabilized = self.stabilization.push(reward);
        let step = self.episode.record_step(reward, stabilized);
        if stabilized {
            info!("Pendulum stabilized after {} steps", step.n_steps);
        }

        let record = Record::from_slice(&[
            ("reward", RecordValue::Scalar(reward)),
            ("torque", RecordValue::Scalar(torque)),
            ("angle_cost", RecordValue::Scalar(cost.angle)),
            ("velocity_cost", RecordValue::Scalar(cost.velocity)),
            ("torque_cost", RecordValue::Scalar(cost.torque)),
        ]);
        Ok((step, record))
    }

    fn obs(&self) -> &Observation {
        &self.obs
    }

    fn score(&self) -> f64 {
        let n_steps = self.episode.n_steps();
        if self.episode.is_terminal() {
            stabilization_score(n_steps)
        } else if n_steps == 0 {
            0.0
        } else {
            self.episode.score() / n_steps as f64
        }
    }

    fn is_terminal(&self) -> bool {
        self.episode.is_terminal()
    }

    fn is_copyable(&self) -> bool {
        true
    }

    fn clone_env(&self) -> Result<Self, EnvError> {
        Self::build(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_hangs_down() {
        let mut env = Pendulum::build(&PendulumConfig::default()).unwrap();
        env.reset(5, LearningMode::Training).unwrap();
        assert!(env.angle().abs() > PI - 0.1 - 1e-12);
        assert!(env.velocity().abs() <= 0.1);
        assert_eq!(env.obs().as_slice(), &[env.angle(), env.velocity()]);
        assert!(!env.is_terminal());
        assert_eq!(env.score(), 0.0);
    }

    #[test]
    fn test_no_noise_starts_at_nominal_state() {
        let config = PendulumConfig::default().init_noise(0.0).velocity(false);
        let mut env = Pendulum::build(&config).unwrap();
        env.reset(5, LearningMode::Training).unwrap();
        assert_eq!(env.angle(), -PI);
        assert_eq!(env.velocity(), 0.0);
        assert_eq!(env.obs().as_slice(), &[-PI]);
    }
}
