use crate::{extract, is_healthy, obs_dim, LeggedConfig, QuadrupedSim, RewardModel, Simulator};
use lenv_core::{
    record::Record, Action, ActionSpace, EnvConfig, EnvError, Episode, LearningEnv, LearningMode,
    Observation, Step,
};
use log::{info, trace};

/// A legged robot rewarded for walking forward.
///
/// At reset each generalized position of the simulation is drawn uniformly in
/// `init_qpos ± reset_noise_scale` and each velocity in
/// `init_qvel + [0, reset_noise_scale]`, from the episode seed.
///
/// An action is the vector of the `nu` controls. It is applied for `frame_skip`
/// simulation steps. The reward of the step is the forward velocity of the
/// torso plus the viability bonus minus the control cost and, optionally, the
/// contact cost, see [`RewardModel`]. With `terminate_when_unhealthy` the
/// episode ends when the robot is not healthy, see [`is_healthy`].
///
/// The observation is `qpos` followed by `qvel`, see [`extract`].
#[derive(Debug)]
pub struct LeggedEnv<S: Simulator = QuadrupedSim> {
    config: LeggedConfig<S::Config>,
    sim: S,
    reward: RewardModel,
    action_space: ActionSpace,
    episode: Episode,
    obs: Observation,
    buf: Vec<f64>,
}

impl<S: Simulator> LeggedEnv<S> {
    /// Returns the simulation.
    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LeggedConfig<S::Config> {
        &self.config
    }

    /// Returns `true` if the current state of the simulation is healthy.
    pub fn is_healthy(&self) -> bool {
        is_healthy(self.sim.qpos(), self.sim.qvel(), self.config.healthy_z_range)
    }

    fn should_terminate(&self) -> bool {
        self.config.terminate_when_unhealthy && !self.is_healthy()
    }

    fn update_obs(&mut self) {
        extract(
            self.sim.qpos(),
            self.sim.qvel(),
            self.config.exclude_current_positions,
            &mut self.buf,
            &mut self.obs,
        );
    }
}

/// Checks that `sim` has the torso coordinates `x, y, z` and a nominal state of
/// its own dimensions.
fn check_dims<S: Simulator>(sim: &S) -> Result<(), EnvError> {
    if sim.nq() < 3 {
        return Err(EnvError::Config(format!(
            "the simulation has {} generalized positions, the torso needs 3",
            sim.nq()
        )));
    }
    let (nq, nv) = (sim.init_qpos().len(), sim.init_qvel().len());
    if nq != sim.nq() || nv != sim.nv() {
        return Err(EnvError::Config(format!(
            "nominal state has {} positions and {} velocities, expected {} and {}",
            nq,
            nv,
            sim.nq(),
            sim.nv()
        )));
    }
    Ok(())
}

impl<S: Simulator> LearningEnv for LeggedEnv<S> {
    type Config = LeggedConfig<S::Config>;

    fn build(config: &Self::Config) -> Result<Self, EnvError> {
        config.validate()?;
        let sim = S::build(&config.sim)?;
        check_dims(&sim)?;
        let (low, high) = sim.ctrl_range();
        let action_space = ActionSpace::Continuous {
            dim: sim.nu(),
            low,
            high,
        };
        let dim = obs_dim(sim.nq(), sim.nv(), config.exclude_current_positions);
        let dt = sim.timestep() * config.frame_skip as f64;
        info!(
            "Build legged robot, nq = {}, nv = {}, nu = {}, dt = {}",
            sim.nq(),
            sim.nv(),
            sim.nu(),
            dt
        );

        Ok(Self {
            reward: RewardModel::new(config, dt),
            config: config.clone(),
            sim,
            action_space,
            episode: Episode::default(),
            obs: Observation::zeros(dim),
            buf: Vec::with_capacity(dim),
        })
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn reset(&mut self, seed: u64, mode: LearningMode) -> Result<(), EnvError> {
        let rng = self.episode.begin(seed, mode);
        let s = self.config.reset_noise_scale;
        let qpos = self
            .sim
            .init_qpos()
            .iter()
            .map(|q| q + (2.0 * rng.f64() - 1.0) * s)
            .collect::<Vec<_>>();
        let qvel = self
            .sim
            .init_qvel()
            .iter()
            .map(|v| v + rng.f64() * s)
            .collect::<Vec<_>>();
        self.sim.set_state(&qpos, &qvel);

        self.update_obs();
        self.episode.mark_terminal(self.should_terminate());
        Ok(())
    }

    fn act(&mut self, action: &Action) -> Result<(Step, Record), EnvError> {
        self.episode.ensure_active()?;
        self.action_space.validate(action)?;
        let ctrl = match action {
            Action::Continuous(v) => v,
            Action::Discrete(_) => {
                return Err(EnvError::InvalidAction(
                    "discrete action given to a legged robot".to_string(),
                ))
            }
        };

        let x_before = self.sim.qpos()[0];
        self.sim.set_controls(ctrl);
        for _ in 0..self.config.frame_skip {
            self.sim.step();
        }
        let x_after = self.sim.qpos()[0];

        let healthy = self.is_healthy();
        let reward = self.reward.reward(
            x_before,
            x_after,
            healthy,
            ctrl,
            self.sim.contact_forces(),
        );
        self.update_obs();

        let terminal = self.config.terminate_when_unhealthy && !healthy;
        let step = self.episode.record_step(reward.total(), terminal);
        if terminal {
            info!(
                "Robot unhealthy after {} steps, torso height = {}",
                step.n_steps,
                self.sim.qpos()[2]
            );
        } else {
            trace!("Torso at x = {}", x_after);
        }
        Ok((step, reward.to_record()))
    }

    fn obs(&self) -> &Observation {
        &self.obs
    }

    fn score(&self) -> f64 {
        self.episode.score()
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
