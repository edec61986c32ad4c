//! Learning environment.
use super::{Action, ActionSpace, Observation, Step};
use crate::{
    record::{Record, RecordValue},
    EnvConfig, EnvError, LearningMode,
};

/// Represents a learning environment driven by an external learning agent.
///
/// The driver calls [`reset`](LearningEnv::reset) once per episode, then
/// [`act`](LearningEnv::act) repeatedly, reading [`obs`](LearningEnv::obs),
/// [`score`](LearningEnv::score) and [`is_terminal`](LearningEnv::is_terminal)
/// until the episode terminates or its own step budget runs out.
///
/// An environment is single-threaded and owns its simulation exclusively.
/// Parallel rollouts clone one environment per worker with
/// [`clone_env`](LearningEnv::clone_env).
pub trait LearningEnv {
    /// Configurations.
    type Config: EnvConfig;

    /// Builds an environment. The environment is not usable before a reset.
    fn build(config: &Self::Config) -> Result<Self, EnvError>
    where
        Self: Sized;

    /// Returns the action space of the environment.
    fn action_space(&self) -> &ActionSpace;

    /// Starts a new episode.
    ///
    /// The episode is seeded with [`derive_seed`](crate::derive_seed)`(seed, mode)`.
    fn reset(&mut self, seed: u64, mode: LearningMode) -> Result<(), EnvError>;

    /// Applies an action.
    ///
    /// Fails without modifying the environment if the episode is not active or
    /// the action does not belong to [`action_space`](LearningEnv::action_space).
    /// The returned record holds the reward sub-terms of the step.
    fn act(&mut self, action: &Action) -> Result<(Step, Record), EnvError>;

    /// Returns the observation of the current state.
    fn obs(&self) -> &Observation;

    /// Returns the score of the current episode.
    fn score(&self) -> f64;

    /// Returns `true` if the current episode is terminated.
    fn is_terminal(&self) -> bool;

    /// Returns `true` if [`clone_env`](LearningEnv::clone_env) is supported.
    fn is_copyable(&self) -> bool {
        false
    }

    /// Returns a new environment with the same configuration and independent state.
    ///
    /// The clone has never been reset, whatever the state of `self`.
    fn clone_env(&self) -> Result<Self, EnvError>
    where
        Self: Sized,
    {
        Err(EnvError::Unsupported(format!(
            "{} cannot be cloned",
            std::any::type_name::<Self>()
        )))
    }

    /// Returns the dimension of the observation vector.
    fn obs_dim(&self) -> usize {
        self.obs().len()
    }

    /// Returns the observation, the score and the terminal flag in a [`Record`].
    ///
    /// Meant for loggers and visualizers observing the environment.
    fn snapshot(&self) -> Record {
        Record::from_slice(&[
            ("obs", RecordValue::Array1(self.obs().as_slice().to_vec())),
            ("score", RecordValue::Scalar(self.score())),
            (
                "is_terminal",
                RecordValue::Scalar(if self.is_terminal() { 1.0 } else { 0.0 }),
            ),
        ])
    }
}
