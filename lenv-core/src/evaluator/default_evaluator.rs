//! Sequential evaluation of a policy.
use super::{run_episode, summarize, Evaluator};
use crate::{record::Record, record::Recorder, LearningEnv, LearningMode, Policy};
use anyhow::Result;
use log::info;

/// Runs a fixed number of episodes one after another on a single environment.
///
/// Episode `ix` is reset with run seed `seed + ix`. Each episode ends when the
/// environment terminates or after `max_steps` actions, the step budget being
/// owned by the evaluator and not by the environment.
///
/// # Examples
///
/// ```ignore
/// let mut evaluator = DefaultEvaluator::<GridWorld>::new(&config, 10, 100)?
///     .mode(LearningMode::Validation);
/// let record = evaluator.evaluate(&mut policy, &mut NullRecorder)?;
/// println!("Mean score: {}", record.get_scalar("Episode score")?);
/// ```
pub struct DefaultEvaluator<E: LearningEnv> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// Step budget of an episode.
    max_steps: u64,

    /// Run seed of the first episode.
    seed: u64,

    /// Learning mode of the episodes.
    mode: LearningMode,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: LearningEnv> DefaultEvaluator<E> {
    /// Constructs a new [`DefaultEvaluator`] with a new environment.
    pub fn new(config: &E::Config, n_episodes: usize, max_steps: u64) -> Result<Self> {
        Ok(Self::with_env(E::build(config)?, n_episodes, max_steps))
    }

    /// Constructs a new [`DefaultEvaluator`] driving the given environment.
    pub fn with_env(env: E, n_episodes: usize, max_steps: u64) -> Self {
        Self {
            n_episodes,
            max_steps,
            seed: 0,
            mode: LearningMode::Validation,
            env,
        }
    }

    /// Sets the run seed of the first episode.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the learning mode of the episodes.
    pub fn mode(mut self, mode: LearningMode) -> Self {
        self.mode = mode;
        self
    }
}

impl<E: LearningEnv> Evaluator<E> for DefaultEvaluator<E> {
    fn evaluate<P, R>(&mut self, policy: &mut P, recorder: &mut R) -> Result<Record>
    where
        P: Policy + Clone + Send,
        R: Recorder,
    {
        let mut outcomes = Vec::with_capacity(self.n_episodes);

        for ix in 0..self.n_episodes {
            let seed = self.seed.wrapping_add(ix as u64);
            outcomes.push(run_episode(
                &mut self.env,
                policy,
                seed,
                self.mode,
                self.max_steps,
            )?);
        }

        let record = summarize(&outcomes, recorder);
        info!(
            "Evaluated {} episodes ({}), mean score = {:?}",
            self.n_episodes,
            self.mode,
            record.get_scalar("Episode score")?
        );
        Ok(record)
    }
}
