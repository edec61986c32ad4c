//! Parallel evaluation of a policy on clones of an environment.
use super::{run_episode, summarize, EpisodeOutcome, Evaluator};
use crate::{record::Record, record::Recorder, EnvError, LearningEnv, LearningMode, Policy};
use anyhow::Result;
use crossbeam_channel::unbounded;
use log::{info, warn};

/// Spreads evaluation episodes over worker threads.
///
/// Each worker drives its own clone of the prototype environment, obtained with
/// [`LearningEnv::clone_env`], and its own copy of the policy. Worker `w` runs the
/// episodes `w, w + n_workers, ...`; results are gathered by episode index, so the
/// outcome does not depend on scheduling and matches
/// [`DefaultEvaluator`](super::DefaultEvaluator) for a deterministic policy.
///
/// Environments that are not copyable are evaluated sequentially on the
/// prototype.
pub struct ParallelEvaluator<E: LearningEnv> {
    n_workers: usize,
    n_episodes: usize,
    max_steps: u64,
    seed: u64,
    mode: LearningMode,
    env: E,
}

impl<E: LearningEnv + Send> ParallelEvaluator<E> {
    /// Constructs a new [`ParallelEvaluator`] with a new prototype environment.
    pub fn new(
        config: &E::Config,
        n_workers: usize,
        n_episodes: usize,
        max_steps: u64,
    ) -> Result<Self> {
        Ok(Self::with_env(E::build(config)?, n_workers, n_episodes, max_steps))
    }

    /// Constructs a new [`ParallelEvaluator`] cloning the given environment.
    pub fn with_env(env: E, n_workers: usize, n_episodes: usize, max_steps: u64) -> Self {
        Self {
            n_workers: n_workers.max(1),
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

    fn run_sequential<P: Policy>(&mut self, policy: &mut P) -> Result<Vec<EpisodeOutcome>> {
        (0..self.n_episodes)
            .map(|ix| {
                let seed = self.seed.wrapping_add(ix as u64);
                run_episode(&mut self.env, policy, seed, self.mode, self.max_steps)
                    .map_err(Into::into)
            })
            .collect()
    }

    fn run_parallel<P>(&mut self, policy: &P) -> Result<Vec<EpisodeOutcome>>
    where
        P: Policy + Clone + Send,
    {
        let n_workers = self.n_workers.min(self.n_episodes);
        let envs = (0..n_workers)
            .map(|_| self.env.clone_env())
            .collect::<Result<Vec<_>, _>>()?;
        info!("Cloned {} environments for parallel evaluation", n_workers);

        let (n_episodes, max_steps, base_seed, mode) =
            (self.n_episodes, self.max_steps, self.seed, self.mode);
        let (sender, receiver) = unbounded::<(usize, Result<EpisodeOutcome, EnvError>)>();

        std::thread::scope(|scope| {
            for (w, mut env) in envs.into_iter().enumerate() {
                let sender = sender.clone();
                let mut policy = policy.clone();
                scope.spawn(move || {
                    for ix in (w..n_episodes).step_by(n_workers) {
                        let seed = base_seed.wrapping_add(ix as u64);
                        let outcome = run_episode(&mut env, &mut policy, seed, mode, max_steps);
                        let failed = outcome.is_err();
                        if sender.send((ix, outcome)).is_err() || failed {
                            break;
                        }
                    }
                });
            }
        });
        drop(sender);

        let mut results: Vec<_> = receiver.iter().collect();
        results.sort_by_key(|(ix, _)| *ix);
        results
            .into_iter()
            .map(|(_, outcome)| outcome.map_err(Into::into))
            .collect()
    }
}

impl<E: LearningEnv + Send> Evaluator<E> for ParallelEvaluator<E> {
    fn evaluate<P, R>(&mut self, policy: &mut P, recorder: &mut R) -> Result<Record>
    where
        P: Policy + Clone + Send,
        R: Recorder,
    {
        let outcomes = if !self.env.is_copyable() {
            warn!("Environment is not copyable, evaluating sequentially");
            self.run_sequential(policy)?
        } else if self.n_workers == 1 || self.n_episodes <= 1 {
            self.run_sequential(policy)?
        } else {
            self.run_parallel(policy)?
        };

        let record = summarize(&outcomes, recorder);
        info!(
            "Evaluated {} episodes ({}) on {} workers, mean score = {:?}",
            self.n_episodes,
            self.mode,
            self.n_workers,
            record.get_scalar("Episode score")?
        );
        Ok(record)
    }
}
