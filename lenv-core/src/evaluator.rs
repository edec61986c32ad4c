//! Episode drivers evaluating a [`Policy`] on a [`LearningEnv`].
use crate::{
    record::{Record, RecordValue, Recorder},
    EnvError, LearningEnv, LearningMode, Policy,
};
use anyhow::Result;
mod default_evaluator;
mod parallel_evaluator;
pub use default_evaluator::DefaultEvaluator;
pub use parallel_evaluator::ParallelEvaluator;

/// Evaluate a [`Policy`].
pub trait Evaluator<E: LearningEnv> {
    /// Runs the evaluation episodes and returns aggregated statistics.
    ///
    /// Per-episode records are written to `recorder`.
    fn evaluate<P, R>(&mut self, policy: &mut P, recorder: &mut R) -> Result<Record>
    where
        P: Policy + Clone + Send,
        R: Recorder;
}

/// Result of a single episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EpisodeOutcome {
    pub score: f64,
    pub n_steps: u64,
    pub is_terminal: bool,
}

impl EpisodeOutcome {
    fn into_record(self, ix: usize) -> Record {
        Record::from_slice(&[
            ("episode", RecordValue::Scalar(ix as f64)),
            ("score", RecordValue::Scalar(self.score)),
            ("n_steps", RecordValue::Scalar(self.n_steps as f64)),
            (
                "is_terminal",
                RecordValue::Scalar(if self.is_terminal { 1.0 } else { 0.0 }),
            ),
        ])
    }
}

/// Runs an episode until termination or until `max_steps` actions were applied.
pub(crate) fn run_episode<E, P>(
    env: &mut E,
    policy: &mut P,
    seed: u64,
    mode: LearningMode,
    max_steps: u64,
) -> Result<EpisodeOutcome, EnvError>
where
    E: LearningEnv,
    P: Policy,
{
    env.reset(seed, mode)?;
    let mut n_steps = 0;

    while !env.is_terminal() && n_steps < max_steps {
        let act = policy.sample(env.obs());
        let (step, _) = env.act(&act)?;
        n_steps = step.n_steps;
    }

    Ok(EpisodeOutcome {
        score: env.score(),
        n_steps,
        is_terminal: env.is_terminal(),
    })
}

/// Writes per-episode records and returns the mean score and episode length.
pub(crate) fn summarize<R: Recorder>(outcomes: &[EpisodeOutcome], recorder: &mut R) -> Record {
    for (ix, outcome) in outcomes.iter().enumerate() {
        recorder.write(outcome.into_record(ix));
    }
    recorder.flush();

    let n = outcomes.len().max(1) as f64;
    let score = outcomes.iter().map(|o| o.score).sum::<f64>() / n;
    let length = outcomes.iter().map(|o| o.n_steps as f64).sum::<f64>() / n;
    let terminated = outcomes.iter().filter(|o| o.is_terminal).count();

    Record::from_slice(&[
        ("Episode score", RecordValue::Scalar(score)),
        ("Episode length", RecordValue::Scalar(length)),
        ("Terminated episodes", RecordValue::Scalar(terminated as f64)),
    ])
}
