//! Environment step.

/// Outcome of [`LearningEnv::act`](crate::LearningEnv::act).
///
/// The reward sub-terms of the step are returned next to this object in a
/// [`Record`](crate::record::Record).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Reward of the step, already folded into the score of the episode.
    pub reward: f64,

    /// Flag denoting if the episode is terminated.
    pub is_terminated: bool,

    /// Number of steps taken since the last reset, this one included.
    pub n_steps: u64,
}

impl Step {
    /// Constructs a [`Step`] object.
    pub fn new(reward: f64, is_terminated: bool, n_steps: u64) -> Self {
        Self {
            reward,
            is_terminated,
            n_steps,
        }
    }
}
