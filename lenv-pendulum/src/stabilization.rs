//! Stabilization criterion of the pendulum.
use std::collections::VecDeque;

/// Score of an episode stabilized after `n_steps` steps.
///
/// Strictly positive and strictly decreasing in `n_steps`. Defined for
/// `n_steps >= 2`, smaller values are treated as `2`.
pub fn stabilization_score(n_steps: u64) -> f64 {
    10.0 / (n_steps.max(2) as f64).ln()
}

/// Trailing window of step rewards.
///
/// The pendulum is stabilized once the window is full and the mean reward over
/// it exceeds the threshold.
#[derive(Debug, Clone)]
pub struct Stabilization {
    window: usize,
    threshold: f64,
    rewards: VecDeque<f64>,
}

impl Stabilization {
    /// Creates an empty window.
    pub fn new(window: usize, threshold: f64) -> Self {
        Self {
            window,
            threshold,
            rewards: VecDeque::with_capacity(window),
        }
    }

    /// Forgets all rewards.
    pub fn clear(&mut self) {
        self.rewards.clear();
    }

    /// Adds the reward of a step and returns `true` if the pendulum is stabilized.
    pub fn push(&mut self, reward: f64) -> bool {
        if self.rewards.len() == self.window {
            self.rewards.pop_front();
        }
        self.rewards.push_back(reward);
        self.is_stabilized()
    }

    /// Mean reward over the window, `None` until the window is full.
    pub fn mean(&self) -> Option<f64> {
        if self.rewards.len() < self.window {
            None
        } else {
            Some(self.rewards.iter().sum::<f64>() / self.window as f64)
        }
    }

    /// Returns `true` if the mean reward over a full window exceeds the threshold.
    pub fn is_stabilized(&self) -> bool {
        self.mean().map_or(false, |m| m > self.threshold)
    }
}
