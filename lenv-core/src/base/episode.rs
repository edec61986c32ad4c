//! Episode bookkeeping shared by environments.
use super::Step;
use crate::{derive_seed, EnvError, LearningMode};
use log::{debug, trace};

/// Phase of an episode.
///
/// `NotReset -> Active -> Terminal`. Only a reset enters `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodePhase {
    /// No reset since the environment was built.
    NotReset,

    /// Actions can be applied.
    Active,

    /// The termination policy ended the episode.
    Terminal,
}

/// State of the current episode of an environment.
///
/// Holds the derived seed, the accumulated score, the step
/// counter and the phase. Environments own one [`Episode`] and never share it.
#[derive(Debug, Clone)]
pub struct Episode {
    seed: u64,
    score: f64,
    n_steps: u64,
    phase: EpisodePhase,
}

impl Default for Episode {
    fn default() -> Self {
        Self {
            seed: 0,
            score: 0.0,
            n_steps: 0,
            phase: EpisodePhase::NotReset,
        }
    }
}

impl Episode {
    /// Starts a new episode and returns the random number generator scoped to it.
    ///
    /// Clears the score and the step counter.
    pub fn begin(&mut self, run_seed: u64, mode: LearningMode) -> fastrand::Rng {
        self.seed = derive_seed(run_seed, mode);
        self.score = 0.0;
        self.n_steps = 0;
        self.phase = EpisodePhase::Active;
        debug!(
            "Reset episode, run seed = {}, mode = {}, episode seed = {}",
            run_seed, mode, self.seed
        );
        fastrand::Rng::with_seed(self.seed)
    }

    /// Fails with [`EnvError::NotActive`] unless actions can be applied.
    pub fn ensure_active(&self) -> Result<(), EnvError> {
        match self.phase {
            EpisodePhase::Active => Ok(()),
            phase => Err(EnvError::NotActive { phase }),
        }
    }

    /// Accumulates the reward of a step and moves to `Terminal` if requested.
    pub fn record_step(&mut self, reward: f64, is_terminal: bool) -> Step {
        self.score += reward;
        self.n_steps += 1;
        self.mark_terminal(is_terminal);
        trace!(
            "Step {}, reward = {}, score = {}, terminal = {}",
            self.n_steps,
            reward,
            self.score,
            is_terminal
        );
        Step::new(reward, is_terminal, self.n_steps)
    }

    /// Ends an active episode if `is_terminal`.
    ///
    /// Used after a reset whose initial state already satisfies the termination
    /// policy.
    pub fn mark_terminal(&mut self, is_terminal: bool) {
        if is_terminal && self.phase == EpisodePhase::Active {
            self.phase = EpisodePhase::Terminal;
        }
    }

    /// Seed of the episode, derived from the run seed and the mode.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Sum of the rewards since the last reset.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of steps since the last reset.
    pub fn n_steps(&self) -> u64 {
        self.n_steps
    }

    /// Phase of the episode.
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Returns `true` if the termination policy ended the episode.
    pub fn is_terminal(&self) -> bool {
        self.phase == EpisodePhase::Terminal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases() {
        let mut episode = Episode::default();
        assert_eq!(
            episode.ensure_active(),
            Err(EnvError::NotActive {
                phase: EpisodePhase::NotReset
            })
        );

        let _ = episode.begin(3, LearningMode::Training);
        assert!(episode.ensure_active().is_ok());

        let step = episode.record_step(-1.5, false);
        assert_eq!(step.n_steps, 1);
        let step = episode.record_step(4.0, true);
        assert_eq!(step.n_steps, 2);
        assert_eq!(episode.score(), 2.5);
        assert_eq!(
            episode.ensure_active(),
            Err(EnvError::NotActive {
                phase: EpisodePhase::Terminal
            })
        );

        let _ = episode.begin(3, LearningMode::Training);
        assert_eq!(episode.score(), 0.0);
        assert_eq!(episode.n_steps(), 0);
        assert_eq!(episode.phase(), EpisodePhase::Active);
    }

    #[test]
    fn test_rng_follows_derived_seed() {
        let mut a = Episode::default();
        let mut b = Episode::default();
        let ra = a.begin(11, LearningMode::Testing);
        let rb = b.begin(11, LearningMode::Testing);
        assert_eq!(ra.u64(..), rb.u64(..));
        assert_eq!(a.seed(), derive_seed(11, LearningMode::Testing));
    }
}
