#![warn(missing_docs)]
//! Core traits and drivers of learning environments.
//!
//! A learning environment adapts a domain-specific simulation (a grid world, an
//! inverted pendulum, a legged robot, ...) to a uniform contract consumed by an
//! external learning agent:
//!
//! * [`LearningEnv::reset`] starts an episode for a run seed and a [`LearningMode`],
//! * [`LearningEnv::act`] applies an [`Action`] and accumulates the reward,
//! * [`LearningEnv::obs`], [`LearningEnv::score`] and [`LearningEnv::is_terminal`]
//!   expose the state of the episode without mutating it,
//! * [`LearningEnv::clone_env`] and [`LearningEnv::is_copyable`] support parallel
//!   rollouts, one independent adapter per worker.
//!
//! The bookkeeping shared by all adapters (phase of the episode, running score,
//! step counter and the episode RNG) lives in [`Episode`].
//!
//! ```
//! use lenv_core::{derive_seed, LearningMode, VALIDATION_SEED};
//!
//! // Validation episodes evaluate the same scenario in every run.
//! assert_eq!(derive_seed(1, LearningMode::Validation), VALIDATION_SEED);
//! assert_eq!(derive_seed(2, LearningMode::Validation), VALIDATION_SEED);
//!
//! // Training episodes follow the run seed.
//! assert_ne!(
//!     derive_seed(1, LearningMode::Training),
//!     derive_seed(2, LearningMode::Training)
//! );
//! ```
pub mod error;
pub mod record;

mod base;
pub use base::{
    Action, ActionSpace, Episode, EpisodePhase, LearningEnv, Observation, Policy, Step,
};

mod config;
pub use config::EnvConfig;

mod mode;
pub use mode::{derive_seed, LearningMode, VALIDATION_SEED};

mod evaluator;
pub use evaluator::{DefaultEvaluator, Evaluator, ParallelEvaluator};

pub use error::EnvError;
