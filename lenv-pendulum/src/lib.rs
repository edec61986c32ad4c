#![warn(missing_docs)]
//! Inverted pendulum learning environment.
//!
//! The pendulum hangs down at the beginning of each episode. The agent applies
//! torques to swing it up and keep it upright until the mean reward over a
//! trailing window is high enough.
//!
//! ```
//! use lenv_core::{Action, LearningEnv, LearningMode};
//! use lenv_pendulum::{Pendulum, PendulumConfig};
//!
//! let config = PendulumConfig::default();
//! let mut env = Pendulum::build(&config).unwrap();
//! env.reset(0, LearningMode::Validation).unwrap();
//!
//! // No torque, the pendulum stays around the bottom.
//! for _ in 0..10 {
//!     env.act(&Action::Discrete(0)).unwrap();
//! }
//! assert!(!env.is_terminal());
//! assert!(env.score() < 0.0);
//! ```
mod act;
mod config;
mod dynamics;
mod env;
mod stabilization;
pub use act::TorqueActions;
pub use config::PendulumConfig;
pub use dynamics::{normalize_angle, Cost, PendulumParams, PendulumState};
pub use env::Pendulum;
pub use stabilization::{stabilization_score, Stabilization};
