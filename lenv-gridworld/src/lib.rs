#![warn(missing_docs)]
//! Grid world learning environment.
//!
//! ```
//! use lenv_core::{Action, LearningEnv, LearningMode};
//! use lenv_gridworld::{GridWorld, GridWorldConfig};
//!
//! let mut env = GridWorld::build(&GridWorldConfig::default()).unwrap();
//! env.reset(0, LearningMode::Training).unwrap();
//!
//! // Three steps to the right reach the bad tile of the default grid.
//! for _ in 0..3 {
//!     env.act(&Action::Discrete(3)).unwrap();
//! }
//! assert!(env.is_terminal());
//! assert!(env.score() < 0.0);
//! ```
mod config;
mod env;
mod tile;
pub use config::GridWorldConfig;
pub use env::{GridWorld, OBS_DIM};
pub use tile::{Move, Tile};
