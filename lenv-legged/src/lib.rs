#![warn(missing_docs)]
//! Legged robot learning environment.
//!
//! [`LeggedEnv`] adapts the physics simulation of an articulated robot, reached
//! through the [`Simulator`] trait, to a learning environment. The reward and
//! the termination follow the classic quadruped ("ant") locomotion task:
//! walk forward along `x` without falling.
//!
//! [`QuadrupedSim`] is a reduced-order quadruped shipped with the crate.
//!
//! ```
//! use lenv_core::{Action, LearningEnv, LearningMode};
//! use lenv_legged::{LeggedConfig, LeggedEnv};
//!
//! let mut env: LeggedEnv = LeggedEnv::build(&LeggedConfig::default()).unwrap();
//! env.reset(0, LearningMode::Training).unwrap();
//! assert_eq!(env.obs().len(), 29);
//!
//! let (step, record) = env.act(&Action::Continuous(vec![0.0; 8])).unwrap();
//! assert_eq!(record.get_scalar("healthy_reward").unwrap(), 1.0);
//! assert_eq!(step.n_steps, 1);
//! ```
mod config;
mod env;
mod health;
mod obs;
mod reward;
mod sim;
pub use config::LeggedConfig;
pub use env::LeggedEnv;
pub use health::is_healthy;
pub use obs::{extract, obs_dim};
pub use reward::{Reward, RewardModel};
pub use sim::{QuadrupedConfig, QuadrupedSim, Simulator};
