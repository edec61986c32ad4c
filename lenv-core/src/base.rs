//! Core functionalities.
mod act;
mod env;
mod episode;
mod obs;
mod policy;
mod step;
pub use act::{Action, ActionSpace};
pub use env::LearningEnv;
pub use episode::{Episode, EpisodePhase};
pub use obs::Observation;
pub use policy::Policy;
pub use step::Step;
