//! Errors in the library.
use crate::EpisodePhase;
use thiserror::Error;

/// Errors reported by learning environments to the driver calling them.
///
/// None of these errors is retried internally. A [`EnvError::Config`] or
/// [`EnvError::UnknownMode`] means the adapter must be rebuilt, contract
/// violations leave the episode exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvError {
    /// The learning mode tag is not one of `training`, `validation`, `testing`.
    #[error("Unknown learning mode: {0}")]
    UnknownMode(String),

    /// Malformed or inconsistent configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `act` was called outside of an active episode.
    #[error("Environment is not active (phase: {phase:?})")]
    NotActive {
        /// Phase of the episode when the call was made.
        phase: EpisodePhase,
    },

    /// The action does not belong to the action space of the environment.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// The operation is not supported by this environment.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKey(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueType(String),
}
