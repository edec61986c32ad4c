//! Learning modes and per-episode seed derivation.
use crate::EnvError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use xxhash_rust::xxh3::xxh3_64;

/// Seed of every validation episode, whatever the run seed.
///
/// Pinning validation makes scores comparable across generations of a run.
pub const VALIDATION_SEED: u64 = 6_416_846_135_168_433;

/// Learning mode of an episode.
///
/// The mode only decides how the episode is seeded, see [`derive_seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningMode {
    /// Episodes used to train the agent.
    Training,

    /// Episodes used to compare policies across generations.
    Validation,

    /// Episodes used to test the final policy.
    Testing,
}

impl LearningMode {
    /// All modes.
    pub const ALL: [LearningMode; 3] = [Self::Training, Self::Validation, Self::Testing];

    /// Tag of the mode, also used for hashing and parsing.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Validation => "validation",
            Self::Testing => "testing",
        }
    }
}

impl fmt::Display for LearningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for LearningMode {
    type Err = EnvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "training" => Ok(Self::Training),
            "validation" => Ok(Self::Validation),
            "testing" => Ok(Self::Testing),
            _ => Err(EnvError::UnknownMode(s.to_string())),
        }
    }
}

/// Derives the seed of an episode from the seed of the run and the learning mode.
///
/// The result is `hash(run_seed) ^ hash(mode)`, except for
/// [`LearningMode::Validation`] which always returns [`VALIDATION_SEED`].
pub fn derive_seed(run_seed: u64, mode: LearningMode) -> u64 {
    match mode {
        LearningMode::Validation => VALIDATION_SEED,
        _ => xxh3_64(&run_seed.to_le_bytes()) ^ xxh3_64(mode.tag().as_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_seed_is_reproducible() {
        for mode in LearningMode::ALL {
            assert_eq!(derive_seed(42, mode), derive_seed(42, mode));
        }
    }

    #[test]
    fn test_modes_differ_for_the_same_run_seed() {
        let training = derive_seed(7, LearningMode::Training);
        let testing = derive_seed(7, LearningMode::Testing);
        let validation = derive_seed(7, LearningMode::Validation);
        assert_ne!(training, testing);
        assert_ne!(training, validation);
        assert_ne!(testing, validation);
    }

    #[test]
    fn test_validation_is_pinned() {
        for seed in [0, 1, 17, u64::MAX] {
            assert_eq!(derive_seed(seed, LearningMode::Validation), VALIDATION_SEED);
        }
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!("training".parse::<LearningMode>(), Ok(LearningMode::Training));
        assert_eq!(
            "eval".parse::<LearningMode>(),
            Err(EnvError::UnknownMode("eval".to_string()))
        );
        assert_eq!(
            "Validation".parse::<LearningMode>(),
            Err(EnvError::UnknownMode("Validation".to_string()))
        );
    }

    #[test]
    fn test_parse_and_serde_accept_the_same_tags() {
        for tag in ["training", "validation", "testing", "Validation", "TESTING", " training"] {
            let parsed = tag.parse::<LearningMode>().ok();
            let deserialized = serde_yaml::from_str::<LearningMode>(&format!("'{}'", tag)).ok();
            assert_eq!(parsed, deserialized, "tag {:?}", tag);
        }
        for mode in LearningMode::ALL {
            assert_eq!(mode.tag().parse::<LearningMode>(), Ok(mode));
            assert!(serde_yaml::to_string(&mode).unwrap().contains(mode.tag()));
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected_by_serde() {
        let mode: LearningMode = serde_yaml::from_str("testing").unwrap();
        assert_eq!(mode, LearningMode::Testing);
        assert!(serde_yaml::from_str::<LearningMode>("warmup").is_err());
    }
}
