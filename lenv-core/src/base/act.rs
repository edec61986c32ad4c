//! Actions and action spaces.
use crate::EnvError;
use serde::{Deserialize, Serialize};

/// An action applied to a learning environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Index of an action in a discrete action space.
    Discrete(u64),

    /// A vector of controls in a continuous action space.
    Continuous(Vec<f64>),
}

impl From<u64> for Action {
    fn from(ix: u64) -> Self {
        Self::Discrete(ix)
    }
}

impl From<Vec<f64>> for Action {
    fn from(v: Vec<f64>) -> Self {
        Self::Continuous(v)
    }
}

/// The set of valid actions of an environment, fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActionSpace {
    /// Actions `0..n`.
    Discrete {
        /// The number of actions.
        n: u64,
    },

    /// Vectors of `dim` finite controls.
    ///
    /// `low` and `high` is the range of the controls accepted by the underlying
    /// simulation. Values outside of the range are saturated by the simulation,
    /// they are not rejected.
    Continuous {
        /// Dimension of the control vector.
        dim: usize,

        /// Lower bound of each control.
        low: f64,

        /// Upper bound of each control.
        high: f64,
    },
}

impl ActionSpace {
    /// Checks that `action` belongs to this space.
    ///
    /// Environments call this before mutating anything, so that an invalid action
    /// leaves the episode untouched.
    pub fn validate(&self, action: &Action) -> Result<(), EnvError> {
        match (self, action) {
            (Self::Discrete { n }, Action::Discrete(ix)) => {
                if ix < n {
                    Ok(())
                } else {
                    Err(EnvError::InvalidAction(format!(
                        "action index {} out of range 0..{}",
                        ix, n
                    )))
                }
            }
            (Self::Continuous { dim, .. }, Action::Continuous(v)) => {
                if v.len() != *dim {
                    Err(EnvError::InvalidAction(format!(
                        "expected {} controls, got {}",
                        dim,
                        v.len()
                    )))
                } else if let Some(i) = v.iter().position(|x| !x.is_finite()) {
                    Err(EnvError::InvalidAction(format!(
                        "control {} is not finite ({})",
                        i, v[i]
                    )))
                } else {
                    Ok(())
                }
            }
            (Self::Discrete { .. }, Action::Continuous(_)) => Err(EnvError::InvalidAction(
                "continuous action given to a discrete action space".to_string(),
            )),
            (Self::Continuous { .. }, Action::Discrete(_)) => Err(EnvError::InvalidAction(
                "discrete action given to a continuous action space".to_string(),
            )),
        }
    }
}
