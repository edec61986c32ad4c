//! Torque actions.
use lenv_core::{Action, ActionSpace, EnvError};

/// Decodes actions into torques.
///
/// In the discrete setting, with `n` buckets:
///
/// * `0` applies no torque,
/// * `1..=n` apply `bucket[i - 1] * max_torque`,
/// * `n + 1..=2n` apply `-bucket[i - n - 1] * max_torque`.
///
/// In the continuous setting the single control is the torque itself, saturated
/// to `[-max_torque, max_torque]`.
#[derive(Debug, Clone)]
pub struct TorqueActions {
    torques: Vec<f64>,
    max_torque: f64,
    space: ActionSpace,
}

impl TorqueActions {
    /// Discrete torques from the bucket set.
    pub fn discrete(buckets: &[f64], max_torque: f64) -> Self {
        let torques = std::iter::once(0.0)
            .chain(buckets.iter().map(|b| b * max_torque))
            .chain(buckets.iter().map(|b| -b * max_torque))
            .collect::<Vec<_>>();
        let space = ActionSpace::Discrete {
            n: torques.len() as u64,
        };
        Self {
            torques,
            max_torque,
            space,
        }
    }

    /// A single continuous torque.
    pub fn continuous(max_torque: f64) -> Self {
        Self {
            torques: vec![],
            max_torque,
            space: ActionSpace::Continuous {
                dim: 1,
                low: -max_torque,
                high: max_torque,
            },
        }
    }

    /// Returns the action space.
    pub fn space(&self) -> &ActionSpace {
        &self.space
    }

    /// Returns the torque of a validated action.
    pub fn torque(&self, action: &Action) -> Result<f64, EnvError> {
        self.space.validate(action)?;
        match action {
            Action::Discrete(ix) => Ok(self.torques[*ix as usize]),
            Action::Continuous(v) => Ok(v[0].clamp(-self.max_torque, self.max_torque)),
        }
    }
}
