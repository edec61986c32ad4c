//! Reward of the legged robot.
use crate::LeggedConfig;
use lenv_core::record::{Record, RecordValue};

/// Sub-terms of the reward of a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reward {
    /// Velocity of the torso along `x` over the step.
    pub forward: f64,

    /// Viability bonus.
    pub healthy: f64,

    /// Cost of the controls.
    pub ctrl_cost: f64,

    /// Cost of the external forces, `0` unless contact forces are used.
    pub contact_cost: f64,
}

impl Reward {
    /// Total reward, `forward + healthy - ctrl_cost - contact_cost`.
    pub fn total(&self) -> f64 {
        self.forward + self.healthy - self.ctrl_cost - self.contact_cost
    }

    /// Returns the sub-terms and the total in a [`Record`].
    pub fn to_record(&self) -> Record {
        Record::from_slice(&[
            ("reward", RecordValue::Scalar(self.total())),
            ("forward_reward", RecordValue::Scalar(self.forward)),
            ("healthy_reward", RecordValue::Scalar(self.healthy)),
            ("ctrl_cost", RecordValue::Scalar(self.ctrl_cost)),
            ("contact_cost", RecordValue::Scalar(self.contact_cost)),
        ])
    }
}

/// Weighted sum of the reward sub-terms. Pure, it only reads its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardModel {
    /// Duration of a step, `timestep * frame_skip`.
    pub dt: f64,

    /// Weight of the control cost.
    pub ctrl_cost_weight: f64,

    /// If `true`, the contact cost is charged.
    pub use_contact_forces: bool,

    /// Weight of the contact cost.
    pub contact_cost_weight: f64,

    /// Range each force component is clamped to.
    pub contact_force_range: [f64; 2],

    /// Viability bonus.
    pub healthy_reward: f64,

    /// If `false`, the viability bonus is also paid to an unhealthy robot.
    pub terminate_when_unhealthy: bool,
}

impl RewardModel {
    /// Builds the model of an environment whose steps last `dt` seconds.
    pub fn new<C>(config: &LeggedConfig<C>, dt: f64) -> Self {
        Self {
            dt,
            ctrl_cost_weight: config.ctrl_cost_weight,
            use_contact_forces: config.use_contact_forces,
            contact_cost_weight: config.contact_cost_weight,
            contact_force_range: config.contact_force_range,
            healthy_reward: config.healthy_reward,
            terminate_when_unhealthy: config.terminate_when_unhealthy,
        }
    }

    /// Evaluates the step moving the torso from `x_before` to `x_after` with
    /// `action`.
    pub fn reward(
        &self,
        x_before: f64,
        x_after: f64,
        healthy: bool,
        action: &[f64],
        contact_forces: &[f64],
    ) -> Reward {
        Reward {
            forward: (x_after - x_before) / self.dt,
            healthy: self.healthy(healthy),
            ctrl_cost: self.ctrl_cost(action),
            contact_cost: if self.use_contact_forces {
                self.contact_cost(contact_forces)
            } else {
                0.0
            },
        }
    }

    /// Viability bonus.
    pub fn healthy(&self, healthy: bool) -> f64 {
        if healthy || !self.terminate_when_unhealthy {
            self.healthy_reward
        } else {
            0.0
        }
    }

    /// `ctrl_cost_weight * sum(a^2)` on the raw action.
    pub fn ctrl_cost(&self, action: &[f64]) -> f64 {
        self.ctrl_cost_weight * action.iter().map(|a| a * a).sum::<f64>()
    }

    /// `contact_cost_weight * sum(clamp(f)^2)`.
    pub fn contact_cost(&self, contact_forces: &[f64]) -> f64 {
        let [lo, hi] = self.contact_force_range;
        self.contact_cost_weight
            * contact_forces
                .iter()
                .map(|f| f.clamp(lo, hi).powi(2))
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> RewardModel {
        RewardModel::new(&LeggedConfig::<()>::with_sim(()), 0.05)
    }

    #[test]
    fn test_sub_terms() {
        let model = model();
        let r = model.reward(1.0, 1.1, true, &[1.0, -2.0], &[]);
        assert!((r.forward - 2.0).abs() < 1e-12);
        assert_eq!(r.healthy, 1.0);
        assert_eq!(r.ctrl_cost, 0.5 * 5.0);
        assert_eq!(r.contact_cost, 0.0);
        assert!((r.total() - (2.0 + 1.0 - 2.5)).abs() < 1e-12);
    }

    #[test]
    fn test_contact_cost_is_clamped() {
        let model = RewardModel {
            use_contact_forces: true,
            ..model()
        };
        let r = model.reward(0.0, 0.0, true, &[], &[3.0, -0.5, -7.0]);
        assert_eq!(r.contact_cost, 5e-4 * (1.0 + 0.25 + 1.0));
    }

    #[test]
    fn test_viability_bonus() {
        let mut model = model();
        assert_eq!(model.healthy(true), 1.0);
        assert_eq!(model.healthy(false), 0.0);

        model.terminate_when_unhealthy = false;
        assert_eq!(model.healthy(false), 1.0);
    }

    #[test]
    fn test_reward_is_pure() {
        let model = model();
        let action = [0.3, -0.1];
        let forces = [0.5; 6];
        let a = model.reward(0.2, 0.4, false, &action, &forces);
        let b = model.reward(0.2, 0.4, false, &action, &forces);
        assert_eq!(a, b);
        assert_eq!(action, [0.3, -0.1]);
    }
}
