//! Interface to the physics simulation of a legged robot.
use lenv_core::{EnvConfig, EnvError};
use std::fmt::Debug;
mod quadruped;
pub use quadruped::{QuadrupedConfig, QuadrupedSim};

/// Physics simulation of an articulated body.
///
/// The state is given in generalized coordinates: `nq` positions and `nv`
/// velocities. For a free-floating robot the first positions are the torso
/// position `x, y, z` followed by its orientation quaternion, the first
/// velocities are the linear and angular velocities of the torso.
///
/// A simulator is owned by exactly one environment.
pub trait Simulator: Sized {
    /// Configuration of the simulation.
    type Config: EnvConfig + Debug + PartialEq + Default;

    /// Builds the simulation in its nominal state.
    fn build(config: &Self::Config) -> Result<Self, EnvError>;

    /// Number of generalized positions.
    fn nq(&self) -> usize;

    /// Number of generalized velocities.
    fn nv(&self) -> usize;

    /// Number of actuators.
    fn nu(&self) -> usize;

    /// Number of bodies, the world included.
    fn nbody(&self) -> usize;

    /// Integration step in seconds.
    fn timestep(&self) -> f64;

    /// Range `(low, high)` of the controls.
    fn ctrl_range(&self) -> (f64, f64);

    /// Nominal generalized positions.
    fn init_qpos(&self) -> &[f64];

    /// Nominal generalized velocities.
    fn init_qvel(&self) -> &[f64];

    /// Overwrites the state.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ from `nq` and `nv`.
    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]);

    /// Sets the controls applied by the following steps, saturated to
    /// [`ctrl_range`](Simulator::ctrl_range).
    ///
    /// # Panics
    ///
    /// Panics if the length differs from `nu`.
    fn set_controls(&mut self, ctrl: &[f64]);

    /// Advances the simulation by one timestep.
    fn step(&mut self);

    /// Generalized positions.
    fn qpos(&self) -> &[f64];

    /// Generalized velocities.
    fn qvel(&self) -> &[f64];

    /// External forces acting on the bodies, `6 * nbody` values.
    ///
    /// Each body has 3 torque components followed by 3 force components.
    fn contact_forces(&self) -> &[f64];
}
