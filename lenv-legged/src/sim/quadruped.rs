//! Reduced-order quadruped.
use super::Simulator;
use lenv_core::{EnvConfig, EnvError};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

const NQ: usize = 15;
const NV: usize = 14;
const NU: usize = 8;
const NBODY: usize = 14;
const N_LEGS: usize = 4;

/// Torso at height 0.75 with the identity orientation, hips straight, ankles bent.
const INIT_QPOS: [f64; NQ] = [
    0.0, 0.0, 0.75, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0, -1.0, 0.0, 1.0,
];

/// Direction of the legs in the torso frame.
const LEG_ANGLES: [f64; N_LEGS] = [FRAC_PI_4, 3.0 * FRAC_PI_4, 5.0 * FRAC_PI_4, 7.0 * FRAC_PI_4];

const HIP_RANGE: (f64, f64) = (-0.5236, 0.5236);
const ANKLE_RANGES: [(f64, f64); N_LEGS] = [
    (0.5236, 1.2217),
    (-1.2217, -0.5236),
    (-1.2217, -0.5236),
    (0.5236, 1.2217),
];

/// Range of hinge joint `j`, hips and ankles alternating leg by leg.
fn joint_range(j: usize) -> (f64, f64) {
    if j % 2 == 0 {
        HIP_RANGE
    } else {
        ANKLE_RANGES[j / 2]
    }
}

/// Body index of the foot of `leg`.
///
/// Bodies are the world, the torso, then hip, leg and foot of each leg.
fn foot_body(leg: usize) -> usize {
    4 + 3 * leg
}

/// Parameters of [`QuadrupedSim`].
///
/// The torso has unit mass and unit inertia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrupedConfig {
    /// Integration step in seconds.
    pub timestep: f64,

    /// Gravitational acceleration.
    pub gravity: f64,

    /// Horizontal distance from the center of the torso to the hips.
    pub hip_offset: f64,

    /// Length of a leg from the ankle to the foot.
    pub leg_length: f64,

    /// Angular acceleration of a joint per unit of control.
    pub joint_gain: f64,

    /// Viscous damping of the joints.
    pub joint_damping: f64,

    /// Stiffness of the ground under a foot.
    pub ground_stiffness: f64,

    /// Damping of the ground under a foot.
    pub ground_damping: f64,

    /// Horizontal force of a stance foot per unit of normal force and foot speed.
    pub traction: f64,

    /// Sliding friction of the torso per unit of normal force.
    pub friction: f64,

    /// Damping of the angular velocity of the torso.
    pub angular_damping: f64,
}

impl Default for QuadrupedConfig {
    fn default() -> Self {
        Self {
            timestep: 0.01,
            gravity: 9.81,
            hip_offset: 0.28,
            leg_length: 0.8,
            joint_gain: 60.0,
            joint_damping: 5.0,
            ground_stiffness: 400.0,
            ground_damping: 10.0,
            traction: 1.0,
            friction: 1.0,
            angular_damping: 5.0,
        }
    }
}

impl EnvConfig for QuadrupedConfig {
    fn validate(&self) -> Result<(), EnvError> {
        let params = [
            ("timestep", self.timestep),
            ("gravity", self.gravity),
            ("hip_offset", self.hip_offset),
            ("leg_length", self.leg_length),
            ("joint_gain", self.joint_gain),
            ("joint_damping", self.joint_damping),
            ("ground_stiffness", self.ground_stiffness),
            ("ground_damping", self.ground_damping),
            ("traction", self.traction),
            ("friction", self.friction),
            ("angular_damping", self.angular_damping),
        ];
        match params.iter().find(|(_, v)| !(v.is_finite() && *v >= 0.0)) {
            Some((name, v)) => Err(EnvError::Config(format!(
                "{} must be non-negative, got {}",
                name, v
            ))),
            None if self.timestep == 0.0 => {
                Err(EnvError::Config("timestep must be positive".to_string()))
            }
            None => Ok(()),
        }
    }
}

/// A four-legged robot on flat ground.
///
/// The torso is a free body (7 positions, 6 velocities) carried by four legs of
/// two hinges each, a hip sweeping the leg horizontally and an ankle lifting
/// it. Controls drive the 8 hinges directly. Feet below the ground are pushed up
/// by a spring-damper, and a stance foot swept by its hip pushes the torso the
/// other way.
///
/// The model is integrated with semi-implicit Euler steps. Roll and pitch are
/// only damped, the torso stays level on its legs.
#[derive(Debug, Clone)]
pub struct QuadrupedSim {
    config: QuadrupedConfig,
    qpos: Vec<f64>,
    qvel: Vec<f64>,
    ctrl: Vec<f64>,
    cfrc_ext: Vec<f64>,
    init_qvel: Vec<f64>,
}

impl QuadrupedSim {
    /// Controls applied by the next step.
    pub fn ctrl(&self) -> &[f64] {
        &self.ctrl
    }

    /// Heading of the torso around the vertical axis.
    pub fn yaw(&self) -> f64 {
        let (w, x, y, z) = (self.qpos[3], self.qpos[4], self.qpos[5], self.qpos[6]);
        (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z))
    }

    fn step_joints(&mut self) {
        let c = &self.config;
        for j in 0..NU {
            let (lo, hi) = joint_range(j);
            let acc = c.joint_gain * self.ctrl[j] - c.joint_damping * self.qvel[6 + j];
            let mut v = self.qvel[6 + j] + acc * c.timestep;
            let mut q = self.qpos[7 + j] + v * c.timestep;
            if q < lo {
                q = lo;
                v = v.max(0.0);
            } else if q > hi {
                q = hi;
                v = v.min(0.0);
            }
            self.qpos[7 + j] = q;
            self.qvel[6 + j] = v;
        }
    }

    /// Computes the ground forces on the feet, returns the total force and the
    /// yaw torque on the torso.
    fn ground_forces(&mut self) -> ([f64; 3], f64) {
        let yaw = self.yaw();
        let c = &self.config;
        let (z, vz) = (self.qpos[2], self.qvel[2]);
        let mut force = [0.0; 3];
        let mut torque = 0.0;

        self.cfrc_ext.iter_mut().for_each(|f| *f = 0.0);
        for leg in 0..N_LEGS {
            let hip = self.qpos[7 + 2 * leg];
            let ankle = self.qpos[8 + 2 * leg];
            let hip_vel = self.qvel[6 + 2 * leg];

            let depth = c.leg_length * ankle.sin().abs() - z;
            if depth <= 0.0 {
                continue;
            }
            let normal = (c.ground_stiffness * depth - c.ground_damping * vz).max(0.0);

            let reach = c.hip_offset + c.leg_length * ankle.cos().abs();
            let (sin, cos) = (LEG_ANGLES[leg] + hip + yaw).sin_cos();
            let push = -c.traction * normal * reach * hip_vel;
            let (fx, fy) = (-push * sin, push * cos);

            force[0] += fx;
            force[1] += fy;
            force[2] += normal;
            torque += reach * (cos * fy - sin * fx);

            let b = 6 * foot_body(leg);
            self.cfrc_ext[b + 3] = fx;
            self.cfrc_ext[b + 4] = fy;
            self.cfrc_ext[b + 5] = normal;
        }

        (force, torque)
    }
}

/// Integrates a unit quaternion `(w, x, y, z)` rotating at `omega` (world frame).
fn integrate_quaternion(q: &mut [f64], omega: &[f64], dt: f64) {
    let (w, x, y, z) = (q[0], q[1], q[2], q[3]);
    let (ox, oy, oz) = (omega[0], omega[1], omega[2]);
    q[0] += -0.5 * (ox * x + oy * y + oz * z) * dt;
    q[1] += 0.5 * (w * ox + oy * z - oz * y) * dt;
    q[2] += 0.5 * (w * oy + oz * x - ox * z) * dt;
    q[3] += 0.5 * (w * oz + ox * y - oy * x) * dt;

    let norm = q.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        q.iter_mut().for_each(|v| *v /= norm);
    }
}

impl Simulator for QuadrupedSim {
    type Config = QuadrupedConfig;

    fn build(config: &Self::Config) -> Result<Self, EnvError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            qpos: INIT_QPOS.to_vec(),
            qvel: vec![0.0; NV],
            ctrl: vec![0.0; NU],
            cfrc_ext: vec![0.0; 6 * NBODY],
            init_qvel: vec![0.0; NV],
        })
    }

    fn nq(&self) -> usize {
        NQ
    }

    fn nv(&self) -> usize {
        NV
    }

    fn nu(&self) -> usize {
        NU
    }

    fn nbody(&self) -> usize {
        NBODY
    }

    fn timestep(&self) -> f64 {
        self.config.timestep
    }

    fn ctrl_range(&self) -> (f64, f64) {
        (-1.0, 1.0)
    }

    fn init_qpos(&self) -> &[f64] {
        &INIT_QPOS
    }

    fn init_qvel(&self) -> &[f64] {
        &self.init_qvel
    }

    fn set_state(&mut self, qpos: &[f64], qvel: &[f64]) {
        self.qpos.copy_from_slice(qpos);
        self.qvel.copy_from_slice(qvel);
        self.cfrc_ext.iter_mut().for_each(|f| *f = 0.0);
    }

    fn set_controls(&mut self, ctrl: &[f64]) {
        let (lo, hi) = self.ctrl_range();
        self.ctrl.copy_from_slice(ctrl);
        self.ctrl.iter_mut().for_each(|u| *u = u.clamp(lo, hi));
    }

    fn step(&mut self) {
        self.step_joints();
        let (force, yaw_torque) = self.ground_forces();
        let c = &self.config;
        let dt = c.timestep;

        let acc = [
            force[0] - c.friction * force[2] * self.qvel[0],
            force[1] - c.friction * force[2] * self.qvel[1],
            force[2] - c.gravity,
        ];
        for (i, a) in acc.iter().enumerate() {
            self.qvel[i] += a * dt;
            self.qpos[i] += self.qvel[i] * dt;
        }

        self.qvel[3] -= c.angular_damping * self.qvel[3] * dt;
        self.qvel[4] -= c.angular_damping * self.qvel[4] * dt;
        self.qvel[5] += (yaw_torque - c.angular_damping * self.qvel[5]) * dt;
        integrate_quaternion(&mut self.qpos[3..7], &self.qvel[3..6], dt);
    }

    fn qpos(&self) -> &[f64] {
        &self.qpos
    }

    fn qvel(&self) -> &[f64] {
        &self.qvel
    }

    fn contact_forces(&self) -> &[f64] {
        &self.cfrc_ext
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled() -> QuadrupedSim {
        let mut sim = QuadrupedSim::build(&QuadrupedConfig::default()).unwrap();
        for _ in 0..300 {
            sim.step();
        }
        sim
    }

    #[test]
    fn test_dimensions() {
        let sim = QuadrupedSim::build(&QuadrupedConfig::default()).unwrap();
        assert_eq!(sim.qpos().len(), sim.nq());
        assert_eq!(sim.qvel().len(), sim.nv());
        assert_eq!(sim.init_qpos().len(), sim.nq());
        assert_eq!(sim.init_qvel().len(), sim.nv());
        assert_eq!(sim.ctrl().len(), sim.nu());
        assert_eq!(sim.contact_forces().len(), 6 * sim.nbody());
        assert_eq!(sim.nq() + sim.nv(), 29);
    }

    #[test]
    fn test_stands_on_its_legs() {
        let sim = settled();
        let z = sim.qpos()[2];
        assert!(z > 0.4 && z < 0.8, "torso height {}", z);
        assert!(sim.qvel()[2].abs() < 0.05);
        assert!(sim.qpos().iter().chain(sim.qvel()).all(|v| v.is_finite()));

        // The feet carry the weight of the torso.
        let fz = (0..N_LEGS)
            .map(|leg| sim.contact_forces()[6 * foot_body(leg) + 5])
            .sum::<f64>();
        assert!((fz - 9.81).abs() < 0.5, "normal force {}", fz);
        assert_eq!(sim.yaw(), 0.0);
    }

    #[test]
    fn test_joint_limits() {
        let mut sim = settled();
        for ctrl in [[1.0; NU], [-1.0; NU]] {
            sim.set_controls(&ctrl);
            for _ in 0..100 {
                sim.step();
                for j in 0..NU {
                    let (lo, hi) = joint_range(j);
                    let q = sim.qpos()[7 + j];
                    assert!(q >= lo && q <= hi);
                }
            }
        }
    }

    #[test]
    fn test_controls_are_saturated() {
        let mut sim = QuadrupedSim::build(&QuadrupedConfig::default()).unwrap();
        sim.set_controls(&[5.0, -5.0, 0.5, 0.0, 0.0, 0.0, 0.0, 1.0]);
        assert_eq!(sim.ctrl(), &[1.0, -1.0, 0.5, 0.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_hips_push_the_torso() {
        let mut sim = settled();
        let x = sim.qpos()[0];

        // Front legs sweep one way, back legs the other.
        sim.set_controls(&[1.0, 0.0, 1.0, 0.0, -1.0, 0.0, -1.0, 0.0]);
        for _ in 0..10 {
            sim.step();
        }
        assert!(sim.qpos()[0] > x);
        assert!(sim.qpos()[1].abs() < sim.qpos()[0] - x);
    }

    #[test]
    fn test_quaternion_stays_normalized() {
        let mut q = [1.0, 0.0, 0.0, 0.0];
        for _ in 0..1000 {
            integrate_quaternion(&mut q, &[0.3, -0.2, 1.0], 0.01);
        }
        let norm = q.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-12);
    }
}
