//! Health of the robot.

/// Returns `true` if the state is finite and the torso height `qpos[2]` lies in
/// `z_range` (inclusive).
///
/// A state without a torso height is unhealthy.
pub fn is_healthy(qpos: &[f64], qvel: &[f64], z_range: [f64; 2]) -> bool {
    if !qpos.iter().chain(qvel).all(|v| v.is_finite()) {
        return false;
    }
    match qpos.get(2) {
        Some(z) => z_range[0] <= *z && *z <= z_range[1],
        None => false,
    }
}
