//! Observation of the legged robot.
use lenv_core::Observation;

/// Dimension of the observation.
pub fn obs_dim(nq: usize, nv: usize, exclude_current_positions: bool) -> usize {
    if exclude_current_positions {
        nq.saturating_sub(2) + nv
    } else {
        nq + nv
    }
}

/// Writes `qpos` followed by `qvel` into `obs`.
///
/// With `exclude_current_positions`, the torso position `qpos[0..2]` is left
/// out. `buf` is a scratch buffer reused across calls. Values are copied as
/// they are, non-finite ones included.
pub fn extract(
    qpos: &[f64],
    qvel: &[f64],
    exclude_current_positions: bool,
    buf: &mut Vec<f64>,
    obs: &mut Observation,
) {
    let skip = if exclude_current_positions { 2 } else { 0 };
    buf.clear();
    buf.extend(qpos.iter().skip(skip).chain(qvel));
    obs.overwrite(buf);
}
