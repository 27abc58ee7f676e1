use crate::constants::{
    PIERCE_ANGLE_STEP, PIERCE_BASE_RADIUS, PIERCE_DEPTH, SCATTER_HALF_EXTENTS, SHIELD_RADIUS,
    SUMMON_RING_RADIUS_MIN, SUMMON_RING_RADIUS_SPAN, SUMMON_RING_THICKNESS,
};
use crate::gesture::GestureLabel;
use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

/// Compute one formation offset per swarm member for the given state.
///
/// Offsets are relative to the shared focal point and are always rebuilt in
/// full, never patched incrementally. `Shield` and `Pierce` are deterministic
/// given `count`; `Summon` and `Idle` draw their jitter from the supplied
/// `rng` so callers stay in control of reproducibility.
pub fn compute_offsets<R: Rng + ?Sized>(
    state: GestureLabel,
    count: usize,
    rng: &mut R,
) -> Vec<Vec3> {
    let mut offsets = Vec::with_capacity(count);
    for i in 0..count {
        let t = i as f32 / count as f32;
        let v = match state {
            GestureLabel::Shield => {
                // Fibonacci sphere: even coverage without clustering at the
                // poles.
                let phi = (1.0 - 2.0 * t).acos();
                let theta = PI * (1.0 + 5.0_f32.sqrt()) * i as f32;
                Vec3::new(
                    SHIELD_RADIUS * phi.sin() * theta.cos(),
                    SHIELD_RADIUS * phi.sin() * theta.sin(),
                    SHIELD_RADIUS * phi.cos(),
                )
            }
            GestureLabel::Summon => {
                let r = SUMMON_RING_RADIUS_MIN + rng.gen::<f32>() * SUMMON_RING_RADIUS_SPAN;
                let theta = t * 2.0 * PI;
                Vec3::new(
                    r * theta.cos(),
                    r * theta.sin(),
                    (rng.gen::<f32>() - 0.5) * SUMMON_RING_THICKNESS,
                )
            }
            GestureLabel::Pierce => {
                // Spiral cone converging into depth; the tip sits at the far
                // end.
                let z = t * PIERCE_DEPTH;
                let r = (1.0 - t) * PIERCE_BASE_RADIUS;
                let theta = i as f32 * PIERCE_ANGLE_STEP;
                Vec3::new(r * theta.cos(), r * theta.sin(), -z)
            }
            GestureLabel::Idle => Vec3::new(
                (rng.gen::<f32>() - 0.5) * 2.0 * SCATTER_HALF_EXTENTS.x,
                (rng.gen::<f32>() - 0.5) * 2.0 * SCATTER_HALF_EXTENTS.y,
                (rng.gen::<f32>() - 0.5) * 2.0 * SCATTER_HALF_EXTENTS.z,
            ),
        };
        offsets.push(v);
    }
    offsets
}
