use crate::constants::{
    FOCAL_BLEND_FACTOR, NOISE_AMPLITUDE, SPAWN_HALF_EXTENTS, SPAWN_Y_OFFSET, SPRING_STIFFNESS,
    VELOCITY_DAMPING,
};
use crate::formation::compute_offsets;
use crate::gesture::GestureLabel;
use glam::{EulerRot, Mat3, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;

/// Per-member transform handed to the renderer each tick.
#[derive(Clone, Copy, Debug)]
pub struct MemberTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

/// The sword swarm: fixed member count, per-member position/velocity, and a
/// shared focal point all formation offsets are anchored to.
///
/// Each tick blends every member toward its formation slot with a
/// spring-damper step plus a small deterministic shimmer, and orients it
/// along its own velocity.
pub struct Swarm {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    rotations: Vec<Quat>,
    offsets: Vec<Vec3>,
    focal: Vec3,
    state: GestureLabel,
    rng: StdRng,
}

impl Swarm {
    /// Build a swarm of `count` members scattered over the spawn volume with
    /// random orientations. `seed` drives all randomized layouts, so equal
    /// seeds reproduce the run exactly.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions: Vec<Vec3> = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 2.0 * SPAWN_HALF_EXTENTS.x,
                    (rng.gen::<f32>() - 0.5) * 2.0 * SPAWN_HALF_EXTENTS.y + SPAWN_Y_OFFSET,
                    (rng.gen::<f32>() - 0.5) * 2.0 * SPAWN_HALF_EXTENTS.z,
                )
            })
            .collect();
        let rotations = (0..count)
            .map(|_| {
                Quat::from_euler(
                    EulerRot::XYZ,
                    rng.gen::<f32>() * PI,
                    rng.gen::<f32>() * PI,
                    rng.gen::<f32>() * PI,
                )
            })
            .collect();
        let offsets = compute_offsets(GestureLabel::Idle, count, &mut rng);
        log::info!("swarm initialized with {count} swords");
        Self {
            velocities: vec![Vec3::ZERO; count],
            positions,
            rotations,
            offsets,
            focal: Vec3::ZERO,
            state: GestureLabel::Idle,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn state(&self) -> GestureLabel {
        self.state
    }

    pub fn focal_point(&self) -> Vec3 {
        self.focal
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn offsets(&self) -> &[Vec3] {
        &self.offsets
    }

    /// Switch the active formation. Offsets are rebuilt in full; per-member
    /// velocities carry over, so a transition mid-flight stays smooth while
    /// the layout snaps.
    pub fn set_state(&mut self, state: GestureLabel) {
        if self.state == state {
            return;
        }
        self.state = state;
        log::info!("swarm state: {}", state.as_str());
        self.offsets = compute_offsets(state, self.positions.len(), &mut self.rng);
    }

    /// Retarget the shared focal point. Each call closes a fixed fraction of
    /// the remaining distance; the blend is per call, not per unit time, so
    /// staleness in the hand feed only slows convergence.
    pub fn set_goal(&mut self, goal: Vec3) {
        self.focal += (goal - self.focal) * FOCAL_BLEND_FACTOR;
    }

    /// Advance every member by one step. `elapsed` is total scene time in
    /// seconds and only feeds the deterministic per-member shimmer.
    pub fn tick(&mut self, elapsed: f32) {
        for i in 0..self.positions.len() {
            // A member without a formation slot falls back to the focal
            // point alone.
            let offset = self.offsets.get(i).copied().unwrap_or(Vec3::ZERO);
            let target = offset + self.focal;

            let phase = i as f32;
            let force = (target - self.positions[i]) * SPRING_STIFFNESS;
            let noise = Vec3::new(
                (2.0 * elapsed + phase).sin(),
                (3.0 * elapsed + phase).cos(),
                (elapsed + phase).sin(),
            ) * NOISE_AMPLITUDE;

            let velocity = (self.velocities[i] + force + noise) * VELOCITY_DAMPING;
            self.velocities[i] = velocity;
            self.positions[i] += velocity;

            // Face the direction of travel; a stationary member keeps its
            // previous orientation rather than computing a degenerate
            // look-at.
            if let Some(dir) = velocity.try_normalize() {
                self.rotations[i] = look_along(dir);
            }
        }
    }

    /// Current per-member transforms, in stable member order.
    pub fn members(&self) -> impl Iterator<Item = MemberTransform> + '_ {
        self.positions
            .iter()
            .zip(&self.rotations)
            .map(|(&position, &rotation)| MemberTransform { position, rotation })
    }
}

// Orient +Z along `dir` (normalized), keeping roll stable against world up.
fn look_along(dir: Vec3) -> Quat {
    let x = Vec3::Y.cross(dir);
    if x.length_squared() < 1e-8 {
        // dir is (anti)parallel to up; any roll is as good as another
        return Quat::from_rotation_arc(Vec3::Z, dir);
    }
    let x = x.normalize();
    let y = dir.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, dir))
}
