use glam::Vec3;

// Swarm motion tuning constants shared by the tracker, planner, and
// integrator.

// Spring-damper step per tick
pub const SPRING_STIFFNESS: f32 = 0.05;
pub const VELOCITY_DAMPING: f32 = 0.9;
pub const NOISE_AMPLITUDE: f32 = 0.01; // idle shimmer, deterministic per member

// Focal point blend per `set_goal` call (per call, not per unit time)
pub const FOCAL_BLEND_FACTOR: f32 = 0.1;

// Formation layout
pub const SHIELD_RADIUS: f32 = 3.0;
pub const SUMMON_RING_RADIUS_MIN: f32 = 5.0;
pub const SUMMON_RING_RADIUS_SPAN: f32 = 2.0;
pub const SUMMON_RING_THICKNESS: f32 = 1.0; // full z jitter width, so +/- 0.5
pub const PIERCE_DEPTH: f32 = 10.0;
pub const PIERCE_BASE_RADIUS: f32 = 1.5;
pub const PIERCE_ANGLE_STEP: f32 = 0.5; // radians per member, fixed
pub const SCATTER_HALF_EXTENTS: Vec3 = Vec3::new(7.5, 5.0, 5.0);

// Spawn volume for freshly constructed members
pub const SPAWN_HALF_EXTENTS: Vec3 = Vec3::new(10.0, 5.0, 5.0);
pub const SPAWN_Y_OFFSET: f32 = 5.0;

// Normalized-image to scene-space remap for the tracked hand position.
// Horizontal/vertical flip around the image center, depth negated and scaled.
pub const HAND_SPREAD_X: f32 = 20.0;
pub const HAND_SPREAD_Y: f32 = 10.0;
pub const HAND_Y_OFFSET: f32 = 5.0;
pub const HAND_DEPTH_SCALE: f32 = 20.0;
