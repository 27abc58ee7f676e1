use glam::Vec3;

// Scene and presentation tuning constants.

// Swarm construction
pub const SWORD_COUNT: usize = 50;
pub const SWARM_SEED: u64 = 42;

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 2.0, 10.0);
pub const CAMERA_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_FOV_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Gold sword material (0xffcc00)
pub const SWORD_COLOR: [f32; 3] = [1.0, 0.8, 0.0];

// Deep dark blue/black background (0x050510)
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0196,
    g: 0.0196,
    b: 0.0627,
    a: 1.0,
};

// Bloom: only bright things glow (the gold swords)
pub const BLOOM_STRENGTH: f32 = 1.0;
pub const BLOOM_THRESHOLD: f32 = 0.6;
