//! Pure swarm logic for the sword swarm demo: hand-pose classification,
//! per-frame gesture tracking, formation layout, and the spring integrator
//! that moves every sword. Nothing in here touches the platform; the web
//! frontend in `swarm-web` drives these types from its frame loop and hands
//! the resulting transforms to the renderer.

pub mod constants;
pub mod formation;
pub mod gesture;
pub mod swarm;
pub mod tracker;

pub use formation::compute_offsets;
pub use gesture::{classify, GestureLabel, LandmarkSet, LANDMARKS_PER_HAND};
pub use swarm::{MemberTransform, Swarm};
pub use tracker::GestureTracker;
