use crate::constants::{HAND_DEPTH_SCALE, HAND_SPREAD_X, HAND_SPREAD_Y, HAND_Y_OFFSET};
use crate::gesture::{classify, landmark, GestureLabel, LandmarkSet};
use glam::Vec3;
use smallvec::SmallVec;

type GestureListener = Box<dyn FnMut(GestureLabel, Vec3)>;

/// Folds per-frame hand detections into a stable gesture label and a shared
/// pointer position in scene space.
///
/// The tracker owns the position estimate read by the swarm every tick, and
/// notifies subscribers only on label edges; repeated detections of the same
/// gesture are suppressed.
#[derive(Default)]
pub struct GestureTracker {
    label: GestureLabel,
    position: Vec3,
    ready: bool,
    listeners: SmallVec<[GestureListener; 1]>,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener invoked with `(label, position snapshot)` on every
    /// gesture edge. Any number of listeners may subscribe.
    pub fn subscribe(&mut self, listener: impl FnMut(GestureLabel, Vec3) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Currently tracked gesture label.
    pub fn label(&self) -> GestureLabel {
        self.label
    }

    /// Latest hand position estimate in scene space. Only meaningful once
    /// [`is_ready`](Self::is_ready) returns true.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// True once at least one frame has carried a detected hand.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Ingest one processed video frame (zero or more detected hands).
    ///
    /// The pointer position is the index/middle fingertip midpoint remapped
    /// into scene space, averaged over all hands in the frame. The frame's
    /// candidate label comes from the first hand classifying as non-idle;
    /// later hands never override it. A frame without hands quietly resets
    /// the label so the next detection registers as an edge again.
    pub fn ingest(&mut self, hands: &[LandmarkSet]) {
        if hands.is_empty() {
            self.label = GestureLabel::Idle;
            return;
        }

        let mut sum = Vec3::ZERO;
        let mut candidate = None;
        for hand in hands {
            sum += remap_to_scene(pointer_midpoint(hand));
            if candidate.is_none() {
                match classify(hand) {
                    GestureLabel::Idle => {}
                    label => candidate = Some(label),
                }
            }
        }
        self.position = sum / hands.len() as f32;
        self.ready = true;

        if let Some(label) = candidate {
            if label != self.label {
                self.label = label;
                log::info!("gesture detected: {}", label.as_str());
                let snapshot = self.position;
                for listener in &mut self.listeners {
                    listener(label, snapshot);
                }
            }
        }
    }
}

// Center of the "two finger" pointer: midpoint of index and middle tips.
fn pointer_midpoint(hand: &LandmarkSet) -> Vec3 {
    (hand[landmark::INDEX_TIP] + hand[landmark::MIDDLE_TIP]) * 0.5
}

fn remap_to_scene(p: Vec3) -> Vec3 {
    Vec3::new(
        (0.5 - p.x) * HAND_SPREAD_X,
        (0.5 - p.y) * HAND_SPREAD_Y + HAND_Y_OFFSET,
        -p.z * HAND_DEPTH_SCALE,
    )
}
