use glam::Vec3;

/// Hand landmark indices, MediaPipe 21-point hand model convention.
pub mod landmark {
    pub const WRIST: usize = 0;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

pub const LANDMARKS_PER_HAND: usize = 21;

/// One detected hand: all 21 landmarks in normalized image coordinates.
pub type LandmarkSet = [Vec3; LANDMARKS_PER_HAND];

/// Discrete classification of a hand pose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureLabel {
    #[default]
    Idle,
    Shield,
    Pierce,
    Summon,
}

impl GestureLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            GestureLabel::Idle => "IDLE",
            GestureLabel::Shield => "SHIELD",
            GestureLabel::Pierce => "PIERCE",
            GestureLabel::Summon => "SUMMON",
        }
    }
}

// A finger counts as extended when its tip sits farther from the wrist than
// its proximal joint does.
fn finger_extended(hand: &LandmarkSet, tip: usize, pip: usize) -> bool {
    let wrist = hand[landmark::WRIST];
    hand[tip].distance(wrist) > hand[pip].distance(wrist)
}

/// Classify a single hand pose. Pure and stateless; the caller guarantees a
/// full 21-point landmark set.
///
/// Fixed rule table, evaluated in priority order: a fist maps to `Shield`,
/// index+middle to `Pierce`, an open palm to `Summon`, and every ambiguous
/// combination falls through to `Idle`.
pub fn classify(hand: &LandmarkSet) -> GestureLabel {
    let index = finger_extended(hand, landmark::INDEX_TIP, landmark::INDEX_PIP);
    let middle = finger_extended(hand, landmark::MIDDLE_TIP, landmark::MIDDLE_PIP);
    let ring = finger_extended(hand, landmark::RING_TIP, landmark::RING_PIP);
    let pinky = finger_extended(hand, landmark::PINKY_TIP, landmark::PINKY_PIP);

    match (index, middle, ring, pinky) {
        (false, false, false, false) => GestureLabel::Shield,
        (true, true, false, false) => GestureLabel::Pierce,
        (true, true, true, true) => GestureLabel::Summon,
        _ => GestureLabel::Idle,
    }
}
