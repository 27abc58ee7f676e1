// Host-side tests for the landmark classifier and the gesture tracker.

use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use swarm_core::gesture::landmark;
use swarm_core::{classify, GestureLabel, GestureTracker, LandmarkSet};

/// Build a synthetic 21-point hand with the given fingers extended.
///
/// The wrist sits at the origin; each finger's proximal joint sits at unit
/// distance and its tip beyond (extended) or short of (curled) that joint.
fn hand(index: bool, middle: bool, ring: bool, pinky: bool) -> LandmarkSet {
    let mut h = [Vec3::ZERO; 21];
    let fingers = [
        (landmark::INDEX_TIP, landmark::INDEX_PIP, Vec3::X, index),
        (landmark::MIDDLE_TIP, landmark::MIDDLE_PIP, Vec3::Y, middle),
        (
            landmark::RING_TIP,
            landmark::RING_PIP,
            Vec3::new(0.7071, 0.7071, 0.0),
            ring,
        ),
        (
            landmark::PINKY_TIP,
            landmark::PINKY_PIP,
            Vec3::new(-0.7071, 0.7071, 0.0),
            pinky,
        ),
    ];
    for (tip, pip, dir, extended) in fingers {
        h[pip] = dir;
        h[tip] = dir * if extended { 1.5 } else { 0.5 };
    }
    h
}

fn fist() -> LandmarkSet {
    hand(false, false, false, false)
}

fn two_finger_point() -> LandmarkSet {
    hand(true, true, false, false)
}

fn open_palm() -> LandmarkSet {
    hand(true, true, true, true)
}

#[test]
fn classifier_rule_table() {
    assert_eq!(classify(&fist()), GestureLabel::Shield);
    assert_eq!(classify(&two_finger_point()), GestureLabel::Pierce);
    assert_eq!(classify(&open_palm()), GestureLabel::Summon);
    assert_eq!(classify(&hand(true, false, false, false)), GestureLabel::Idle);
}

#[test]
fn classifier_ambiguous_combinations_fall_through_to_idle() {
    for bits in 0u8..16 {
        let fingers = [
            bits & 1 != 0,
            bits & 2 != 0,
            bits & 4 != 0,
            bits & 8 != 0,
        ];
        let expected = match fingers {
            [false, false, false, false] => GestureLabel::Shield,
            [true, true, false, false] => GestureLabel::Pierce,
            [true, true, true, true] => GestureLabel::Summon,
            _ => GestureLabel::Idle,
        };
        let h = hand(fingers[0], fingers[1], fingers[2], fingers[3]);
        assert_eq!(
            classify(&h),
            expected,
            "wrong label for finger combination {fingers:?}"
        );
    }
}

#[test]
fn classifier_is_pure_and_deterministic() {
    let h = two_finger_point();
    let first = classify(&h);
    for _ in 0..10 {
        assert_eq!(classify(&h), first);
    }
}

fn recording_tracker() -> (GestureTracker, Rc<RefCell<Vec<(GestureLabel, Vec3)>>>) {
    let mut tracker = GestureTracker::new();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    tracker.subscribe(move |label, pos| sink.borrow_mut().push((label, pos)));
    (tracker, events)
}

#[test]
fn tracker_emits_once_for_repeated_label() {
    let (mut tracker, events) = recording_tracker();
    for _ in 0..5 {
        tracker.ingest(&[open_palm()]);
    }
    let events = events.borrow();
    assert_eq!(events.len(), 1, "repeated SUMMON frames must emit once");
    assert_eq!(events[0].0, GestureLabel::Summon);
}

#[test]
fn tracker_emits_on_each_edge() {
    let (mut tracker, events) = recording_tracker();
    tracker.ingest(&[open_palm()]);
    tracker.ingest(&[fist()]);
    tracker.ingest(&[fist()]);
    tracker.ingest(&[two_finger_point()]);
    let labels: Vec<_> = events.borrow().iter().map(|(l, _)| *l).collect();
    assert_eq!(
        labels,
        vec![
            GestureLabel::Summon,
            GestureLabel::Shield,
            GestureLabel::Pierce
        ]
    );
}

#[test]
fn tracker_empty_frame_resets_label_without_emitting() {
    let (mut tracker, events) = recording_tracker();
    tracker.ingest(&[fist()]);
    tracker.ingest(&[]);
    assert_eq!(tracker.label(), GestureLabel::Idle);
    assert_eq!(events.borrow().len(), 1, "losing the hand must not emit");

    // The same gesture reappearing is an edge again
    tracker.ingest(&[fist()]);
    assert_eq!(events.borrow().len(), 2);
}

#[test]
fn tracker_first_non_idle_hand_wins() {
    let (mut tracker, events) = recording_tracker();
    tracker.ingest(&[two_finger_point(), open_palm()]);
    assert_eq!(tracker.label(), GestureLabel::Pierce);
    let events = events.borrow();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, GestureLabel::Pierce);
}

#[test]
fn tracker_idle_hands_leave_label_unchanged() {
    let (mut tracker, events) = recording_tracker();
    tracker.ingest(&[fist()]);
    tracker.ingest(&[hand(false, false, true, false)]); // ambiguous -> IDLE
    assert_eq!(tracker.label(), GestureLabel::Shield);
    assert_eq!(events.borrow().len(), 1);
}

#[test]
fn tracker_ready_flag_and_position_remap() {
    let mut tracker = GestureTracker::new();
    assert!(!tracker.is_ready());

    // open_palm puts the index tip at 1.5*X and the middle tip at 1.5*Y, so
    // the pointer midpoint is (0.75, 0.75, 0).
    tracker.ingest(&[open_palm()]);
    assert!(tracker.is_ready());
    let p = tracker.position();
    assert!((p.x - -5.0).abs() < 1e-5, "x remap, got {p:?}");
    assert!((p.y - 2.5).abs() < 1e-5, "y remap, got {p:?}");
    assert!(p.z.abs() < 1e-5, "z remap, got {p:?}");

    // Losing the hand keeps the flag and the last estimate
    tracker.ingest(&[]);
    assert!(tracker.is_ready());
    assert_eq!(tracker.position(), p);
}

#[test]
fn tracker_averages_positions_over_hands() {
    let mut tracker = GestureTracker::new();
    let mut near = fist();
    near[landmark::INDEX_TIP] = Vec3::new(0.2, 0.4, 0.0);
    near[landmark::MIDDLE_TIP] = Vec3::new(0.2, 0.4, 0.0);
    let mut far = fist();
    far[landmark::INDEX_TIP] = Vec3::new(0.8, 0.6, 0.0);
    far[landmark::MIDDLE_TIP] = Vec3::new(0.8, 0.6, 0.0);

    tracker.ingest(&[near, far]);
    let p = tracker.position();
    // Midpoints remap to (6, 6, 0) and (-6, 4, 0); the estimate is the mean.
    assert!((p.x - 0.0).abs() < 1e-4, "got {p:?}");
    assert!((p.y - 5.0).abs() < 1e-4, "got {p:?}");
}
