// Host-side tests for the swarm integrator and the end-to-end
// gesture-to-formation flow.

use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use swarm_core::gesture::landmark;
use swarm_core::{GestureLabel, GestureTracker, LandmarkSet, Swarm};

// All four fingers extended: every tip farther from the wrist than its
// proximal joint. The only pose these tests need.
fn open_palm() -> LandmarkSet {
    let mut h = [Vec3::ZERO; 21];
    let fingers = [
        (landmark::INDEX_TIP, landmark::INDEX_PIP, Vec3::X),
        (landmark::MIDDLE_TIP, landmark::MIDDLE_PIP, Vec3::Y),
        (
            landmark::RING_TIP,
            landmark::RING_PIP,
            Vec3::new(0.7071, 0.7071, 0.0),
        ),
        (
            landmark::PINKY_TIP,
            landmark::PINKY_PIP,
            Vec3::new(-0.7071, 0.7071, 0.0),
        ),
    ];
    for (tip, pip, dir) in fingers {
        h[pip] = dir;
        h[tip] = dir * 1.5;
    }
    h
}

#[test]
fn focal_point_converges_geometrically_without_overshoot() {
    let mut swarm = Swarm::new(1, 7);
    let goal = Vec3::new(4.0, -2.0, 6.0);
    let mut dist = swarm.focal_point().distance(goal);
    for step in 0..60 {
        swarm.set_goal(goal);
        let next = swarm.focal_point().distance(goal);
        assert!(
            (next - dist * 0.9).abs() < 1e-4,
            "step {step}: expected 10% of remaining distance closed, {dist} -> {next}"
        );
        // Never overshoots: every component stays on its starting side
        let d = swarm.focal_point() - goal;
        assert!(d.x <= 1e-6 && d.y >= -1e-6 && d.z <= 1e-6);
        dist = next;
    }
    assert!(dist < 0.05, "focal point failed to converge: {dist}");
}

#[test]
fn member_at_rest_moves_no_more_than_the_shimmer() {
    let mut swarm = Swarm::new(1, 3);
    // Drive the member into its formation slot with the shimmer frozen at a
    // fixed scene time.
    for _ in 0..1500 {
        swarm.tick(0.0);
    }
    let target = swarm.offsets()[0] + swarm.focal_point();
    let settled = swarm.positions()[0];
    assert!(
        settled.distance(target) < 0.5,
        "member did not settle near its slot: {} away",
        settled.distance(target)
    );

    swarm.tick(0.0);
    let moved = swarm.positions()[0].distance(settled);
    assert!(
        moved <= 0.011,
        "settled member moved {moved}, more than the shimmer amplitude"
    );
}

#[test]
fn state_transition_rebuilds_all_offsets() {
    let mut swarm = Swarm::new(32, 9);
    assert_eq!(swarm.state(), GestureLabel::Idle);

    swarm.set_state(GestureLabel::Shield);
    assert_eq!(swarm.offsets().len(), 32);
    for v in swarm.offsets() {
        assert!((v.length() - 3.0).abs() < 1e-4);
    }

    // Re-applying the active state is a no-op
    let before = swarm.offsets().to_vec();
    swarm.set_state(GestureLabel::Shield);
    assert_eq!(swarm.offsets(), &before[..]);
}

#[test]
fn summon_gesture_end_to_end() {
    let swarm = Rc::new(RefCell::new(Swarm::new(4, 3)));
    let mut tracker = GestureTracker::new();
    let swarm_sub = swarm.clone();
    tracker.subscribe(move |label, _| swarm_sub.borrow_mut().set_state(label));

    tracker.ingest(&[open_palm()]);
    assert_eq!(swarm.borrow().state(), GestureLabel::Summon);
    for v in swarm.borrow().offsets() {
        let r = (v.x * v.x + v.y * v.y).sqrt();
        assert!((5.0..7.0).contains(&r), "offset off the summon ring: {v:?}");
        assert!(v.z.abs() <= 0.5);
    }

    for step in 0..100 {
        let mut s = swarm.borrow_mut();
        s.set_goal(tracker.position());
        s.tick(step as f32 / 60.0);
    }
    let s = swarm.borrow();
    let focal = s.focal_point();
    for (i, p) in s.positions().iter().enumerate() {
        let d = p.distance(focal);
        assert!(
            d <= 8.5,
            "member {i} at distance {d} from the focal point after 100 ticks"
        );
    }
}

#[test]
fn no_hands_members_stay_in_the_scatter_box() {
    let mut swarm = Swarm::new(8, 11);
    // No hand ever detected: the focal point stays at the origin and the
    // idle scatter is the only target.
    for step in 0..50 {
        swarm.tick(step as f32 / 60.0);
    }
    let tol = 3.0;
    for (i, p) in swarm.positions().iter().enumerate() {
        assert!(p.x.abs() <= 7.5 + tol, "member {i} drifted out in x: {p:?}");
        assert!(p.y.abs() <= 5.0 + tol, "member {i} drifted out in y: {p:?}");
        assert!(p.z.abs() <= 5.0 + tol, "member {i} drifted out in z: {p:?}");
    }
}

#[test]
fn identical_seeds_reproduce_the_run() {
    let mut a = Swarm::new(16, 21);
    let mut b = Swarm::new(16, 21);
    a.set_state(GestureLabel::Summon);
    b.set_state(GestureLabel::Summon);
    for step in 0..30 {
        let t = step as f32 / 60.0;
        a.tick(t);
        b.tick(t);
    }
    assert_eq!(a.positions(), b.positions());
    assert_eq!(a.offsets(), b.offsets());
}
