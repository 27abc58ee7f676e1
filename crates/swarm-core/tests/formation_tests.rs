// Host-side tests for the formation planner layouts.

use rand::rngs::StdRng;
use rand::SeedableRng;
use swarm_core::{compute_offsets, GestureLabel};

const COUNT: usize = 64;

#[test]
fn shield_is_a_deterministic_sphere() {
    let mut rng_a = StdRng::seed_from_u64(1);
    let mut rng_b = StdRng::seed_from_u64(999);
    let a = compute_offsets(GestureLabel::Shield, COUNT, &mut rng_a);
    let b = compute_offsets(GestureLabel::Shield, COUNT, &mut rng_b);
    assert_eq!(a.len(), COUNT);
    // The sphere layout ignores the rng entirely
    for (i, (va, vb)) in a.iter().zip(&b).enumerate() {
        assert_eq!(va, vb, "shield offset {i} depends on the rng");
        assert!(
            (va.length() - 3.0).abs() < 1e-4,
            "shield offset {i} off the radius-3 sphere: {va:?}"
        );
    }
}

#[test]
fn summon_offsets_lie_on_the_ring() {
    let mut rng = StdRng::seed_from_u64(7);
    let offsets = compute_offsets(GestureLabel::Summon, COUNT, &mut rng);
    for (i, v) in offsets.iter().enumerate() {
        let r = (v.x * v.x + v.y * v.y).sqrt();
        assert!(
            (5.0..7.0).contains(&r),
            "summon offset {i} radius {r} outside [5, 7)"
        );
        assert!(v.z.abs() <= 0.5, "summon offset {i} z {} exceeds 0.5", v.z);
    }
}

#[test]
fn summon_same_seed_reproduces() {
    let mut rng_a = StdRng::seed_from_u64(42);
    let mut rng_b = StdRng::seed_from_u64(42);
    let a = compute_offsets(GestureLabel::Summon, COUNT, &mut rng_a);
    let b = compute_offsets(GestureLabel::Summon, COUNT, &mut rng_b);
    assert_eq!(a, b);
}

#[test]
fn pierce_spirals_into_depth() {
    let mut rng_a = StdRng::seed_from_u64(1);
    let mut rng_b = StdRng::seed_from_u64(2);
    let a = compute_offsets(GestureLabel::Pierce, COUNT, &mut rng_a);
    let b = compute_offsets(GestureLabel::Pierce, COUNT, &mut rng_b);
    assert_eq!(a, b, "pierce layout must not depend on the rng");
    for (i, v) in a.iter().enumerate() {
        let t = i as f32 / COUNT as f32;
        assert!(
            (-10.0..=0.0).contains(&v.z),
            "pierce offset {i} z {} out of range",
            v.z
        );
        assert!((v.z - -t * 10.0).abs() < 1e-4);
        let r = (v.x * v.x + v.y * v.y).sqrt();
        assert!(
            (r - (1.0 - t) * 1.5).abs() < 1e-4,
            "pierce offset {i} radius {r} off the cone"
        );
    }
    // The cone converges: the last member sits tighter than the first
    let r_first = (a[0].x * a[0].x + a[0].y * a[0].y).sqrt();
    let r_last = {
        let v = a[COUNT - 1];
        (v.x * v.x + v.y * v.y).sqrt()
    };
    assert!(r_last < r_first);
}

#[test]
fn idle_scatter_stays_in_the_box() {
    let mut rng = StdRng::seed_from_u64(5);
    let offsets = compute_offsets(GestureLabel::Idle, COUNT, &mut rng);
    for (i, v) in offsets.iter().enumerate() {
        assert!(v.x.abs() <= 7.5, "idle offset {i} x out of bounds: {v:?}");
        assert!(v.y.abs() <= 5.0, "idle offset {i} y out of bounds: {v:?}");
        assert!(v.z.abs() <= 5.0, "idle offset {i} z out of bounds: {v:?}");
    }
}

#[test]
fn zero_members_yield_no_offsets() {
    let mut rng = StdRng::seed_from_u64(0);
    for state in [
        GestureLabel::Idle,
        GestureLabel::Shield,
        GestureLabel::Pierce,
        GestureLabel::Summon,
    ] {
        assert!(compute_offsets(state, 0, &mut rng).is_empty());
    }
}
