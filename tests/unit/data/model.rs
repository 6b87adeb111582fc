use std::f64::consts::{FRAC_PI_2, PI};

use super::*;

fn scenario_one() -> Dataset {
    generate(3, &[4, 4, 4], || 0.5).unwrap()
}

#[test]
fn generate_assigns_ids_series_major() {
    let d = scenario_one();
    assert_eq!(d.series_count(), 3);
    assert_eq!(d.shape(), vec![4, 4, 4]);

    let ids: Vec<u64> = d.points().map(|p| p.id).collect();
    assert_eq!(ids, (0..12).collect::<Vec<_>>());
    for (i, s) in d.series.iter().enumerate() {
        assert!(s.points.iter().all(|p| p.ring == i && p.value == 0.5));
    }
}

#[test]
fn generate_rejects_mismatched_counts() {
    assert!(generate(2, &[3], || 0.0).is_err());
}

#[test]
fn generate_handles_empty_inputs() {
    let d = generate(0, &[], || 0.0).unwrap();
    assert_eq!(d.series_count(), 0);

    let d = generate(2, &[0, 3], || 0.1).unwrap();
    assert!(d.series[0].is_empty());
    assert_eq!(d.series[1].points[0].id, 0);
}

#[test]
fn mutate_updates_only_points_inside_the_window() {
    let d = scenario_one();
    let out = mutate(&d, MutationRange::new(0.0, PI), |_| 0.9);

    for s in &out.series {
        let values: Vec<f64> = s.points.iter().map(|p| p.value).collect();
        // angles 0, π/2, π, 3π/2; π sits on the inclusive end.
        assert_eq!(values, vec![0.9, 0.9, 0.9, 0.5]);
    }
    // Input snapshot is untouched.
    assert!(d.points().all(|p| p.value == 0.5));
}

#[test]
fn mutate_preserves_shape_ids_and_rings() {
    let mut v = 0.0;
    let d = generate(4, &[3, 8, 1, 5], || {
        v += 0.05;
        v
    })
    .unwrap();
    let out = mutate(&d, MutationRange::new(FRAC_PI_2, 4.0), |old| 1.0 - old);

    assert!(out.same_shape(&d));
    for (a, b) in d.points().zip(out.points()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.ring, b.ring);
    }
}

#[test]
fn mutate_applies_sampler_iff_angle_in_range() {
    let d = generate(3, &[5, 7, 9], || 0.25).unwrap();
    let range = MutationRange::new(1.0, 3.5);
    let out = mutate(&d, range, |old| old * 2.0);

    for (s_in, s_out) in d.series.iter().zip(&out.series) {
        for (j, (a, b)) in s_in.points.iter().zip(&s_out.points).enumerate() {
            let angle = angular_position(j, s_in.len());
            if range.start <= angle && angle <= range.end {
                assert_eq!(b.value, a.value * 2.0);
            } else {
                assert_eq!(b.value, a.value);
            }
        }
    }
}

#[test]
fn identity_sampler_is_idempotent() {
    let mut n = 0.0;
    let d = generate(3, &[3, 6, 2], || {
        n += 0.1;
        n
    })
    .unwrap();
    assert_eq!(mutate(&d, MutationRange::FULL, |old| old), d);
}

#[test]
fn range_degrees_round_trip_and_bounds_are_inclusive() {
    let r = MutationRange::from_degrees(45.0, 90.0);
    let (a, b) = r.to_degrees();
    assert!((a - 45.0).abs() < 1e-9 && (b - 90.0).abs() < 1e-9);
    assert!(r.contains(r.start));
    assert!(r.contains(r.end));
    assert!(!r.contains(r.end + 1e-9));
}
