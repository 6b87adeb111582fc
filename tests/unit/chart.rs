use super::*;
use crate::data::model::{MutationRange, generate, mutate};

fn dataset() -> Dataset {
    generate(3, &[3, 8, 13], || 0.5).unwrap()
}

#[test]
fn unmeasured_viewport_skips_rendering() {
    let mut chart = RadialChart::default();
    assert!(!chart.on_viewport(Size::new(0.0, 0.0), &dataset(), TimeMs(0)).unwrap());
    assert!(!chart.is_mounted());
    assert_eq!(chart.mount_count(), 0);
    assert!(chart.render_svg(TimeMs(0), &Theme::default()).is_err());
}

#[test]
fn first_measured_size_mounts_exactly_once() {
    let mut chart = RadialChart::default();
    let data = dataset();
    chart.on_viewport(Size::new(0.0, 0.0), &data, TimeMs(0)).unwrap();
    chart.on_viewport(Size::new(800.0, 600.0), &data, TimeMs(10)).unwrap();
    chart.on_viewport(Size::new(800.0, 600.0), &data, TimeMs(20)).unwrap();
    assert_eq!(chart.mount_count(), 1);
    assert_eq!(chart.surface().rings().len(), 3);
}

#[test]
fn resize_refits_without_remounting() {
    let mut chart = RadialChart::default();
    let data = dataset();
    chart.on_viewport(Size::new(800.0, 600.0), &data, TimeMs(0)).unwrap();
    let generation = chart.surface().generation();

    chart.on_viewport(Size::new(400.0, 400.0), &data, TimeMs(100)).unwrap();
    assert_eq!(chart.mount_count(), 1);
    assert_eq!(chart.surface().generation(), generation);
    assert_eq!(chart.surface().size(), Some(Size::new(400.0, 400.0)));
    assert_eq!(chart.scales().unwrap().outer_radius, 200.0);
}

#[test]
fn update_before_mount_is_a_no_op() {
    let mut chart = RadialChart::default();
    chart
        .update(&dataset(), 800, CurveKind::Basis, TimeMs(0))
        .unwrap();
    assert!(!chart.is_mounted());
}

#[test]
fn update_transitions_to_new_values() {
    let mut chart = RadialChart::default();
    let data = dataset();
    chart.on_viewport(Size::new(800.0, 600.0), &data, TimeMs(0)).unwrap();
    let next = mutate(&data, MutationRange::FULL, |_| 1.0);
    chart
        .update(&next, 800, CurveKind::CardinalClosed, TimeMs(2000))
        .unwrap();

    let scales = chart.scales().unwrap();
    let ring = &chart.surface().rings()[2];
    assert_eq!(ring.curve, CurveKind::CardinalClosed);
    assert_eq!(ring.radii_at(TimeMs(2800)), vec![scales.per_ring(2).apply(1.0); 13]);
    assert_eq!(chart.mount_count(), 1);
}

#[test]
fn shape_change_remounts() {
    let mut chart = RadialChart::default();
    chart.on_viewport(Size::new(500.0, 500.0), &dataset(), TimeMs(0)).unwrap();
    let generation = chart.surface().generation();

    let bigger = generate(4, &[3, 8, 13, 18], || 0.2).unwrap();
    chart
        .update(&bigger, 800, CurveKind::Basis, TimeMs(3000))
        .unwrap();
    assert_eq!(chart.mount_count(), 2);
    assert_eq!(chart.surface().generation(), generation + 1);
    assert_eq!(chart.surface().rings().len(), 4);
    assert_eq!(chart.surface().markers().count(), 42);

    // Subsequent updates with the new shape transition normally.
    chart
        .update(&bigger, 800, CurveKind::Basis, TimeMs(4000))
        .unwrap();
    assert_eq!(chart.mount_count(), 2);
}

#[test]
fn gestures_need_a_mounted_chart() {
    let mut chart = RadialChart::default();
    let reset = ZoomGesture::Reset;
    assert_eq!(chart.handle_gesture(reset), None);
    chart.on_viewport(Size::new(300.0, 300.0), &dataset(), TimeMs(0)).unwrap();
    assert_eq!(chart.handle_gesture(reset), Some(ZoomTransform::IDENTITY));
}
