use super::*;
use crate::data::model::generate;
use crate::foundation::core::{Point, Size};
use crate::scale::set::ViewConfig;

fn scales(w: f64, h: f64, n: usize) -> ScaleSet {
    ScaleSet::derive(ViewConfig::new(Size::new(w, h)).unwrap(), n)
}

#[test]
fn mount_draws_one_element_per_ring_and_point() {
    let data = generate(3, &[4, 5, 6], || 0.5).unwrap();
    let mut surface = Surface::new();
    let (rings, points) = mount(
        &mut surface,
        &scales(800.0, 600.0, 3),
        &data,
        &MountOpts::default(),
        TimeMs(0),
    )
    .unwrap();

    assert_eq!(rings.len(), 3);
    assert_eq!(points.len(), 15);
    assert_eq!(surface.rings().len(), 3);
    assert_eq!(surface.marker_groups().len(), 3);
    assert_eq!(surface.marker_groups()[2].len(), 6);
    assert!(surface.markers().all(|m| m.radius == MARKER_RADIUS));
}

#[test]
fn mount_is_single_shot() {
    let data = generate(1, &[3], || 0.5).unwrap();
    let s = scales(200.0, 200.0, 1);
    let mut surface = Surface::new();
    mount(&mut surface, &s, &data, &MountOpts::default(), TimeMs(0)).unwrap();
    assert!(mount(&mut surface, &s, &data, &MountOpts::default(), TimeMs(0)).is_err());
    assert_eq!(surface.rings().len(), 1);
}

#[test]
fn rings_fade_in_sequentially() {
    let data = generate(4, &[3, 3, 3, 3], || 0.5).unwrap();
    let mut surface = Surface::new();
    mount(
        &mut surface,
        &scales(400.0, 400.0, 4),
        &data,
        &MountOpts::default(),
        TimeMs(0),
    )
    .unwrap();

    assert_eq!(stagger_delay_ms(0, 4), 0);
    assert_eq!(stagger_delay_ms(1, 4), 250);
    assert_eq!(stagger_delay_ms(3, 4), 750);

    let rings = surface.rings();
    assert_eq!(rings[0].opacity_at(TimeMs(0)), 0.0);
    assert_eq!(rings[0].opacity_at(TimeMs(375)), 0.5);
    assert_eq!(rings[1].opacity_at(TimeMs(250)), 0.0);
    assert_eq!(rings[1].opacity_at(TimeMs(1000)), 1.0);
    assert!(rings[3].opacity_at(TimeMs(1499)) < 1.0);
    assert_eq!(rings[3].opacity_at(TimeMs(1500)), 1.0);

    let m = &surface.marker_groups()[2][0];
    assert_eq!(m.opacity_at(TimeMs(500)), 0.0);
    assert_eq!(m.opacity_at(TimeMs(1250)), 1.0);
}

#[test]
fn markers_sit_on_their_ring_band() {
    let data = generate(2, &[4, 4], || 0.5).unwrap();
    let s = scales(800.0, 600.0, 2);
    let mut surface = Surface::new();
    mount(&mut surface, &s, &data, &MountOpts::default(), TimeMs(0)).unwrap();

    let first = &surface.marker_groups()[1][0];
    let r = s.per_ring(1).apply(0.5);
    assert!((first.center_at(TimeMs(0)) - Point::new(0.0, -r)).hypot() < 1e-9);

    let quarter = &surface.marker_groups()[1][1];
    assert!((quarter.center_at(TimeMs(0)) - Point::new(r, 0.0)).hypot() < 1e-9);
}

#[test]
fn axes_follow_tick_counts_and_label_rules() {
    let s = scales(800.0, 600.0, 3);
    let axes = build_axes(&s, &MountOpts::default());

    assert_eq!(axes.angular.len(), 12);
    let outer: Vec<&str> = axes.angular.iter().map(|t| t.outer_label.text.as_str()).collect();
    assert_eq!(outer[0], "0°");
    assert_eq!(outer[1], "30°");
    assert_eq!(outer[11], "330°");

    let inner: Vec<&str> = axes.angular.iter().map(|t| t.inner_label.text.as_str()).collect();
    assert_eq!(inner[0], "0°");
    assert_eq!(inner[1], "");
    assert_eq!(inner[3], "90°");
    assert_eq!(inner.iter().filter(|t| !t.is_empty()).count(), 4);
    assert_eq!(axes.angular[4].inner_label.id, "p-4");
    assert_eq!(axes.angular[4].outer_label.id, "po-4");

    assert_eq!(axes.circles.len(), 4);
    assert_eq!(axes.circles[0], s.outer_radius);
    assert_eq!(*axes.circles.last().unwrap(), s.inner_radius);
}

#[test]
fn few_angular_ticks_still_divide_into_quarters() {
    let s = scales(100.0, 100.0, 1);
    let opts = MountOpts {
        angular_ticks: 2,
        ..MountOpts::default()
    };
    let axes = build_axes(&s, &opts);
    assert_eq!(axes.angular.len(), 2);
    assert!((axes.angular[1].angle - TAU / 4.0).abs() < 1e-12);
}

#[test]
fn empty_dataset_draws_axes_only() {
    let data = generate(0, &[], || 0.5).unwrap();
    let mut surface = Surface::new();
    let (rings, points) = mount(
        &mut surface,
        &scales(300.0, 300.0, 0),
        &data,
        &MountOpts::default(),
        TimeMs(0),
    )
    .unwrap();
    assert!(rings.is_empty());
    assert!(points.is_empty());
    assert_eq!(surface.axes().angular.len(), 12);
    assert_eq!(surface.axes().circles.len(), 1);
}

#[test]
fn relayout_snaps_geometry_to_new_scales() {
    let data = generate(1, &[4], || 1.0).unwrap();
    let mut surface = Surface::new();
    mount(
        &mut surface,
        &scales(200.0, 200.0, 1),
        &data,
        &MountOpts::default(),
        TimeMs(0),
    )
    .unwrap();

    let bigger = scales(400.0, 400.0, 1);
    relayout(&mut surface, &bigger, &MountOpts::default());
    assert_eq!(surface.size(), Some(Size::new(400.0, 400.0)));
    assert_eq!(surface.rings()[0].radii_at(TimeMs(0)), vec![200.0; 4]);
    let m = &surface.marker_groups()[0][0];
    assert!((m.center_at(TimeMs(0)) - Point::new(0.0, -200.0)).hypot() < 1e-9);
    assert_eq!(surface.axes().circles[0], 200.0);
}
