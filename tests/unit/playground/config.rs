use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = PlaygroundConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, PlaygroundConfig::default());
    assert_eq!(cfg.rings, 30);
    assert_eq!(cfg.tick_ms, 800);
    assert_eq!(cfg.curve, CurveKind::CardinalClosed);
    assert_eq!(cfg.angular_ticks, 12);
    assert!(!cfg.start);
}

#[test]
fn default_point_counts_grow_by_five() {
    let cfg = PlaygroundConfig {
        rings: 4,
        ..PlaygroundConfig::default()
    };
    assert_eq!(cfg.resolved_point_counts(), vec![3, 8, 13, 18]);
}

#[test]
fn fields_parse_from_json() {
    let cfg = PlaygroundConfig::from_json_str(
        r##"{
            "rings": 2,
            "point_counts": [4, 6],
            "curve": "catmull-rom-closed",
            "tick_ms": 300,
            "preset": 3,
            "start": true,
            "seed": 42,
            "theme": { "background": [0, 0, 0], "label": "#ff0000" }
        }"##,
    )
    .unwrap();
    assert_eq!(cfg.resolved_point_counts(), vec![4, 6]);
    assert_eq!(cfg.curve, CurveKind::CatmullRomClosed);
    assert_eq!(cfg.resolved_range(), mutation_presets()[3].range);
    assert!(cfg.start);
    assert_eq!(cfg.theme.label.to_hex(), "#ff0000");
}

#[test]
fn custom_degrees_override_preset() {
    let cfg = PlaygroundConfig {
        preset: 5,
        range_deg: Some([10.0, 20.0]),
        ..PlaygroundConfig::default()
    };
    let r = cfg.resolved_range();
    assert!((r.start - 10f64.to_radians()).abs() < 1e-12);
    assert!((r.end - 20f64.to_radians()).abs() < 1e-12);
}

#[test]
fn invalid_configs_are_rejected() {
    for json in [
        r#"{"rings": 2, "point_counts": [1]}"#,
        r#"{"initial_value": 1.5}"#,
        r#"{"tick_ms": 2100}"#,
        r#"{"preset": 9}"#,
        r#"{"range_deg": [0, 400]}"#,
        r#"{"width": 0}"#,
    ] {
        let err = PlaygroundConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, RingscopeError::Validation(_)), "{json}");
    }
    assert!(matches!(
        PlaygroundConfig::from_json_str(r#"{"bogus": 1}"#),
        Err(RingscopeError::Serde(_))
    ));
    assert!(PlaygroundConfig::from_json_str(r#"{"curve": "spiral"}"#).is_err());
}

#[test]
fn presets_cover_full_circle_then_octants() {
    let presets = mutation_presets();
    assert_eq!(presets.len(), PRESET_COUNT);
    assert_eq!(presets[0].label, "[0, 360]");
    assert_eq!(presets[0].range, MutationRange::FULL);
    assert_eq!(presets[1].label, "[0, 45)");
    assert_eq!(presets[2].label, "[45, 90)");
    assert_eq!(presets[8].label, "[315, 360]");
    assert!((presets[8].range.end - TAU).abs() < 1e-12);
    // Adjacent windows share their boundary.
    assert_eq!(presets[1].range.end, presets[2].range.start);
}

#[test]
fn missing_file_reports_path() {
    let err = PlaygroundConfig::from_path(Path::new("/nonexistent/ringscope.json")).unwrap_err();
    assert!(err.to_string().contains("ringscope.json"));
}
