use serde_json::json;

use super::*;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: ColorDef = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, ColorDef::rgba(1.0, 0.0, 0.0, 1.0));

    let c: ColorDef = serde_json::from_value(json!("#0000ff80")).unwrap();
    assert!((c.b - 1.0).abs() < 1e-9);
    assert!((c.a - (128.0 / 255.0)).abs() < 1e-9);

    assert!(ColorDef::from_hex("#12345").is_err());
}

#[test]
fn parses_rgba_object_array_and_hsla() {
    let c: ColorDef = serde_json::from_value(json!({"r": 0.25, "g": 0.5, "b": 0.75})).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 1.0));

    let c: ColorDef = serde_json::from_value(json!([0.25, 0.5, 0.75, 0.9])).unwrap();
    assert_eq!(c, ColorDef::rgba(0.25, 0.5, 0.75, 0.9));

    let c: ColorDef = serde_json::from_value(json!({"h": 0.0, "s": 1.0, "l": 0.5})).unwrap();
    assert!((c.r - 1.0).abs() < 1e-9 && c.g.abs() < 1e-9 && c.b.abs() < 1e-9);
}

#[test]
fn hex_output_round_trips_through_serde() {
    let c = ColorDef::from_hex("#4843a1").unwrap();
    assert_eq!(c.to_hex(), "#4843a1");
    let s = serde_json::to_string(&c).unwrap();
    let back: ColorDef = serde_json::from_str(&s).unwrap();
    assert_eq!(back.to_hex(), "#4843a1");

    let translucent = ColorDef::rgba(1.0, 1.0, 1.0, 0.5);
    assert_eq!(translucent.to_hex(), "#ffffff80");
    assert_eq!(translucent.to_hex_rgb(), "#ffffff");
}

#[test]
fn rainbow_endpoints_match_the_reference_palette() {
    // rainbow(0) and rainbow(1) are both rgb(110, 64, 170).
    assert_eq!(rainbow(0.0).to_hex_rgb(), "#6e40aa");
    assert_eq!(rainbow(1.0).to_hex_rgb(), "#6e40aa");
    // rainbow(0.5) is rgb(175, 240, 91).
    assert_eq!(rainbow(0.5).to_hex_rgb(), "#aff05b");
}

#[test]
fn rainbow_wraps_outside_unit_interval() {
    assert_eq!(rainbow(1.25), rainbow(0.25));
    assert_eq!(rainbow(-0.75), rainbow(0.25));
}

#[test]
fn ring_colors_are_distinct_per_ring() {
    let colors: Vec<String> = (0..6).map(|i| ring_color(i, 6).to_hex_rgb()).collect();
    for i in 0..colors.len() {
        for j in (i + 1)..colors.len() {
            assert_ne!(colors[i], colors[j]);
        }
    }
    // Degenerate ring counts do not divide by zero.
    let _ = ring_color(0, 0);
}
