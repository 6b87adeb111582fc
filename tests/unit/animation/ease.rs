use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::QuadIn,
    Ease::QuadOut,
    Ease::QuadInOut,
    Ease::CubicIn,
    Ease::CubicOut,
    Ease::CubicInOut,
    Ease::SinInOut,
];

#[test]
fn every_ease_pins_the_endpoints() {
    for e in ALL {
        assert!(e.apply(0.0).abs() < 1e-12, "{e:?}");
        assert!((e.apply(1.0) - 1.0).abs() < 1e-12, "{e:?}");
    }
}

#[test]
fn progress_is_clamped() {
    assert_eq!(Ease::Linear.apply(-1.0), 0.0);
    assert_eq!(Ease::CubicOut.apply(3.0), 1.0);
}

#[test]
fn symmetric_eases_cross_half_at_half() {
    for e in [Ease::QuadInOut, Ease::CubicInOut, Ease::SinInOut, Ease::Linear] {
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12, "{e:?}");
    }
    assert!(Ease::QuadIn.apply(0.5) < 0.5);
    assert!(Ease::QuadOut.apply(0.5) > 0.5);
}

#[test]
fn default_is_linear() {
    assert_eq!(Ease::default(), Ease::Linear);
}
