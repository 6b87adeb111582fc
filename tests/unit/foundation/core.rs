use super::*;

#[test]
fn time_arithmetic_saturates() {
    assert_eq!(TimeMs(10).after(5), TimeMs(15));
    assert_eq!(TimeMs(u64::MAX).after(1), TimeMs(u64::MAX));
    assert_eq!(TimeMs(10).since(TimeMs(4)), 6);
    assert_eq!(TimeMs(4).since(TimeMs(10)), 0);
}

#[test]
fn unmeasured_sizes_are_rejected() {
    assert!(!Size::new(0.0, 0.0).is_measured());
    assert!(!Size::new(800.0, 0.0).is_measured());
    assert!(!Size::new(f64::NAN, 10.0).is_measured());
    assert!(Size::measured(-1.0, 10.0).is_err());

    let s = Size::measured(800.0, 600.0).unwrap();
    assert_eq!(s.half_min(), 300.0);
}
