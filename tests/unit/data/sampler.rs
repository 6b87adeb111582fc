use super::*;

#[test]
fn uniform_samples_stay_in_unit_interval() {
    let mut s = IrwinHall::uniform(7);
    for _ in 0..1000 {
        let v = s.sample();
        assert!((0.0..1.0).contains(&v));
    }
}

#[test]
fn same_seed_same_sequence() {
    let mut a = IrwinHall::uniform(42);
    let mut b = IrwinHall::uniform(42);
    for _ in 0..16 {
        assert_eq!(a.sample(), b.sample());
    }
}

#[test]
fn sum_of_n_is_bounded_by_n() {
    let mut s = IrwinHall::new(3, 1).unwrap();
    for _ in 0..200 {
        let v = s.sample();
        assert!((0.0..3.0).contains(&v));
    }
    assert!(IrwinHall::new(0, 1).is_err());
}
