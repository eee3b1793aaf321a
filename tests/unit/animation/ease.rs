use super::*;

const ALL: [Ease; 10] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::InSine,
    Ease::OutSine,
    Ease::InOutSine,
];

#[test]
fn endpoints_are_fixed() {
    for ease in ALL {
        assert!(ease.apply(0.0).abs() < 1e-9, "{ease:?} at 0");
        assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{ease:?} at 1");
    }
}

#[test]
fn linear_is_identity() {
    assert_eq!(Ease::Linear.apply(0.25), 0.25);
    assert_eq!(Ease::Linear.apply(0.75), 0.75);
}

#[test]
fn every_curve_is_monotone() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=100 {
            let v = ease.apply(f64::from(i) / 100.0);
            assert!(v >= prev - 1e-12, "{ease:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert!(ease.apply(-1.0).abs() < 1e-9);
        assert!((ease.apply(2.0) - 1.0).abs() < 1e-9);
    }
}

#[test]
fn in_out_pairs_meet_at_the_midpoint() {
    for ease in [Ease::InOutQuad, Ease::InOutCubic, Ease::InOutSine] {
        assert!((ease.apply(0.5) - 0.5).abs() < 1e-9, "{ease:?}");
    }
}
