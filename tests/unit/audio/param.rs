use super::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn intrinsic_value_applies_without_events() {
    let p = AudioParam::new(0.25);
    assert_eq!(p.value_at(0.0), 0.25);
    assert_eq!(p.value_at(100.0), 0.25);
}

#[test]
fn exponential_fade_in_shape() {
    let mut p = AudioParam::new(0.0001);
    p.set_value_at_time(0.0001, 0.0).unwrap();
    p.exponential_ramp_to_value_at_time(0.085, 2.2).unwrap();

    assert!(close(p.value_at(0.0), 0.0001));
    assert!(close(p.value_at(2.2), 0.085));
    assert!(close(p.value_at(10.0), 0.085));

    // Geometric midpoint at half time.
    let mid = p.value_at(1.1);
    assert!((mid - (0.0001f32 * 0.085).sqrt()).abs() < 1e-4);

    let mut prev = 0.0;
    for i in 0..=22 {
        let v = p.value_at(f64::from(i) * 0.1);
        assert!(v >= prev);
        prev = v;
    }
}

#[test]
fn exponential_ramp_rejects_zero_target() {
    let mut p = AudioParam::new(1.0);
    assert!(p.exponential_ramp_to_value_at_time(0.0, 1.0).is_err());
    assert!(p.set_value_at_time(1.0, -1.0).is_err());
    assert!(p.set_value_at_time(1.0, f64::NAN).is_err());
}

#[test]
fn capture_cancel_then_linear_fade_has_no_jump() {
    let mut p = AudioParam::new(0.0001);
    p.set_value_at_time(0.0001, 0.0).unwrap();
    p.exponential_ramp_to_value_at_time(0.085, 2.2).unwrap();

    // Fade out starting mid-ramp at t=1.0: capture, cancel, hold, ramp.
    let now = 1.0;
    let held = p.value_at(now);
    p.cancel_scheduled_values(now);
    p.set_value_at_time(held, now).unwrap();
    p.linear_ramp_to_value_at_time(0.0001, now + 2.4).unwrap();

    assert!(held > 0.0001 && held < 0.085);
    assert!(close(p.value_at(now), held));
    assert!(p.value_at(now + 1.2) < held);
    assert!(close(p.value_at(now + 2.4), 0.0001));
    assert_eq!(p.scheduled(), 3);
}

#[test]
fn linear_fade_from_plateau() {
    let mut p = AudioParam::new(0.085);
    p.set_value_at_time(0.085, 5.0).unwrap();
    p.linear_ramp_to_value_at_time(0.0001, 7.4).unwrap();

    assert!(close(p.value_at(5.0), 0.085));
    assert!(close(p.value_at(6.2), (0.085 + 0.0001) / 2.0));
    assert!(close(p.value_at(7.4), 0.0001));
    assert!(close(p.value_at(9.0), 0.0001));
}

#[test]
fn set_events_step_without_interpolation() {
    let mut p = AudioParam::new(0.0);
    p.set_value_at_time(1.0, 1.0).unwrap();
    p.set_value_at_time(2.0, 2.0).unwrap();
    assert_eq!(p.value_at(0.5), 0.0);
    assert_eq!(p.value_at(1.5), 1.0);
    assert_eq!(p.value_at(2.0), 2.0);
}
