use super::*;

#[test]
fn millis_deltas_and_conversions() {
    let a = Millis::from_secs(1.5);
    assert_eq!(a, Millis(1500.0));
    assert_eq!(a.as_secs(), 1.5);

    let b = a.add_secs(0.4);
    assert!((b.since(a) - 400.0).abs() < 1e-9);
    assert!(a.since(b) < 0.0);
}

#[test]
fn canvas_default_is_portrait_and_validates() {
    let c = Canvas::default();
    assert!(c.height > c.width);
    c.validate().unwrap();

    let bad = Canvas {
        width: 0,
        height: 10,
    };
    assert!(bad.validate().is_err());
}
