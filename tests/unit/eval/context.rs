use super::*;

#[test]
fn advance_accumulates_steps() {
    let mut clock = Clock::new(0.005).unwrap();
    for _ in 0..200 {
        clock.advance();
    }
    assert!((clock.time() - 1.0).abs() < 1e-9);
    assert_eq!(clock.context().time(), clock.time());
}

#[test]
fn skip_back_floors_at_zero() {
    let mut clock = Clock::new(0.005).unwrap();
    clock.seek(0.4);
    clock.skip_back();
    assert_eq!(clock.time(), 0.0);

    clock.skip_forward();
    clock.skip_forward();
    clock.skip_back();
    assert_eq!(clock.time(), 1.0);
}

#[test]
fn reset_and_seek_sanitize() {
    let mut clock = Clock::new(0.01).unwrap();
    clock.seek(12.5);
    clock.reset();
    assert_eq!(clock.time(), 0.0);

    clock.seek(f64::NAN);
    assert_eq!(clock.time(), 0.0);
    clock.seek(-3.0);
    assert_eq!(clock.time(), 0.0);
}

#[test]
fn rejects_bad_steps() {
    assert!(Clock::new(0.0).is_err());
    assert!(Clock::new(-0.1).is_err());
    assert!(Clock::new(f64::INFINITY).is_err());
}
