use super::*;

#[test]
fn map_range_is_unclamped_and_handles_reversed_output() {
    assert_eq!(map_range(0.5, 0.0, 1.0, 10.0, 20.0), 15.0);
    assert_eq!(map_range(2.0, 0.0, 1.0, 10.0, 20.0), 30.0);
    assert_eq!(map_range(-1.0, -1.0, 1.0, -30.0, 30.0), -30.0);
    assert_eq!(map_range(0.25, 0.0, 1.0, 1.0, 0.0), 0.75);
    assert_eq!(map_range(5.0, 1.0, 1.0, 3.0, 4.0), 3.0);
}

#[test]
fn lerp_point_hits_endpoints() {
    let a = Point::new(-200.0, 600.0);
    let b = Point::new(800.0, 600.0);
    assert_eq!(lerp_point(a, b, 0.0), a);
    assert_eq!(lerp_point(a, b, 1.0), b);
    assert_eq!(lerp_point(a, b, 0.5), Point::new(300.0, 600.0));
}

#[test]
fn rng_is_deterministic() {
    let mut a = Rng64::new(123);
    let mut b = Rng64::new(123);
    for _ in 0..10 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn rng_range_stays_in_bounds() {
    let mut rng = Rng64::new(7);
    for _ in 0..1000 {
        let v = rng.range_f64(2.0, 15.0);
        assert!((2.0..=15.0).contains(&v));
    }
}

#[test]
fn noise_is_bounded_deterministic_and_continuous() {
    let mut prev = smooth_noise01(1000.0);
    let mut x = 1000.0;
    while x < 1010.0 {
        let v = smooth_noise01(x);
        assert!((0.0..=1.0).contains(&v));
        assert_eq!(v, smooth_noise01(x));
        assert!((v - prev).abs() < 0.05, "jump at x={x}");
        prev = v;
        x += 0.005;
    }
}

#[test]
fn noise_offsets_decorrelate_axes() {
    let a: Vec<f64> = (0..8).map(|i| smooth_noise01(1000.0 + f64::from(i))).collect();
    let b: Vec<f64> = (0..8).map(|i| smooth_noise01(2000.0 + f64::from(i))).collect();
    assert_ne!(a, b);
}
