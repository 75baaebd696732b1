use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(
        FrameRange::new(FrameIndex(3), FrameIndex(3))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    assert_eq!(Fps::new(60, 1).unwrap().as_f64(), 60.0);
}

#[test]
fn color_lerp_hits_endpoints_and_clamps() {
    let night = Rgba8::rgb(22, 31, 63);
    let day = Rgba8::rgb(158, 207, 218);
    assert_eq!(night.lerp(day, 0.0), night);
    assert_eq!(night.lerp(day, 1.0), day);
    assert_eq!(night.lerp(day, 2.0), day);
    assert_eq!(night.lerp(day, -1.0), night);

    let mid = night.lerp(day, 0.5);
    assert_eq!(mid, Rgba8::rgb(90, 119, 141));
}

#[test]
fn canvas_center_is_half_extent() {
    let c = Canvas {
        width: 1920,
        height: 1080,
    };
    assert_eq!(c.center(), Point::new(960.0, 540.0));
}
