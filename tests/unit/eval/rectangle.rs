use super::*;
use crate::config::ShortConfig;

fn actor() -> RectangleActor {
    RectangleActor::new(&Stage::build(&ShortConfig::default()).unwrap()).unwrap()
}

fn at(actor: &RectangleActor, time: f64) -> RectanglePose {
    actor.evaluate(&AnimationContext::new(time)).unwrap()
}

#[test]
fn waits_offstage_until_the_walk_in() {
    let a = actor();
    assert!(a.evaluate(&AnimationContext::new(2.99)).is_none());
    assert_eq!(at(&a, 3.0).position, OFFSTAGE);
    // The offstage bracket is closed at 5.
    assert_eq!(a.timeline().find(5.0).unwrap().name, "offstage");
    assert_eq!(at(&a, 5.0).position, OFFSTAGE);
}

#[test]
fn walk_in_settles_at_the_mark() {
    let a = actor();
    let mid = at(&a, 7.5);
    assert!(mid.position.x > OFFSTAGE.x && mid.position.x < WALK_START.x);
    assert!(mid.angle >= 0.0 && mid.angle <= 30f64.to_radians());

    let near_end = at(&a, 9.999);
    assert!((near_end.position - WALK_START).hypot() < 0.01);
    assert!(near_end.angle.abs() < 1e-6);
}

#[test]
fn idle_bob_fades_in_and_out() {
    let a = actor();
    assert_eq!(at(&a, 10.0).position, WALK_START);
    let bob = at(&a, 13.0).position.y - WALK_START.y;
    assert!((0.0..=30.0).contains(&bob));
    assert!((at(&a, 16.999).position.y - WALK_START.y).abs() < 0.1);
    assert_eq!(at(&a, 17.0).position, WALK_START);
}

#[test]
fn slow_jump_peaks_sixty_px_above_the_mark() {
    let a = actor();
    let peak = at(&a, 17.5);
    assert!((peak.position.y - (WALK_START.y - 60.0)).abs() < 1e-9);
    assert_eq!(at(&a, 25.0), RectanglePose::upright(WALK_START));
}

#[test]
fn grow_walk_ends_big_rotated_and_dark() {
    let a = actor();
    let start = at(&a, 31.0);
    assert_eq!(start.position, WALK_START);
    assert_eq!(start.scale, 1.0);
    assert_eq!(start.night_blend, 0.0);

    let end = at(&a, 34.0);
    assert_eq!(end.position, Point::new(960.0, 540.0));
    assert_eq!(end.scale, 4.0);
    assert_eq!(end.angle, FRAC_PI_2);
    assert_eq!(end.night_blend, 1.0);

    let fill = at(&a, 34.005);
    assert_eq!(fill.position, Point::ORIGIN);
    assert_eq!(fill.scale, 10.0);
    assert_eq!(at(&a, 500.0), fill);
}

#[test]
fn head_sits_215_px_above_center() {
    let pose = RectanglePose::upright(Point::new(10.0, 300.0));
    assert_eq!(pose.head(), Point::new(10.0, 85.0));
}
