use super::*;
use crate::eval::trapezoid::{LEFT_HINGE, RIGHT_HINGE};
use kurbo::{PathEl, Shape};

fn near(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn hinged_trapezoid_keeps_its_corner_on_the_hinge() {
    let left = TrapezoidPose {
        position: LEFT_HINGE,
        angle: 0.4,
        pivot: PivotSide::Left,
        scale: 1.0,
    };
    let xf = trapezoid_transform(&left);
    assert!(near(xf * TRAPEZOID_CORNERS[3], LEFT_HINGE));
    // Positive angles lift the right side (y grows downward on the canvas).
    assert!((xf * TRAPEZOID_CORNERS[2]).y < LEFT_HINGE.y);

    let right = TrapezoidPose {
        position: RIGHT_HINGE,
        angle: -0.4,
        pivot: PivotSide::Right,
        scale: 1.0,
    };
    let xf = trapezoid_transform(&right);
    assert!(near(xf * TRAPEZOID_CORNERS[2], RIGHT_HINGE));
    assert!((xf * TRAPEZOID_CORNERS[3]).y < RIGHT_HINGE.y);
}

#[test]
fn unhinged_trapezoid_is_centered_and_scaled() {
    let pose = TrapezoidPose {
        position: Point::new(100.0, 200.0),
        angle: 0.0,
        pivot: PivotSide::None,
        scale: 2.0,
    };
    let bbox = trapezoid_transform(&pose).transform_rect_bbox(trapezoid_path().bounding_box());
    assert!(near(Point::new(bbox.x0, bbox.y0), Point::new(0.0, 110.0)));
    assert!(near(Point::new(bbox.x1, bbox.y1), Point::new(200.0, 290.0)));
}

#[test]
fn rectangle_quarter_turn_swaps_extent() {
    let pose = RectanglePose {
        position: Point::new(500.0, 500.0),
        angle: std::f64::consts::FRAC_PI_2,
        scale: 1.0,
        night_blend: 0.0,
    };
    let bbox = rectangle_transform(&pose).transform_rect_bbox(RECTANGLE_RECT);
    assert!((bbox.width() - 400.0).abs() < 1e-9);
    assert!((bbox.height() - 240.0).abs() < 1e-9);
}

#[test]
fn crescent_outline_has_two_arcs() {
    let path = crescent_path();
    let elements: Vec<PathEl> = path.elements().to_vec();
    assert_eq!(elements.len(), 2 * 17 + 1);
    assert!(matches!(elements.first(), Some(PathEl::MoveTo(p)) if near(*p, Point::ORIGIN)));
    assert!(matches!(elements.last(), Some(PathEl::ClosePath)));

    let bbox = path.bounding_box();
    assert!((bbox.width() - 60.0).abs() < 1e-9);
    assert!((bbox.y0 + 30.0).abs() < 1e-9);
}

#[test]
fn crescent_is_centered_on_its_position() {
    let pose = CrescentPose {
        position: Point::new(300.0, 300.0),
        angle: 0.0,
    };
    let xf = crescent_transform(&pose);
    // The outer arc's top lands half its height above the position.
    assert!(near(xf * Point::new(30.0, -30.0), Point::new(300.0, 285.0)));
}

#[test]
fn polygon_of_nothing_is_empty() {
    assert!(polygon(&[]).elements().is_empty());
    assert_eq!(rect_path(RECTANGLE_RECT).elements().len(), 5);
}
