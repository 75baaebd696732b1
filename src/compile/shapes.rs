//! Local-space outlines of the actors and the transforms that place them on the canvas.

use std::f64::consts::PI;

use crate::eval::crescent::CrescentPose;
use crate::eval::rectangle::RectanglePose;
use crate::eval::trapezoid::TrapezoidPose;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::foundation::math::map_range;
use crate::stage::window::PivotSide;

/// Trapezoid corners: narrow top, wide base, centered on the origin.
pub const TRAPEZOID_CORNERS: [Point; 4] = [
    Point::new(-40.0, -45.0),
    Point::new(40.0, -45.0),
    Point::new(50.0, 45.0),
    Point::new(-50.0, 45.0),
];

/// Rectangle outline centered on the origin: 240 wide, 400 tall.
pub const RECTANGLE_RECT: Rect = Rect::new(-120.0, -200.0, 120.0, 200.0);

const CRESCENT_WIDTH: f64 = 60.0;
const CRESCENT_OUTER_HEIGHT: f64 = 30.0;
const CRESCENT_INNER_HEIGHT: f64 = 16.0;
const CRESCENT_SEGMENTS: u32 = 16;

/// Closed polygon through `points`.
pub fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    if let Some(&first) = iter.next() {
        path.move_to(first);
        for &p in iter {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

pub fn rect_path(rect: Rect) -> BezPath {
    polygon(&[
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ])
}

pub fn trapezoid_path() -> BezPath {
    polygon(&TRAPEZOID_CORNERS)
}

/// Place the trapezoid. While hinged, `pose.position` is where the hinge corner sits and the
/// shape turns about it by `-angle`.
pub fn trapezoid_transform(pose: &TrapezoidPose) -> Affine {
    let scale = Affine::scale(pose.scale);
    let corner = match pose.pivot {
        PivotSide::None => {
            return Affine::translate(pose.position.to_vec2()) * Affine::rotate(pose.angle) * scale;
        }
        PivotSide::Left => TRAPEZOID_CORNERS[3].to_vec2(),
        PivotSide::Right => TRAPEZOID_CORNERS[2].to_vec2(),
    };
    Affine::translate(pose.position.to_vec2())
        * Affine::rotate(-pose.angle)
        * Affine::translate(-corner)
        * scale
}

pub fn rectangle_path() -> BezPath {
    rect_path(RECTANGLE_RECT)
}

pub fn rectangle_transform(pose: &RectanglePose) -> Affine {
    Affine::translate(pose.position.to_vec2())
        * Affine::rotate(pose.angle)
        * Affine::scale(pose.scale)
}

/// Crescent outline: an outer arc over the top and a shallower inner arc back, both spanning
/// `[0, 60]` horizontally with the tips on the x axis.
pub fn crescent_path() -> BezPath {
    let half = CRESCENT_WIDTH / 2.0;
    let arc_point = |i: u32, height: f64| {
        let a = map_range(f64::from(i), 0.0, f64::from(CRESCENT_SEGMENTS), PI, 0.0);
        Point::new(half + half * a.cos(), -(height * a.sin()))
    };
    let mut points = Vec::with_capacity(2 * (CRESCENT_SEGMENTS as usize + 1));
    points.extend((0..=CRESCENT_SEGMENTS).map(|i| arc_point(i, CRESCENT_OUTER_HEIGHT)));
    points.extend(
        (0..=CRESCENT_SEGMENTS)
            .rev()
            .map(|i| arc_point(i, CRESCENT_INNER_HEIGHT)),
    );
    polygon(&points)
}

/// Place the crescent: rotate about `pose.position`, then shift the outline so its middle sits
/// on that point.
pub fn crescent_transform(pose: &CrescentPose) -> Affine {
    Affine::translate(pose.position.to_vec2())
        * Affine::rotate(pose.angle)
        * Affine::translate(Vec2::new(
            -CRESCENT_WIDTH / 2.0,
            CRESCENT_OUTER_HEIGHT / 2.0,
        ))
}

#[cfg(test)]
#[path = "../../tests/unit/compile/shapes.rs"]
mod tests;
