//! Static scene data built once before the first frame: the windows, the three baked motion
//! paths and the canvas they are laid out on.

pub(crate) mod palette;
pub(crate) mod window;

use crate::animation::path::{BakedPath, PathSpec, bake};
use crate::config::ShortConfig;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::WindowsillResult;
use crate::foundation::math::Rng64;

use self::window::{PivotSide, Window};

/// Window rectangles as `(x, y, width, height)`. The fourth one is the trapezoid's sill.
pub const WINDOW_RECTS: [(f64, f64, f64, f64); 8] = [
    (0.0, 170.0, 358.0, 237.0),
    (472.0, 222.0, 601.0, 405.0),
    (1181.0, 592.0, 395.0, 101.0),
    (1181.0, 119.0, 190.0, 406.0),
    (1441.0, 0.0, 100.0, 383.0),
    (1585.0, 148.0, 199.0, 383.0),
    (218.0, 444.0, 135.0, 183.0),
    (423.0, 67.0, 407.0, 105.0),
];

/// Range of the windows' final tilt, in degrees.
pub const WINDOW_TILT_DEG: (f64, f64) = (2.0, 15.0);

/// Where the trapezoid sits on its sill (center of its shape).
pub const TRAPEZOID_HOME: Point = Point::new(1276.0, 480.0);
/// Where the trapezoid lands after falling off the sill.
pub const TRAPEZOID_LANDING: Point = Point::new(1176.0, 720.0);
pub const FALL_ARC_HEIGHT: f64 = 200.0;
pub const FALL_RESOLUTION: u32 = 100;

/// First point of the crescent's oval path.
pub const OVAL_START: Point = Point::new(800.0, 335.0);
pub const OVAL_LOOPS: u32 = 5;
pub const OVAL_RADIUS_Y: f64 = 150.0;
pub const OVAL_TILT_DEG: f64 = -15.0;
pub const OVAL_RESOLUTION: u32 = 200;

/// Where the rectangle stands when it sets off on its walk.
pub const WALK_START: Point = Point::new(800.0, 600.0);
pub const WALK_SEGMENTS: u32 = 3;
pub const WALK_POINTS_PER_SEGMENT: u32 = 30;
pub const WALK_MARGIN: f64 = 200.0;

/// Everything the actors read but never write.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Stage {
    pub canvas: Canvas,
    pub windows: Vec<Window>,
    /// Trapezoid's tumble from the sill to the floor.
    pub fall_path: BakedPath,
    /// Crescent's looping flight around the screen.
    pub oval_path: BakedPath,
    /// Rectangle's final walk, ending at the canvas center.
    pub walk_path: BakedPath,
}

impl Stage {
    /// Build the stage for `cfg`. All random draws come from `cfg.seed`: per window a tilt
    /// then a pivot coin flip, then the walk targets.
    pub fn build(cfg: &ShortConfig) -> WindowsillResult<Self> {
        cfg.validate()?;
        let mut rng = Rng64::new(cfg.seed);

        let windows = WINDOW_RECTS
            .iter()
            .map(|&(x, y, w, h)| {
                let tilt = rng
                    .range_f64(WINDOW_TILT_DEG.0, WINDOW_TILT_DEG.1)
                    .to_radians();
                let pivot = if rng.coin() {
                    PivotSide::Left
                } else {
                    PivotSide::Right
                };
                Window::new(Rect::new(x, y, x + w, y + h), tilt, pivot)
            })
            .collect();

        let fall_path = bake(
            &PathSpec::Fall {
                start: TRAPEZOID_HOME,
                end: TRAPEZOID_LANDING,
                arc_height: FALL_ARC_HEIGHT,
                resolution: FALL_RESOLUTION,
            },
            &mut rng,
        )?;

        let oval_path = bake(
            &PathSpec::Oval {
                start: OVAL_START,
                loops: OVAL_LOOPS,
                // Half the screen width.
                radius_x: f64::from(cfg.canvas.width) / 2.0,
                radius_y: OVAL_RADIUS_Y,
                tilt_rad: OVAL_TILT_DEG.to_radians(),
                resolution: OVAL_RESOLUTION,
            },
            &mut rng,
        )?;

        let walk_path = bake(
            &PathSpec::Walk {
                start: WALK_START,
                segments: WALK_SEGMENTS,
                points_per_segment: WALK_POINTS_PER_SEGMENT,
                margin: WALK_MARGIN,
                bounds: cfg.canvas,
            },
            &mut rng,
        )?;

        tracing::debug!(seed = cfg.seed, windows = WINDOW_RECTS.len(), "stage built");
        Ok(Self {
            canvas: cfg.canvas,
            windows,
            fall_path,
            oval_path,
            walk_path,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/stage.rs"]
mod tests;
