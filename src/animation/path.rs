use std::f64::consts::{FRAC_PI_2, TAU};

use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::{WindowsillError, WindowsillResult};
use crate::foundation::math::{Rng64, lerp_point, map_range};

/// Parameters of one of the three motion paths the short precomputes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PathSpec {
    /// Straight line from `start` to `end` with a symmetric parabolic arc lifted out of `y`
    /// (`arc_height * 4t(1-t)`, peaking at `t = 0.5`).
    Fall {
        start: Point,
        end: Point,
        arc_height: f64,
        resolution: u32,
    },
    /// `loops` revolutions of an ellipse starting at its top, rotated by `tilt_rad` about the
    /// origin and then translated so the first sample lands on `start`.
    Oval {
        start: Point,
        loops: u32,
        radius_x: f64,
        radius_y: f64,
        tilt_rad: f64,
        resolution: u32,
    },
    /// Chain of straight segments. Every target is a random point at least `margin` away from
    /// the `bounds` edges, except the last one which is the `bounds` center.
    Walk {
        start: Point,
        segments: u32,
        points_per_segment: u32,
        margin: f64,
        bounds: Canvas,
    },
}

/// Immutable polyline sampled from a parametric curve, queried by normalized progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BakedPath {
    points: Vec<Point>,
}

impl BakedPath {
    /// Wrap an explicit, non-empty point sequence.
    pub fn from_points(points: Vec<Point>) -> WindowsillResult<Self> {
        if points.is_empty() {
            return Err(WindowsillError::validation(
                "baked path needs at least one point",
            ));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Point {
        self.points[0]
    }

    pub fn last(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Point at normalized progress `t`.
    ///
    /// `t` is clamped to `[0, 1]` and mapped onto the index range `[0, len - 1]`; the result is
    /// interpolated between the two bracketing samples. Spacing between samples is ignored, so
    /// equal steps in `t` are equal steps in index, not in arc length. `t = 0` and `t = 1`
    /// return the first and last samples exactly.
    pub fn query(&self, t: f64) -> Point {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.points.len() - 1;
        let idx = t * last as f64;
        let i0 = idx.floor() as usize;
        if i0 >= last {
            return self.points[last];
        }
        let frac = idx - i0 as f64;
        lerp_point(self.points[i0], self.points[i0 + 1], frac)
    }
}

/// Sample the curve described by `spec`. Only [`PathSpec::Walk`] consumes randomness.
#[tracing::instrument(level = "debug", skip(rng))]
pub fn bake(spec: &PathSpec, rng: &mut Rng64) -> WindowsillResult<BakedPath> {
    let points = match *spec {
        PathSpec::Fall {
            start,
            end,
            arc_height,
            resolution,
        } => bake_fall(start, end, arc_height, resolution)?,
        PathSpec::Oval {
            start,
            loops,
            radius_x,
            radius_y,
            tilt_rad,
            resolution,
        } => bake_oval(start, loops, radius_x, radius_y, tilt_rad, resolution)?,
        PathSpec::Walk {
            start,
            segments,
            points_per_segment,
            margin,
            bounds,
        } => bake_walk(start, segments, points_per_segment, margin, bounds, rng)?,
    };
    tracing::debug!(samples = points.len(), "baked path");
    BakedPath::from_points(points)
}

fn bake_fall(
    start: Point,
    end: Point,
    arc_height: f64,
    resolution: u32,
) -> WindowsillResult<Vec<Point>> {
    if resolution == 0 {
        return Err(WindowsillError::validation(
            "fall path resolution must be > 0",
        ));
    }
    let points = (0..=resolution)
        .map(|i| {
            let t = f64::from(i) / f64::from(resolution);
            let line = lerp_point(start, end, t);
            let arc = arc_height * 4.0 * (t - t * t);
            Point::new(line.x, line.y - arc)
        })
        .collect();
    Ok(points)
}

fn bake_oval(
    start: Point,
    loops: u32,
    radius_x: f64,
    radius_y: f64,
    tilt_rad: f64,
    resolution: u32,
) -> WindowsillResult<Vec<Point>> {
    if resolution == 0 || loops == 0 {
        return Err(WindowsillError::validation(
            "oval path needs resolution > 0 and loops > 0",
        ));
    }

    let (sin, cos) = tilt_rad.sin_cos();
    let mut points: Vec<Point> = (0..=resolution)
        .map(|i| {
            // Phase shift so sampling begins at the top of the ellipse.
            let theta = map_range(
                f64::from(i),
                0.0,
                f64::from(resolution),
                0.0,
                f64::from(loops) * TAU,
            ) - FRAC_PI_2;
            let x = theta.cos() * radius_x;
            let y = theta.sin() * radius_y;
            Point::new(x * cos - y * sin, x * sin + y * cos)
        })
        .collect();

    let offset: Vec2 = start - points[0];
    for p in &mut points {
        *p += offset;
    }
    Ok(points)
}

fn bake_walk(
    start: Point,
    segments: u32,
    points_per_segment: u32,
    margin: f64,
    bounds: Canvas,
    rng: &mut Rng64,
) -> WindowsillResult<Vec<Point>> {
    if segments == 0 || points_per_segment < 2 {
        return Err(WindowsillError::validation(
            "walk path needs segments > 0 and points_per_segment >= 2",
        ));
    }
    let w = f64::from(bounds.width);
    let h = f64::from(bounds.height);
    if margin * 2.0 >= w || margin * 2.0 >= h {
        return Err(WindowsillError::validation(
            "walk path margin leaves no room inside the bounds",
        ));
    }

    let mut points = Vec::with_capacity((segments * points_per_segment) as usize);
    let mut from = start;
    for seg in 0..segments {
        let to = if seg + 1 == segments {
            bounds.center()
        } else {
            Point::new(rng.range_f64(margin, w - margin), rng.range_f64(margin, h - margin))
        };
        for j in 0..points_per_segment {
            let progress = f64::from(j) / f64::from(points_per_segment - 1);
            points.push(lerp_point(from, to, progress));
        }
        from = to;
    }
    Ok(points)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/path.rs"]
mod tests;
