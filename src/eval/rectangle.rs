use std::f64::consts::FRAC_PI_2;

use crate::animation::ease::{bounce, ease_out_cubic, smoothstep};
use crate::animation::path::BakedPath;
use crate::animation::timeline::{Bracket, Local, Timeline};
use crate::eval::context::AnimationContext;
use crate::foundation::core::Point;
use crate::foundation::error::WindowsillResult;
use crate::foundation::math::{lerp_point, map_range, smooth_noise01};
use crate::stage::{Stage, WALK_START};

/// Off-canvas spot the rectangle waits at before walking in.
pub const OFFSTAGE: Point = Point::new(-200.0, 600.0);

const BOB_PX: f64 = 30.0;
const JUMP_PX: f64 = 60.0;
const WALK_TILT_DEG: f64 = 30.0;

/// Noise offsets keep the bob and tilt channels uncorrelated.
const BOB_NOISE_OFFSET: f64 = 1000.0;
const TILT_NOISE_OFFSET: f64 = 2000.0;
const IDLE_NOISE_OFFSET: f64 = 3000.0;

/// Rectangle pose for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct RectanglePose {
    /// Shape center in canvas space.
    pub position: Point,
    /// Rotation in radians about the center.
    pub angle: f64,
    pub scale: f64,
    /// 0 = daytime sandy brown, 1 = night blue.
    pub night_blend: f64,
}

impl RectanglePose {
    fn upright(position: Point) -> Self {
        Self {
            position,
            angle: 0.0,
            scale: 1.0,
            night_blend: 0.0,
        }
    }

    /// Where a rider standing on the rectangle sits: 200 px half height plus 15 px.
    pub fn head(&self) -> Point {
        Point::new(self.position.x, self.position.y - 215.0)
    }
}

pub struct RectangleRig {
    walk_path: BakedPath,
}

/// The rectangle: walks in, bobs in front of the trapezoid, jumps, then walks the random
/// path growing until it fills the screen at night.
pub struct RectangleActor {
    rig: RectangleRig,
    timeline: Timeline<RectangleRig, AnimationContext, RectanglePose>,
}

impl RectangleActor {
    pub fn new(stage: &Stage) -> WindowsillResult<Self> {
        let timeline = Timeline::new(vec![
            Bracket::through("offstage", 3.0, 5.0, offstage),
            Bracket::span("walk_in", 5.0, 10.0, walk_in),
            Bracket::span("idle", 10.0, 17.0, idle),
            Bracket::span("slow_jump", 17.0, 20.0, slow_jump),
            Bracket::span("still", 20.0, 31.0, still),
            Bracket::through("grow_walk", 31.0, 34.0, grow_walk),
            Bracket::forever("fill", 34.0, fill),
        ])?;
        Ok(Self {
            rig: RectangleRig {
                walk_path: stage.walk_path.clone(),
            },
            timeline,
        })
    }

    pub fn timeline(&self) -> &Timeline<RectangleRig, AnimationContext, RectanglePose> {
        &self.timeline
    }

    /// Pose at `ctx.time`, `None` before the rectangle's timeline starts.
    pub fn evaluate(&self, ctx: &AnimationContext) -> Option<RectanglePose> {
        self.timeline.eval(&self.rig, ctx)
    }
}

fn offstage(_: &RectangleRig, _: &AnimationContext, _: Local) -> RectanglePose {
    RectanglePose::upright(OFFSTAGE)
}

fn walk_in(_: &RectangleRig, _: &AnimationContext, l: Local) -> RectanglePose {
    let e = ease_out_cubic(l.progress);
    let s = l.elapsed;
    let base = lerp_point(OFFSTAGE, WALK_START, e);
    // Wobble dies out as the walk settles.
    let bob = smooth_noise01(s + BOB_NOISE_OFFSET) * BOB_PX * (1.0 - e);
    let tilt = map_range(
        smooth_noise01(s + TILT_NOISE_OFFSET),
        0.0,
        1.0,
        0.0,
        WALK_TILT_DEG.to_radians(),
    ) * (1.0 - e);
    RectanglePose {
        angle: tilt,
        ..RectanglePose::upright(Point::new(base.x, base.y + bob))
    }
}

fn idle(_: &RectangleRig, ctx: &AnimationContext, l: Local) -> RectanglePose {
    let c = ctx.time;
    let mut bob = smooth_noise01(l.elapsed + IDLE_NOISE_OFFSET) * BOB_PX;
    // One-second fades so the bob starts and stops at rest.
    if c < 11.0 {
        bob *= map_range(c, 10.0, 11.0, 0.0, 1.0);
    }
    if c > 16.0 {
        bob *= map_range(c, 16.0, 17.0, 1.0, 0.0);
    }
    RectanglePose::upright(Point::new(WALK_START.x, WALK_START.y + bob))
}

fn slow_jump(_: &RectangleRig, _: &AnimationContext, l: Local) -> RectanglePose {
    let lift = bounce(l.elapsed, 1.0) * JUMP_PX;
    RectanglePose::upright(Point::new(WALK_START.x, WALK_START.y - lift))
}

fn still(_: &RectangleRig, _: &AnimationContext, _: Local) -> RectanglePose {
    RectanglePose::upright(WALK_START)
}

fn grow_walk(rig: &RectangleRig, _: &AnimationContext, l: Local) -> RectanglePose {
    let e = smoothstep(l.progress);
    RectanglePose {
        position: rig.walk_path.query(e),
        angle: e * FRAC_PI_2,
        scale: 1.0 + 3.0 * e,
        night_blend: e,
    }
}

fn fill(_: &RectangleRig, _: &AnimationContext, _: Local) -> RectanglePose {
    RectanglePose {
        position: Point::ORIGIN,
        angle: FRAC_PI_2,
        scale: 10.0,
        night_blend: 1.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/rectangle.rs"]
mod tests;
