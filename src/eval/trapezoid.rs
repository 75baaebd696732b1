use std::f64::consts::TAU;

use crate::animation::ease::{
    bounce, cosine_oscillation, ease_in_cosine, ease_out_sine, sine_bump, smoothstep,
};
use crate::animation::path::BakedPath;
use crate::animation::timeline::{Bracket, Local, Timeline};
use crate::eval::context::AnimationContext;
use crate::foundation::core::Point;
use crate::foundation::error::WindowsillResult;
use crate::foundation::math::{lerp, map_range};
use crate::stage::window::PivotSide;
use crate::stage::{Stage, TRAPEZOID_HOME};

/// Bottom corners of the trapezoid on its sill, used as rocking hinges.
pub const LEFT_HINGE: Point = Point::new(1226.0, 525.0);
pub const RIGHT_HINGE: Point = Point::new(1326.0, 525.0);

const ROCK_DEG: f64 = 30.0;
/// Fraction of the fall path covered by the rise before the drop.
const LAUNCH_APEX: f64 = 0.25;
const LAUNCH_RISE_SECS: f64 = 0.5;
const LAUNCH_SECS: f64 = 2.0;
/// Size once the trapezoid has tumbled down toward the viewer.
const GROUNDED_SCALE: f64 = 2.0;

/// Trapezoid pose for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TrapezoidPose {
    /// Canvas point the shape is anchored at: the hinge corner while rocking, the shape
    /// center otherwise.
    pub position: Point,
    pub angle: f64,
    pub pivot: PivotSide,
    pub scale: f64,
}

impl TrapezoidPose {
    fn at(position: Point, scale: f64) -> Self {
        Self {
            position,
            angle: 0.0,
            pivot: PivotSide::None,
            scale,
        }
    }
}

pub struct TrapezoidRig {
    fall_path: BakedPath,
    center_x: f64,
}

/// The trapezoid: rocks on its windowsill, bounces, falls to the floor and slides to the
/// middle of the screen.
pub struct TrapezoidActor {
    rig: TrapezoidRig,
    timeline: Timeline<TrapezoidRig, AnimationContext, TrapezoidPose>,
}

impl TrapezoidActor {
    pub fn new(stage: &Stage) -> WindowsillResult<Self> {
        let timeline = Timeline::new(vec![
            Bracket::span("rock", 3.0, 13.5, rock),
            Bracket::span("sill", 13.5, 15.0, sill),
            Bracket::span("rapid_jump", 15.0, 16.0, rapid_jump),
            Bracket::span("impacts", 16.0, 20.0, impacts),
            Bracket::span("launch", 20.0, 22.0, launch),
            Bracket::span("grounded", 22.0, 34.0, grounded),
            Bracket::span("to_center", 34.0, 35.0, to_center),
            Bracket::forever("centered", 35.0, centered),
        ])?;
        Ok(Self {
            rig: TrapezoidRig {
                fall_path: stage.fall_path.clone(),
                center_x: stage.canvas.center().x,
            },
            timeline,
        })
    }

    pub fn timeline(&self) -> &Timeline<TrapezoidRig, AnimationContext, TrapezoidPose> {
        &self.timeline
    }

    pub fn evaluate(&self, ctx: &AnimationContext) -> Option<TrapezoidPose> {
        self.timeline.eval(&self.rig, ctx)
    }
}

fn rock(_: &TrapezoidRig, _: &AnimationContext, l: Local) -> TrapezoidPose {
    let angle = cosine_oscillation(
        l.elapsed,
        (-ROCK_DEG).to_radians(),
        ROCK_DEG.to_radians(),
    );
    // Tipping right lifts the right edge, so the left corner holds.
    let (position, pivot) = if angle > 0.0 {
        (LEFT_HINGE, PivotSide::Left)
    } else {
        (RIGHT_HINGE, PivotSide::Right)
    };
    TrapezoidPose {
        position,
        angle,
        pivot,
        scale: 1.0,
    }
}

fn sill(_: &TrapezoidRig, _: &AnimationContext, _: Local) -> TrapezoidPose {
    TrapezoidPose::at(TRAPEZOID_HOME, 1.0)
}

fn rapid_jump(_: &TrapezoidRig, _: &AnimationContext, l: Local) -> TrapezoidPose {
    let lift = bounce(l.elapsed, 4.0) * 60.0;
    TrapezoidPose::at(
        Point::new(TRAPEZOID_HOME.x, TRAPEZOID_HOME.y - lift),
        1.0,
    )
}

fn impacts(_: &TrapezoidRig, ctx: &AnimationContext, _: Local) -> TrapezoidPose {
    // 0.4 s, 15 px reaction to the rectangle landing at 18 and 19.
    let whole = ctx.time.floor();
    let frac = ctx.time - whole;
    let lift = if (whole == 18.0 || whole == 19.0) && frac < 0.4 {
        sine_bump(frac / 0.4) * 15.0
    } else {
        0.0
    };
    TrapezoidPose::at(
        Point::new(TRAPEZOID_HOME.x, TRAPEZOID_HOME.y - lift),
        1.0,
    )
}

fn launch(rig: &TrapezoidRig, _: &AnimationContext, l: Local) -> TrapezoidPose {
    let s = l.elapsed;
    // Decelerate up to the apex, then accelerate down to the floor.
    let along = if s < LAUNCH_RISE_SECS {
        ease_out_sine(s / LAUNCH_RISE_SECS) * LAUNCH_APEX
    } else {
        let down = (s - LAUNCH_RISE_SECS) / (LAUNCH_SECS - LAUNCH_RISE_SECS);
        LAUNCH_APEX + ease_in_cosine(down) * (1.0 - LAUNCH_APEX)
    };
    TrapezoidPose {
        position: rig.fall_path.query(along),
        angle: map_range(s, 0.0, LAUNCH_SECS, 0.0, 2.0 * TAU),
        pivot: PivotSide::None,
        scale: map_range(s, 0.0, LAUNCH_SECS, 1.0, GROUNDED_SCALE),
    }
}

fn grounded(rig: &TrapezoidRig, _: &AnimationContext, _: Local) -> TrapezoidPose {
    TrapezoidPose::at(rig.fall_path.last(), GROUNDED_SCALE)
}

fn to_center(rig: &TrapezoidRig, _: &AnimationContext, l: Local) -> TrapezoidPose {
    let landing = rig.fall_path.last();
    let x = lerp(landing.x, rig.center_x, smoothstep(l.progress));
    TrapezoidPose::at(Point::new(x, landing.y), GROUNDED_SCALE)
}

fn centered(rig: &TrapezoidRig, _: &AnimationContext, _: Local) -> TrapezoidPose {
    TrapezoidPose::at(
        Point::new(rig.center_x, rig.fall_path.last().y),
        GROUNDED_SCALE,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/eval/trapezoid.rs"]
mod tests;
