use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI, TAU};

use crate::animation::ease::{bounce, sine_bump, smoothstep};
use crate::animation::path::BakedPath;
use crate::animation::timeline::{Bracket, Local, Timed, Timeline};
use crate::eval::rectangle::RectanglePose;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::error::WindowsillResult;
use crate::foundation::math::{lerp, lerp_point};
use crate::stage::Stage;

/// Total rotation of the big flip after the trapezoid lands.
const FLIP_TURNS_RAD: f64 = 7.0 * PI;
const FLIP_HEIGHT_PX: f64 = 200.0;
/// How far the crescent drifts off the end of its orbit to its final spot.
const PARK_OFFSET: Vec2 = Vec2::new(-320.0, -100.0);

/// Crescent pose for one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CrescentPose {
    /// Origin of the crescent shape in canvas space.
    pub position: Point,
    pub angle: f64,
}

impl CrescentPose {
    /// Rotation in turns, wrapped into `[0, 1)`. The background reads this to decide the time
    /// of day.
    pub fn turns(&self) -> f64 {
        (self.angle / TAU).rem_euclid(1.0)
    }
}

/// What the crescent needs each frame besides the clock: the rectangle it rides on.
#[derive(Clone, Copy, Debug)]
pub struct CrescentInput {
    pub time: f64,
    pub rectangle: RectanglePose,
}

impl Timed for CrescentInput {
    fn time(&self) -> f64 {
        self.time
    }
}

pub struct CrescentRig {
    oval_path: BakedPath,
}

/// The crescent: rides the rectangle's head, flips the day into night, then orbits the
/// screen on the oval path and drifts to its resting spot.
pub struct CrescentActor {
    rig: CrescentRig,
    timeline: Timeline<CrescentRig, CrescentInput, CrescentPose>,
}

impl CrescentActor {
    pub fn new(stage: &Stage) -> WindowsillResult<Self> {
        let timeline = Timeline::new(vec![
            Bracket::span("ride_jump", 3.0, 10.0, ride_jump),
            Bracket::span("perch", 10.0, 12.0, perch),
            Bracket::span("rapid_jump", 12.0, 13.0, rapid_jump),
            Bracket::span("perch_dips", 13.0, 22.0, perch_dips),
            Bracket::span("big_flip", 22.0, 25.0, big_flip),
            Bracket::span("upside_down", 25.0, 26.0, upside_down),
            Bracket::span("hop", 26.0, 26.5, hop),
            Bracket::span("upside_down", 26.5, 28.0, upside_down),
            Bracket::span("hop", 28.0, 28.5, hop),
            Bracket::span("upside_down", 28.5, 30.0, upside_down),
            Bracket::span("lift_off", 30.0, 30.5, lift_off),
            Bracket::span("orbit", 30.5, 34.0, orbit),
            Bracket::span("drift", 34.0, 35.0, drift),
            Bracket::forever("parked", 35.0, parked),
        ])?;
        Ok(Self {
            rig: CrescentRig {
                oval_path: stage.oval_path.clone(),
            },
            timeline,
        })
    }

    pub fn timeline(&self) -> &Timeline<CrescentRig, CrescentInput, CrescentPose> {
        &self.timeline
    }

    pub fn evaluate(&self, input: &CrescentInput) -> Option<CrescentPose> {
        self.timeline.eval(&self.rig, input)
    }
}

fn above_head(input: &CrescentInput, lift: f64, angle: f64) -> CrescentPose {
    let head = input.rectangle.head();
    CrescentPose {
        position: Point::new(head.x, head.y - lift),
        angle,
    }
}

fn ride_jump(_: &CrescentRig, input: &CrescentInput, l: Local) -> CrescentPose {
    // Tilts along with the rectangle during the walk-in.
    above_head(input, bounce(l.elapsed, 1.0) * 60.0, input.rectangle.angle)
}

fn perch(_: &CrescentRig, input: &CrescentInput, _: Local) -> CrescentPose {
    above_head(input, 0.0, 0.0)
}

fn rapid_jump(_: &CrescentRig, input: &CrescentInput, l: Local) -> CrescentPose {
    above_head(input, bounce(l.elapsed, 4.0) * 80.0, 0.0)
}

fn perch_dips(_: &CrescentRig, input: &CrescentInput, _: Local) -> CrescentPose {
    // Half-second 30 px reaction to each of the rectangle's landings at 18, 19 and 20.
    let whole = input.time.floor();
    let frac = input.time - whole;
    let lift = if (18.0..=20.0).contains(&whole) && frac < 0.5 {
        sine_bump(frac / 0.5) * 30.0
    } else {
        0.0
    };
    above_head(input, lift, 0.0)
}

fn big_flip(_: &CrescentRig, input: &CrescentInput, l: Local) -> CrescentPose {
    above_head(
        input,
        sine_bump(l.progress) * FLIP_HEIGHT_PX,
        l.progress * FLIP_TURNS_RAD,
    )
}

fn upside_down(_: &CrescentRig, input: &CrescentInput, _: Local) -> CrescentPose {
    above_head(input, 0.0, PI)
}

fn hop(_: &CrescentRig, input: &CrescentInput, l: Local) -> CrescentPose {
    above_head(input, bounce(l.elapsed, 2.0) * 60.0, PI)
}

fn lift_off(rig: &CrescentRig, input: &CrescentInput, l: Local) -> CrescentPose {
    let e = smoothstep(l.progress);
    CrescentPose {
        position: lerp_point(input.rectangle.head(), rig.oval_path.first(), e),
        angle: lerp(PI, FRAC_PI_2, e),
    }
}

fn orbit(rig: &CrescentRig, _: &CrescentInput, l: Local) -> CrescentPose {
    CrescentPose {
        position: rig.oval_path.query(smoothstep(l.progress)),
        angle: FRAC_PI_2,
    }
}

fn drift(rig: &CrescentRig, _: &CrescentInput, l: Local) -> CrescentPose {
    let e = smoothstep(l.progress);
    CrescentPose {
        position: rig.oval_path.last() + PARK_OFFSET * e,
        angle: FRAC_PI_2 + FRAC_PI_6 * e,
    }
}

fn parked(rig: &CrescentRig, _: &CrescentInput, _: Local) -> CrescentPose {
    CrescentPose {
        position: rig.oval_path.last() + PARK_OFFSET,
        angle: FRAC_PI_2 + FRAC_PI_6,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/crescent.rs"]
mod tests;
