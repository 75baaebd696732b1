use std::f64::consts::{FRAC_PI_2, TAU};

use crate::animation::timeline::{Bracket, Local, Timed, Timeline};
use crate::foundation::error::WindowsillResult;
use crate::stage::Stage;
use crate::stage::window::Window;

/// Background pose for one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BackgroundPose {
    /// Current tilt of each window in radians, in stage order. Magnitudes only: the hinge side
    /// decides the rotation direction.
    pub tilts: Vec<f64>,
    /// 1 = day, 0 = night.
    pub day_blend: f64,
}

/// Clock plus the crescent's rotation, which sets the time of day while it flips.
#[derive(Clone, Copy, Debug)]
pub struct BackgroundInput {
    pub time: f64,
    /// Crescent rotation in turns; 0 when the crescent has no pose.
    pub crescent_turns: f64,
}

impl Timed for BackgroundInput {
    fn time(&self) -> f64 {
        self.time
    }
}

pub struct BackgroundRig {
    windows: Vec<Window>,
}

impl BackgroundRig {
    fn pose(&self, tilt_progress: f64, day_blend: f64) -> BackgroundPose {
        BackgroundPose {
            tilts: self
                .windows
                .iter()
                .map(|w| w.final_tilt * tilt_progress)
                .collect(),
            day_blend,
        }
    }
}

/// The wall and its windows: upright by day until the rectangle's last landing knocks them
/// crooked, then following the crescent into night.
pub struct BackgroundActor {
    rig: BackgroundRig,
    timeline: Timeline<BackgroundRig, BackgroundInput, BackgroundPose>,
}

impl BackgroundActor {
    pub fn new(stage: &Stage) -> WindowsillResult<Self> {
        let timeline = Timeline::new(vec![
            Bracket::span("upright", 0.0, 20.0, upright),
            Bracket::span("tilting", 20.0, 22.0, tilting),
            Bracket::span("dusk", 22.0, 28.0, dusk),
            Bracket::forever("night", 28.0, night),
        ])?;
        Ok(Self {
            rig: BackgroundRig {
                windows: stage.windows.clone(),
            },
            timeline,
        })
    }

    pub fn timeline(&self) -> &Timeline<BackgroundRig, BackgroundInput, BackgroundPose> {
        &self.timeline
    }

    pub fn windows(&self) -> &[Window] {
        &self.rig.windows
    }

    pub fn evaluate(&self, input: &BackgroundInput) -> Option<BackgroundPose> {
        self.timeline.eval(&self.rig, input)
    }
}

fn upright(rig: &BackgroundRig, _: &BackgroundInput, _: Local) -> BackgroundPose {
    rig.pose(0.0, 1.0)
}

fn tilting(rig: &BackgroundRig, _: &BackgroundInput, l: Local) -> BackgroundPose {
    rig.pose((l.progress * FRAC_PI_2).sin().abs(), 1.0)
}

fn dusk(rig: &BackgroundRig, input: &BackgroundInput, _: Local) -> BackgroundPose {
    // Upright crescent is day, upside down is night.
    let day = ((input.crescent_turns * TAU).cos() + 1.0) / 2.0;
    rig.pose(1.0, day)
}

fn night(rig: &BackgroundRig, _: &BackgroundInput, _: Local) -> BackgroundPose {
    rig.pose(1.0, 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/background.rs"]
mod tests;
