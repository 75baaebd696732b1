use crate::eval::background::{BackgroundActor, BackgroundInput, BackgroundPose};
use crate::eval::context::AnimationContext;
use crate::eval::crescent::{CrescentActor, CrescentInput, CrescentPose};
use crate::eval::rectangle::{RectangleActor, RectanglePose};
use crate::eval::trapezoid::{TrapezoidActor, TrapezoidPose};
use crate::foundation::error::{WindowsillError, WindowsillResult};
use crate::stage::Stage;

/// Clock time at which the credits give way to the actors.
pub const CREDITS_END_SECS: f64 = 3.0;
/// "The End" is shown strictly after this time.
pub const THE_END_AFTER_SECS: f64 = 37.0;

/// Values one actor publishes for the actors evaluated after it in the same frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameOutputs {
    pub rectangle: Option<RectanglePose>,
    pub crescent: Option<CrescentPose>,
}

/// Name of the bracket each actor is in; handy when dumping poses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ActiveBrackets {
    pub background: &'static str,
    pub rectangle: &'static str,
    pub trapezoid: &'static str,
    pub crescent: &'static str,
}

/// Every actor's pose at one clock time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SequencePose {
    pub time: f64,
    pub brackets: ActiveBrackets,
    pub background: BackgroundPose,
    pub rectangle: RectanglePose,
    pub trapezoid: TrapezoidPose,
    pub crescent: CrescentPose,
    pub show_the_end: bool,
}

/// What the scene looks like at one clock time.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "scene", rename_all = "snake_case")]
pub enum ScenePose {
    /// Black screen with the credits and the running counter.
    Credits { time: f64 },
    Sequence(SequencePose),
}

impl ScenePose {
    pub fn time(&self) -> f64 {
        match self {
            Self::Credits { time } => *time,
            Self::Sequence(s) => s.time,
        }
    }
}

/// Evaluates all four actors for a clock time.
///
/// Actors run in dependency order: the rectangle first, the crescent riding on it, the
/// background reading the crescent's rotation, then the independent trapezoid. Each frame's
/// poses depend only on its own clock time, so scrubbing in any order reproduces them.
pub struct SceneComposer {
    background: BackgroundActor,
    rectangle: RectangleActor,
    trapezoid: TrapezoidActor,
    crescent: CrescentActor,
}

impl SceneComposer {
    pub fn new(stage: &Stage) -> WindowsillResult<Self> {
        Ok(Self {
            background: BackgroundActor::new(stage)?,
            rectangle: RectangleActor::new(stage)?,
            trapezoid: TrapezoidActor::new(stage)?,
            crescent: CrescentActor::new(stage)?,
        })
    }

    pub fn background(&self) -> &BackgroundActor {
        &self.background
    }

    pub fn rectangle(&self) -> &RectangleActor {
        &self.rectangle
    }

    pub fn trapezoid(&self) -> &TrapezoidActor {
        &self.trapezoid
    }

    pub fn crescent(&self) -> &CrescentActor {
        &self.crescent
    }

    /// Evaluate the rectangle and the crescent, the two actors others depend on.
    pub fn frame_outputs(&self, ctx: &AnimationContext) -> FrameOutputs {
        // The crescent enters with the rectangle; nothing to ride means nothing to publish.
        let Some(rectangle) = self.rectangle.evaluate(ctx) else {
            return FrameOutputs::default();
        };
        let crescent = self.crescent.evaluate(&CrescentInput {
            time: ctx.time,
            rectangle,
        });
        FrameOutputs {
            rectangle: Some(rectangle),
            crescent,
        }
    }

    #[tracing::instrument(level = "trace", skip(self), fields(time = ctx.time))]
    pub fn evaluate(&self, ctx: &AnimationContext) -> WindowsillResult<ScenePose> {
        if !ctx.time.is_finite() {
            return Err(WindowsillError::evaluation(format!(
                "clock time must be finite, got {}",
                ctx.time
            )));
        }
        if ctx.time < CREDITS_END_SECS {
            return Ok(ScenePose::Credits { time: ctx.time });
        }

        let outputs = self.frame_outputs(ctx);
        let background_input = BackgroundInput {
            time: ctx.time,
            crescent_turns: outputs.crescent.map_or(0.0, |c| c.turns()),
        };

        let missing =
            |actor: &str| WindowsillError::evaluation(format!("{actor} has no pose at {}", ctx.time));
        let background = self
            .background
            .evaluate(&background_input)
            .ok_or_else(|| missing("background"))?;
        let rectangle = outputs.rectangle.ok_or_else(|| missing("rectangle"))?;
        let crescent = outputs.crescent.ok_or_else(|| missing("crescent"))?;
        let trapezoid = self
            .trapezoid
            .evaluate(ctx)
            .ok_or_else(|| missing("trapezoid"))?;

        Ok(ScenePose::Sequence(SequencePose {
            time: ctx.time,
            brackets: self.active_brackets(ctx.time),
            background,
            rectangle,
            trapezoid,
            crescent,
            show_the_end: ctx.time > THE_END_AFTER_SECS,
        }))
    }

    fn active_brackets(&self, time: f64) -> ActiveBrackets {
        let name = |found: Option<&'static str>| found.unwrap_or("-");
        ActiveBrackets {
            background: name(self.background.timeline().find(time).map(|b| b.name)),
            rectangle: name(self.rectangle.timeline().find(time).map(|b| b.name)),
            trapezoid: name(self.trapezoid.timeline().find(time).map(|b| b.name)),
            crescent: name(self.crescent.timeline().find(time).map(|b| b.name)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/scene.rs"]
mod tests;
