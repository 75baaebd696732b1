use crate::compile::plan::{FramePlan, compile_frame};
use crate::config::ShortConfig;
use crate::eval::context::AnimationContext;
use crate::eval::scene::{SceneComposer, ScenePose};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::WindowsillResult;
use crate::stage::Stage;

/// A fully set up short: validated config, built stage and the actors' timelines.
///
/// Everything here is immutable after [`Short::new`], so one instance can be shared across
/// render workers.
pub struct Short {
    cfg: ShortConfig,
    stage: Stage,
    composer: SceneComposer,
}

impl Short {
    pub fn new(cfg: ShortConfig) -> WindowsillResult<Self> {
        let stage = Stage::build(&cfg)?;
        let composer = SceneComposer::new(&stage)?;
        Ok(Self {
            cfg,
            stage,
            composer,
        })
    }

    pub fn config(&self) -> &ShortConfig {
        &self.cfg
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn composer(&self) -> &SceneComposer {
        &self.composer
    }

    pub fn pose_at(&self, time: f64) -> WindowsillResult<ScenePose> {
        self.composer.evaluate(&AnimationContext::new(time))
    }

    pub fn pose_for_frame(&self, frame: FrameIndex) -> WindowsillResult<ScenePose> {
        self.pose_at(self.cfg.time_at(frame))
    }

    /// Evaluate and compile the frame shown at clock `time`.
    pub fn plan_at(&self, time: f64) -> WindowsillResult<FramePlan> {
        let pose = self.pose_at(time)?;
        Ok(compile_frame(&self.stage, &self.cfg, &pose))
    }

    pub fn plan_for_frame(&self, frame: FrameIndex) -> WindowsillResult<FramePlan> {
        self.plan_at(self.cfg.time_at(frame))
    }
}
