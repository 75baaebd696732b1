//! Windowsill renders a scripted 2D short headlessly.
//!
//! Four actors share one fixed timeline: a trapezoid on a windowsill, a walking rectangle, a
//! crescent riding it, and a wall of windows that tilt and darken from day to night. Every frame
//! is a pure function of clock time:
//!
//! - Build a [`Short`] from a [`ShortConfig`]
//! - Evaluate a [`ScenePose`] and compile it to a [`FramePlan`]
//! - Rasterize with a [`RenderBackend`] and stream frames into a [`FrameSink`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod compile;
pub mod config;
/// Encoding sinks.
pub mod encode;
pub(crate) mod eval;
/// Rendering backend and pipeline.
pub mod render;
pub mod short;
pub(crate) mod stage;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{WindowsillError, WindowsillResult};
pub use crate::foundation::math::{Rng64, lerp, map_range, smooth_noise01};

pub use crate::animation::path::{BakedPath, PathSpec, bake};
pub use crate::compile::plan::{DrawOp, FramePlan, TextPlacement, compile_frame};
pub use crate::config::ShortConfig;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ffmpeg_available};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::eval::background::BackgroundPose;
pub use crate::eval::context::{AnimationContext, Clock};
pub use crate::eval::crescent::CrescentPose;
pub use crate::eval::rectangle::RectanglePose;
pub use crate::eval::scene::{
    ActiveBrackets, CREDITS_END_SECS, FrameOutputs, SceneComposer, ScenePose, SequencePose,
    THE_END_AFTER_SECS,
};
pub use crate::eval::trapezoid::TrapezoidPose;
pub use crate::render::backend::{
    BackendKind, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{
    RenderStats, RenderThreading, RenderToMp4Opts, render_frame, render_frame_at, render_frames,
    render_png_sequence, render_range, render_to_mp4,
};
pub use crate::render::text::FontAsset;
pub use crate::short::Short;
pub use crate::stage::Stage;
pub use crate::stage::window::{PivotSide, Window};
