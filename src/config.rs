use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{WindowsillError, WindowsillResult};

/// Render-time configuration of the short.
///
/// Every field has a default, so a JSON config only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShortConfig {
    /// Output canvas. The stage is laid out for 1920x1080.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Clock seconds advanced per output frame.
    pub time_step: f64,
    /// Clock time at which rendering stops.
    pub duration_secs: f64,
    /// Seed for the stage's random draws (window tilts, pivot sides, walk targets).
    pub seed: u64,
    /// The two lines shown on the credits screen.
    pub credits: Vec<String>,
    pub font_size_px: f32,
    /// Font used for credits, the time counter and the title card.
    pub font_path: Option<PathBuf>,
}

impl Default for ShortConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            fps: Fps { num: 60, den: 1 },
            time_step: 0.005,
            duration_secs: 38.0,
            seed: 1,
            credits: vec!["Windowsill".to_owned(), "a short in four actors".to_owned()],
            font_size_px: 32.0,
            font_path: None,
        }
    }
}

impl ShortConfig {
    /// Load a JSON config; absent fields keep their defaults.
    pub fn from_json_path(path: &Path) -> WindowsillResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes).map_err(|e| {
            WindowsillError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> WindowsillResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(WindowsillError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if !self.canvas.width.is_multiple_of(2) || !self.canvas.height.is_multiple_of(2) {
            return Err(WindowsillError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(WindowsillError::validation("canvas exceeds 65535 pixels"));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(WindowsillError::validation(
                "time_step must be finite and > 0",
            ));
        }
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(WindowsillError::validation(
                "duration_secs must be finite and > 0",
            ));
        }
        if self.credits.len() != 2 {
            return Err(WindowsillError::validation(
                "credits must have exactly two lines",
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(WindowsillError::validation(
                "font_size_px must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Clock time shown on output frame `frame`.
    pub fn time_at(&self, frame: FrameIndex) -> f64 {
        frame.0 as f64 * self.time_step
    }

    /// First output frame whose clock time is at or after `secs`.
    pub fn frame_at(&self, secs: f64) -> FrameIndex {
        // Tolerance keeps exact multiples of the step from rounding up a frame.
        FrameIndex(((secs.max(0.0) / self.time_step) - 1e-9).ceil().max(0.0) as u64)
    }

    /// Frames covering clock time `[from, to)`.
    pub fn frame_range(&self, from: f64, to: f64) -> WindowsillResult<FrameRange> {
        FrameRange::new(self.frame_at(from), self.frame_at(to))
    }

    /// Frames covering the whole short.
    pub fn full_range(&self) -> WindowsillResult<FrameRange> {
        self.frame_range(0.0, self.duration_secs)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
