use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::config::ShortConfig;
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{WindowsillError, WindowsillResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a range render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called in strictly increasing `FrameIndex` order within the
/// requested render range.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> WindowsillResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> WindowsillResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> WindowsillResult<()>;
    /// Called instead of [`end`](FrameSink::end) when rendering fails after `begin`.
    ///
    /// Releases whatever `begin` acquired without finalizing the output.
    fn abort(&mut self) {}
}

impl From<&ShortConfig> for SinkConfig {
    fn from(cfg: &ShortConfig) -> Self {
        Self {
            width: cfg.canvas.width,
            height: cfg.canvas.height,
            fps: cfg.fps,
        }
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    ended: bool,
    aborted: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> WindowsillResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> WindowsillResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> WindowsillResult<()> {
        self.ended = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

/// Writes each frame as `<prefix><index, 5 digits>.png` into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    cfg: Option<SinkConfig>,
    written: u64,
    scratch: Vec<u8>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame_".to_owned(),
            cfg: None,
            written: 0,
            scratch: Vec::new(),
        }
    }

    /// Use `prefix` instead of `frame_` for file names.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Path the frame `idx` is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}{:05}.png", self.prefix, idx.0))
    }

    /// Number of files written since `begin`.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> WindowsillResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(WindowsillError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        self.cfg = Some(cfg);
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> WindowsillResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| WindowsillError::evaluation("png sink not started"))?;
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(WindowsillError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let pixels: &[u8] = if frame.premultiplied {
            self.scratch.resize(frame.data.len(), 0);
            unpremultiply_rgba8(&mut self.scratch, &frame.data)?;
            &self.scratch
        } else {
            &frame.data
        };
        let path = self.frame_path(idx);
        write_png(&path, pixels, frame.width, frame.height)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> WindowsillResult<()> {
        tracing::info!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        self.cfg = None;
        Ok(())
    }
}

/// Write straight-alpha RGBA8 pixels as a PNG file.
pub fn write_png(path: &Path, rgba8: &[u8], width: u32, height: u32) -> WindowsillResult<()> {
    image::save_buffer(path, rgba8, width, height, image::ExtendedColorType::Rgba8)
        .with_context(|| format!("failed to write png '{}'", path.display()))?;
    Ok(())
}

/// Convert premultiplied RGBA8 into straight alpha.
pub fn unpremultiply_rgba8(dst: &mut [u8], src_premul: &[u8]) -> WindowsillResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(WindowsillError::validation(
            "unpremultiply_rgba8 expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        match a {
            0 => d.copy_from_slice(&[0, 0, 0, 0]),
            255 => d.copy_from_slice(s),
            _ => {
                let un = |c: u8| -> u8 { ((u16::from(c) * 255 + a / 2) / a).min(255) as u8 };
                d[0] = un(s[0]);
                d[1] = un(s[1]);
                d[2] = un(s[2]);
                d[3] = s[3];
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
