use std::ffi::OsString;
use std::io::{Read as _, Write as _};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread::JoinHandle;

use anyhow::Context as _;

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{WindowsillError, WindowsillResult};
use crate::render::backend::FrameRGBA;

/// Options for [`FfmpegSink`].
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    pub out_path: PathBuf,
    /// Replace `out_path` when it already exists.
    pub overwrite: bool,
    /// Opaque color the frames are flattened over (RGB8). H.264 carries no alpha.
    pub background: [u8; 3],
}

impl FfmpegSinkOpts {
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
            background: [0, 0, 0],
        }
    }
}

/// Streams frames as raw RGB24 into a system `ffmpeg` that encodes H.264 MP4.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,
    encoding: Option<Encoding>,
}

struct Encoding {
    encoder: Encoder,
    cfg: SinkConfig,
    last: Option<FrameIndex>,
    rgb: Vec<u8>,
}

impl FfmpegSink {
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            encoding: None,
        }
    }

    fn encoding(&mut self) -> WindowsillResult<&mut Encoding> {
        self.encoding
            .as_mut()
            .ok_or_else(|| WindowsillError::evaluation("mp4 sink used before begin"))
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> WindowsillResult<()> {
        if self.encoding.is_some() {
            return Err(WindowsillError::evaluation("mp4 sink is already encoding"));
        }
        check_dimensions(&cfg)?;

        let out = &self.opts.out_path;
        if out.exists() && !self.opts.overwrite {
            return Err(WindowsillError::validation(format!(
                "refusing to overwrite '{}'",
                out.display()
            )));
        }
        if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create output directory '{}'", dir.display()))?;
        }
        if !ffmpeg_available() {
            return Err(WindowsillError::evaluation(
                "MP4 output needs `ffmpeg` on PATH",
            ));
        }

        let encoder = Encoder::spawn(encoder_args(&cfg, out, self.opts.overwrite))?;
        tracing::info!(out = %out.display(), width = cfg.width, height = cfg.height, "encoding mp4");
        self.encoding = Some(Encoding {
            encoder,
            rgb: vec![0; cfg.width as usize * cfg.height as usize * 3],
            cfg,
            last: None,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> WindowsillResult<()> {
        let background = self.opts.background;
        let enc = self.encoding()?;
        if enc.last.is_some_and(|last| idx <= last) {
            return Err(WindowsillError::evaluation(format!(
                "frame {} pushed after frame {}",
                idx.0,
                enc.last.map_or(0, |l| l.0)
            )));
        }
        if (frame.width, frame.height) != (enc.cfg.width, enc.cfg.height) {
            return Err(WindowsillError::validation(format!(
                "frame {} is {}x{}, the mp4 is {}x{}",
                idx.0, frame.width, frame.height, enc.cfg.width, enc.cfg.height
            )));
        }

        flatten_to_rgb(&mut enc.rgb, &frame.data, frame.premultiplied, background)?;
        enc.encoder.write(&enc.rgb)?;
        enc.last = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> WindowsillResult<()> {
        let enc = self
            .encoding
            .take()
            .ok_or_else(|| WindowsillError::evaluation("mp4 sink ended before begin"))?;
        enc.encoder.finish()?;
        tracing::info!(out = %self.opts.out_path.display(), "mp4 written");
        Ok(())
    }

    fn abort(&mut self) {
        // Dropping the encoder kills ffmpeg; the half-written file is useless.
        if self.encoding.take().is_some() && self.opts.out_path.exists() {
            if let Err(err) = std::fs::remove_file(&self.opts.out_path) {
                tracing::warn!(out = %self.opts.out_path.display(), %err, "could not remove partial mp4");
            }
        }
    }
}

/// A running `ffmpeg` process fed on stdin.
///
/// Dropping it without [`finish`](Encoder::finish) kills and reaps the process.
struct Encoder {
    child: Child,
    stdin: Option<ChildStdin>,
    // ffmpeg blocks once its stderr pipe fills, so a thread keeps it drained.
    stderr: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
}

impl Encoder {
    fn spawn(args: Vec<OsString>) -> WindowsillResult<Self> {
        tracing::debug!(?args, "spawning ffmpeg");
        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .context("spawn ffmpeg")?;

        let stdin = child.stdin.take();
        let stderr = child.stderr.take().map(|mut pipe| {
            std::thread::spawn(move || {
                let mut log = Vec::new();
                pipe.read_to_end(&mut log)?;
                Ok(log)
            })
        });
        Ok(Self {
            child,
            stdin,
            stderr,
        })
    }

    fn write(&mut self, bytes: &[u8]) -> WindowsillResult<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| WindowsillError::evaluation("ffmpeg stdin is closed"))?;
        stdin
            .write_all(bytes)
            .context("ffmpeg stopped reading frames")?;
        Ok(())
    }

    /// Close stdin and wait for ffmpeg to flush the file.
    fn finish(mut self) -> WindowsillResult<()> {
        drop(self.stdin.take());
        let status = self.child.wait().context("wait for ffmpeg")?;
        let log = match self.stderr.take() {
            Some(drain) => drain
                .join()
                .map_err(|_| WindowsillError::evaluation("ffmpeg stderr reader panicked"))?
                .context("read ffmpeg stderr")?,
            None => Vec::new(),
        };
        if !status.success() {
            return Err(WindowsillError::evaluation(format!(
                "ffmpeg failed ({status}): {}",
                String::from_utf8_lossy(&log).trim()
            )));
        }
        Ok(())
    }
}

impl Drop for Encoder {
    fn drop(&mut self) {
        drop(self.stdin.take());
        if let Ok(None) = self.child.try_wait() {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

fn check_dimensions(cfg: &SinkConfig) -> WindowsillResult<()> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(WindowsillError::validation("mp4 frames must be non-empty"));
    }
    // yuv420p subsamples chroma 2x2.
    if !cfg.width.is_multiple_of(2) || !cfg.height.is_multiple_of(2) {
        return Err(WindowsillError::validation(format!(
            "mp4 needs even dimensions, got {}x{}",
            cfg.width, cfg.height
        )));
    }
    if cfg.fps.num == 0 || cfg.fps.den == 0 {
        return Err(WindowsillError::validation("mp4 frame rate must be non-zero"));
    }
    Ok(())
}

/// Command line for an H.264 encode of raw RGB24 frames read from stdin.
fn encoder_args(cfg: &SinkConfig, out: &Path, overwrite: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        if overwrite { "-y" } else { "-n" }.into(),
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "rawvideo".into(),
        "-pix_fmt".into(),
        "rgb24".into(),
        "-video_size".into(),
        format!("{}x{}", cfg.width, cfg.height).into(),
        // Input rate, so it must precede `-i`.
        "-framerate".into(),
        format!("{}/{}", cfg.fps.num, cfg.fps.den).into(),
        "-i".into(),
        "pipe:0".into(),
    ];
    args.extend(
        [
            "-an",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ]
        .map(OsString::from),
    );
    args.push(out.as_os_str().to_owned());
    args
}

/// Composite RGBA8 pixels over an opaque `background`, writing packed RGB8.
fn flatten_to_rgb(
    rgb: &mut [u8],
    rgba: &[u8],
    premultiplied: bool,
    background: [u8; 3],
) -> WindowsillResult<()> {
    if !rgba.len().is_multiple_of(4) || !rgb.len().is_multiple_of(3) || rgb.len() / 3 != rgba.len() / 4 {
        return Err(WindowsillError::validation(format!(
            "cannot flatten {} rgba bytes into {} rgb bytes",
            rgba.len(),
            rgb.len()
        )));
    }
    for (out, px) in rgb.chunks_exact_mut(3).zip(rgba.chunks_exact(4)) {
        let alpha = u32::from(px[3]);
        for c in 0..3 {
            let fg = u32::from(px[c]);
            let fg = if premultiplied { fg } else { div255(fg * alpha) };
            let bg = div255(u32::from(background[c]) * (255 - alpha));
            out[c] = (fg + bg).min(255) as u8;
        }
    }
    Ok(())
}

/// Rounded `x / 255`.
fn div255(x: u32) -> u32 {
    (x + 127) / 255
}

/// Whether an `ffmpeg` binary answers on `PATH`.
pub fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|s| s.success())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
