use std::path::PathBuf;

use rayon::prelude::*;

use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, PngSequenceSink, SinkConfig};
use crate::foundation::core::{FrameIndex, FrameRange};
use crate::foundation::error::{WindowsillError, WindowsillResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::cpu::CpuBackend;
use crate::short::Short;

/// Evaluate + compile + render a single output frame.
///
/// Pipeline:
/// 1. [`SceneComposer::evaluate`](crate::SceneComposer::evaluate) at `frame × time_step`
/// 2. [`compile_frame`](crate::compile_frame)
/// 3. [`RenderBackend::render_plan`]
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_frame(
    short: &Short,
    frame: FrameIndex,
    backend: &mut dyn RenderBackend,
) -> WindowsillResult<FrameRGBA> {
    let plan = short.plan_for_frame(frame)?;
    backend.render_plan(&plan)
}

/// Render the frame shown at clock `time`, for scrubbing to an arbitrary moment.
pub fn render_frame_at(
    short: &Short,
    time: f64,
    backend: &mut dyn RenderBackend,
) -> WindowsillResult<FrameRGBA> {
    let plan = short.plan_at(time)?;
    backend.render_plan(&plan)
}

#[derive(Clone, Debug)]
pub struct RenderThreading {
    pub parallel: bool,
    pub chunk_size: usize,
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub chunks: u64,
}

/// Render a range of frames (inclusive start, exclusive end) into memory.
pub fn render_frames(
    short: &Short,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> WindowsillResult<(Vec<FrameRGBA>, RenderStats)> {
    let mut out = Vec::with_capacity(range.len_frames().min(4096) as usize);
    let stats = for_each_chunk(short, range, backend, threading, |_, frames| {
        out.extend(frames);
        Ok(())
    })?;
    Ok((out, stats))
}

/// Render a range of frames and stream them, in order, into `sink`.
#[tracing::instrument(level = "info", skip_all, fields(start = range.start.0, end = range.end.0))]
pub fn render_range(
    short: &Short,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
    sink: &mut dyn FrameSink,
) -> WindowsillResult<RenderStats> {
    if range.is_empty() {
        return Err(WindowsillError::validation("render range must be non-empty"));
    }
    sink.begin(SinkConfig::from(short.config()))?;

    let rendered = for_each_chunk(short, range, backend, threading, |chunk, frames| {
        for (f, frame) in (chunk.start.0..chunk.end.0).zip(frames.iter()) {
            sink.push_frame(FrameIndex(f), frame)?;
        }
        Ok(())
    });
    let stats = match rendered {
        Ok(stats) => stats,
        Err(err) => {
            tracing::warn!(error = %err, "render failed, aborting sink");
            sink.abort();
            return Err(err);
        }
    };

    sink.end()?;
    tracing::info!(frames = stats.frames_total, chunks = stats.chunks, "range rendered");
    Ok(stats)
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Frame range to render (start inclusive, end exclusive).
    pub range: FrameRange,
    /// Opaque color the frames are flattened over (RGB8).
    pub background: [u8; 3],
    /// Whether to overwrite `out_path` if it already exists.
    pub overwrite: bool,
    pub threading: RenderThreading,
}

impl RenderToMp4Opts {
    /// Options covering the whole short with default threading.
    pub fn full(short: &Short) -> WindowsillResult<Self> {
        Ok(Self {
            range: short.config().full_range()?,
            background: [0, 0, 0],
            overwrite: true,
            threading: RenderThreading::default(),
        })
    }
}

/// Render the short to an MP4 by streaming frames into the system `ffmpeg` binary.
///
/// `ffmpeg` must be installed and on `PATH`; the sink checks for it before any frame is rendered.
pub fn render_to_mp4(
    short: &Short,
    out_path: impl Into<PathBuf>,
    opts: RenderToMp4Opts,
    backend: &mut dyn RenderBackend,
) -> WindowsillResult<RenderStats> {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: out_path.into(),
        overwrite: opts.overwrite,
        background: opts.background,
    });
    render_range(short, opts.range, backend, &opts.threading, &mut sink)
}

/// Render a range as numbered PNG files in `out_dir`.
pub fn render_png_sequence(
    short: &Short,
    out_dir: impl Into<PathBuf>,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
) -> WindowsillResult<RenderStats> {
    let mut sink = PngSequenceSink::new(out_dir);
    render_range(short, range, backend, threading, &mut sink)
}

/// Render `range` chunk by chunk, handing each finished chunk to `on_chunk` in order.
fn for_each_chunk(
    short: &Short,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
    threading: &RenderThreading,
    mut on_chunk: impl FnMut(FrameRange, Vec<FrameRGBA>) -> WindowsillResult<()>,
) -> WindowsillResult<RenderStats> {
    if range.is_empty() {
        return Err(WindowsillError::validation("render range must be non-empty"));
    }

    let chunk_size = normalized_chunk_size(threading.chunk_size);
    let parallel = if threading.parallel {
        let settings = backend.worker_render_settings().ok_or_else(|| {
            WindowsillError::evaluation(
                "parallel render requires backend worker settings support (CpuBackend)",
            )
        })?;
        Some((settings, build_thread_pool(threading.threads)?))
    } else {
        None
    };

    let mut stats = RenderStats::default();
    let mut chunk_start = range.start.0;
    while chunk_start < range.end.0 {
        let chunk_end = (chunk_start + chunk_size).min(range.end.0);
        let chunk = FrameRange::new(FrameIndex(chunk_start), FrameIndex(chunk_end))
            .map_err(|e| WindowsillError::evaluation(format!("invalid chunk range: {e}")))?;

        let frames = match parallel.as_ref() {
            Some((settings, pool)) => render_chunk_parallel_cpu(short, chunk, settings, pool)?,
            None => render_chunk_sequential(short, chunk, backend)?,
        };
        tracing::debug!(start = chunk_start, end = chunk_end, "chunk rendered");

        stats.frames_total += chunk.len_frames();
        stats.chunks += 1;
        on_chunk(chunk, frames)?;
        chunk_start = chunk_end;
    }
    Ok(stats)
}

fn render_chunk_sequential(
    short: &Short,
    range: FrameRange,
    backend: &mut dyn RenderBackend,
) -> WindowsillResult<Vec<FrameRGBA>> {
    (range.start.0..range.end.0)
        .map(|f| render_frame(short, FrameIndex(f), backend))
        .collect()
}

fn render_chunk_parallel_cpu(
    short: &Short,
    range: FrameRange,
    settings: &RenderSettings,
    pool: &rayon::ThreadPool,
) -> WindowsillResult<Vec<FrameRGBA>> {
    let frames: Vec<u64> = (range.start.0..range.end.0).collect();

    // Poses are a pure function of time, so frames can be evaluated in any order.
    pool.install(|| {
        frames
            .par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker, &f| -> WindowsillResult<FrameRGBA> {
                    let backend = worker.as_mut().map_err(|e| {
                        WindowsillError::evaluation(format!("worker backend init failed: {e}"))
                    })?;
                    render_frame(short, FrameIndex(f), backend)
                },
            )
            .collect::<WindowsillResult<Vec<_>>>()
    })
}

fn build_thread_pool(threads: Option<usize>) -> WindowsillResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(WindowsillError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        WindowsillError::evaluation(format!("failed to build rayon thread pool: {e}"))
    })
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 {
        1
    } else {
        chunk_size as u64
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
