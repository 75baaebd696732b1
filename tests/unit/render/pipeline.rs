use super::*;
use crate::compile::plan::FramePlan;
use crate::config::ShortConfig;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::Canvas;

fn small_short() -> Short {
    Short::new(ShortConfig {
        canvas: Canvas {
            width: 96,
            height: 54,
        },
        ..ShortConfig::default()
    })
    .unwrap()
}

fn range(start: u64, end: u64) -> FrameRange {
    FrameRange::new(FrameIndex(start), FrameIndex(end)).unwrap()
}

struct PlanOnly;

impl RenderBackend for PlanOnly {
    fn render_plan(&mut self, plan: &FramePlan) -> WindowsillResult<FrameRGBA> {
        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: vec![0; (plan.canvas.width * plan.canvas.height * 4) as usize],
            premultiplied: true,
        })
    }
}

#[test]
fn parallel_and_sequential_renders_agree() {
    let short = small_short();
    let mut backend = CpuBackend::new(RenderSettings::default()).unwrap();
    let r = range(4398, 4404);

    let (seq, seq_stats) =
        render_frames(&short, r, &mut backend, &RenderThreading::default()).unwrap();
    let (par, par_stats) = render_frames(
        &short,
        r,
        &mut backend,
        &RenderThreading {
            parallel: true,
            chunk_size: 4,
            threads: Some(2),
        },
    )
    .unwrap();

    assert_eq!(seq.len(), 6);
    assert_eq!(seq, par);
    assert_eq!(seq_stats.frames_total, 6);
    assert_eq!(seq_stats.chunks, 1);
    assert_eq!(par_stats.chunks, 2);
}

#[test]
fn render_range_streams_frames_in_order() {
    let short = small_short();
    let mut backend = CpuBackend::new(RenderSettings::default()).unwrap();
    let mut sink = InMemorySink::new();
    let threading = RenderThreading {
        chunk_size: 2,
        ..RenderThreading::default()
    };

    let stats = render_range(&short, range(10, 15), &mut backend, &threading, &mut sink).unwrap();

    assert_eq!(stats.frames_total, 5);
    assert_eq!(stats.chunks, 3);
    assert!(sink.is_ended());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (96, 54));
    assert_eq!(cfg.fps, short.config().fps);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![10, 11, 12, 13, 14]);
}

#[test]
fn frame_index_and_clock_time_agree() {
    let short = small_short();
    let mut backend = CpuBackend::new(RenderSettings::default()).unwrap();
    let frame = FrameIndex(4700);
    let one = render_frame(&short, frame, &mut backend).unwrap();
    let at = render_frame_at(&short, short.config().time_at(frame), &mut backend).unwrap();
    assert_eq!(one, at);
}

#[test]
fn empty_ranges_are_rejected() {
    let short = small_short();
    let mut backend = PlanOnly;
    let err = render_frames(&short, range(3, 3), &mut backend, &RenderThreading::default())
        .unwrap_err();
    assert!(matches!(err, WindowsillError::Validation(_)));
}

#[test]
fn empty_range_leaves_the_sink_untouched() {
    let short = small_short();
    let mut sink = InMemorySink::new();
    let err = render_range(
        &short,
        range(1000, 1000),
        &mut PlanOnly,
        &RenderThreading::default(),
        &mut sink,
    )
    .unwrap_err();
    assert!(matches!(err, WindowsillError::Validation(_)));
    assert!(sink.config().is_none());
    assert!(!sink.is_ended());
}

/// Renders blank frames until `fail_at`, then errors.
struct FailAt {
    fail_at: u64,
    rendered: u64,
}

impl RenderBackend for FailAt {
    fn render_plan(&mut self, plan: &FramePlan) -> WindowsillResult<FrameRGBA> {
        if self.rendered == self.fail_at {
            return Err(WindowsillError::evaluation("raster failed"));
        }
        self.rendered += 1;
        PlanOnly.render_plan(plan)
    }
}

#[test]
fn failed_chunk_aborts_the_sink() {
    let short = small_short();
    let mut sink = InMemorySink::new();
    let mut backend = FailAt {
        fail_at: 3,
        rendered: 0,
    };
    let threading = RenderThreading {
        chunk_size: 2,
        ..RenderThreading::default()
    };

    let err = render_range(&short, range(10, 15), &mut backend, &threading, &mut sink)
        .unwrap_err();

    assert!(matches!(err, WindowsillError::Evaluation(_)));
    assert!(sink.is_aborted());
    assert!(!sink.is_ended());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![10, 11]);
}

#[test]
fn parallel_needs_worker_settings_and_threads() {
    let short = small_short();
    let parallel = RenderThreading {
        parallel: true,
        ..RenderThreading::default()
    };
    assert!(render_frames(&short, range(0, 2), &mut PlanOnly, &parallel).is_err());

    let mut backend = CpuBackend::new(RenderSettings::default()).unwrap();
    let zero_threads = RenderThreading {
        threads: Some(0),
        ..parallel
    };
    assert!(render_frames(&short, range(0, 2), &mut backend, &zero_threads).is_err());
}

#[test]
fn zero_chunk_size_renders_one_frame_per_chunk() {
    let short = small_short();
    let threading = RenderThreading {
        chunk_size: 0,
        ..RenderThreading::default()
    };
    let (frames, stats) = render_frames(&short, range(0, 3), &mut PlanOnly, &threading).unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(stats.chunks, 3);
}
