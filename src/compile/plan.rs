use crate::compile::shapes::{
    crescent_path, crescent_transform, rect_path, rectangle_path, rectangle_transform,
    trapezoid_path, trapezoid_transform,
};
use crate::config::ShortConfig;
use crate::eval::scene::{ScenePose, SequencePose};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rgba8};
use crate::stage::{Stage, palette};

/// Baseline origin of the running time counter.
pub const COUNTER_AT: Point = Point::new(10.0, 30.0);
/// Baseline origins of the two credit lines.
pub const CREDITS_AT: [Point; 2] = [Point::new(300.0, 300.0), Point::new(300.0, 350.0)];
pub const THE_END: &str = "The End";

#[derive(Clone, Debug, PartialEq)]
/// Backend-agnostic draw list for one frame.
pub struct FramePlan {
    pub canvas: Canvas,
    /// Color the whole frame is cleared to before any op runs.
    pub clear: Rgba8,
    /// Draw operations in painter order.
    pub ops: Vec<DrawOp>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Where a line of text goes.
pub enum TextPlacement {
    /// Left end of the baseline.
    Baseline(Point),
    /// Center of the laid-out line's box.
    Centered(Point),
}

#[derive(Clone, Debug, PartialEq)]
/// A single draw operation.
pub enum DrawOp {
    /// Fill a local-space path placed by `transform`.
    FillPath {
        path: BezPath,
        transform: Affine,
        color: Rgba8,
    },
    /// One line of text in the loaded font.
    Text {
        text: String,
        placement: TextPlacement,
        size_px: f32,
        color: Rgba8,
    },
}

/// The running counter shows clock seconds with two decimals.
pub fn format_counter(time: f64) -> String {
    format!("{time:.2}")
}

/// Turn a scene pose into draw operations.
pub fn compile_frame(stage: &Stage, cfg: &ShortConfig, pose: &ScenePose) -> FramePlan {
    let text = |text: String, placement: TextPlacement| DrawOp::Text {
        text,
        placement,
        size_px: cfg.font_size_px,
        color: palette::TEXT,
    };

    match pose {
        ScenePose::Credits { time } => {
            let mut ops: Vec<DrawOp> = cfg
                .credits
                .iter()
                .zip(CREDITS_AT)
                .map(|(line, at)| text(line.clone(), TextPlacement::Baseline(at)))
                .collect();
            ops.push(text(format_counter(*time), TextPlacement::Baseline(COUNTER_AT)));
            FramePlan {
                canvas: stage.canvas,
                clear: palette::CREDITS_BACKGROUND,
                ops,
            }
        }
        ScenePose::Sequence(seq) => {
            let mut ops = Vec::with_capacity(stage.windows.len() + 5);
            push_actors(&mut ops, stage, seq);
            ops.push(text(format_counter(seq.time), TextPlacement::Baseline(COUNTER_AT)));
            if seq.show_the_end {
                ops.push(text(
                    THE_END.to_owned(),
                    TextPlacement::Centered(stage.canvas.center()),
                ));
            }
            FramePlan {
                canvas: stage.canvas,
                clear: palette::WALL,
                ops,
            }
        }
    }
}

fn push_actors(ops: &mut Vec<DrawOp>, stage: &Stage, seq: &SequencePose) {
    let glass = palette::WINDOW_NIGHT.lerp(palette::WINDOW_DAY, seq.background.day_blend);
    for (window, &tilt) in stage.windows.iter().zip(&seq.background.tilts) {
        ops.push(DrawOp::FillPath {
            path: rect_path(window.local_rect()),
            transform: window.transform(tilt),
            color: glass,
        });
    }

    ops.push(DrawOp::FillPath {
        path: rectangle_path(),
        transform: rectangle_transform(&seq.rectangle),
        color: palette::RECTANGLE.lerp(palette::RECTANGLE_NIGHT, seq.rectangle.night_blend),
    });
    ops.push(DrawOp::FillPath {
        path: trapezoid_path(),
        transform: trapezoid_transform(&seq.trapezoid),
        color: palette::TRAPEZOID,
    });
    ops.push(DrawOp::FillPath {
        path: crescent_path(),
        transform: crescent_transform(&seq.crescent),
        color: palette::CRESCENT,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
