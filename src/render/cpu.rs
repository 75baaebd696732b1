use crate::compile::plan::{DrawOp, FramePlan};
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rgba8};
use crate::foundation::error::{WindowsillError, WindowsillResult};
use crate::render::backend::{FrameRGBA, RenderBackend, RenderSettings};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine, layout_origin};

/// CPU raster backend on `vello_cpu`.
pub struct CpuBackend {
    settings: RenderSettings,
    text: Option<TextLayoutEngine>,
    warned_missing_font: bool,
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> WindowsillResult<Self> {
        let text = settings
            .font
            .as_ref()
            .map(TextLayoutEngine::new)
            .transpose()?;
        Ok(Self {
            settings,
            text,
            warned_missing_font: false,
        })
    }

    fn draw_op(&mut self, ctx: &mut vello_cpu::RenderContext, op: &DrawOp) -> WindowsillResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        match op {
            DrawOp::FillPath {
                path,
                transform,
                color,
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                ctx.set_paint(color_to_cpu(*color));
                ctx.fill_path(&bezpath_to_cpu(path));
                Ok(())
            }
            DrawOp::Text {
                text,
                placement,
                size_px,
                color,
            } => {
                let Some(engine) = self.text.as_mut() else {
                    if !self.warned_missing_font {
                        tracing::warn!("no font loaded; skipping text draw ops");
                        self.warned_missing_font = true;
                    }
                    return Ok(());
                };

                let layout = engine.layout_line(text, *size_px, TextBrushRgba8::from(*color))?;
                let origin = layout_origin(&layout, *placement);
                ctx.set_transform(affine_to_cpu(Affine::translate(origin)));

                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(engine.font_data())
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                Ok(())
            }
        }
    }
}

impl RenderBackend for CpuBackend {
    #[tracing::instrument(level = "trace", skip_all, fields(ops = plan.ops.len()))]
    fn render_plan(&mut self, plan: &FramePlan) -> WindowsillResult<FrameRGBA> {
        let (width, height) = surface_size(plan.canvas)?;
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        let mut ctx = vello_cpu::RenderContext::new(width, height);

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color_to_cpu(plan.clear));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        for op in &plan.ops {
            self.draw_op(&mut ctx, op)?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

fn surface_size(canvas: Canvas) -> WindowsillResult<(u16, u16)> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| WindowsillError::evaluation("surface width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| WindowsillError::evaluation("surface height exceeds u16"))?;
    if width == 0 || height == 0 {
        return Err(WindowsillError::evaluation("surface must be non-empty"));
    }
    Ok((width, height))
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
