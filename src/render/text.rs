use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::compile::plan::TextPlacement;
use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{WindowsillError, WindowsillResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Font file contents, checked to contain at least one usable face.
#[derive(Clone)]
pub struct FontAsset {
    bytes: Arc<Vec<u8>>,
    family: String,
}

impl std::fmt::Debug for FontAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAsset")
            .field("family", &self.family)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl FontAsset {
    /// Read and validate a TrueType/OpenType font file.
    pub fn from_path(path: &Path) -> WindowsillResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes).map_err(|e| match e {
            WindowsillError::Asset(msg) => {
                WindowsillError::asset(format!("font '{}': {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn from_bytes(bytes: Vec<u8>) -> WindowsillResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, &bytes)?;
        tracing::debug!(family = %family, bytes = bytes.len(), "font loaded");
        Ok(Self {
            bytes: Arc::new(bytes),
            family,
        })
    }

    /// Family name the font registers under.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> WindowsillResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| WindowsillError::asset("no font families registered from font bytes"))?;
    Ok(font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| WindowsillError::asset("registered font family has no name"))?
        .to_string())
}

/// Stateful helper for laying out single lines of text in one font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family: String,
    font_data: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    pub(crate) fn new(font: &FontAsset) -> WindowsillResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, font.bytes())?;
        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
            0,
        );
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font_data,
        })
    }

    /// Font handle for glyph rasterization.
    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font_data
    }

    /// Shape and lay out `text` on a single unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> WindowsillResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WindowsillError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Offset from layout space (origin at the box's top-left) to canvas space for `placement`.
pub(crate) fn layout_origin(
    layout: &parley::Layout<TextBrushRgba8>,
    placement: TextPlacement,
) -> Vec2 {
    match placement {
        TextPlacement::Baseline(p) => {
            let baseline = layout
                .lines()
                .next()
                .map(|line| f64::from(line.metrics().baseline))
                .unwrap_or(0.0);
            Vec2::new(p.x, p.y - baseline)
        }
        TextPlacement::Centered(c) => Vec2::new(
            c.x - f64::from(layout.width()) / 2.0,
            c.y - f64::from(layout.height()) / 2.0,
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
