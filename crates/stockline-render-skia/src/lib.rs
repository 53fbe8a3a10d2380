// File: crates/stockline-render-skia/src/lib.rs
// Summary: Skia CPU raster surface implementing the chart `Surface` contract, with PNG output.

pub mod text;

use std::path::Path;

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use stockline_core::geometry::Rect;
use stockline_core::{ChartError, ChartResult, PathVerb, Rgba, Stroke, Surface, TextRun};

pub use text::TextShaper;

pub(crate) fn to_skia_color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn to_skia_rect(r: Rect) -> skia::Rect {
    skia::Rect::from_ltrb(r.left, r.top, r.right, r.bottom)
}

/// Offscreen N32 premultiplied raster that charts draw into. Starts fully
/// transparent.
pub struct SkiaSurface {
    surface: skia::Surface,
    width: u32,
    height: u32,
    shaper: TextShaper,
}

impl SkiaSurface {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let w = i32::try_from(width)?;
        let h = i32::try_from(height)?;
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create {width}x{height} raster surface"))?;
        surface.canvas().clear(skia::Color::TRANSPARENT);
        debug!(width, height, "skia raster surface created");
        Ok(Self { surface, width, height, shaper: TextShaper::new() })
    }

    /// Current contents encoded as PNG.
    pub fn encode_png(&mut self) -> Result<Vec<u8>> {
        let image = self.surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Encode as PNG and write to `path`, creating parent directories.
    pub fn write_png(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_png()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "png written");
        Ok(())
    }
}

impl Surface for SkiaSurface {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }

    fn reset_transform(&mut self) {
        self.surface.canvas().reset_matrix();
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.surface.canvas().translate((dx, dy));
    }

    fn clear_rect(&mut self, rect: Rect) {
        let mut paint = skia::Paint::default();
        paint.set_blend_mode(skia::BlendMode::Clear);
        self.surface.canvas().draw_rect(to_skia_rect(rect), &paint);
    }

    fn stroke_path(&mut self, verbs: &[PathVerb], stroke: &Stroke) -> ChartResult<()> {
        if verbs.is_empty() {
            return Ok(());
        }
        let mut path = skia::Path::new();
        for verb in verbs {
            match *verb {
                PathVerb::MoveTo(p) => { path.move_to((p.x, p.y)); }
                PathVerb::LineTo(p) => { path.line_to((p.x, p.y)); }
            }
        }

        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(stroke.width);
        paint.set_color(to_skia_color(stroke.color));
        if stroke.is_dashed() {
            let effect = skia::PathEffect::dash(&stroke.dash, 0.0)
                .ok_or_else(|| ChartError::Surface(format!("invalid dash intervals {:?}", stroke.dash)))?;
            paint.set_path_effect(effect);
        }

        self.surface.canvas().draw_path(&path, &paint);
        Ok(())
    }

    fn fill_text(&mut self, run: &TextRun) -> ChartResult<()> {
        let canvas = self.surface.canvas();
        self.shaper.draw(canvas, run);
        Ok(())
    }
}
