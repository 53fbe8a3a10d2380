// File: crates/stockline-render-skia/src/text.rs
// Summary: Text shaping for chart labels via Skia textlayout, honoring run alignment and baseline.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

use stockline_core::{TextAlign, TextBaseline, TextRun};

use crate::to_skia_color;

/// Families tried after the run's own family when it is not installed.
const FALLBACK_FAMILIES: [&str; 5] = ["Segoe UI", "Arial", "Helvetica", "DejaVu Sans", "sans-serif"];

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(run: &TextRun) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(run.style.size_px().max(1.0));
        ts.set_color(to_skia_color(run.style.color));
        let mut families = Vec::with_capacity(FALLBACK_FAMILIES.len() + 1);
        families.push(run.style.family);
        families.extend_from_slice(&FALLBACK_FAMILIES);
        ts.set_font_families(&families);
        ts
    }

    /// Single-line paragraph for `run`, laid out left-aligned.
    pub fn layout(&self, run: &TextRun) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        pstyle.set_max_lines(1);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(run));
        builder.add_text(&run.text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        paragraph
    }

    /// Paint `run` so that its anchor lands on `run.at`.
    pub fn draw(&self, canvas: &skia::Canvas, run: &TextRun) {
        let mut p = self.layout(run);
        let origin = paragraph_origin(run, p.longest_line(), p.height(), p.alphabetic_baseline());
        p.paint(canvas, origin);
    }
}

/// Top-left corner of a paragraph of the given metrics anchored at `run.at`.
pub(crate) fn paragraph_origin(run: &TextRun, width: f32, height: f32, baseline: f32) -> skia::Point {
    let x = match run.style.align {
        TextAlign::Start => run.at.x,
        TextAlign::Center => run.at.x - width / 2.0,
        TextAlign::End => run.at.x - width,
    };
    let y = match run.style.baseline {
        TextBaseline::Top => run.at.y,
        TextBaseline::Middle => run.at.y - height / 2.0,
        TextBaseline::Alphabetic => run.at.y - baseline,
    };
    skia::Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockline_core::geometry::Pt;
    use stockline_core::{palette, TextStyle as RunStyle};

    fn run(align: TextAlign, baseline: TextBaseline) -> TextRun {
        TextRun {
            text: "Mar".into(),
            at: Pt::new(100.0, 50.0),
            style: RunStyle {
                family: palette::FONT_FAMILY,
                size_pt: palette::AXIS_FONT_PT,
                color: palette::AXIS,
                align,
                baseline,
            },
        }
    }

    #[test]
    fn anchors_follow_alignment_and_baseline() {
        let o = paragraph_origin(&run(TextAlign::Center, TextBaseline::Top), 20.0, 14.0, 11.0);
        assert_eq!((o.x, o.y), (90.0, 50.0));

        let o = paragraph_origin(&run(TextAlign::End, TextBaseline::Middle), 20.0, 14.0, 11.0);
        assert_eq!((o.x, o.y), (80.0, 43.0));

        let o = paragraph_origin(&run(TextAlign::Start, TextBaseline::Alphabetic), 20.0, 14.0, 11.0);
        assert_eq!((o.x, o.y), (100.0, 39.0));
    }
}
