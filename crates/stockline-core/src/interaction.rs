// File: crates/stockline-core/src/interaction.rs
// Summary: Pointer hover handling: nearest-point lookup, crosshair and tooltip redraw.

use chrono::NaiveDateTime;
use tracing::trace;

use crate::draw::{DrawCommand, DrawList, PathVerb, Stroke, TextAlign, TextBaseline, TextRun, TextStyle};
use crate::geometry::{clamp, Pt};
use crate::palette;
use crate::scale::Scale;
use crate::series::{Point, Series};
use crate::session::ChartSession;

/// Pointer position in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32) -> Self { Self { x, y } }
}

/// Result of resolving one pointer event against the reference series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverSample {
    /// Cursor x in plot-local pixels.
    pub cursor_x: f32,
    /// Index into the reference series.
    pub index: usize,
    pub point: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum HoverState {
    /// Static chart only.
    #[default]
    Idle,
    /// Static chart plus crosshair and tooltip for the last accepted event.
    Hovering(HoverSample),
}

/// Index of the point resolved for `t`: the lower bound of `t` among the
/// series dates, clamped to the last point. No neighbour comparison is
/// made, so a query between two dates resolves to the later one.
/// `None` for an empty series.
pub fn nearest_index(series: &Series, t: NaiveDateTime) -> Option<usize> {
    let last = series.len().checked_sub(1)?;
    Some(clamp(series.lower_bound(t), 0, last))
}

/// `Jan 5`
pub fn format_hover_date(date: NaiveDateTime) -> String {
    date.format("%b %-d").to_string()
}

/// `$1,234.50`
pub fn format_hover_price(price: f64) -> String {
    let fixed = format!("{:.2}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if price < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') { "-" } else { "" };
    format!("${sign}{grouped}.{frac_part}")
}

fn tooltip_style() -> TextStyle {
    TextStyle {
        family: palette::FONT_FAMILY,
        size_pt: palette::TOOLTIP_FONT_PT,
        color: palette::AXIS,
        align: TextAlign::Start,
        baseline: TextBaseline::Middle,
    }
}

/// Resolve a pointer event to a hover sample, or `None` when the event
/// falls outside the plot's horizontal bounds.
pub fn hover_sample(event: PointerEvent, session: &ChartSession) -> Option<HoverSample> {
    let layout = session.layout();
    if !layout.contains_x(event.x) {
        return None;
    }
    let cursor_x = layout.to_plot_x(event.x);
    let cursor_time = session.x_scale().invert(cursor_x as f64);
    let reference = session.reference_series();
    let index = nearest_index(reference, cursor_time)?;
    Some(HoverSample { cursor_x, index, point: reference.points()[index] })
}

/// Partial redraw for an accepted sample: clear the plot region, redraw
/// the series, then the dashed crosshair and the two tooltip fields.
pub fn hover_frame(sample: &HoverSample, session: &ChartSession) -> DrawList {
    let layout = session.layout();
    let mut list = DrawList::new();
    list.push(DrawCommand::ClearRect(layout.hover_clear_rect()));
    list.append(session.series_layer());

    list.push(DrawCommand::StrokePath {
        verbs: vec![
            PathVerb::MoveTo(Pt::new(sample.cursor_x, 0.0)),
            PathVerb::LineTo(Pt::new(sample.cursor_x, layout.height)),
        ],
        stroke: Stroke::dashed(palette::CROSSHAIR, palette::CROSSHAIR_WIDTH, &palette::CROSSHAIR_DASH),
    });

    let origin = Pt::new(layout.margins.left as f32, layout.margins.top as f32);
    let style = tooltip_style();
    list.push(DrawCommand::FillText(TextRun {
        text: format_hover_date(sample.point.date),
        at: origin,
        style,
    }));
    list.push(DrawCommand::FillText(TextRun {
        text: format_hover_price(sample.point.price),
        at: Pt::new(origin.x + palette::TOOLTIP_FIELD_GAP, origin.y),
        style,
    }));
    list
}

/// Pure pointer-move handler: `(event, session) -> draw commands`, or
/// `None` when the event is ignored and nothing should be redrawn.
pub fn handle_pointer_move(event: PointerEvent, session: &ChartSession) -> Option<(HoverSample, DrawList)> {
    let sample = hover_sample(event, session)?;
    let frame = hover_frame(&sample, session);
    Some((sample, frame))
}

/// Two-state hover machine. Events outside the plot bounds are dropped
/// without leaving `Hovering`: the last crosshair stays on screen.
#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionController {
    state: HoverState,
    pending: Option<PointerEvent>,
}

impl InteractionController {
    pub fn new() -> Self { Self::default() }

    pub fn state(&self) -> HoverState { self.state }

    /// Handle one event synchronously.
    pub fn on_pointer_move(&mut self, event: PointerEvent, session: &ChartSession) -> Option<DrawList> {
        match handle_pointer_move(event, session) {
            Some((sample, frame)) => {
                trace!(x = event.x, index = sample.index, date = %sample.point.date, "hover");
                self.state = HoverState::Hovering(sample);
                Some(frame)
            }
            None => {
                trace!(x = event.x, "pointer outside plot bounds; ignored");
                None
            }
        }
    }

    /// Remember `event` for the next frame, replacing any event not yet flushed.
    pub fn queue(&mut self, event: PointerEvent) {
        self.pending = Some(event);
    }

    pub fn has_pending(&self) -> bool { self.pending.is_some() }

    /// Process the latest queued event, if any. Call once per display refresh.
    pub fn flush(&mut self, session: &ChartSession) -> Option<DrawList> {
        let event = self.pending.take()?;
        self.on_pointer_move(event, session)
    }

    /// Back to `Idle` with nothing queued; used when a session is replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
