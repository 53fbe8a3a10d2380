// File: crates/stockline-core/src/axis.rs
// Summary: Axis tick generation, tick label formatting and tick/label draw commands.

use chrono::NaiveDateTime;

use crate::draw::{DrawCommand, DrawList, PathVerb, Stroke, TextAlign, TextBaseline, TextRun, TextStyle};
use crate::geometry::Pt;
use crate::palette;
use crate::scale::Scale;
use crate::types::{ChartConfig, PlotLayout};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisKind {
    Time,
    Value,
}

/// A tick value tagged with the kind of axis it belongs to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickValue {
    Time(NaiveDateTime),
    Value(f64),
}

impl TickValue {
    pub fn kind(&self) -> AxisKind {
        match self {
            TickValue::Time(_) => AxisKind::Time,
            TickValue::Value(_) => AxisKind::Value,
        }
    }
}

impl From<NaiveDateTime> for TickValue {
    fn from(t: NaiveDateTime) -> Self { TickValue::Time(t) }
}

impl From<f64> for TickValue {
    fn from(v: f64) -> Self { TickValue::Value(v) }
}

/// Which side of the plot an axis sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

/// Approximately `desired_count` evenly spaced values spanning the scale's domain.
pub fn generate_ticks<S: Scale>(scale: &S, desired_count: usize) -> Vec<S::Value> {
    scale.ticks(desired_count)
}

/// Time ticks read as a month abbreviation (`Mar`); value ticks as two decimals.
pub fn format_tick(value: TickValue) -> String {
    match value {
        TickValue::Time(t) => t.format("%b").to_string(),
        TickValue::Value(v) => format!("{v:.2}"),
    }
}

fn label_style(align: TextAlign, baseline: TextBaseline) -> TextStyle {
    TextStyle {
        family: palette::FONT_FAMILY,
        size_pt: palette::AXIS_FONT_PT,
        color: palette::AXIS,
        align,
        baseline,
    }
}

/// Stateless axis renderer; draws in plot-local coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axis {
    pub orientation: Orientation,
    pub tick_count: usize,
    pub tick_size: f32,
    pub tick_padding: f32,
}

impl Axis {
    pub fn new(orientation: Orientation, config: &ChartConfig) -> Self {
        Self {
            orientation,
            tick_count: config.tick_count,
            tick_size: config.tick_size,
            tick_padding: config.tick_padding,
        }
    }

    pub fn bottom(config: &ChartConfig) -> Self { Self::new(Orientation::Bottom, config) }

    pub fn left(config: &ChartConfig) -> Self { Self::new(Orientation::Left, config) }

    /// Generate ticks for `scale` and draw them.
    pub fn draw<S>(&self, scale: &S, layout: &PlotLayout) -> DrawList
    where
        S: Scale,
        S::Value: Into<TickValue>,
    {
        let ticks = generate_ticks(scale, self.tick_count);
        self.draw_ticks(&ticks, scale, layout)
    }

    /// Tick marks outside the plot edge plus one label per tick.
    pub fn draw_ticks<S>(&self, ticks: &[S::Value], scale: &S, layout: &PlotLayout) -> DrawList
    where
        S: Scale,
        S::Value: Into<TickValue>,
    {
        let mut list = DrawList::new();
        if ticks.is_empty() {
            return list;
        }

        let positions: Vec<(f32, String)> = ticks
            .iter()
            .map(|&t| (scale.map(t) as f32, format_tick(t.into())))
            .collect();

        let mut verbs = Vec::with_capacity(positions.len() * 2);
        for &(p, _) in &positions {
            let (from, to) = match self.orientation {
                Orientation::Bottom => (Pt::new(p, layout.height), Pt::new(p, layout.height + self.tick_size)),
                Orientation::Left => (Pt::new(0.0, p), Pt::new(-self.tick_size, p)),
            };
            verbs.push(PathVerb::MoveTo(from));
            verbs.push(PathVerb::LineTo(to));
        }
        list.push(DrawCommand::StrokePath {
            verbs,
            stroke: Stroke::solid(palette::AXIS, palette::TICK_LINE_WIDTH),
        });

        let style = match self.orientation {
            Orientation::Bottom => label_style(TextAlign::Center, TextBaseline::Top),
            Orientation::Left => label_style(TextAlign::End, TextBaseline::Middle),
        };
        for (p, text) in positions {
            let at = match self.orientation {
                Orientation::Bottom => Pt::new(p, layout.height + self.tick_size),
                Orientation::Left => Pt::new(-self.tick_size - self.tick_padding, p),
            };
            list.push(DrawCommand::FillText(TextRun { text, at, style }));
        }
        list
    }
}
