// File: crates/stockline-core/src/draw.rs
// Summary: Backend-agnostic draw commands, the `Surface` contract, and a recording surface.

use crate::error::ChartResult;
use crate::geometry::{Pt, Rect};
use crate::palette::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathVerb {
    MoveTo(Pt),
    LineTo(Pt),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
    /// On/off dash intervals in pixels; empty means solid.
    pub dash: Vec<f32>,
}

impl Stroke {
    pub fn solid(color: Rgba, width: f32) -> Self {
        Self { color, width, dash: Vec::new() }
    }

    pub fn dashed(color: Rgba, width: f32, dash: &[f32]) -> Self {
        Self { color, width, dash: dash.to_vec() }
    }

    pub fn is_dashed(&self) -> bool { !self.dash.is_empty() }
}

/// Horizontal anchor of a text run relative to its x position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// Vertical anchor of a text run relative to its y position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Alphabetic,
    Top,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub family: &'static str,
    pub size_pt: f32,
    pub color: Rgba,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// Font size in CSS pixels (1pt = 4/3 px).
    pub fn size_px(&self) -> f32 { self.size_pt * 4.0 / 3.0 }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub at: Pt,
    pub style: TextStyle,
}

/// One drawing step. Coordinates are interpreted under the surface's
/// current transform, the same way a 2D canvas context does.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    ResetTransform,
    Translate { dx: f32, dy: f32 },
    ClearRect(Rect),
    StrokePath { verbs: Vec<PathVerb>, stroke: Stroke },
    FillText(TextRun),
}

/// Ordered list of draw commands produced by the renderers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, cmd: DrawCommand) { self.commands.push(cmd); }

    pub fn append(&mut self, other: DrawList) { self.commands.extend(other.commands); }

    pub fn len(&self) -> usize { self.commands.len() }

    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    pub fn commands(&self) -> &[DrawCommand] { &self.commands }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> { self.commands.iter() }

    /// Stroked paths in draw order.
    pub fn strokes(&self) -> impl Iterator<Item = (&[PathVerb], &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::StrokePath { verbs, stroke } => Some((verbs.as_slice(), stroke)),
            _ => None,
        })
    }

    /// Text runs in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText(run) => Some(run),
            _ => None,
        })
    }

    /// Cleared rectangles in draw order.
    pub fn clears(&self) -> impl Iterator<Item = &Rect> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::ClearRect(r) => Some(r),
            _ => None,
        })
    }

    /// Execute every command against `surface`, stopping at the first backend error.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::ResetTransform => surface.reset_transform(),
                DrawCommand::Translate { dx, dy } => surface.translate(*dx, *dy),
                DrawCommand::ClearRect(r) => surface.clear_rect(*r),
                DrawCommand::StrokePath { verbs, stroke } => surface.stroke_path(verbs, stroke)?,
                DrawCommand::FillText(run) => surface.fill_text(run)?,
            }
        }
        Ok(())
    }
}

impl From<Vec<DrawCommand>> for DrawList {
    fn from(commands: Vec<DrawCommand>) -> Self { Self { commands } }
}

/// A 2D raster drawing surface with a fixed pixel size, supplied by the host.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn reset_transform(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    /// Erase pixels inside `rect` back to transparent.
    fn clear_rect(&mut self, rect: Rect);
    fn stroke_path(&mut self, verbs: &[PathVerb], stroke: &Stroke) -> ChartResult<()>;
    fn fill_text(&mut self, run: &TextRun) -> ChartResult<()>;
}

/// Headless surface that records every command it receives.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    log: DrawList,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, log: DrawList::new() }
    }

    pub fn log(&self) -> &DrawList { &self.log }

    /// Hand back the recorded commands and start a fresh log.
    pub fn take_log(&mut self) -> DrawList { std::mem::take(&mut self.log) }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 { self.width }
    fn height(&self) -> u32 { self.height }

    fn reset_transform(&mut self) { self.log.push(DrawCommand::ResetTransform); }

    fn translate(&mut self, dx: f32, dy: f32) { self.log.push(DrawCommand::Translate { dx, dy }); }

    fn clear_rect(&mut self, rect: Rect) { self.log.push(DrawCommand::ClearRect(rect)); }

    fn stroke_path(&mut self, verbs: &[PathVerb], stroke: &Stroke) -> ChartResult<()> {
        self.log.push(DrawCommand::StrokePath { verbs: verbs.to_vec(), stroke: stroke.clone() });
        Ok(())
    }

    fn fill_text(&mut self, run: &TextRun) -> ChartResult<()> {
        self.log.push(DrawCommand::FillText(run.clone()));
        Ok(())
    }
}
