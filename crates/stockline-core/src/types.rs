// File: crates/stockline-core/src/types.rs
// Summary: Shared types and constants (surface size, margins, plot layout, chart config).

use crate::error::{ChartError, ChartResult};
use crate::geometry::Rect;

/// Default surface width in pixels.
pub const WIDTH: u32 = 1024;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 640;

/// Screen margins around the plot, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
    /// Total horizontal margin (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(15, 15, 20, 30)
    }
}

/// Build-time chart options. Styling is fixed (see `palette`); only
/// geometry and tick density are configurable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartConfig {
    pub margins: Margins,
    /// Requested number of ticks per axis.
    pub tick_count: usize,
    /// Length of the perpendicular tick mark in pixels.
    pub tick_size: f32,
    /// Gap between a y tick mark and its label.
    pub tick_padding: f32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { margins: Margins::default(), tick_count: 10, tick_size: 5.0, tick_padding: 5.0 }
    }
}

/// Plot bounds derived from a surface size and margins. All drawing for
/// the plot happens in plot-local coordinates: the origin is the plot's
/// top-left corner (surface translated by `margins.left, margins.top`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotLayout {
    pub surface_width: u32,
    pub surface_height: u32,
    pub margins: Margins,
    pub width: f32,
    pub height: f32,
}

impl PlotLayout {
    pub fn new(surface_width: u32, surface_height: u32, margins: Margins) -> ChartResult<Self> {
        let width = surface_width as i64 - margins.hsum() as i64;
        let height = surface_height as i64 - margins.vsum() as i64;
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidLayout { width, height });
        }
        Ok(Self {
            surface_width,
            surface_height,
            margins,
            width: width as f32,
            height: height as f32,
        })
    }

    /// Whether a surface-space x coordinate lies in `[left, left + width)`.
    #[inline]
    pub fn contains_x(&self, surface_x: f32) -> bool {
        let left = self.margins.left as f32;
        surface_x >= left && surface_x < left + self.width
    }

    /// Surface-space x converted to plot-local x.
    #[inline]
    pub fn to_plot_x(&self, surface_x: f32) -> f32 {
        surface_x - self.margins.left as f32
    }

    /// Plot-local rectangle cleared on every hover redraw: everything right
    /// of the y axis down to the bottom of the plot. Axis label bands (left
    /// and bottom margins) are left intact.
    pub fn hover_clear_rect(&self) -> Rect {
        let w = (self.surface_width - self.margins.left) as f32;
        Rect::from_xywh(0.0, 0.0, w, self.height)
    }
}
