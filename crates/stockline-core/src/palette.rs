// File: crates/stockline-core/src/palette.rs
// Summary: Fixed colors, fonts and stroke constants used by every renderer.

/// 8-bit RGBA color, backend-agnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b, a: 255 } }

    /// Opaque color from a `0xRRGGBB` literal.
    pub const fn hex(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }
}

/// Ordinal categorical palette (ten entries).
pub const CATEGORY10: [Rgba; 10] = [
    Rgba::hex(0x1f77b4),
    Rgba::hex(0xff7f0e),
    Rgba::hex(0x2ca02c),
    Rgba::hex(0xd62728),
    Rgba::hex(0x9467bd),
    Rgba::hex(0x8c564b),
    Rgba::hex(0xe377c2),
    Rgba::hex(0x7f7f7f),
    Rgba::hex(0xbcbd22),
    Rgba::hex(0x17becf),
];

/// Stable series color keyed by series index.
#[inline]
pub fn category10(index: usize) -> Rgba {
    CATEGORY10[index % CATEGORY10.len()]
}

/// Axis ticks, axis labels and tooltip text.
pub const AXIS: Rgba = Rgba::hex(0x616161);
pub const CROSSHAIR: Rgba = Rgba::hex(0xbdbdbd);

pub const FONT_FAMILY: &str = "Calibri";
/// Axis label size in points.
pub const AXIS_FONT_PT: f32 = 10.0;
/// Tooltip size in points.
pub const TOOLTIP_FONT_PT: f32 = 20.0;

pub const SERIES_LINE_WIDTH: f32 = 2.0;
pub const CROSSHAIR_WIDTH: f32 = 1.0;
pub const CROSSHAIR_DASH: [f32; 2] = [2.0, 5.0];
pub const TICK_LINE_WIDTH: f32 = 1.0;

/// Horizontal gap between the tooltip's date and price fields.
pub const TOOLTIP_FIELD_GAP: f32 = 100.0;
