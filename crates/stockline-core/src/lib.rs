// File: crates/stockline-core/src/lib.rs
// Summary: Core library entry point; exports the public API for building and hovering line charts.

pub mod axis;
pub mod chart;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod palette;
pub mod render;
pub mod scale;
pub mod series;
pub mod session;
pub mod ticks;
pub mod types;

pub use axis::{format_tick, generate_ticks, Axis, AxisKind, Orientation, TickValue};
pub use chart::{Chart, PointerSubscription};
pub use draw::{DrawCommand, DrawList, PathVerb, RecordingSurface, Stroke, Surface, TextAlign, TextBaseline, TextRun, TextStyle};
pub use error::{ChartError, ChartResult};
pub use interaction::{HoverSample, HoverState, InteractionController, PointerEvent};
pub use palette::Rgba;
pub use scale::{LinearScale, Scale, TimeScale};
pub use series::{flatten, normalize, Point, RawRecord, RawSeries, Series};
pub use session::ChartSession;
pub use types::{ChartConfig, Margins, PlotLayout, HEIGHT, WIDTH};
