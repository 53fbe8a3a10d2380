// File: crates/stockline-core/src/session.rs
// Summary: Immutable-after-build chart session: series, scales, layout and hover reference.

use tracing::debug;

use crate::axis::Axis;
use crate::draw::{DrawCommand, DrawList};
use crate::error::{ChartError, ChartResult};
use crate::render;
use crate::scale::{LinearScale, TimeScale};
use crate::series::{self, RawSeries, Series};
use crate::types::{ChartConfig, PlotLayout};

/// Everything one chart build derives from its input. Domains span the
/// union of all series; hover readouts resolve against one reference
/// series (the last one unless changed).
#[derive(Clone, Debug)]
pub struct ChartSession {
    series: Vec<Series>,
    x_scale: TimeScale,
    y_scale: LinearScale,
    layout: PlotLayout,
    config: ChartConfig,
    reference: usize,
}

impl ChartSession {
    /// Normalize raw datasets and derive scales for `layout`.
    pub fn build(datasets: &[RawSeries], layout: PlotLayout, config: ChartConfig) -> ChartResult<Self> {
        let series = series::normalize(datasets)?;
        Self::from_series(series, layout, config)
    }

    /// Derive scales from already-normalized series.
    pub fn from_series(series: Vec<Series>, layout: PlotLayout, config: ChartConfig) -> ChartResult<Self> {
        let Some(last) = series.last() else {
            return Err(ChartError::NoDatasets);
        };
        if last.is_empty() {
            return Err(ChartError::EmptyReferenceSeries { label: last.label.clone() });
        }

        let all = series::flatten(&series);
        // The reference series is non-empty, so both extents exist.
        let (Some(x_domain), Some(y_domain)) = (series::date_extent(&all), series::price_extent(&all)) else {
            return Err(ChartError::NoDatasets);
        };
        let x_scale = TimeScale::new(x_domain, [0.0, layout.width as f64]);
        let y_scale = LinearScale::new(y_domain, [layout.height as f64, 0.0]);

        debug!(
            series = series.len(),
            points = all.len(),
            x_min = %x_domain[0],
            x_max = %x_domain[1],
            y_min = y_domain[0],
            y_max = y_domain[1],
            "built chart session"
        );

        let reference = series.len() - 1;
        Ok(Self { series, x_scale, y_scale, layout, config, reference })
    }

    /// Builder form of [`ChartSession::set_reference_series`].
    pub fn with_reference_series(mut self, index: usize) -> ChartResult<Self> {
        self.set_reference_series(index)?;
        Ok(self)
    }

    /// Choose which series hover readouts resolve against. The series must
    /// exist and have at least one point.
    pub fn set_reference_series(&mut self, index: usize) -> ChartResult<()> {
        let s = self
            .series
            .get(index)
            .ok_or(ChartError::ReferenceOutOfRange { index, len: self.series.len() })?;
        if s.is_empty() {
            return Err(ChartError::EmptyReferenceSeries { label: s.label.clone() });
        }
        self.reference = index;
        Ok(())
    }

    pub fn series(&self) -> &[Series] { &self.series }

    pub fn x_scale(&self) -> &TimeScale { &self.x_scale }

    pub fn y_scale(&self) -> &LinearScale { &self.y_scale }

    pub fn layout(&self) -> &PlotLayout { &self.layout }

    pub fn reference_index(&self) -> usize { self.reference }

    pub fn reference_series(&self) -> &Series { &self.series[self.reference] }

    /// Polylines for every series, plot-local.
    pub fn series_layer(&self) -> DrawList {
        render::draw_series(&self.series, &self.x_scale, &self.y_scale)
    }

    /// Full initial draw: move the origin to the plot corner, then both
    /// axes and all series.
    pub fn initial_draw(&self) -> DrawList {
        let mut list = DrawList::new();
        list.push(DrawCommand::ResetTransform);
        list.push(DrawCommand::Translate {
            dx: self.layout.margins.left as f32,
            dy: self.layout.margins.top as f32,
        });
        list.append(Axis::bottom(&self.config).draw(&self.x_scale, &self.layout));
        list.append(Axis::left(&self.config).draw(&self.y_scale, &self.layout));
        list.append(self.series_layer());
        list
    }
}
