// File: crates/stockline-core/src/chart.rs
// Summary: Chart entry point: owns the surface and session, wires pointer events to redraws.

use tracing::{debug, info};

use crate::draw::Surface;
use crate::error::{ChartError, ChartResult};
use crate::geometry::Rect;
use crate::interaction::{HoverState, InteractionController, PointerEvent};
use crate::series::RawSeries;
use crate::session::ChartSession;
use crate::types::{ChartConfig, PlotLayout};

/// Token for an attached pointer-move handler. Only the most recent
/// `create` holds a live subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerSubscription(u64);

/// A line chart bound to one host surface.
pub struct Chart<S: Surface> {
    surface: S,
    config: ChartConfig,
    session: Option<ChartSession>,
    controller: InteractionController,
    subscription: Option<PointerSubscription>,
    next_subscription: u64,
}

impl<S: Surface> Chart<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, ChartConfig::default())
    }

    pub fn with_config(surface: S, config: ChartConfig) -> Self {
        Self {
            surface,
            config,
            session: None,
            controller: InteractionController::new(),
            subscription: None,
            next_subscription: 1,
        }
    }

    /// Reset the surface transform and erase every pixel.
    pub fn clear(&mut self) {
        self.surface.reset_transform();
        let (w, h) = (self.surface.width() as f32, self.surface.height() as f32);
        self.surface.clear_rect(Rect::from_xywh(0.0, 0.0, w, h));
    }

    /// Full build: validate and normalize `datasets`, draw axes and series,
    /// and attach the pointer handler. Nothing is drawn if the input is
    /// rejected. A previous session and subscription are replaced.
    pub fn create(&mut self, datasets: &[RawSeries]) -> ChartResult<PointerSubscription> {
        let layout = PlotLayout::new(self.surface.width(), self.surface.height(), self.config.margins)?;
        let session = ChartSession::build(datasets, layout, self.config)?;

        session.initial_draw().replay(&mut self.surface)?;

        let token = PointerSubscription(self.next_subscription);
        self.next_subscription += 1;
        info!(
            series = session.series().len(),
            reference = %session.reference_series().label,
            subscription = token.0,
            "chart created"
        );
        self.session = Some(session);
        self.controller.reset();
        self.subscription = Some(token);
        Ok(token)
    }

    /// Detach the pointer handler. Returns false if `token` is not the live subscription.
    pub fn detach(&mut self, token: PointerSubscription) -> bool {
        if self.subscription != Some(token) {
            return false;
        }
        debug!(subscription = token.0, "pointer handler detached");
        self.subscription = None;
        self.controller.reset();
        true
    }

    pub fn is_attached(&self) -> bool { self.subscription.is_some() }

    /// Handle a pointer move synchronously. Returns whether anything was redrawn.
    pub fn pointer_moved(&mut self, event: PointerEvent) -> ChartResult<bool> {
        let Some(session) = self.subscription.and(self.session.as_ref()) else {
            return Ok(false);
        };
        match self.controller.on_pointer_move(event, session) {
            Some(frame) => {
                frame.replay(&mut self.surface)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Queue a pointer move; only the latest queued event survives until
    /// [`Chart::flush_frame`].
    pub fn queue_pointer_move(&mut self, event: PointerEvent) {
        if self.subscription.and(self.session.as_ref()).is_some() {
            self.controller.queue(event);
        }
    }

    /// Process the latest queued pointer move, at most one redraw.
    pub fn flush_frame(&mut self) -> ChartResult<bool> {
        let Some(session) = self.subscription.and(self.session.as_ref()) else {
            return Ok(false);
        };
        match self.controller.flush(session) {
            Some(frame) => {
                frame.replay(&mut self.surface)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Change the series hover readouts resolve against.
    pub fn set_reference_series(&mut self, index: usize) -> ChartResult<()> {
        match self.session.as_mut() {
            Some(session) => session.set_reference_series(index),
            None => Err(ChartError::NoDatasets),
        }
    }

    pub fn session(&self) -> Option<&ChartSession> { self.session.as_ref() }

    pub fn hover_state(&self) -> HoverState { self.controller.state() }

    pub fn config(&self) -> &ChartConfig { &self.config }

    pub fn surface(&self) -> &S { &self.surface }

    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }

    pub fn into_surface(self) -> S { self.surface }
}
