use std::fmt;

use tracing::trace;

use super::{BankrollSeries, StrengthHistogram, TrendSeries};

/// Data for one chart, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Trend(TrendSeries),
    Histogram(StrengthHistogram),
    Bankroll(BankrollSeries),
}

/// Something that can put a chart on screen.
///
/// Every handle returned by `draw` must eventually be passed to `destroy`.
/// `ChartSlot` takes care of that.
pub trait ChartBackend {
    /// Whatever the renderer needs to tear the chart down again.
    type Handle;

    fn draw(&mut self, chart: &Chart) -> Self::Handle;

    fn destroy(&mut self, handle: Self::Handle);
}

/// Owns a backend and the one chart it currently shows.
///
/// Rendering again replaces the previous chart, and dropping the slot
/// destroys whatever is still shown.
pub struct ChartSlot<B: ChartBackend> {
    backend: B,
    handle: Option<B::Handle>,
}

impl<B: ChartBackend> ChartSlot<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handle: None,
        }
    }

    /// Draw `chart`, destroying the chart drawn before it first.
    pub fn render(&mut self, chart: &Chart) {
        self.clear();
        trace!("Drawing chart");
        self.handle = Some(self.backend.draw(chart));
    }

    /// Destroy the shown chart, if any.
    pub fn clear(&mut self) {
        if let Some(handle) = self.handle.take() {
            trace!("Destroying chart");
            self.backend.destroy(handle);
        }
    }

    pub fn is_showing(&self) -> bool {
        self.handle.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: ChartBackend + fmt::Debug> fmt::Debug for ChartSlot<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartSlot")
            .field("backend", &self.backend)
            .field("showing", &self.is_showing())
            .finish()
    }
}

impl<B: ChartBackend> Drop for ChartSlot<B> {
    fn drop(&mut self) {
        self.clear();
    }
}
