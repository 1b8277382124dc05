//! Debounced request/response cycle between slider input and chart refresh
//!
//! Each slider gets its own trailing-edge debounce. When a debounce fires the
//! chart's trace visibility is captured and the request is stamped with a
//! monotonic sequence number. Responses older than the latest dispatched
//! request are dropped, so a slow reply can never overwrite fresher state.

use crate::debounce::Debouncer;
use playground_shared::{ParameterUpdate, PlaygroundResult, PlotPayload, VisibilitySnapshot};
use std::collections::HashMap;
use std::time::Duration;

/// Default quiet period before a drag becomes a request
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// The live chart, as seen by the update path
pub trait ChartSurface {
    /// Per-trace visibility flags currently shown
    fn visibility_snapshot(&self) -> VisibilitySnapshot;

    /// Redraw with new traces and layout
    fn repaint(&mut self, payload: &PlotPayload) -> PlaygroundResult<()>;
}

/// A request that left the debounce and must be sent to the server
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchedUpdate {
    pub sequence: u64,
    pub update: ParameterUpdate,
    pub visibility: VisibilitySnapshot,
}

/// Outcome of merging a server response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// Chart repainted; `restored` traces had their legend state reapplied
    Applied { restored: usize },
    /// A newer request was dispatched after this one; response dropped
    Stale { latest: u64 },
}

/// Reapply explicit legend states captured before the update.
///
/// Only string flags (such as `"legendonly"`) are carried over; booleans and
/// absent flags take whatever the server returned. Returns how many traces
/// were restored.
pub fn merge_visibility(snapshot: &VisibilitySnapshot, payload: &mut PlotPayload) -> usize {
    let mut restored = 0;
    for (trace, prior) in payload.traces.iter_mut().zip(snapshot) {
        if let Some(flag) = prior.as_ref().filter(|flag| flag.is_legend_state()) {
            trace.visible = Some(flag.clone());
            restored += 1;
        }
    }
    restored
}

#[derive(Debug)]
pub struct UpdateController {
    delay: Duration,
    pending: HashMap<String, Debouncer<f64>>,
    latest_dispatched: u64,
}

impl Default for UpdateController {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl UpdateController {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
            latest_dispatched: 0,
        }
    }

    /// Feed a slider input into that slider's debounce. Returns the deadline.
    pub fn schedule(&mut self, update: ParameterUpdate, now_ms: f64) -> f64 {
        let delay = self.delay;
        self.pending
            .entry(update.param_name)
            .or_insert_with(|| Debouncer::new(delay))
            .trigger(update.param_value, now_ms)
    }

    /// Dispatch `name` now. Called by a timer that is re-armed on every input.
    pub fn fire<C>(&mut self, name: &str, chart: &C) -> Option<DispatchedUpdate>
    where
        C: ChartSurface + ?Sized,
    {
        let value = self.pending.get_mut(name)?.flush()?;
        Some(self.dispatch(ParameterUpdate::new(name, value), chart))
    }

    /// Merge a server response into the chart, unless a newer request exists
    pub fn reconcile<C>(
        &mut self,
        dispatched: &DispatchedUpdate,
        mut payload: PlotPayload,
        chart: &mut C,
    ) -> PlaygroundResult<Reconciled>
    where
        C: ChartSurface + ?Sized,
    {
        if dispatched.sequence < self.latest_dispatched {
            log::debug!(
                "Dropping stale response #{} for {} (latest #{})",
                dispatched.sequence,
                dispatched.update.param_name,
                self.latest_dispatched
            );
            return Ok(Reconciled::Stale {
                latest: self.latest_dispatched,
            });
        }

        let restored = merge_visibility(&dispatched.visibility, &mut payload);
        chart.repaint(&payload)?;

        Ok(Reconciled::Applied { restored })
    }

    fn dispatch<C>(&mut self, update: ParameterUpdate, chart: &C) -> DispatchedUpdate
    where
        C: ChartSurface + ?Sized,
    {
        self.latest_dispatched += 1;
        log::debug!(
            "Dispatching #{}: {} = {}",
            self.latest_dispatched,
            update.param_name,
            update.param_value
        );

        DispatchedUpdate {
            sequence: self.latest_dispatched,
            update,
            visibility: chart.visibility_snapshot(),
        }
    }
}
