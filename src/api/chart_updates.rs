use std::time::Instant;

use tracing::trace;

use crate::core::Point;
use crate::error::ChartResult;
use crate::render::Renderer;

use super::scheduler::UpdateStream;
use super::{CartesianChart, MeasureOutcome};

/// What one [`CartesianChart::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub panned: bool,
    pub measured: Option<MeasureOutcome>,
    /// Pointer position the host should resolve its tooltip at.
    pub tooltip: Option<Point>,
}

impl<R: Renderer> CartesianChart<R> {
    /// Requests a throttled measure pass; returns immediately.
    pub fn update(&mut self, now: Instant) {
        self.invalidated = false;
        self.scheduler.request(UpdateStream::Measure, now);
    }

    /// Runs a measure pass now, dropping any pending throttled one.
    pub fn force_update(&mut self) -> ChartResult<MeasureOutcome> {
        self.invalidated = false;
        self.scheduler.cancel(UpdateStream::Measure);
        self.measure()
    }

    /// Drives the throttled streams. Hosts call this from their frame or timer
    /// callback; at most one pass runs per call.
    pub fn tick(&mut self, now: Instant) -> ChartResult<TickReport> {
        if self.invalidated && self.config.auto_update_enabled {
            self.update(now);
        }

        let due = self.scheduler.poll(now);
        let mut report = TickReport::default();

        if due.panning {
            if let Some(delta) = self.interaction.take_pending_pan() {
                self.pan(delta, true)?;
                report.panned = true;
                if self.config.auto_update_enabled {
                    self.update(now);
                }
            }
        }
        if due.measure {
            report.measured = Some(self.measure()?);
        }
        if due.tooltip {
            report.tooltip = self.interaction.tooltip_point();
        }

        if due.any() {
            trace!(
                panned = report.panned,
                measured = report.measured.is_some(),
                tooltip = report.tooltip.is_some(),
                "scheduler tick"
            );
        }
        Ok(report)
    }

    /// Earliest instant at which [`CartesianChart::tick`] has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }
}
