use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::UpdateThrottling;

/// Trailing-edge throttle: requests inside one window collapse into a single
/// firing at the end of the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttler {
    window: Duration,
    pending_since: Option<Instant>,
    coalesced: u64,
}

impl Throttler {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending_since: None,
            coalesced: 0,
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn request(&mut self, now: Instant) {
        if self.pending_since.is_some() {
            self.coalesced += 1;
        } else {
            self.pending_since = Some(now);
        }
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending_since.is_some()
    }

    /// When the pending request fires, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending_since.map(|since| since + self.window)
    }

    /// Fires the pending request once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.pending_since = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the pending request; it is never invoked.
    pub fn cancel(&mut self) -> bool {
        self.pending_since.take().is_some()
    }

    /// Requests absorbed by an already pending one.
    #[must_use]
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateStream {
    Measure,
    Tooltip,
    Panning,
}

/// Streams whose window elapsed in one [`ChartScheduler::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DueUpdates {
    pub measure: bool,
    pub tooltip: bool,
    pub panning: bool,
}

impl DueUpdates {
    #[must_use]
    pub fn any(self) -> bool {
        self.measure || self.tooltip || self.panning
    }
}

/// The three independent throttled streams of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartScheduler {
    measure: Throttler,
    tooltip: Throttler,
    panning: Throttler,
}

impl ChartScheduler {
    #[must_use]
    pub fn new(throttling: UpdateThrottling) -> Self {
        Self {
            measure: Throttler::new(Duration::from_millis(throttling.measure_ms)),
            tooltip: Throttler::new(Duration::from_millis(throttling.tooltip_ms)),
            panning: Throttler::new(Duration::from_millis(throttling.panning_ms)),
        }
    }

    #[must_use]
    pub fn stream(&self, stream: UpdateStream) -> &Throttler {
        match stream {
            UpdateStream::Measure => &self.measure,
            UpdateStream::Tooltip => &self.tooltip,
            UpdateStream::Panning => &self.panning,
        }
    }

    fn stream_mut(&mut self, stream: UpdateStream) -> &mut Throttler {
        match stream {
            UpdateStream::Measure => &mut self.measure,
            UpdateStream::Tooltip => &mut self.tooltip,
            UpdateStream::Panning => &mut self.panning,
        }
    }

    pub fn request(&mut self, stream: UpdateStream, now: Instant) {
        self.stream_mut(stream).request(now);
    }

    pub fn cancel(&mut self, stream: UpdateStream) -> bool {
        self.stream_mut(stream).cancel()
    }

    pub fn poll(&mut self, now: Instant) -> DueUpdates {
        DueUpdates {
            measure: self.measure.poll(now),
            tooltip: self.tooltip.poll(now),
            panning: self.panning.poll(now),
        }
    }

    /// Earliest instant at which a pending stream fires.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.measure.deadline(),
            self.tooltip.deadline(),
            self.panning.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }
}
