use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, MutexGuard};

use crate::error::ChartResult;
use crate::render::Renderer;

use super::{CartesianChart, MeasureOutcome, TickReport};

/// Cloneable handle serializing all access to one chart.
///
/// Gesture handlers, timer-driven ticks and forced passes lock the same
/// mutex, so a throttled pass never interleaves with a synchronous one.
pub struct SharedCartesianChart<R: Renderer + Send> {
    inner: Arc<Mutex<CartesianChart<R>>>,
}

impl<R: Renderer + Send> Clone for SharedCartesianChart<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Renderer + Send> SharedCartesianChart<R> {
    #[must_use]
    pub fn new(chart: CartesianChart<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(chart)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, CartesianChart<R>> {
        self.inner.lock()
    }

    /// Runs `f` with exclusive access to the chart.
    pub fn with<T>(&self, f: impl FnOnce(&mut CartesianChart<R>) -> T) -> T {
        let mut chart = self.inner.lock();
        f(&mut chart)
    }

    pub fn tick(&self, now: Instant) -> ChartResult<TickReport> {
        self.inner.lock().tick(now)
    }

    pub fn force_update(&self) -> ChartResult<MeasureOutcome> {
        self.inner.lock().force_update()
    }

    /// Number of live handles, this one included.
    #[must_use]
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}
