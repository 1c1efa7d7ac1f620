//! Timeouts and intervals backed by tokio tasks.

use crate::error::DomError;
use crate::id::TimerId;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Shortest interval period; tokio rejects zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// The page's timer table.
///
/// Each timer is a spawned task; clearing a timer aborts the task, so a
/// cleared callback never runs afterwards. A timeout removes its own table
/// entry before its callback is invoked.
#[derive(Clone)]
pub struct Timers {
    runtime: Option<Handle>,
    tasks: Arc<Mutex<HashMap<TimerId, AbortHandle>>>,
}

impl Timers {
    /// Create a timer table bound to the current tokio runtime, if any.
    /// Without one, scheduling falls back to whatever runtime is current
    /// at the time of the call.
    pub fn new() -> Self {
        Self {
            runtime: Handle::try_current().ok(),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn handle(&self) -> Result<Handle, DomError> {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or(DomError::NoRuntime)
    }

    /// Run `callback` once after `delay`.
    pub fn set_timeout(
        &self,
        delay: Duration,
        callback: impl FnOnce() + Send + 'static,
    ) -> Result<TimerId, DomError> {
        let handle = self.handle()?;
        let id = TimerId::next();
        let tasks = Arc::clone(&self.tasks);
        // Hold the table while spawning so the entry exists before the task can remove it.
        let mut table = self.tasks.lock();
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            tasks.lock().remove(&id);
            callback();
        });
        table.insert(id, task.abort_handle());
        tracing::trace!(timer = %id, delay_ms = delay.as_millis() as u64, "chirp.timer.timeout");
        Ok(id)
    }

    /// Run `callback` every `period`, first after one full period. Periods
    /// shorter than a millisecond are rounded up.
    pub fn set_interval(
        &self,
        period: Duration,
        callback: impl Fn() + Send + Sync + 'static,
    ) -> Result<TimerId, DomError> {
        let handle = self.handle()?;
        let period = period.max(MIN_PERIOD);
        let id = TimerId::next();
        let mut table = self.tasks.lock();
        let task = handle.spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                ticker.tick().await;
                callback();
            }
        });
        table.insert(id, task.abort_handle());
        tracing::trace!(timer = %id, period_ms = period.as_millis() as u64, "chirp.timer.interval");
        Ok(id)
    }

    /// Cancel a timeout or interval. Returns `false` if it already fired
    /// (timeouts) or was never scheduled here.
    pub fn clear(&self, id: TimerId) -> bool {
        match self.tasks.lock().remove(&id) {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    /// Whether `id` is scheduled and has not fired or been cleared.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.lock().contains_key(&id)
    }

    /// Number of timers still pending.
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
