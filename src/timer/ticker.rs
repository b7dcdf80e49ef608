//! The single repeating once-per-second task that drives a countdown.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};
use tracing::debug;

/// Tick period: one tick is one second of countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A countdown that can be advanced one second at a time.
pub trait Tickable: Send + 'static {
    /// Returns true while the countdown wants ticks.
    fn is_running(&self) -> bool;

    /// Advances the countdown by one second.
    fn tick(&mut self);
}

/// Owner of at most one scheduled tick task.
///
/// Spawning always cancels the previous task first, so two tasks never
/// drive the same countdown.
#[derive(Debug, Default)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules ticks for `target` every `period`, starting one period from now.
    ///
    /// The task ends by itself once `target` stops running.
    pub fn spawn<T: Tickable>(&mut self, target: Arc<Mutex<T>>, period: Duration) {
        self.cancel();

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let mut countdown = target.lock().unwrap_or_else(PoisonError::into_inner);
                if !countdown.is_running() {
                    break;
                }
                countdown.tick();
                if !countdown.is_running() {
                    break;
                }
            }
            debug!("tick task finished");
        });
        self.handle = Some(handle);
    }

    /// Cancels the scheduled task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("tick task cancelled");
        }
    }

    /// Returns true while a tick task is scheduled and has not finished.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
