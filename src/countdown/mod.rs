//! Free-form countdown with an alarm at zero.
//!
//! A lighter sibling of the Pomodoro timer: one duration, no modes, and a
//! single `Finished` event when it runs out. It shares the [`Ticker`] so the
//! same one-task-per-countdown guarantee applies.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::timer::{Tickable, Ticker, TICK_PERIOD};

/// Longest supported countdown: 99:59:59.
pub const MAX_COUNTDOWN_SECONDS: u32 = 99 * 3600 + 59 * 60 + 59;

/// Notifications emitted by a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Remaining time changed
    Tick {
        /// Remaining seconds
        remaining: u32,
    },
    /// The countdown reached zero
    Finished,
}

/// Converts hours, minutes and seconds into a clamped total.
pub fn total_seconds(hours: u32, minutes: u32, seconds: u32) -> u32 {
    let total = u64::from(hours) * 3600 + u64::from(minutes) * 60 + u64::from(seconds);
    total.clamp(1, u64::from(MAX_COUNTDOWN_SECONDS)) as u32
}

// ============================================================================
// CountdownEngine
// ============================================================================

/// Synchronous countdown state.
#[derive(Debug)]
pub struct CountdownEngine {
    total: u32,
    remaining: u32,
    running: bool,
    event_tx: mpsc::UnboundedSender<CountdownEvent>,
}

impl CountdownEngine {
    /// Creates a paused countdown of `total` seconds, clamped to `[1, MAX_COUNTDOWN_SECONDS]`.
    pub fn new(total: u32, event_tx: mpsc::UnboundedSender<CountdownEvent>) -> Self {
        let total = total.clamp(1, MAX_COUNTDOWN_SECONDS);
        Self {
            total,
            remaining: total,
            running: false,
            event_tx,
        }
    }

    /// Creates a paused countdown from hours, minutes and seconds.
    pub fn from_hms(
        hours: u32,
        minutes: u32,
        seconds: u32,
        event_tx: mpsc::UnboundedSender<CountdownEvent>,
    ) -> Self {
        Self::new(total_seconds(hours, minutes, seconds), event_tx)
    }

    /// Starts the countdown. A finished countdown must be reset first.
    ///
    /// Returns true if it started.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining == 0 {
            return false;
        }
        self.running = true;
        debug!(remaining = self.remaining, "countdown started");
        true
    }

    /// Returns true if it was running.
    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
        self.running
    }

    /// Stops and refills to the full total.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.total;
        self.emit(CountdownEvent::Tick {
            remaining: self.remaining,
        });
    }

    pub fn tick(&mut self) {
        if !self.running || self.remaining == 0 {
            return;
        }
        self.remaining -= 1;
        self.emit(CountdownEvent::Tick {
            remaining: self.remaining,
        });

        if self.remaining == 0 {
            self.running = false;
            info!(total = self.total, "countdown finished");
            self.emit(CountdownEvent::Finished);
        }
    }

    fn emit(&self, event: CountdownEvent) {
        if self.event_tx.send(event).is_err() {
            debug!(?event, "countdown event dropped: no receiver");
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

impl Tickable for CountdownEngine {
    fn is_running(&self) -> bool {
        self.running
    }

    fn tick(&mut self) {
        CountdownEngine::tick(self);
    }
}

// ============================================================================
// CountdownTimer
// ============================================================================

/// Countdown driven by the shared once-per-second ticker.
#[derive(Debug)]
pub struct CountdownTimer {
    engine: Arc<Mutex<CountdownEngine>>,
    ticker: Ticker,
}

impl CountdownTimer {
    pub fn new(engine: CountdownEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: Ticker::new(),
        }
    }

    fn engine(&self) -> MutexGuard<'_, CountdownEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn start(&mut self) -> bool {
        let started = self.engine().start();
        if started {
            self.ticker.spawn(self.engine.clone(), TICK_PERIOD);
        }
        started
    }

    pub fn pause(&mut self) {
        self.engine().pause();
        self.ticker.cancel();
    }

    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
        self.is_running()
    }

    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.engine().reset();
    }

    pub fn remaining(&self) -> u32 {
        self.engine().remaining()
    }

    pub fn total(&self) -> u32 {
        self.engine().total()
    }

    pub fn is_running(&self) -> bool {
        self.engine().is_running()
    }

    pub fn is_finished(&self) -> bool {
        self.engine().is_finished()
    }
}

// ============================================================================
// Tests
// ============================================================================
