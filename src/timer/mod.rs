//! Pomodoro timer.
//!
//! This module contains the session timer:
//! - `engine`: synchronous state machine with mode transitions and events
//! - `ticker`: the one scheduled task that advances a countdown every second
//!
//! [`PomodoroTimer`] ties the two together and is the control surface the
//! rest of the application uses.

pub mod engine;
pub mod ticker;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tokio::sync::mpsc;

use crate::types::{format_clock, Mode, SessionProgress, TimerConfig};

pub use engine::{TimerEngine, TimerEvent};
pub use ticker::{Tickable, Ticker, TICK_PERIOD};

/// Point-in-time copy of the timer's read surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerSnapshot {
    pub mode: Mode,
    #[serde(rename = "timeLeft")]
    pub time_left: u32,
    #[serde(rename = "isRunning")]
    pub is_running: bool,
    #[serde(rename = "focusSessionsCompleted")]
    pub focus_sessions_completed: u32,
    #[serde(rename = "sessionOrdinal")]
    pub session_ordinal: u32,
    #[serde(rename = "sessionGlyphs")]
    pub session_glyphs: String,
    pub clock: String,
}

/// Pomodoro timer driven by a once-per-second tokio task.
///
/// Must be used from within a tokio runtime because `start()` spawns the
/// tick task.
#[derive(Debug)]
pub struct PomodoroTimer {
    engine: Arc<Mutex<TimerEngine>>,
    ticker: Ticker,
}

impl PomodoroTimer {
    /// Creates a paused timer in focus mode.
    pub fn new(config: TimerConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(TimerEngine::new(config, event_tx))),
            ticker: Ticker::new(),
        }
    }

    fn engine(&self) -> MutexGuard<'_, TimerEngine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Starts counting down. No-op when already running.
    ///
    /// Returns true if a new countdown was started.
    pub fn start(&mut self) -> bool {
        let started = self.engine().start();
        if started {
            self.ticker.spawn(self.engine.clone(), TICK_PERIOD);
        }
        started
    }

    /// Stops counting down, keeping the remaining time. No-op when paused.
    pub fn pause(&mut self) {
        self.engine().pause();
        self.ticker.cancel();
    }

    /// Pauses when running, starts otherwise. Returns the resulting running state.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.pause();
        } else {
            self.start();
        }
        self.is_running()
    }

    /// Stops and restores the full duration of the current mode.
    pub fn reset(&mut self) {
        self.ticker.cancel();
        self.engine().reset();
    }

    /// Stops and switches to `mode`.
    pub fn set_mode(&mut self, mode: Mode) {
        self.ticker.cancel();
        self.engine().set_mode(mode);
    }

    /// Stores a clamped duration for `mode`; resets when `mode` is active.
    ///
    /// Returns the minutes actually applied.
    pub fn set_duration(&mut self, mode: Mode, minutes: u32) -> u32 {
        let (applied, running) = {
            let mut engine = self.engine();
            let applied = engine.set_duration(mode, minutes);
            (applied, engine.is_running())
        };
        if !running {
            self.ticker.cancel();
        }
        applied
    }

    pub fn time_left(&self) -> u32 {
        self.engine().time_left()
    }

    pub fn mode(&self) -> Mode {
        self.engine().mode()
    }

    pub fn is_running(&self) -> bool {
        self.engine().is_running()
    }

    pub fn focus_sessions_completed(&self) -> u32 {
        self.engine().focus_sessions_completed()
    }

    /// Position in the current group of four focus sessions.
    pub fn progress(&self) -> SessionProgress {
        self.engine().progress()
    }

    /// Current configuration, including any durations changed at runtime.
    pub fn config(&self) -> TimerConfig {
        *self.engine().config()
    }

    /// Formats seconds as `MM:SS`.
    pub fn format(seconds: u32) -> String {
        format_clock(seconds)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let engine = self.engine();
        let progress = engine.progress();
        TimerSnapshot {
            mode: engine.mode(),
            time_left: engine.time_left(),
            is_running: engine.is_running(),
            focus_sessions_completed: engine.focus_sessions_completed(),
            session_ordinal: progress.ordinal(),
            session_glyphs: progress.glyphs(),
            clock: format_clock(engine.time_left()),
        }
    }

    /// Returns true while a tick task is scheduled.
    pub fn has_active_ticker(&self) -> bool {
        self.ticker.is_active()
    }
}

// ============================================================================
// Tests
// ============================================================================
