//! Session state machine for the Pomodoro timer.
//!
//! This module provides the synchronous core:
//! - Mode transitions (Focus → Short/Long → Focus)
//! - One-second countdown steps
//! - Event firing for displays, alarms and media control
//! - Long break after every 4 focus sessions
//!
//! Scheduling lives in [`super::ticker`]; the engine only reacts to `tick()`.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::types::{Mode, SessionProgress, TimerConfig, SESSIONS_PER_GROUP};

use super::ticker::Tickable;

// ============================================================================
// TimerEvent
// ============================================================================

/// Notifications emitted by the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The remaining time changed (every running second, and after a reset or mode change)
    Tick {
        /// Remaining seconds in the current mode
        seconds_left: u32,
        /// Mode being counted down
        mode: Mode,
    },
    /// A session reached zero by itself
    Ended {
        /// Mode that just expired
        mode: Mode,
        /// Completed focus sessions, including this one
        focus_sessions_completed: u32,
    },
    /// The active mode changed
    ModeChanged {
        /// New mode
        mode: Mode,
    },
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Synchronous Pomodoro state machine.
#[derive(Debug)]
pub struct TimerEngine {
    config: TimerConfig,
    mode: Mode,
    time_left: u32,
    running: bool,
    focus_sessions_completed: u32,
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a paused engine in focus mode with a full focus duration.
    pub fn new(config: TimerConfig, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        Self {
            time_left: config.durations.seconds(Mode::Focus),
            config,
            mode: Mode::Focus,
            running: false,
            focus_sessions_completed: 0,
            event_tx,
        }
    }

    /// Marks the countdown as running.
    ///
    /// Returns false (and changes nothing) if it was already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            debug!("start ignored: already running");
            return false;
        }
        self.running = true;
        debug!(mode = %self.mode, time_left = self.time_left, "timer started");
        true
    }

    /// Stops the countdown, keeping the remaining time.
    ///
    /// Returns false if it was already paused.
    pub fn pause(&mut self) -> bool {
        if !self.running {
            debug!("pause ignored: not running");
            return false;
        }
        self.running = false;
        debug!(mode = %self.mode, time_left = self.time_left, "timer paused");
        true
    }

    /// Pauses when running, starts otherwise. Returns the resulting running state.
    pub fn toggle(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
        self.running
    }

    /// Stops and refills the current mode, then announces the fresh time.
    pub fn reset(&mut self) {
        self.running = false;
        self.time_left = self.config.durations.seconds(self.mode);
        debug!(mode = %self.mode, time_left = self.time_left, "timer reset");
        self.emit_tick();
    }

    /// Stops and switches to `mode` with its full duration.
    pub fn set_mode(&mut self, mode: Mode) {
        self.running = false;
        self.switch_mode(mode);
    }

    /// Stores a new length for `mode`, clamped to the supported range.
    ///
    /// Changing the active mode resets it immediately; other modes only take
    /// effect the next time they are entered. Returns the applied minutes.
    pub fn set_duration(&mut self, mode: Mode, minutes: u32) -> u32 {
        let applied = self.config.durations.set_minutes(mode, minutes);
        debug!(%mode, requested = minutes, applied, "duration updated");
        if mode == self.mode {
            self.reset();
        }
        applied
    }

    /// Advances the countdown by one second.
    ///
    /// The tick is announced before expiry is handled so observers see `00:00`.
    pub fn tick(&mut self) {
        if !self.running || self.time_left == 0 {
            return;
        }
        self.time_left -= 1;
        self.emit_tick();

        if self.time_left == 0 {
            self.handle_expiry();
        }
    }

    /// Handles a session reaching zero on its own.
    fn handle_expiry(&mut self) {
        let ended = self.mode;
        self.running = false;

        if ended == Mode::Focus {
            self.focus_sessions_completed += 1;
        }
        info!(
            mode = %ended,
            completed = self.focus_sessions_completed,
            "session ended"
        );
        self.emit(TimerEvent::Ended {
            mode: ended,
            focus_sessions_completed: self.focus_sessions_completed,
        });

        let next = self.next_mode_after(ended);
        self.switch_mode(next);

        if self.config.auto_cycle {
            self.running = true;
            debug!(mode = %next, "auto-cycle: continuing into next session");
        }
    }

    /// Mode that follows `ended` under the four-session grouping rule.
    fn next_mode_after(&self, ended: Mode) -> Mode {
        match ended {
            Mode::Focus if self.focus_sessions_completed % SESSIONS_PER_GROUP == 0 => Mode::Long,
            Mode::Focus => Mode::Short,
            Mode::Short | Mode::Long => Mode::Focus,
        }
    }

    fn switch_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.time_left = self.config.durations.seconds(mode);
        debug!(%mode, time_left = self.time_left, "mode changed");
        self.emit(TimerEvent::ModeChanged { mode });
        self.emit_tick();
    }

    fn emit_tick(&self) {
        self.emit(TimerEvent::Tick {
            seconds_left: self.time_left,
            mode: self.mode,
        });
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!(?event, "timer event dropped: no receiver");
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn focus_sessions_completed(&self) -> u32 {
        self.focus_sessions_completed
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress::new(self.focus_sessions_completed)
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }
}

impl Tickable for TimerEngine {
    fn is_running(&self) -> bool {
        self.running
    }

    fn tick(&mut self) {
        TimerEngine::tick(self);
    }
}

// ============================================================================
// Tests
// ============================================================================
