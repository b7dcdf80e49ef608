//! Core data types for the study-focus timer.
//!
//! This module defines the data structures used for:
//! - Session modes (focus / short break / long break)
//! - Per-mode durations with clamping
//! - Session-group progress display
//! - Clock formatting

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Smallest configurable duration for a mode, in minutes.
pub const MIN_MINUTES: u32 = 1;

/// Largest configurable duration for a mode, in minutes.
pub const MAX_MINUTES: u32 = 99;

/// Number of focus sessions in one session group.
pub const SESSIONS_PER_GROUP: u32 = 4;

const FILLED_GLYPH: char = '●';
const EMPTY_GLYPH: char = '○';

// ============================================================================
// Mode
// ============================================================================

/// The kind of session the timer is currently counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Focused work
    #[default]
    Focus,
    /// Short break between focus sessions
    Short,
    /// Long break after every fourth focus session
    Long,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::Short, Mode::Long];

    /// Returns the string representation of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Short => "short",
            Mode::Long => "long",
        }
    }

    /// Returns the label shown on screen.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "集中",
            Mode::Short => "小休憩",
            Mode::Long => "長休憩",
        }
    }

    /// Returns true for the two break modes.
    pub fn is_break(&self) -> bool {
        matches!(self, Mode::Short | Mode::Long)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" | "f" => Ok(Mode::Focus),
            "short" | "short-break" => Ok(Mode::Short),
            "long" | "long-break" => Ok(Mode::Long),
            other => Err(format!("不明なモードです: {other} (focus/short/long)")),
        }
    }
}

// ============================================================================
// Durations
// ============================================================================

/// Clamps a minute value into the supported `[MIN_MINUTES, MAX_MINUTES]` range.
pub fn clamp_minutes(minutes: u32) -> u32 {
    minutes.clamp(MIN_MINUTES, MAX_MINUTES)
}

/// Length of each mode, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub focus: u32,
    pub short: u32,
    pub long: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus: 25 * 60,
            short: 5 * 60,
            long: 15 * 60,
        }
    }
}

impl Durations {
    /// Builds durations from minute values, clamping each one.
    pub fn from_minutes(focus: u32, short: u32, long: u32) -> Self {
        Self {
            focus: clamp_minutes(focus) * 60,
            short: clamp_minutes(short) * 60,
            long: clamp_minutes(long) * 60,
        }
    }

    /// Returns the duration of `mode` in seconds.
    pub fn seconds(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus,
            Mode::Short => self.short,
            Mode::Long => self.long,
        }
    }

    /// Stores `minutes` for `mode` after clamping and returns the applied value.
    pub fn set_minutes(&mut self, mode: Mode, minutes: u32) -> u32 {
        let applied = clamp_minutes(minutes);
        *self.slot(mode) = applied * 60;
        applied
    }

    /// Sets a raw seconds value for `mode` (at least one second).
    pub fn with_seconds(mut self, mode: Mode, seconds: u32) -> Self {
        *self.slot(mode) = seconds.max(1);
        self
    }

    fn slot(&mut self, mode: Mode) -> &mut u32 {
        match mode {
            Mode::Focus => &mut self.focus,
            Mode::Short => &mut self.short,
            Mode::Long => &mut self.long,
        }
    }
}

// ============================================================================
// TimerConfig
// ============================================================================

/// Configuration for the Pomodoro timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Length of each mode
    pub durations: Durations,
    /// Keep counting into the next mode after a session expires
    pub auto_cycle: bool,
}

impl TimerConfig {
    /// Creates a configuration with the given durations.
    pub fn with_durations(mut self, durations: Durations) -> Self {
        self.durations = durations;
        self
    }

    /// Enables or disables auto-cycle.
    pub fn with_auto_cycle(mut self, auto_cycle: bool) -> Self {
        self.auto_cycle = auto_cycle;
        self
    }
}

// ============================================================================
// SessionProgress
// ============================================================================

/// Position inside the current group of four focus sessions.
///
/// Derived from the completed-session count on demand; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    completed: u32,
}

impl SessionProgress {
    pub fn new(focus_sessions_completed: u32) -> Self {
        Self {
            completed: focus_sessions_completed,
        }
    }

    /// Number of filled positions in the current group.
    pub fn filled(&self) -> u32 {
        self.completed % SESSIONS_PER_GROUP
    }

    /// 1-based ordinal of the session currently in progress.
    pub fn ordinal(&self) -> u32 {
        self.filled() + 1
    }

    /// Fixed-length glyph row, filled positions first.
    pub fn glyphs(&self) -> String {
        (0..SESSIONS_PER_GROUP)
            .map(|i| if i < self.filled() { FILLED_GLYPH } else { EMPTY_GLYPH })
            .collect()
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Formats seconds as zero-padded `MM:SS`. Minutes are not capped at 59.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Formats seconds as `H:MM:SS` from one hour up, `MM:SS` below.
pub fn format_countdown(seconds: u32) -> String {
    if seconds >= 3600 {
        format!(
            "{}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    } else {
        format_clock(seconds)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Mode Tests
    // ------------------------------------------------------------------------

    mod mode_tests {
        use super::*;

        #[test]
        fn test_default_is_focus() {
            assert_eq!(Mode::default(), Mode::Focus);
        }

        #[test]
        fn test_as_str() {
            assert_eq!(Mode::Focus.as_str(), "focus");
            assert_eq!(Mode::Short.as_str(), "short");
            assert_eq!(Mode::Long.as_str(), "long");
        }

        #[test]
        fn test_is_break() {
            assert!(!Mode::Focus.is_break());
            assert!(Mode::Short.is_break());
            assert!(Mode::Long.is_break());
        }

        #[test]
        fn test_serialize_deserialize() {
            let json = serde_json::to_string(&Mode::Long).unwrap();
            assert_eq!(json, "\"long\"");

            let mode: Mode = serde_json::from_str("\"short\"").unwrap();
            assert_eq!(mode, Mode::Short);
        }

        #[test]
        fn test_from_str() {
            assert_eq!("focus".parse::<Mode>().unwrap(), Mode::Focus);
            assert_eq!(" LONG ".parse::<Mode>().unwrap(), Mode::Long);
            assert_eq!("short-break".parse::<Mode>().unwrap(), Mode::Short);
            assert!("nap".parse::<Mode>().is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Durations Tests
    // ------------------------------------------------------------------------

    mod durations_tests {
        use super::*;

        #[test]
        fn test_default_values() {
            let durations = Durations::default();
            assert_eq!(durations.seconds(Mode::Focus), 1500);
            assert_eq!(durations.seconds(Mode::Short), 300);
            assert_eq!(durations.seconds(Mode::Long), 900);
        }

        #[test]
        fn test_set_minutes_in_range() {
            let mut durations = Durations::default();
            for minutes in [1, 2, 45, 98, 99] {
                assert_eq!(durations.set_minutes(Mode::Short, minutes), minutes);
                assert_eq!(durations.seconds(Mode::Short), minutes * 60);
            }
        }

        #[test]
        fn test_set_minutes_clamps() {
            let mut durations = Durations::default();
            assert_eq!(durations.set_minutes(Mode::Focus, 0), 1);
            assert_eq!(durations.seconds(Mode::Focus), 60);

            assert_eq!(durations.set_minutes(Mode::Long, 100), 99);
            assert_eq!(durations.set_minutes(Mode::Long, u32::MAX), 99);
            assert_eq!(durations.seconds(Mode::Long), 99 * 60);
        }

        #[test]
        fn test_from_minutes_clamps_each_value() {
            let durations = Durations::from_minutes(0, 30, 500);
            assert_eq!(durations.focus, 60);
            assert_eq!(durations.short, 30 * 60);
            assert_eq!(durations.long, 99 * 60);
        }

        #[test]
        fn test_with_seconds_has_floor_of_one() {
            let durations = Durations::default()
                .with_seconds(Mode::Focus, 0)
                .with_seconds(Mode::Short, 7);
            assert_eq!(durations.focus, 1);
            assert_eq!(durations.short, 7);
        }
    }

    // ------------------------------------------------------------------------
    // SessionProgress Tests
    // ------------------------------------------------------------------------

    mod progress_tests {
        use super::*;

        #[test]
        fn test_no_sessions_completed() {
            let progress = SessionProgress::new(0);
            assert_eq!(progress.ordinal(), 1);
            assert_eq!(progress.glyphs(), "○○○○");
        }

        #[test]
        fn test_three_sessions_completed() {
            let progress = SessionProgress::new(3);
            assert_eq!(progress.ordinal(), 4);
            assert_eq!(progress.glyphs(), "●●●○");
        }

        #[test]
        fn test_group_wraps_after_four() {
            let progress = SessionProgress::new(4);
            assert_eq!(progress.ordinal(), 1);
            assert_eq!(progress.glyphs(), "○○○○");

            let progress = SessionProgress::new(9);
            assert_eq!(progress.ordinal(), 2);
            assert_eq!(progress.glyphs(), "●○○○");
        }

        #[test]
        fn test_glyphs_always_four_symbols() {
            for n in 0..12 {
                assert_eq!(SessionProgress::new(n).glyphs().chars().count(), 4);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Formatting Tests
    // ------------------------------------------------------------------------

    mod format_tests {
        use super::*;

        #[test]
        fn test_format_clock() {
            assert_eq!(format_clock(0), "00:00");
            assert_eq!(format_clock(65), "01:05");
            assert_eq!(format_clock(25 * 60), "25:00");
        }

        #[test]
        fn test_format_clock_minutes_not_capped() {
            assert_eq!(format_clock(99 * 60 + 59), "99:59");
            assert_eq!(format_clock(120 * 60), "120:00");
        }

        #[test]
        fn test_format_countdown() {
            assert_eq!(format_countdown(59), "00:59");
            assert_eq!(format_countdown(3600), "1:00:00");
            assert_eq!(format_countdown(3 * 3600 + 5 * 60 + 9), "3:05:09");
        }
    }
}
