//! studyfocus library
//!
//! This library provides the core functionality for the studyfocus CLI.
//! It includes:
//! - Pomodoro timer engine with a focus/short/long session cycle
//! - One-off countdown with an alarm at zero
//! - Workspace that couples timer events to the screen, alarm and music player
//! - Alarm playback (terminal bell, or tones with the `audio` feature)
//! - Music player control through external commands
//! - Persisted settings
//! - CLI command parsing and display utilities

pub mod cli;
pub mod countdown;
pub mod media;
pub mod settings;
pub mod sound;
pub mod timer;
pub mod types;
pub mod workspace;

// Re-export commonly used types for convenience
pub use types::{Durations, Mode, SessionProgress, TimerConfig};

// Re-export timer types
pub use countdown::{CountdownEngine, CountdownEvent, CountdownTimer};
pub use timer::{PomodoroTimer, TimerEngine, TimerEvent, TimerSnapshot};

// Re-export collaborator types
pub use media::{
    CommandMediaController, MediaConfig, MediaController, MediaError, MockMediaController,
};
pub use sound::{create_alarm_player, AlarmPlayer, BellPlayer, MockAlarmPlayer, SoundError};
pub use workspace::{MockScreen, Screen, Workspace};

pub use settings::{Settings, SettingsError};
