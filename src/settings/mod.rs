//! Persisted user settings.
//!
//! The timer itself keeps no state across runs; this module remembers the
//! chosen durations, the last mode and the collaborator options in a JSON
//! file under the user's config directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::media::MediaConfig;
use crate::types::{clamp_minutes, Durations, Mode, TimerConfig};

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "studyfocus";

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

// ============================================================================
// SettingsError
// ============================================================================

/// Errors that can occur while loading or saving settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The platform has no config directory.
    #[error("設定ディレクトリが見つかりません")]
    NoConfigDir,

    /// Reading or writing the settings file failed.
    #[error("設定ファイル {path} の読み書きに失敗しました: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`Settings`].
    #[error("設定ファイル {path} の形式が正しくありません: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoConfigDir => "--config で設定ファイルのパスを指定してください",
            Self::Io { .. } => "ファイルの権限を確認してください",
            Self::Parse { .. } => "設定ファイルを修正するか削除してください",
        }
    }
}

// ============================================================================
// Settings
// ============================================================================

fn default_focus_minutes() -> u32 {
    25
}

fn default_short_minutes() -> u32 {
    5
}

fn default_long_minutes() -> u32 {
    15
}

fn default_sound_enabled() -> bool {
    true
}

/// User settings stored between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,

    #[serde(default = "default_short_minutes")]
    pub short_minutes: u32,

    #[serde(default = "default_long_minutes")]
    pub long_minutes: u32,

    /// Mode that was active when the last session closed.
    #[serde(default)]
    pub last_mode: Mode,

    /// Keep counting into the next mode after a session expires.
    #[serde(default)]
    pub auto_cycle: bool,

    #[serde(default = "default_sound_enabled")]
    pub sound_enabled: bool,

    #[serde(default)]
    pub media: MediaConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_minutes: default_short_minutes(),
            long_minutes: default_long_minutes(),
            last_mode: Mode::default(),
            auto_cycle: false,
            sound_enabled: default_sound_enabled(),
            media: MediaConfig::default(),
        }
    }
}

impl Settings {
    /// Returns the default settings file path.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::NoConfigDir` when the platform has no config directory.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Loads settings from `path`, falling back to defaults when the file is missing.
    ///
    /// Minute values are clamped on load.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "settings file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let mut settings: Settings =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.clamp();
        debug!(path = %path.display(), "settings loaded");
        Ok(settings)
    }

    /// Writes settings to `path` as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let io_error = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json + "\n").map_err(io_error)?;
        debug!(path = %path.display(), "settings saved");
        Ok(())
    }

    /// Returns the stored minutes for `mode`.
    pub fn minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Focus => self.focus_minutes,
            Mode::Short => self.short_minutes,
            Mode::Long => self.long_minutes,
        }
    }

    /// Stores clamped minutes for `mode` and returns the applied value.
    pub fn set_minutes(&mut self, mode: Mode, minutes: u32) -> u32 {
        let applied = clamp_minutes(minutes);
        match mode {
            Mode::Focus => self.focus_minutes = applied,
            Mode::Short => self.short_minutes = applied,
            Mode::Long => self.long_minutes = applied,
        }
        applied
    }

    /// Copies durations from a running timer's configuration (whole minutes).
    pub fn update_from(&mut self, config: &TimerConfig, last_mode: Mode) {
        for mode in Mode::ALL {
            self.set_minutes(mode, config.durations.seconds(mode) / 60);
        }
        self.last_mode = last_mode;
    }

    fn clamp(&mut self) {
        for mode in Mode::ALL {
            self.set_minutes(mode, self.minutes(mode));
        }
    }

    /// Builds the timer configuration these settings describe.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig::default()
            .with_durations(Durations::from_minutes(
                self.focus_minutes,
                self.short_minutes,
                self.long_minutes,
            ))
            .with_auto_cycle(self.auto_cycle)
    }
}

// ============================================================================
// Tests
// ============================================================================
