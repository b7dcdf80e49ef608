//! Media control configuration types.
//!
//! Commands are plain command lines split on whitespace; the defaults drive
//! any MPRIS player through `playerctl`.

use serde::{Deserialize, Serialize};

fn default_play_command() -> String {
    "playerctl play".to_string()
}

fn default_pause_command() -> String {
    "playerctl pause".to_string()
}

fn default_status_command() -> Option<String> {
    Some("playerctl status".to_string())
}

fn default_timeout_seconds() -> u64 {
    5
}

/// Music player integration configuration.
///
/// Disabled by default; when enabled, the workspace pauses music at the end
/// of a focus session and resumes it when the break is over.
///
/// Command lines are split on whitespace and run without a shell. Quoting is
/// not supported: `playerctl -p "My Player" play` passes `"My` and `Player"`
/// as separate arguments. Wrap such commands in a script instead.
///
/// # Example
///
/// ```
/// use studyfocus::media::MediaConfig;
///
/// let config = MediaConfig::default();
/// assert!(!config.enabled);
/// assert_eq!(config.play_command, "playerctl play");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaConfig {
    /// Whether media control is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Command that resumes playback.
    #[serde(default = "default_play_command")]
    pub play_command: String,

    /// Command that pauses playback.
    #[serde(default = "default_pause_command")]
    pub pause_command: String,

    /// Command whose output is `Playing` while music plays. When absent the
    /// player is assumed to be playing.
    #[serde(default = "default_status_command")]
    pub status_command: Option<String>,

    /// Timeout for each command in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            play_command: default_play_command(),
            pause_command: default_pause_command(),
            status_command: default_status_command(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl MediaConfig {
    /// Creates a new configuration with media control enabled.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Creates an enabled configuration with custom commands.
    #[must_use]
    pub fn with_commands(play: impl Into<String>, pause: impl Into<String>) -> Self {
        Self {
            enabled: true,
            play_command: play.into(),
            pause_command: pause.into(),
            ..Self::default()
        }
    }

    /// Replaces the status command.
    #[must_use]
    pub fn with_status_command(mut self, status: Option<String>) -> Self {
        self.status_command = status;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
