//! Music player integration.
//!
//! The workspace pauses background music when a focus session ends and
//! resumes it when the break is over. Players are reached through external
//! commands (by default `playerctl`, which speaks MPRIS to most Linux
//! players), so any player with a command-line remote can be plugged in.
//!
//! # Example
//!
//! ```no_run
//! use studyfocus::media::{CommandMediaController, MediaConfig, MediaController};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let controller = CommandMediaController::new(MediaConfig::enabled());
//! if controller.is_playing().await? {
//!     controller.pause().await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All errors in this module are recoverable - the timer should always
//! continue even if the player cannot be reached. Use
//! [`MediaError::is_recoverable`] to check this.

pub mod command;
pub mod config;
pub mod error;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tracing::info;

pub use command::{program_exists, program_of, run_command};
pub use config::MediaConfig;
pub use error::MediaError;

#[allow(async_fn_in_trait)]
pub trait MediaController {
    async fn play(&self) -> Result<(), MediaError>;
    async fn pause(&self) -> Result<(), MediaError>;
    async fn is_playing(&self) -> Result<bool, MediaError>;
    fn is_available(&self) -> bool;
}

/// Controls a player by running configured commands.
#[derive(Debug, Clone)]
pub struct CommandMediaController {
    config: MediaConfig,
}

impl CommandMediaController {
    #[must_use]
    pub fn new(config: MediaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MediaConfig {
        &self.config
    }
}

impl MediaController for CommandMediaController {
    async fn play(&self) -> Result<(), MediaError> {
        if !self.config.enabled {
            return Ok(());
        }
        run_command(&self.config.play_command, self.config.timeout_seconds).await?;
        info!("音楽を再開しました");
        Ok(())
    }

    async fn pause(&self) -> Result<(), MediaError> {
        if !self.config.enabled {
            return Ok(());
        }
        run_command(&self.config.pause_command, self.config.timeout_seconds).await?;
        info!("音楽を一時停止しました");
        Ok(())
    }

    async fn is_playing(&self) -> Result<bool, MediaError> {
        if !self.config.enabled {
            return Ok(false);
        }
        match &self.config.status_command {
            Some(status) => {
                let output = run_command(status, self.config.timeout_seconds).await?;
                Ok(output.eq_ignore_ascii_case("playing"))
            }
            None => Ok(true),
        }
    }

    fn is_available(&self) -> bool {
        self.config.enabled
            && program_of(&self.config.play_command).is_some_and(program_exists)
            && program_of(&self.config.pause_command).is_some_and(program_exists)
    }
}

/// Mock media controller for testing.
#[derive(Debug, Default)]
pub struct MockMediaController {
    play_calls: AtomicUsize,
    pause_calls: AtomicUsize,
    playing: AtomicBool,
    unavailable: AtomicBool,
    should_fail: AtomicBool,
}

impl MockMediaController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose player is currently playing.
    #[must_use]
    pub fn playing() -> Self {
        let mock = Self::default();
        mock.set_playing(true);
        mock
    }

    pub fn set_playing(&self, playing: bool) {
        self.playing.store(playing, Ordering::SeqCst);
    }

    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_call_count(&self) -> usize {
        self.play_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn pause_call_count(&self) -> usize {
        self.pause_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn is_currently_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), MediaError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(MediaError::ExecutionFailed(
                "mock".to_string(),
                "simulated failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl MediaController for MockMediaController {
    async fn play(&self) -> Result<(), MediaError> {
        self.check_failure()?;
        self.play_calls.fetch_add(1, Ordering::SeqCst);
        self.playing.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn pause(&self) -> Result<(), MediaError> {
        self.check_failure()?;
        self.pause_calls.fetch_add(1, Ordering::SeqCst);
        self.playing.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn is_playing(&self) -> Result<bool, MediaError> {
        self.check_failure()?;
        Ok(self.playing.load(Ordering::SeqCst))
    }

    fn is_available(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }
}

impl<T: MediaController> MediaController for std::sync::Arc<T> {
    async fn play(&self) -> Result<(), MediaError> {
        (**self).play().await
    }

    async fn pause(&self) -> Result<(), MediaError> {
        (**self).pause().await
    }

    async fn is_playing(&self) -> Result<bool, MediaError> {
        (**self).is_playing().await
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}
