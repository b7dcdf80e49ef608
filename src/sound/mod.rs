//! Alarm sounds for the study-focus timer.
//!
//! This module provides the audible half of the end-of-session alarm:
//!
//! - Terminal bell playback (always available)
//! - Synthesised beep tone through rodio (feature `audio`)
//! - Graceful degradation when audio is unavailable
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   AlarmPlayer    │ ← Main interface
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │ create_alarm_    │────▶│ RodioAlarmPlayer │ (feature "audio")
//! │ player()         │     ├──────────────────┤
//! │                  │────▶│   BellPlayer     │ (fallback)
//! └──────────────────┘     └──────────────────┘
//! ```

mod bell;
mod error;
#[cfg(feature = "audio")]
mod tone;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[cfg(feature = "audio")]
use tracing::warn;

pub use bell::{BellPlayer, DEFAULT_BELL_REPEAT};
pub use error::SoundError;
#[cfg(feature = "audio")]
pub use tone::RodioAlarmPlayer;

/// Trait for alarm playback implementations.
///
/// This trait abstracts the alarm, allowing for different implementations
/// (terminal bell, rodio tone, mock for testing).
pub trait AlarmPlayer {
    /// Rings the alarm. Should not block for the length of the sound.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn ring(&self) -> Result<(), SoundError>;

    /// Returns true if sound playback is disabled.
    fn is_disabled(&self) -> bool;

    /// Enables sound playback.
    fn enable(&self);

    /// Disables sound playback.
    fn disable(&self);
}

impl AlarmPlayer for BellPlayer {
    fn ring(&self) -> Result<(), SoundError> {
        BellPlayer::ring(self)
    }

    fn is_disabled(&self) -> bool {
        BellPlayer::is_disabled(self)
    }

    fn enable(&self) {
        BellPlayer::enable(self)
    }

    fn disable(&self) {
        BellPlayer::disable(self)
    }
}

#[cfg(feature = "audio")]
impl AlarmPlayer for RodioAlarmPlayer {
    fn ring(&self) -> Result<(), SoundError> {
        RodioAlarmPlayer::ring(self)
    }

    fn is_disabled(&self) -> bool {
        RodioAlarmPlayer::is_disabled(self)
    }

    fn enable(&self) {
        RodioAlarmPlayer::enable(self)
    }

    fn disable(&self) {
        RodioAlarmPlayer::disable(self)
    }
}

/// Mock alarm player for testing.
#[derive(Debug, Default)]
pub struct MockAlarmPlayer {
    ring_calls: AtomicUsize,
    disabled: AtomicBool,
    should_fail: AtomicBool,
}

impl MockAlarmPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.ring_calls.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) {
        self.ring_calls.store(0, Ordering::SeqCst);
    }
}

impl AlarmPlayer for MockAlarmPlayer {
    fn ring(&self) -> Result<(), SoundError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        if self.disabled.load(Ordering::SeqCst) {
            return Ok(());
        }
        self.ring_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    fn enable(&self) {
        self.disabled.store(false, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disabled.store(true, Ordering::SeqCst);
    }
}

impl<T: AlarmPlayer + ?Sized> AlarmPlayer for std::sync::Arc<T> {
    fn ring(&self) -> Result<(), SoundError> {
        (**self).ring()
    }

    fn is_disabled(&self) -> bool {
        (**self).is_disabled()
    }

    fn enable(&self) {
        (**self).enable()
    }

    fn disable(&self) {
        (**self).disable()
    }
}

/// Creates the best available alarm player.
///
/// With the `audio` feature a rodio tone player is tried first; if no audio
/// device is available a warning is logged and the terminal bell is used.
#[must_use]
pub fn create_alarm_player(enabled: bool) -> Box<dyn AlarmPlayer> {
    #[cfg(feature = "audio")]
    {
        match RodioAlarmPlayer::new(!enabled) {
            Ok(player) => return Box::new(player),
            Err(e) if e.should_fallback_to_bell() => {
                warn!("Audio not available, falling back to terminal bell: {}", e);
            }
            Err(e) => warn!("Audio player failed: {}", e),
        }
    }
    #[cfg(not(feature = "audio"))]
    {
        if !enabled {
            tracing::debug!("Sound disabled by configuration");
        }
    }
    Box::new(BellPlayer::new(!enabled))
}
