//! Alarm tone player using rodio.
//!
//! Synthesises a short beep pattern instead of shipping audio files.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rodio::source::{SineWave, Source, Zero};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::debug;

use super::error::SoundError;

const TONE_HZ: f32 = 880.0;
const BEEP: Duration = Duration::from_millis(250);
const GAP: Duration = Duration::from_millis(150);
const BEEPS: u32 = 3;
const VOLUME: f32 = 0.3;
const SAMPLE_RATE: u32 = 48_000;

/// Alarm that plays a beep pattern on the default audio device.
pub struct RodioAlarmPlayer {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    disabled: AtomicBool,
}

impl RodioAlarmPlayer {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(disabled: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("Audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            disabled: AtomicBool::new(disabled),
        })
    }

    /// Plays the beep pattern without blocking.
    pub fn ring(&self) -> Result<(), SoundError> {
        if self.is_disabled() {
            debug!("Sound playback disabled, skipping");
            return Ok(());
        }

        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;

        for _ in 0..BEEPS {
            sink.append(SineWave::new(TONE_HZ).take_duration(BEEP).amplify(VOLUME));
            sink.append(Zero::<f32>::new(1, SAMPLE_RATE).take_duration(GAP));
        }
        sink.detach();

        debug!("Alarm tone started (detached)");
        Ok(())
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    pub fn enable(&self) {
        self.disabled.store(false, Ordering::Relaxed);
    }

    pub fn disable(&self) {
        self.disabled.store(true, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for RodioAlarmPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAlarmPlayer")
            .field("disabled", &self.disabled.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
