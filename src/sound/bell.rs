//! Terminal bell alarm.
//!
//! Works everywhere a terminal does, so it doubles as the fallback when no
//! audio device is available.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use super::error::SoundError;

/// ASCII BEL.
const BELL: &[u8] = b"\x07";

/// Default number of bells per alarm.
pub const DEFAULT_BELL_REPEAT: u32 = 3;

/// Alarm that rings the terminal bell.
#[derive(Debug)]
pub struct BellPlayer {
    repeat: u32,
    disabled: AtomicBool,
}

impl BellPlayer {
    #[must_use]
    pub fn new(disabled: bool) -> Self {
        Self {
            repeat: DEFAULT_BELL_REPEAT,
            disabled: AtomicBool::new(disabled),
        }
    }

    /// Sets how many bells one alarm produces (at least one).
    #[must_use]
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat.max(1);
        self
    }

    /// Writes the bell sequence to `out`.
    pub fn ring_into<W: Write>(&self, out: &mut W) -> Result<(), SoundError> {
        if self.is_disabled() {
            debug!("Bell disabled, skipping");
            return Ok(());
        }
        for _ in 0..self.repeat {
            out.write_all(BELL)?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn ring(&self) -> Result<(), SoundError> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.ring_into(&mut handle)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_writes_bells() {
        let player = BellPlayer::new(false);
        let mut out = Vec::new();

        player.ring_into(&mut out).unwrap();

        assert_eq!(out, b"\x07\x07\x07");
    }

    #[test]
    fn test_with_repeat() {
        let player = BellPlayer::new(false).with_repeat(0);
        let mut out = Vec::new();

        player.ring_into(&mut out).unwrap();

        assert_eq!(out, b"\x07");
    }

    #[test]
    fn test_disabled_writes_nothing() {
        let player = BellPlayer::new(true);
        let mut out = Vec::new();

        player.ring_into(&mut out).unwrap();

        assert!(out.is_empty());
    }

    #[test]
    fn test_enable_disable() {
        let player = BellPlayer::new(true);
        assert!(player.is_disabled());

        player.enable();
        assert!(!player.is_disabled());

        player.disable();
        assert!(player.is_disabled());
    }
}
