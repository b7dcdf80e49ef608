//! Sound system error types.
//!
//! Alarm failures never stop a timer; these errors exist so callers can log
//! something useful and carry on.

use thiserror::Error;

/// Errors that can occur while ringing the alarm.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("オーディオデバイスが利用できません: {0}")]
    DeviceNotAvailable(String),

    /// Failed to create the audio output stream.
    #[error("オーディオストリームの作成に失敗しました: {0}")]
    StreamError(String),

    /// Failed to write the terminal bell.
    #[error("ターミナルベルの出力に失敗しました: {0}")]
    TerminalError(#[from] std::io::Error),

    /// Generic sound playback error.
    #[error("サウンド再生エラー: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns true if the terminal bell is a sensible fallback.
    #[must_use]
    pub fn should_fallback_to_bell(&self) -> bool {
        self.is_device_error()
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "オーディオデバイスを接続してください",
            Self::StreamError(_) => "オーディオ設定を確認してください",
            Self::TerminalError(_) => "標準出力が閉じられていないか確認してください",
            Self::PlaybackError(_) => "--no-sound でアラーム音を無効にできます",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no device".to_string());
        assert!(err.to_string().contains("no device"));
        assert!(err.to_string().contains("オーディオデバイスが利用できません"));

        let err = SoundError::StreamError("stream failed".to_string());
        assert!(err.to_string().contains("stream failed"));

        let err = SoundError::PlaybackError("unknown error".to_string());
        assert!(err.to_string().contains("unknown error"));
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: SoundError = io.into();
        assert!(matches!(err, SoundError::TerminalError(_)));
        assert!(err.to_string().contains("pipe closed"));
    }

    #[test]
    fn test_is_device_error() {
        assert!(SoundError::DeviceNotAvailable("x".into()).is_device_error());
        assert!(SoundError::StreamError("x".into()).is_device_error());
        assert!(!SoundError::PlaybackError("x".into()).is_device_error());
    }

    #[test]
    fn test_should_fallback_to_bell() {
        assert!(SoundError::DeviceNotAvailable("x".into()).should_fallback_to_bell());
        assert!(!SoundError::PlaybackError("x".into()).should_fallback_to_bell());
    }

    #[test]
    fn test_suggestion() {
        assert!(SoundError::DeviceNotAvailable("x".into())
            .suggestion()
            .contains("オーディオデバイス"));
        assert!(SoundError::PlaybackError("x".into())
            .suggestion()
            .contains("--no-sound"));
    }
}
