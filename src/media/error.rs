//! Media control error types.
//!
//! All of these are recoverable: a player that cannot be reached must never
//! stop the timer.

use thiserror::Error;

/// Errors that can occur while controlling the music player.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The configured command line is empty.
    #[error("メディア操作コマンドが設定されていません")]
    EmptyCommand,

    /// The program could not be found on PATH.
    #[error("コマンド '{0}' が見つかりません")]
    CommandNotFound(String),

    /// The command reported that no player is running.
    #[error("再生中のプレイヤーが見つかりません")]
    NoPlayer,

    /// Command execution timed out.
    #[error("コマンド '{0}' の実行がタイムアウトしました（{1}秒）")]
    ExecutionTimeout(String, u64),

    /// Command execution failed with an error.
    #[error("コマンド '{0}' の実行に失敗しました: {1}")]
    ExecutionFailed(String, String),

    /// Generic media control error.
    #[error("メディア連携エラー: {0}")]
    Other(String),
}

impl MediaError {
    /// Returns true if this error is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::ExecutionTimeout(_, _))
    }

    /// Returns true if no player was there to control.
    #[must_use]
    pub fn is_no_player(&self) -> bool {
        matches!(self, Self::NoPlayer)
    }

    /// Returns true if the error is recoverable and the timer should continue.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::EmptyCommand => "設定ファイルの media.play_command / media.pause_command を確認してください",
            Self::CommandNotFound(_) => "playerctl などのプレイヤー操作ツールをインストールしてください",
            Self::NoPlayer => "音楽プレイヤーを起動してください",
            Self::ExecutionTimeout(_, _) => "media.timeout_seconds を延長してください",
            Self::ExecutionFailed(_, _) => "コマンドを端末で直接実行して動作を確認してください",
            Self::Other(_) => "設定を確認し、アプリケーションを再起動してください",
        }
    }
}
