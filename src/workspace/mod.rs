//! The coordinating layer between timers and their collaborators.
//!
//! A [`Workspace`] owns the application session state that the timers do not:
//! the screen, the alarm, the music player, and whether the music was paused
//! by us. It consumes [`TimerEvent`]s and [`CountdownEvent`]s and turns them
//! into display updates, toasts, alarms and play/pause calls.

use std::sync::Mutex;

use tracing::{debug, warn};

use crate::countdown::CountdownEvent;
use crate::media::MediaController;
use crate::sound::AlarmPlayer;
use crate::timer::TimerEvent;
use crate::types::{Mode, SessionProgress};

// ============================================================================
// Screen
// ============================================================================

/// Display capability used by the workspace.
pub trait Screen {
    /// Shows the remaining time of the Pomodoro timer.
    fn show_tick(&self, seconds_left: u32, mode: Mode, progress: SessionProgress);

    /// Announces a mode change.
    fn show_mode(&self, mode: Mode);

    /// Shows a short, transient message.
    fn show_toast(&self, message: &str);

    /// Shows the remaining time of a countdown.
    fn show_countdown(&self, remaining: u32);
}

/// One call recorded by [`MockScreen`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenCall {
    Tick {
        seconds_left: u32,
        mode: Mode,
        ordinal: u32,
    },
    Mode(Mode),
    Toast(String),
    Countdown(u32),
}

/// Mock screen for testing.
#[derive(Debug, Default)]
pub struct MockScreen {
    calls: Mutex<Vec<ScreenCall>>,
}

impl MockScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: ScreenCall) {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(call);
    }

    #[must_use]
    pub fn calls(&self) -> Vec<ScreenCall> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn toasts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ScreenCall::Toast(message) => Some(message),
                _ => None,
            })
            .collect()
    }
}

impl Screen for MockScreen {
    fn show_tick(&self, seconds_left: u32, mode: Mode, progress: SessionProgress) {
        self.record(ScreenCall::Tick {
            seconds_left,
            mode,
            ordinal: progress.ordinal(),
        });
    }

    fn show_mode(&self, mode: Mode) {
        self.record(ScreenCall::Mode(mode));
    }

    fn show_toast(&self, message: &str) {
        self.record(ScreenCall::Toast(message.to_string()));
    }

    fn show_countdown(&self, remaining: u32) {
        self.record(ScreenCall::Countdown(remaining));
    }
}

impl<T: Screen + ?Sized> Screen for std::sync::Arc<T> {
    fn show_tick(&self, seconds_left: u32, mode: Mode, progress: SessionProgress) {
        (**self).show_tick(seconds_left, mode, progress)
    }

    fn show_mode(&self, mode: Mode) {
        (**self).show_mode(mode)
    }

    fn show_toast(&self, message: &str) {
        (**self).show_toast(message)
    }

    fn show_countdown(&self, remaining: u32) {
        (**self).show_countdown(remaining)
    }
}

// ============================================================================
// Toast messages
// ============================================================================

/// Message shown when a session of `mode` ends naturally.
pub fn end_of_session_message(mode: Mode, focus_sessions_completed: u32) -> String {
    match mode {
        Mode::Focus => format!(
            "集中セッション完了！ 休憩しましょう (完了: {}回)",
            focus_sessions_completed
        ),
        Mode::Short => "小休憩終了！ 集中に戻りましょう".to_string(),
        Mode::Long => "長休憩終了！ 新しいセットを始めましょう".to_string(),
    }
}

/// Message shown when a countdown finishes.
pub const COUNTDOWN_FINISHED_MESSAGE: &str = "カウントダウン終了！";

// ============================================================================
// Workspace
// ============================================================================

/// Application session state for one run.
pub struct Workspace<M: MediaController, S: Screen> {
    media: M,
    alarm: Box<dyn AlarmPlayer>,
    screen: S,
    focus_sessions_completed: u32,
    media_paused_by_timer: bool,
}

impl<M: MediaController, S: Screen> Workspace<M, S> {
    pub fn new(media: M, alarm: Box<dyn AlarmPlayer>, screen: S) -> Self {
        Self {
            media,
            alarm,
            screen,
            focus_sessions_completed: 0,
            media_paused_by_timer: false,
        }
    }

    /// Reacts to one timer event.
    pub async fn handle_timer_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick { seconds_left, mode } => {
                self.screen.show_tick(seconds_left, mode, self.progress());
            }
            TimerEvent::ModeChanged { mode } => {
                self.screen.show_mode(mode);
                // A break skipped by hand never reaches `Ended`.
                if mode == Mode::Focus {
                    self.resume_media().await;
                }
            }
            TimerEvent::Ended {
                mode,
                focus_sessions_completed,
            } => {
                self.focus_sessions_completed = focus_sessions_completed;
                self.ring_alarm();
                self.screen
                    .show_toast(&end_of_session_message(mode, focus_sessions_completed));

                if mode == Mode::Focus {
                    self.pause_media().await;
                } else {
                    self.resume_media().await;
                }
            }
        }
    }

    /// Reacts to one countdown event.
    pub fn handle_countdown_event(&mut self, event: CountdownEvent) {
        match event {
            CountdownEvent::Tick { remaining } => self.screen.show_countdown(remaining),
            CountdownEvent::Finished => {
                self.ring_alarm();
                self.screen.show_toast(COUNTDOWN_FINISHED_MESSAGE);
            }
        }
    }

    fn ring_alarm(&self) {
        if let Err(e) = self.alarm.ring() {
            warn!("アラームを鳴らせませんでした: {} ({})", e, e.suggestion());
        }
    }

    /// Pauses the music if it is playing and remembers that we did.
    async fn pause_media(&mut self) {
        match self.media.is_playing().await {
            Ok(true) => match self.media.pause().await {
                Ok(()) => self.media_paused_by_timer = true,
                Err(e) => warn!("音楽を一時停止できませんでした: {} ({})", e, e.suggestion()),
            },
            Ok(false) => debug!("music not playing, nothing to pause"),
            Err(e) => warn!("プレイヤーの状態を取得できませんでした: {}", e),
        }
    }

    /// Resumes the music only if it was paused by [`Self::pause_media`].
    async fn resume_media(&mut self) {
        if !self.media_paused_by_timer {
            debug!("music was not paused by the timer, leaving it alone");
            return;
        }
        self.media_paused_by_timer = false;
        if let Err(e) = self.media.play().await {
            warn!("音楽を再開できませんでした: {} ({})", e, e.suggestion());
        }
    }

    /// Syncs the session count, e.g. after constructing a workspace for an existing timer.
    pub fn set_focus_sessions_completed(&mut self, completed: u32) {
        self.focus_sessions_completed = completed;
    }

    pub fn progress(&self) -> SessionProgress {
        SessionProgress::new(self.focus_sessions_completed)
    }

    pub fn is_media_paused_by_timer(&self) -> bool {
        self.media_paused_by_timer
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn alarm(&self) -> &dyn AlarmPlayer {
        self.alarm.as_ref()
    }
}

// ============================================================================
// Tests
// ============================================================================
