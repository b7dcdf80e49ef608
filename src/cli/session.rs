//! Interactive session loops for the `run` and `countdown` commands.
//!
//! Each loop owns a timer and a [`Workspace`], and multiplexes three sources
//! with `tokio::select!`: timer events, lines typed on stdin, and Ctrl-C.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::commands::{CountdownArgs, RunArgs};
use super::display::ConsoleScreen;
use super::input::{LineCommand, HELP_TEXT};
use crate::countdown::{CountdownEngine, CountdownEvent, CountdownTimer};
use crate::media::{CommandMediaController, MediaConfig, MediaController};
use crate::settings::Settings;
use crate::sound::create_alarm_player;
use crate::timer::PomodoroTimer;
use crate::types::Mode;
use crate::workspace::{Screen, Workspace};

// ============================================================================
// Settings helpers
// ============================================================================

/// Returns `explicit` or the default settings path.
pub fn resolve_settings_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Settings::default_path().map_err(|e| anyhow!("{} ({})", e, e.suggestion())),
    }
}

/// Loads settings, attaching the recovery hint to any error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    Settings::load(path).map_err(|e| anyhow!("{} ({})", e, e.suggestion()))
}

/// Saves settings, attaching the recovery hint to any error.
pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    settings
        .save(path)
        .map_err(|e| anyhow!("{} ({})", e, e.suggestion()))
}

/// Applies command-line duration overrides to loaded settings.
pub fn apply_run_overrides(settings: &mut Settings, args: &RunArgs) {
    let overrides = [
        (Mode::Focus, args.focus),
        (Mode::Short, args.short),
        (Mode::Long, args.long),
    ];
    for (mode, minutes) in overrides {
        if let Some(minutes) = minutes {
            let applied = settings.set_minutes(mode, minutes);
            debug!(mode = %mode, minutes = applied, "duration override");
        }
    }
}

// ============================================================================
// Line commands
// ============================================================================

/// What the session loop should do after a line command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Keep running, optionally showing a message.
    Continue(Option<String>),
    Quit,
}

/// Applies one line command to the timer.
pub fn apply_command(timer: &mut PomodoroTimer, command: LineCommand) -> CommandOutcome {
    let message = match command {
        LineCommand::Toggle => {
            let message = if timer.toggle() {
                "再開しました"
            } else {
                "一時停止しました"
            };
            message.to_string()
        }
        LineCommand::Start => {
            if timer.start() {
                "開始しました".to_string()
            } else {
                "既に動作中です".to_string()
            }
        }
        LineCommand::Pause => {
            timer.pause();
            "一時停止しました".to_string()
        }
        LineCommand::Reset => {
            timer.reset();
            return CommandOutcome::Continue(None);
        }
        LineCommand::SwitchMode(mode) => {
            timer.set_mode(mode);
            return CommandOutcome::Continue(None);
        }
        LineCommand::SetDuration { mode, minutes } => {
            let applied = timer.set_duration(mode, minutes);
            format!("{}を{}分に設定しました", mode.label(), applied)
        }
        LineCommand::Help => HELP_TEXT.to_string(),
        LineCommand::Quit => return CommandOutcome::Quit,
    };
    CommandOutcome::Continue(Some(message))
}

// ============================================================================
// run
// ============================================================================

/// Runs an interactive Pomodoro session until `q`, end of input or Ctrl-C.
///
/// Durations and the final mode are written back to the settings file on exit.
pub async fn run_session(args: &RunArgs, settings_path: &Path) -> Result<()> {
    let mut settings = load_settings(settings_path)?;
    apply_run_overrides(&mut settings, args);

    let config = settings
        .timer_config()
        .with_auto_cycle(settings.auto_cycle || args.auto_cycle);

    let mut media_config = settings.media.clone();
    if args.no_media {
        media_config.set_enabled(false);
    }
    let media = CommandMediaController::new(media_config);
    if media.config().enabled && !media.is_available() {
        warn!(
            "音楽プレイヤーのコマンドが見つかりません: {}",
            media.config().play_command
        );
    }

    let alarm = create_alarm_player(settings.sound_enabled && !args.no_sound);
    let mut workspace = Workspace::new(media, alarm, ConsoleScreen::new());

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = PomodoroTimer::new(config, tx);
    timer.set_mode(args.mode.unwrap_or(settings.last_mode));
    if args.start {
        timer.start();
    }
    info!(mode = %timer.mode(), running = timer.is_running(), "session started");
    workspace.screen().show_toast("? でコマンド一覧、q で終了");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                workspace.handle_timer_event(event).await;
            }
            line = lines.next_line() => {
                let line = line.context("標準入力の読み込みに失敗しました")?;
                let Some(line) = line else {
                    debug!("stdin closed, ending session");
                    break;
                };
                match line.parse::<LineCommand>() {
                    Ok(command) => match apply_command(&mut timer, command) {
                        CommandOutcome::Continue(Some(message)) => {
                            workspace.screen().show_toast(&message);
                        }
                        CommandOutcome::Continue(None) => {}
                        CommandOutcome::Quit => break,
                    },
                    Err(message) => workspace.screen().show_toast(&message),
                }
            }
            _ = &mut ctrl_c => {
                debug!("interrupted");
                break;
            }
        }
    }

    timer.pause();
    while let Ok(event) = rx.try_recv() {
        workspace.handle_timer_event(event).await;
    }

    settings.update_from(&timer.config(), timer.mode());
    save_settings(&settings, settings_path)?;
    println!();
    info!(
        focus_sessions_completed = timer.focus_sessions_completed(),
        "session ended"
    );
    Ok(())
}

// ============================================================================
// countdown
// ============================================================================

/// Runs a countdown until it finishes or Ctrl-C is pressed.
pub async fn run_countdown(args: &CountdownArgs, settings_path: &Path) -> Result<()> {
    let settings = load_settings(settings_path)?;
    let alarm = create_alarm_player(settings.sound_enabled && !args.no_sound);
    let mut workspace = Workspace::new(
        CommandMediaController::new(MediaConfig::default()),
        alarm,
        ConsoleScreen::new(),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut countdown = CountdownTimer::new(CountdownEngine::from_hms(
        args.hours,
        args.minutes,
        args.seconds,
        tx,
    ));
    workspace
        .screen()
        .show_countdown(countdown.remaining());
    countdown.start();
    info!(total = countdown.total(), "countdown started");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                workspace.handle_countdown_event(event);
                if event == CountdownEvent::Finished {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                countdown.pause();
                debug!(remaining = countdown.remaining(), "countdown interrupted");
                println!();
                break;
            }
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerEvent;
    use crate::types::TimerConfig;

    fn timer() -> (PomodoroTimer, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (PomodoroTimer::new(TimerConfig::default(), tx), rx)
    }

    // ------------------------------------------------------------------------
    // apply_command Tests
    // ------------------------------------------------------------------------

    mod apply_command_tests {
        use super::*;

        #[tokio::test(start_paused = true)]
        async fn test_toggle_messages() {
            let (mut timer, _rx) = timer();

            assert_eq!(
                apply_command(&mut timer, LineCommand::Toggle),
                CommandOutcome::Continue(Some("再開しました".to_string()))
            );
            assert!(timer.is_running());
            assert_eq!(
                apply_command(&mut timer, LineCommand::Toggle),
                CommandOutcome::Continue(Some("一時停止しました".to_string()))
            );
            assert!(!timer.is_running());
        }

        #[tokio::test(start_paused = true)]
        async fn test_double_start_reports_running() {
            let (mut timer, _rx) = timer();

            apply_command(&mut timer, LineCommand::Start);
            assert_eq!(
                apply_command(&mut timer, LineCommand::Start),
                CommandOutcome::Continue(Some("既に動作中です".to_string()))
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_switch_mode_and_reset() {
            let (mut timer, _rx) = timer();

            assert_eq!(
                apply_command(&mut timer, LineCommand::SwitchMode(Mode::Long)),
                CommandOutcome::Continue(None)
            );
            assert_eq!(timer.mode(), Mode::Long);
            assert_eq!(timer.time_left(), 15 * 60);

            apply_command(&mut timer, LineCommand::Reset);
            assert_eq!(timer.time_left(), 15 * 60);
        }

        #[tokio::test(start_paused = true)]
        async fn test_set_duration_reports_clamped_value() {
            let (mut timer, _rx) = timer();

            let outcome = apply_command(
                &mut timer,
                LineCommand::SetDuration {
                    mode: Mode::Focus,
                    minutes: 150,
                },
            );
            assert_eq!(
                outcome,
                CommandOutcome::Continue(Some("集中を99分に設定しました".to_string()))
            );
            assert_eq!(timer.time_left(), 99 * 60);
        }

        #[tokio::test(start_paused = true)]
        async fn test_quit_and_help() {
            let (mut timer, _rx) = timer();

            assert_eq!(
                apply_command(&mut timer, LineCommand::Help),
                CommandOutcome::Continue(Some(HELP_TEXT.to_string()))
            );
            assert_eq!(
                apply_command(&mut timer, LineCommand::Quit),
                CommandOutcome::Quit
            );
        }
    }

    // ------------------------------------------------------------------------
    // Settings helper Tests
    // ------------------------------------------------------------------------

    mod settings_helper_tests {
        use super::*;

        #[test]
        fn test_apply_run_overrides_clamps() {
            let mut settings = Settings::default();
            let args = RunArgs {
                focus: Some(0),
                long: Some(120),
                ..RunArgs::default()
            };

            apply_run_overrides(&mut settings, &args);

            assert_eq!(settings.focus_minutes, 1);
            assert_eq!(settings.short_minutes, 5);
            assert_eq!(settings.long_minutes, 99);
        }

        #[test]
        fn test_resolve_explicit_path() {
            let path = PathBuf::from("/tmp/studyfocus-test.json");
            assert_eq!(resolve_settings_path(Some(path.clone())).unwrap(), path);
        }

        #[test]
        fn test_load_settings_error_has_hint() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("settings.json");
            std::fs::write(&path, "[]").unwrap();

            let err = load_settings(&path).unwrap_err();
            assert!(err.to_string().contains("修正するか削除"));
        }
    }
}
