//! Display utilities for the studyfocus CLI.
//!
//! This module provides formatted output for:
//! - The live status line of a session or countdown
//! - Toasts and mode announcements
//! - Settings and error messages

use std::io::{self, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

use crate::settings::Settings;
use crate::types::{format_clock, format_countdown, Mode, SessionProgress};
use crate::workspace::Screen;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats the one-line status of the Pomodoro timer, e.g. `[集中] 24:59 ●○○○ #1`.
    pub fn format_status(seconds_left: u32, mode: Mode, progress: SessionProgress) -> String {
        format!(
            "[{}] {} {} #{}",
            mode.label(),
            format_clock(seconds_left),
            progress.glyphs(),
            progress.ordinal()
        )
    }

    /// Formats the one-line status of a countdown.
    pub fn format_countdown(remaining: u32) -> String {
        format!("[カウントダウン] {}", format_countdown(remaining))
    }

    /// Formats the mode announcement shown after a mode change.
    pub fn format_mode(mode: Mode) -> String {
        format!("> {}モード", mode.label())
    }

    /// Formats settings for `config show`.
    pub fn format_settings(settings: &Settings) -> String {
        let media = if settings.media.enabled {
            "有効"
        } else {
            "無効"
        };
        let sound = if settings.sound_enabled {
            "有効"
        } else {
            "無効"
        };
        let auto_cycle = if settings.auto_cycle {
            "有効"
        } else {
            "無効"
        };

        let mut lines = vec![
            "studyfocus 設定".to_string(),
            "─────────────────────────────".to_string(),
        ];
        for mode in Mode::ALL {
            lines.push(format!("{}: {}分", mode.label(), settings.minutes(mode)));
        }
        lines.push(format!("前回のモード: {}", settings.last_mode.label()));
        lines.push(format!("自動サイクル: {}", auto_cycle));
        lines.push(format!("アラーム: {}", sound));
        lines.push(format!("音楽連携: {}", media));
        if settings.media.enabled {
            lines.push(format!("  再生: {}", settings.media.play_command));
            lines.push(format!("  停止: {}", settings.media.pause_command));
        }
        lines.join("\n")
    }

    /// Shows the current settings.
    pub fn show_settings(settings: &Settings) {
        println!("{}", Self::format_settings(settings));
    }

    /// Shows a success message for a duration change.
    pub fn show_duration_set(mode: Mode, minutes: u32) {
        println!("* {}を{}分に設定しました", mode.label(), minutes);
    }

    /// Shows a success message for restoring default settings.
    pub fn show_reset_success() {
        println!("* 設定を初期値に戻しました");
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("エラー: {}", message);
    }
}

// ============================================================================
// ConsoleScreen
// ============================================================================

/// [`Screen`] that redraws a single status line on stdout.
#[derive(Debug, Default)]
pub struct ConsoleScreen;

impl ConsoleScreen {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Clears the current terminal line and writes `line` in its place.
    ///
    /// With `newline` the line is kept and the cursor moves below it.
    pub fn draw_line<W: Write>(out: &mut W, line: &str, newline: bool) -> io::Result<()> {
        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(line)
        )?;
        if newline {
            queue!(out, Print("\n"))?;
        }
        out.flush()
    }

    fn redraw(&self, line: &str) {
        if let Err(e) = Self::draw_line(&mut io::stdout().lock(), line, false) {
            debug!("failed to redraw status line: {}", e);
        }
    }

    fn print_line(&self, line: &str) {
        if let Err(e) = Self::draw_line(&mut io::stdout().lock(), line, true) {
            debug!("failed to print line: {}", e);
        }
    }
}

impl Screen for ConsoleScreen {
    fn show_tick(&self, seconds_left: u32, mode: Mode, progress: SessionProgress) {
        self.redraw(&Display::format_status(seconds_left, mode, progress));
    }

    fn show_mode(&self, mode: Mode) {
        self.print_line(&Display::format_mode(mode));
    }

    fn show_toast(&self, message: &str) {
        self.print_line(&format!("** {}", message));
    }

    fn show_countdown(&self, remaining: u32) {
        self.redraw(&Display::format_countdown(remaining));
    }
}

// ============================================================================
// Tests
// ============================================================================
