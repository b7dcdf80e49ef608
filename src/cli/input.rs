//! Line commands accepted while a session is running.

use std::str::FromStr;

use crate::types::Mode;

/// One command typed at the session prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCommand {
    Toggle,
    Start,
    Pause,
    Reset,
    SwitchMode(Mode),
    SetDuration { mode: Mode, minutes: u32 },
    Help,
    Quit,
}

impl FromStr for LineCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Toggle);
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "t" | "toggle" => Self::Toggle,
            "s" | "start" => Self::Start,
            "p" | "pause" => Self::Pause,
            "r" | "reset" => Self::Reset,
            "f" | "focus" => Self::SwitchMode(Mode::Focus),
            "short" => Self::SwitchMode(Mode::Short),
            "long" => Self::SwitchMode(Mode::Long),
            "?" | "h" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            "d" | "duration" => {
                let mode: Mode = words
                    .next()
                    .ok_or_else(|| "使い方: d <mode> <minutes>".to_string())?
                    .parse()?;
                let minutes = words
                    .next()
                    .ok_or_else(|| "使い方: d <mode> <minutes>".to_string())?;
                let minutes: u32 = minutes
                    .parse()
                    .map_err(|_| format!("分数が正しくありません: {}", minutes))?;
                Self::SetDuration { mode, minutes }
            }
            other => return Err(format!("不明なコマンドです: {} (? でヘルプ)", other)),
        };

        if words.next().is_some() {
            return Err(format!("余分な引数があります: {}", line.trim()));
        }
        Ok(command)
    }
}

/// Help text listing the line commands.
pub const HELP_TEXT: &str = "\
コマンド:
  Enter / t        開始・一時停止の切り替え
  s / p            開始 / 一時停止
  r                現在のモードをリセット
  f, short, long   モードを切り替え
  d <mode> <分>    モードの時間を設定 (1-99分)
  ?                このヘルプ
  q                終了";
