//! Command definitions for the studyfocus CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::types::Mode;

// ============================================================================
// CLI Structure
// ============================================================================

/// studyfocus - a terminal study-focus workspace
#[derive(Parser, Debug)]
#[command(
    name = "studyfocus",
    version,
    about = "ターミナルで動く学習用ポモドーロタイマー",
    long_about = "集中・小休憩・長休憩を自動で切り替えるポモドーロタイマー。\n\
                  セッション終了時にアラームを鳴らし、音楽プレイヤーを一時停止・再開します。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run an interactive Pomodoro session
    Run(RunArgs),

    /// Run a one-off countdown with an alarm at zero
    Countdown(CountdownArgs),

    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Settings subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the current settings
    Show,

    /// Print the settings file path
    Path,

    /// Set the duration of a mode in minutes (clamped to 1-99)
    Set {
        /// Mode to change (focus, short, long)
        #[arg(value_parser = parse_mode)]
        mode: Mode,

        /// Duration in minutes
        minutes: u32,
    },

    /// Restore default settings
    Reset,
}

// ============================================================================
// Run Command Arguments
// ============================================================================

/// Arguments for the run command.
///
/// Durations override the saved settings for this session; out-of-range
/// values are clamped to 1-99 minutes.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Focus duration in minutes
    #[arg(short, long)]
    pub focus: Option<u32>,

    /// Short break duration in minutes
    #[arg(short, long)]
    pub short: Option<u32>,

    /// Long break duration in minutes
    #[arg(short, long)]
    pub long: Option<u32>,

    /// Mode to begin in (defaults to the last used mode)
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// Start counting immediately
    #[arg(long)]
    pub start: bool,

    /// Keep running into the next session after one ends
    #[arg(short, long)]
    pub auto_cycle: bool,

    /// Disable the alarm sound
    #[arg(long)]
    pub no_sound: bool,

    /// Do not pause or resume the music player
    #[arg(long)]
    pub no_media: bool,
}

// ============================================================================
// Countdown Command Arguments
// ============================================================================

/// Arguments for the countdown command
#[derive(Args, Debug, Clone, Default)]
pub struct CountdownArgs {
    /// Hours
    #[arg(long, default_value = "0")]
    pub hours: u32,

    /// Minutes
    #[arg(short, long, default_value = "0")]
    pub minutes: u32,

    /// Seconds
    #[arg(short, long, default_value = "0")]
    pub seconds: u32,

    /// Disable the alarm sound
    #[arg(long)]
    pub no_sound: bool,
}

// ============================================================================
// Validation Functions
// ============================================================================

fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ------------------------------------------------------------------------
    // Cli Tests
    // ------------------------------------------------------------------------

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_no_args() {
            let cli = Cli::parse_from(["studyfocus"]);
            assert!(cli.command.is_none());
            assert!(!cli.verbose);
            assert!(cli.config.is_none());
        }

        #[test]
        fn test_parse_verbose_flag() {
            let cli = Cli::parse_from(["studyfocus", "-v", "run"]);
            assert!(cli.verbose);
        }

        #[test]
        fn test_parse_global_config_after_subcommand() {
            let cli = Cli::parse_from(["studyfocus", "config", "show", "--config", "/tmp/s.json"]);
            assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.json")));
            assert!(matches!(
                cli.command,
                Some(Commands::Config {
                    action: ConfigAction::Show
                })
            ));
        }

        #[test]
        fn test_parse_completions_bash() {
            let cli = Cli::parse_from(["studyfocus", "completions", "bash"]);
            match cli.command {
                Some(Commands::Completions { shell }) => {
                    assert_eq!(shell, clap_complete::Shell::Bash);
                }
                _ => panic!("Expected Completions command"),
            }
        }
    }

    // ------------------------------------------------------------------------
    // Run Command Tests
    // ------------------------------------------------------------------------

    mod run_args_tests {
        use super::*;

        #[test]
        fn test_parse_run_defaults() {
            let cli = Cli::parse_from(["studyfocus", "run"]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert!(args.focus.is_none());
                    assert!(args.short.is_none());
                    assert!(args.long.is_none());
                    assert!(args.mode.is_none());
                    assert!(!args.start);
                    assert!(!args.auto_cycle);
                    assert!(!args.no_sound);
                    assert!(!args.no_media);
                }
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_all_options() {
            let cli = Cli::parse_from([
                "studyfocus",
                "run",
                "-f",
                "50",
                "--short",
                "10",
                "-l",
                "30",
                "--mode",
                "short",
                "--start",
                "--auto-cycle",
                "--no-sound",
                "--no-media",
            ]);
            match cli.command {
                Some(Commands::Run(args)) => {
                    assert_eq!(args.focus, Some(50));
                    assert_eq!(args.short, Some(10));
                    assert_eq!(args.long, Some(30));
                    assert_eq!(args.mode, Some(Mode::Short));
                    assert!(args.start);
                    assert!(args.auto_cycle);
                    assert!(args.no_sound);
                    assert!(args.no_media);
                }
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_out_of_range_is_accepted() {
            let cli = Cli::parse_from(["studyfocus", "run", "--focus", "500"]);
            match cli.command {
                Some(Commands::Run(args)) => assert_eq!(args.focus, Some(500)),
                _ => panic!("Expected Run command"),
            }
        }

        #[test]
        fn test_parse_run_invalid_mode() {
            let result = Cli::try_parse_from(["studyfocus", "run", "--mode", "nap"]);
            assert!(result.is_err());
        }
    }

    // ------------------------------------------------------------------------
    // Countdown / Config Tests
    // ------------------------------------------------------------------------

    mod other_command_tests {
        use super::*;

        #[test]
        fn test_parse_countdown() {
            let cli = Cli::parse_from(["studyfocus", "countdown", "--hours", "1", "-m", "30"]);
            match cli.command {
                Some(Commands::Countdown(args)) => {
                    assert_eq!(args.hours, 1);
                    assert_eq!(args.minutes, 30);
                    assert_eq!(args.seconds, 0);
                    assert!(!args.no_sound);
                }
                _ => panic!("Expected Countdown command"),
            }
        }

        #[test]
        fn test_parse_config_set() {
            let cli = Cli::parse_from(["studyfocus", "config", "set", "long", "20"]);
            match cli.command {
                Some(Commands::Config { action }) => {
                    assert_eq!(
                        action,
                        ConfigAction::Set {
                            mode: Mode::Long,
                            minutes: 20
                        }
                    );
                }
                _ => panic!("Expected Config command"),
            }
        }

        #[test]
        fn test_config_show_help_describes_text_output() {
            use clap::CommandFactory;

            let cli = Cli::command();
            let show = cli
                .find_subcommand("config")
                .and_then(|config| config.find_subcommand("show"))
                .unwrap();
            let about = show.get_about().unwrap().to_string();
            assert_eq!(about, "Print the current settings");
            assert!(!about.contains("JSON"));
        }

        #[test]
        fn test_parse_config_requires_action() {
            assert!(Cli::try_parse_from(["studyfocus", "config"]).is_err());
        }
    }
}
