//! studyfocus - a terminal study-focus workspace
//!
//! This tool helps you stay focused using the Pomodoro Technique:
//! - 25 minutes of focused study
//! - 5 minutes of short break
//! - 15 minutes of long break after every 4 focus sessions

use anyhow::Result;
use clap::{CommandFactory, Parser};

use studyfocus::cli::session::{load_settings, resolve_settings_path, save_settings};
use studyfocus::cli::{run_countdown, run_session, Cli, Commands, ConfigAction, Display};
use studyfocus::Settings;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    // Execute command
    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` raises the level to debug.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => {
            let path = resolve_settings_path(cli.config)?;
            run_session(&args, &path).await?;
        }
        Some(Commands::Countdown(args)) => {
            let path = resolve_settings_path(cli.config)?;
            run_countdown(&args, &path).await?;
        }
        Some(Commands::Config { action }) => {
            let path = resolve_settings_path(cli.config)?;
            execute_config(action, &path)?;
        }
        Some(Commands::Completions { shell }) => {
            generate_completions(shell);
        }
        None => {
            // No command provided, show help
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

/// Executes a `config` subcommand.
fn execute_config(action: ConfigAction, path: &std::path::Path) -> Result<()> {
    match action {
        ConfigAction::Show => {
            Display::show_settings(&load_settings(path)?);
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Set { mode, minutes } => {
            let mut settings = load_settings(path)?;
            let applied = settings.set_minutes(mode, minutes);
            save_settings(&settings, path)?;
            Display::show_duration_set(mode, applied);
        }
        ConfigAction::Reset => {
            save_settings(&Settings::default(), path)?;
            Display::show_reset_success();
        }
    }
    Ok(())
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use studyfocus::Mode;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["studyfocus"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["studyfocus", "run"]);
        assert!(matches!(cli.command, Some(Commands::Run(_))));
    }

    #[test]
    fn test_execute_config_set_clamps_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        execute_config(
            ConfigAction::Set {
                mode: Mode::Focus,
                minutes: 150,
            },
            &path,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.focus_minutes, 99);
    }

    #[test]
    fn test_execute_config_reset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"focus_minutes": 50}"#).unwrap();

        execute_config(ConfigAction::Reset, &path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }
}
