//! CLI module for studyfocus.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Line commands typed during a session
//! - `display`: Output formatting and the console screen
//! - `session`: The interactive `run` and `countdown` loops

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

pub use commands::{Cli, Commands, ConfigAction, CountdownArgs, RunArgs};
pub use display::{ConsoleScreen, Display};
pub use input::LineCommand;
pub use session::{run_countdown, run_session};
