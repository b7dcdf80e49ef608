//! Command execution for media control.
//!
//! This module runs the configured player commands:
//!
//! - Splitting a command line into program and arguments
//! - Asynchronous execution with timeout
//! - Mapping common failures onto [`MediaError`]

use std::io::ErrorKind;
use std::process::Command;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, error};

use super::error::MediaError;

/// Returns true if `program` can be executed, either as a path or via PATH.
#[must_use]
pub fn program_exists(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Returns the program part of a command line.
pub fn program_of(command_line: &str) -> Option<&str> {
    command_line.split_whitespace().next()
}

/// Runs `command_line` with a timeout and returns its trimmed stdout.
///
/// # Errors
///
/// Returns an error if:
/// - The command line is empty (`MediaError::EmptyCommand`)
/// - The program does not exist (`MediaError::CommandNotFound`)
/// - No player is running (`MediaError::NoPlayer`)
/// - Execution times out (`MediaError::ExecutionTimeout`)
/// - Execution fails (`MediaError::ExecutionFailed`)
///
/// The command runs on a blocking thread. When the timeout fires the caller
/// gets `ExecutionTimeout` right away, but the child process is not killed
/// and keeps running until it exits by itself.
pub async fn run_command(command_line: &str, timeout_seconds: u64) -> Result<String, MediaError> {
    debug!("メディアコマンドを実行します: {}", command_line);

    match timeout(
        Duration::from_secs(timeout_seconds),
        execute(command_line.to_string()),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => {
            error!("メディアコマンドがタイムアウトしました: {}", command_line);
            Err(MediaError::ExecutionTimeout(
                command_line.to_string(),
                timeout_seconds,
            ))
        }
    }
}

/// Executes the command in a blocking task to avoid blocking the runtime.
async fn execute(command_line: String) -> Result<String, MediaError> {
    let mut parts = command_line.split_whitespace().map(str::to_string);
    let program = parts.next().ok_or(MediaError::EmptyCommand)?;
    let args: Vec<String> = parts.collect();

    let output = tokio::task::spawn_blocking({
        let program = program.clone();
        move || Command::new(&program).args(&args).output()
    })
    .await
    .map_err(|e| MediaError::Other(format!("タスク実行エラー: {}", e)))?
    .map_err(|e| match e.kind() {
        ErrorKind::NotFound => MediaError::CommandNotFound(program.clone()),
        _ => MediaError::Other(format!("コマンド実行エラー: {}", e)),
    })?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.contains("No players found") || stderr.contains("No player could handle") {
        Err(MediaError::NoPlayer)
    } else {
        Err(MediaError::ExecutionFailed(
            command_line,
            stderr.trim().to_string(),
        ))
    }
}
