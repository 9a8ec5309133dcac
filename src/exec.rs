//! # Subprocess Execution
//!
//! Thin wrapper around `tokio::process` for the external CLIs this crate
//! drives. Output streams are captured whole and trimmed; the exit code is
//! surfaced so callers can attach command-specific error context.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Captured result of one subprocess invocation.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Run a binary to completion and capture its output.
///
/// Spawning failures (missing binary, permission) are errors; a non-zero exit
/// code is not - callers decide what a failure exit means for their command.
pub async fn exec(binary: &Path, args: &[&str]) -> Result<ExecOutput> {
    debug!("Executing {} {}", binary.display(), args.join(" "));

    let output = Command::new(binary)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("Failed to execute {}", binary.display()))?;

    // Signal-terminated processes have no exit code
    let code = output.status.code().unwrap_or(-1);

    Ok(ExecOutput {
        code,
        stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}
