//! Generative-text backend plumbing.
//!
//! The default backend is the Claude CLI, invoked as a subprocess with the
//! prompt piped via stdin. A custom command can be substituted for users on
//! alternative backends; it receives the prompt on stdin as well.

pub mod diagram;

use std::io::Write;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Claude CLI not found. Install from https://claude.ai/code")]
    ClaudeNotFound,
    #[error("Backend command failed: {0}")]
    CommandFailed(String),
    #[error("Empty response from backend")]
    EmptyResponse,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check if the claude CLI is available
pub fn check_claude_available() -> bool {
    find_claude_executable().is_some()
}

/// Verify the backend is available when not using a custom command.
///
/// When a custom command is provided, Claude CLI is not needed.
/// Otherwise, this returns `ClaudeNotFound` if the CLI cannot be located.
pub(crate) fn ensure_backend_available(custom_command: Option<&str>) -> Result<(), BackendError> {
    if custom_command.is_none() {
        find_claude_executable().ok_or(BackendError::ClaudeNotFound)?;
    }
    Ok(())
}

/// Find the claude executable in PATH
pub(crate) fn find_claude_executable() -> Option<String> {
    // Try common locations
    let candidates = if cfg!(target_os = "windows") {
        vec!["claude.exe", "claude.cmd", "claude.bat"]
    } else {
        vec!["claude"]
    };

    for candidate in candidates {
        // Use `which` on Unix or `where` on Windows
        let which_cmd = if cfg!(target_os = "windows") {
            "where"
        } else {
            "which"
        };

        if let Ok(output) = Command::new(which_cmd).arg(candidate).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_owned();
                if !path.is_empty() {
                    return Some(path);
                }
            }
        }
    }

    // Fallback: check the standard installation path directly.
    // GUI-launched shells get a minimal PATH that excludes ~/.local/bin,
    // so `which` fails even though claude is installed.
    #[cfg(not(target_os = "windows"))]
    if let Some(home) = std::env::var_os("HOME") {
        let fallback = std::path::PathBuf::from(home).join(".local/bin/claude");
        if fallback.is_file() {
            return Some(fallback.to_string_lossy().into_owned());
        }
    }

    None
}

/// Run the backend with the given prompt and model, or use a custom command.
///
/// The prompt is piped via stdin to avoid OS argument length limits
/// (`ARG_MAX` ~1MB on macOS) which bite on long process descriptions.
///
/// # Security Warning
///
/// The `custom_command` parameter allows arbitrary shell command execution.
/// This is intentionally provided to allow users to use alternative AI
/// backends or custom wrappers, but it should only be set through trusted
/// configuration (the config file or the user's own CLI invocation). The
/// command receives the full prompt via stdin, so ensure the command itself
/// is trusted.
pub(crate) fn run_backend(
    prompt: &str,
    model: &str,
    custom_command: Option<&str>,
) -> Result<String, BackendError> {
    // Build the Command differently depending on custom vs default CLI,
    // but share all the spawn/stdin/wait logic below.
    let mut cmd = if let Some(custom) = custom_command {
        let parts: Vec<&str> = custom.split_whitespace().collect();
        if parts.is_empty() {
            return Err(BackendError::CommandFailed(
                "Custom command is empty".to_owned(),
            ));
        }
        let mut c = Command::new(parts[0]);
        c.args(&parts[1..]);
        c
    } else {
        let claude_path = find_claude_executable().ok_or(BackendError::ClaudeNotFound)?;
        let mut c = Command::new(claude_path);
        c.args([
            "--print",
            "--model",
            model,
            "--setting-sources",
            "",
            "--disable-slash-commands",
            "--strict-mcp-config",
        ]);
        c
    };

    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| BackendError::CommandFailed(e.to_string()))?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(prompt.as_bytes()) {
            // A backend that exits without reading stdin shows up here as a
            // broken pipe; let its exit status decide the outcome instead.
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                // Reap the child before bailing so it doesn't linger
                let _ = child.kill();
                let _ = child.wait();
                return Err(BackendError::CommandFailed(format!(
                    "Failed to write prompt to stdin: {e}"
                )));
            }
        }
    }

    let output = child
        .wait_with_output()
        .map_err(|e| BackendError::CommandFailed(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let code = output
            .status
            .code()
            .map(|c| format!("exit code {c}"))
            .unwrap_or_else(|| "killed by signal".to_string());

        let detail = if !stderr.is_empty() {
            stderr
        } else if !stdout.is_empty() {
            stdout
        } else {
            code
        };

        return Err(BackendError::CommandFailed(detail));
    }

    let stderr_str = String::from_utf8_lossy(&output.stderr);
    if !stderr_str.trim().is_empty() {
        log::warn!("[run_backend] stderr (command succeeded): {stderr_str}");
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if stdout.trim().is_empty() {
        return Err(BackendError::EmptyResponse);
    }

    Ok(stdout)
}
