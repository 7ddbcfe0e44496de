/*!
 * Clipboard support for packfs
 *
 * Copies the aggregated document to the system clipboard, preferring the
 * native clipboard with a fallback to platform copy commands for headless
 * or otherwise restricted environments.
 */

use std::io::{self, Write};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute a fallback command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No clipboard mechanism worked
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Copy text to the system clipboard
///
/// Tries the native clipboard first and falls back to piping the text into
/// platform copy commands, so the document still lands somewhere useful
/// over SSH or inside containers.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(text.to_owned()).is_ok() {
                return Ok(());
            }
            debug!("native clipboard rejected the text, trying fallback commands");
        }
        Err(e) => debug!(error = %e, "native clipboard unavailable, trying fallback commands"),
    }

    for command in fallback_commands() {
        match pipe_to_command(command, text) {
            Ok(()) => return Ok(()),
            Err(e) => debug!(command = command[0], error = %e, "clipboard fallback failed"),
        }
    }

    Err(ClipboardError::NoClipboardFound)
}

/// Pipe text into one fallback command
fn pipe_to_command(command: &[&str], text: &str) -> Result<()> {
    let (program, args) = match command.split_first() {
        Some(split) => split,
        None => return Err(ClipboardError::CommandFailed("empty command".to_string())),
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            ClipboardError::CommandFailed(format!("failed to spawn {}: {}", program, e))
        })?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(ClipboardError::CommandFailed(format!(
            "{} exited with status {}",
            program, status
        )))
    }
}

#[cfg(target_os = "macos")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbcopy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![
        &["wl-copy"],
        &["xclip", "-selection", "clipboard", "-in"],
        &["xsel", "-b", "-i"],
    ]
}

#[cfg(target_os = "windows")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["clip.exe"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}
