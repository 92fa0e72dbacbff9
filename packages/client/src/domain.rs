//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement client-side decisions
//! without side effects, making them easy to test.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::error::ClientError;

/// A parsed line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Share the given text (default for non-command lines)
    ShareText(String),
    /// Share the file at the given path
    ShareFile(String),
    /// Empty the shared text slot
    ClearText,
    /// Empty the shared file slot
    ClearFile,
    /// Request the current contents of both slots
    Show,
    /// Print command help
    Help,
}

/// Parse a line of user input into a command.
///
/// Lines starting with `/` are commands; everything else is shared as text.
///
/// # Arguments
///
/// * `line` - The trimmed input line (must not be empty)
pub fn parse_input(line: &str) -> Result<InputCommand, String> {
    if !line.starts_with('/') {
        return Ok(InputCommand::ShareText(line.to_string()));
    }

    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "/file" => {
            if rest.is_empty() {
                Err("usage: /file <path>".to_string())
            } else {
                Ok(InputCommand::ShareFile(rest.to_string()))
            }
        }
        "/clear-text" => Ok(InputCommand::ClearText),
        "/clear-file" => Ok(InputCommand::ClearFile),
        "/show" => Ok(InputCommand::Show),
        "/help" => Ok(InputCommand::Help),
        _ => Err(format!("unknown command '{}' (try /help)", command)),
    }
}

/// Guess a MIME type from a file name extension.
///
/// Only the handful of types the share UI cares about; everything else is
/// `application/octet-stream`.
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let extension = file_name.rsplit_once('.').map(|(_, ext)| ext);
    match extension {
        Some("txt") | Some("log") => "text/plain",
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

/// Encode file bytes as a base64 data URL, the payload format the share
/// protocol carries for files.
pub fn build_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if the error requires immediate exit (e.g., DuplicateSession),
/// `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::DuplicateSession(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}
