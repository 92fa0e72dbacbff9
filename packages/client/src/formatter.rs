//! Event formatting utilities for client display.

use kairan_server::infrastructure::dto::websocket::{FileShareDto, ServerMessage, TextShareDto};
use kairan_shared::time::timestamp_to_rfc3339;

/// Event formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a server event for the terminal
    pub fn format_server_message(message: &ServerMessage) -> String {
        match message {
            ServerMessage::SharedTextUpdated(share) => Self::format_text_share("shared", share),
            ServerMessage::CurrentSharedText(share) => Self::format_text_share("current", share),
            ServerMessage::SharedFileUpdated(share) => Self::format_file_share("shared", share),
            ServerMessage::CurrentSharedFile(share) => Self::format_file_share("current", share),
            ServerMessage::SharedTextCleared { cleared_by } => {
                format!("\n- shared text cleared by @{}\n", cleared_by)
            }
            ServerMessage::SharedFileCleared { cleared_by } => {
                format!("\n- shared file cleared by @{}\n", cleared_by)
            }
            ServerMessage::UserCount { count } => {
                format!("\n* {} user(s) online\n", count)
            }
            ServerMessage::CurrentContent {
                shared_text,
                shared_file,
                connected_users,
            } => Self::format_current_content(
                shared_text.as_ref(),
                shared_file.as_ref(),
                *connected_users,
            ),
            ServerMessage::Ack {
                success,
                share_id,
                error,
                ..
            } => Self::format_ack(*success, share_id.as_deref(), error.as_deref()),
        }
    }

    fn format_text_share(label: &str, share: &TextShareDto) -> String {
        let timestamp_str = timestamp_to_rfc3339(share.timestamp);
        format!(
            "\n\n------------------------------------------------------------\n\
             [{} text] @{}: {}\n\
             shared at {}\n\
             ------------------------------------------------------------\n",
            label, share.user_name, share.content, timestamp_str
        )
    }

    fn format_file_share(label: &str, share: &FileShareDto) -> String {
        let timestamp_str = timestamp_to_rfc3339(share.timestamp);
        format!(
            "\n\n------------------------------------------------------------\n\
             [{} file] @{}: {} ({} bytes, {})\n\
             shared at {}\n\
             ------------------------------------------------------------\n",
            label,
            share.user_name,
            share.file_name,
            share.file_size,
            share.file_type,
            timestamp_str
        )
    }

    fn format_current_content(
        shared_text: Option<&TextShareDto>,
        shared_file: Option<&FileShareDto>,
        connected_users: usize,
    ) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(&format!("Current board ({} online):\n", connected_users));

        match shared_text {
            Some(share) => {
                output.push_str(&format!("text  @{}: {}\n", share.user_name, share.content));
            }
            None => output.push_str("text  (empty)\n"),
        }
        match shared_file {
            Some(share) => {
                output.push_str(&format!(
                    "file  @{}: {} ({} bytes)\n",
                    share.user_name, share.file_name, share.file_size
                ));
            }
            None => output.push_str("file  (empty)\n"),
        }

        output.push_str("============================================================\n");
        output
    }

    fn format_ack(success: bool, share_id: Option<&str>, error: Option<&str>) -> String {
        if success {
            format!("\n+ accepted (share id: {})\n", share_id.unwrap_or("?"))
        } else {
            format!("\n! rejected: {}\n", error.unwrap_or("unknown error"))
        }
    }

    /// Format a raw message that could not be parsed as a server event
    pub fn format_raw_message(text: &str) -> String {
        format!("\n? {}\n", text)
    }

    /// Format the command help text
    pub fn format_help() -> String {
        "\nCommands:\n\
         \x20 <text>            share the text\n\
         \x20 /file <path>      share a file\n\
         \x20 /clear-text       clear the shared text\n\
         \x20 /clear-file       clear the shared file\n\
         \x20 /show             show the current board\n\
         \x20 /help             this help\n"
            .to_string()
    }
}
