//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use kairan_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};

use crate::{
    domain::{InputCommand, build_data_url, guess_mime_type, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::redisplay_prompt,
};

/// Run the WebSocket client session
pub async fn run_client_session(
    url: &str,
    session_id: Option<&str>,
    display_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    // Construct URL with identity as query parameters
    let url = match session_id {
        Some(id) => format!("{}?session_id={}&display_name={}", url, id, display_name),
        None => format!("{}?display_name={}", url, display_name),
    };

    let (ws_stream, response) = match connect_async(&url).await {
        Ok(result) => result,
        Err(e) => {
            // Check if it's an HTTP error response
            let error_msg = e.to_string();

            // Check for HTTP 409 Conflict
            if error_msg.contains("409") || error_msg.contains("Conflict") {
                return Err(Box::new(ClientError::DuplicateSession(
                    session_id.unwrap_or(display_name).to_string(),
                )));
            }

            return Err(Box::new(ClientError::ConnectionError(error_msg)));
        }
    };

    // Check HTTP status code from response
    if response.status().as_u16() == 409 {
        return Err(Box::new(ClientError::DuplicateSession(
            session_id.unwrap_or(display_name).to_string(),
        )));
    }

    tracing::info!("Connected to share server!");
    println!(
        "\nYou are '{}'. Type text to share it, /help for commands, Ctrl+C to exit.\n",
        display_name
    );

    let (mut write, mut read) = ws_stream.split();

    // Clone display_name for read task
    let name_for_read = display_name.to_string();

    // Spawn a task to handle incoming events
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(server_msg) => MessageFormatter::format_server_message(&server_msg),
                        // If parsing fails, display as raw text
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&name_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let name_for_prompt = display_name.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", name_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn user input into share requests
    let name_for_write = display_name.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let command = match parse_input(&line) {
                Ok(command) => command,
                Err(usage) => {
                    println!("{}", usage);
                    redisplay_prompt(&name_for_write);
                    continue;
                }
            };

            let message = match build_client_message(command).await {
                Some(message) => message,
                None => {
                    redisplay_prompt(&name_for_write);
                    continue;
                }
            };

            let json = match serde_json::to_string(&message) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}

/// Turn a parsed input command into the wire message, reading file contents
/// where needed. Returns None when the command was handled locally or the
/// file could not be read.
async fn build_client_message(command: InputCommand) -> Option<ClientMessage> {
    match command {
        InputCommand::ShareText(content) => Some(ClientMessage::ShareText {
            content,
            request_id: None,
        }),
        InputCommand::ShareFile(path) => {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    println!("cannot read '{}': {}", path, e);
                    return None;
                }
            };
            let file_name = std::path::Path::new(&path)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone());
            let mime_type = guess_mime_type(&file_name);

            Some(ClientMessage::ShareFile {
                file_name,
                file_size: bytes.len() as u64,
                file_type: Some(mime_type.to_string()),
                content: build_data_url(mime_type, &bytes),
                request_id: None,
            })
        }
        InputCommand::ClearText => Some(ClientMessage::ClearSharedText),
        InputCommand::ClearFile => Some(ClientMessage::ClearSharedFile),
        InputCommand::Show => Some(ClientMessage::GetCurrentContent),
        InputCommand::Help => {
            println!("{}", MessageFormatter::format_help());
            None
        }
    }
}
