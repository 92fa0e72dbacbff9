//! WebSocket connection handlers.
//!
//! Connection Gateway の WebSocket 側。接続の受付・セッション識別・
//! インバウンドメッセージのディスパッチ・ack の相関を担当し、
//! ビジネスロジックはすべて UseCase 層に委譲する。

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use kairan_shared::time::now_timestamp_millis;

use crate::{
    domain::{DisplayName, OutboundEvent, Session, SessionId, ShareKind, Timestamp},
    infrastructure::dto::{conversion::share_error_reason, websocket::ClientMessage},
    ui::state::AppState,
    usecase::ConnectError,
};

/// Query parameters for WebSocket connection
///
/// 接続時の識別情報はクライアント申告をそのまま信頼する（検証なし、
/// 既知の弱点）。省略時はサーバ側で生成する。
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub session_id: Option<String>,
    pub display_name: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Honor the supplied identity when present, generate otherwise
    let session_id = match query.session_id {
        Some(raw) if !raw.is_empty() => match SessionId::new(raw) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("Invalid session_id in connect query: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
        _ => SessionId::generate(),
    };
    let display_name = match query.display_name {
        Some(raw) if !raw.is_empty() => match DisplayName::new(raw) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Invalid display_name in connect query: {}", e);
                return Err(StatusCode::BAD_REQUEST);
            }
        },
        _ => DisplayName::generate(),
    };

    let session = Session::new(
        session_id,
        display_name,
        Timestamp::new(now_timestamp_millis()),
    );

    // Create a channel for this session to receive events
    let (tx, rx) = mpsc::unbounded_channel();

    // Use ConnectSessionUseCase to handle connection: registration,
    // user-count broadcast and the join-time snapshot all happen inside
    match state
        .connect_session_usecase
        .execute(session.clone(), tx)
        .await
    {
        Ok(_count) => {
            tracing::info!(
                "Session '{}' connected and registered",
                session.id.as_str()
            );
            Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session, rx)))
        }
        Err(ConnectError::DuplicateSession(_)) => {
            tracing::warn!(
                "Session with ID '{}' is already connected. Rejecting connection.",
                session.id.as_str()
            );
            Err(StatusCode::CONFLICT)
        }
    }
}

/// Spawns a task that receives events from the rx channel and pushes them to
/// the WebSocket sender.
///
/// This function handles the outbound flow: events enqueued for this session
/// (broadcasts, snapshots, acks) are written to its WebSocket connection in
/// enqueue order.
///
/// # Arguments
///
/// * `rx` - Channel receiver for events destined to this session
/// * `sender` - WebSocket sink to send events to this session
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the event to this session
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    session: Session,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    // Spawn a task to deliver enqueued events to this session
    let mut send_task = pusher_loop(rx, sender);

    let session_clone = session.clone();
    let state_clone = state.clone();

    // Spawn a task to receive messages from this session
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            dispatch_client_message(&state_clone, &session_clone, client_msg)
                                .await;
                        }
                        Err(e) => {
                            tracing::warn!("Failed to parse message as JSON: {}", e);
                            let ack = OutboundEvent::ack_err(None, "Invalid request");
                            if let Err(e) = state_clone
                                .message_pusher
                                .push_to(&session_clone.id, ack)
                                .await
                            {
                                tracing::warn!(
                                    "Failed to send ack to '{}': {}",
                                    session_clone.id.as_str(),
                                    e
                                );
                            }
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_clone.id.as_str());
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Use DisconnectSessionUseCase to handle disconnection: unregistration,
    // rate-window purge and user-count broadcast all happen inside
    match state.disconnect_session_usecase.execute(&session.id).await {
        Ok(_count) => {
            tracing::info!(
                "Session '{}' disconnected and removed from registry",
                session.id.as_str()
            );
        }
        Err(e) => {
            tracing::warn!(
                "Failed to disconnect session '{}': {}",
                session.id.as_str(),
                e
            );
        }
    }
}

/// Dispatch a parsed client message to the matching use case and correlate
/// the result back to the requester as an ack where the protocol asks for one
async fn dispatch_client_message(
    state: &Arc<AppState>,
    session: &Session,
    message: ClientMessage,
) {
    match message {
        // share-code is a legacy alias for share-text
        ClientMessage::ShareText {
            content,
            request_id,
        }
        | ClientMessage::ShareCode {
            content,
            request_id,
        } => {
            let ack = match state.share_text_usecase.execute(session, content).await {
                Ok(share) => OutboundEvent::ack_ok(request_id, share.id),
                Err(e) => OutboundEvent::ack_err(request_id, share_error_reason(&e)),
            };
            send_ack(state, session, ack).await;
        }
        ClientMessage::ShareFile {
            file_name,
            file_size,
            file_type,
            content,
            request_id,
        } => {
            let ack = match state
                .share_file_usecase
                .execute(session, file_name, file_size, file_type, content)
                .await
            {
                Ok(share) => OutboundEvent::ack_ok(request_id, share.id),
                Err(e) => OutboundEvent::ack_err(request_id, share_error_reason(&e)),
            };
            send_ack(state, session, ack).await;
        }
        ClientMessage::ClearSharedText => {
            state
                .clear_share_usecase
                .execute(session, ShareKind::Text)
                .await;
        }
        ClientMessage::ClearSharedFile => {
            state
                .clear_share_usecase
                .execute(session, ShareKind::File)
                .await;
        }
        ClientMessage::GetCurrentContent => {
            if let Err(e) = state
                .get_current_content_usecase
                .execute(&session.id)
                .await
            {
                tracing::warn!(
                    "Failed to send current-content to '{}': {}",
                    session.id.as_str(),
                    e
                );
            }
        }
    }
}

async fn send_ack(state: &Arc<AppState>, session: &Session, ack: OutboundEvent) {
    if let Err(e) = state.message_pusher.push_to(&session.id, ack).await {
        tracing::warn!("Failed to send ack to '{}': {}", session.id.as_str(), e);
    }
}
