//! Integration tests driving the realtime share server over real
//! WebSocket connections.
//!
//! Each test binds an ephemeral port, serves the router in-process and
//! connects clients with tokio-tungstenite.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use kairan_server::{
    domain::Board,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        rate_limit::SlidingWindowRateLimiter,
        repository::{InMemoryBoardRepository, InMemorySessionRegistry},
    },
    ui::Server,
    usecase::{
        ClearShareUseCase, ConnectSessionUseCase, DisconnectSessionUseCase, FanoutLock,
        GetBoardStatusUseCase, GetCurrentContentUseCase, ShareFileUseCase, ShareTextUseCase,
    },
};
use kairan_shared::time::{Clock, SystemClock};

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Wire up a full server the same way the binary does and serve it on an
/// ephemeral port. Returns the bound address.
async fn spawn_server() -> String {
    let board = Arc::new(Mutex::new(Board::new()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let board_repository = Arc::new(InMemoryBoardRepository::new(board, clock.clone()));
    let session_registry = Arc::new(InMemorySessionRegistry::new());
    let content_rate_limiter = Arc::new(SlidingWindowRateLimiter::new(clock.clone()));
    let http_rate_limiter = Arc::new(SlidingWindowRateLimiter::with_limits(
        clock.clone(),
        100,
        60_000,
    ));
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let fanout_lock = Arc::new(FanoutLock::new());

    let server = Server::new(
        Arc::new(ConnectSessionUseCase::new(
            session_registry.clone(),
            board_repository.clone(),
            message_pusher.clone(),
            fanout_lock.clone(),
        )),
        Arc::new(DisconnectSessionUseCase::new(
            session_registry.clone(),
            content_rate_limiter.clone(),
            message_pusher.clone(),
            fanout_lock.clone(),
        )),
        Arc::new(ShareTextUseCase::new(
            board_repository.clone(),
            session_registry.clone(),
            content_rate_limiter.clone(),
            message_pusher.clone(),
            fanout_lock.clone(),
        )),
        Arc::new(ShareFileUseCase::new(
            board_repository.clone(),
            session_registry.clone(),
            content_rate_limiter.clone(),
            message_pusher.clone(),
            fanout_lock.clone(),
        )),
        Arc::new(ClearShareUseCase::new(
            board_repository.clone(),
            session_registry.clone(),
            message_pusher.clone(),
            fanout_lock.clone(),
        )),
        Arc::new(GetCurrentContentUseCase::new(
            board_repository.clone(),
            session_registry.clone(),
            message_pusher.clone(),
            fanout_lock.clone(),
        )),
        Arc::new(GetBoardStatusUseCase::new(
            board_repository.clone(),
            session_registry.clone(),
        )),
        message_pusher,
        http_rate_limiter,
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = server.into_router();

    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    format!("127.0.0.1:{}", addr.port())
}

async fn connect_client(addr: &str, session_id: &str, display_name: &str) -> WsClient {
    let url = format!(
        "ws://{}/ws?session_id={}&display_name={}",
        addr, session_id, display_name
    );
    let (stream, _response) = connect_async(&url).await.expect("failed to connect");
    stream
}

async fn send_json(client: &mut WsClient, value: Value) {
    client
        .send(Message::Text(value.to_string().into()))
        .await
        .expect("failed to send");
}

/// Receive the next text frame as JSON, skipping non-text frames.
async fn recv_json(client: &mut WsClient) -> Value {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for message")
            .expect("connection closed")
            .expect("websocket error");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("invalid JSON from server");
        }
    }
}

#[tokio::test]
async fn test_share_replace_clear_scenario() {
    // A shares "hello", B shares "world" (replace), A clears. Every session
    // observes every step with correct owner attribution.
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    let count = recv_json(&mut alice).await;
    assert_eq!(count["event"], "user-count");
    assert_eq!(count["count"], 1);

    let mut bob = connect_client(&addr, "bob", "Bob").await;
    assert_eq!(recv_json(&mut bob).await["count"], 2);
    assert_eq!(recv_json(&mut alice).await["count"], 2);

    // A shares "hello"
    send_json(
        &mut alice,
        json!({"event": "share-text", "content": "hello", "requestId": "req-1"}),
    )
    .await;

    // Everyone (including A) sees the update; A additionally gets the ack
    // after the broadcast
    let update = recv_json(&mut alice).await;
    assert_eq!(update["event"], "shared-text-updated");
    assert_eq!(update["content"], "hello");
    assert_eq!(update["userName"], "Alice");
    let share_id = update["id"].as_str().unwrap().to_string();

    let ack = recv_json(&mut alice).await;
    assert_eq!(ack["event"], "ack");
    assert_eq!(ack["success"], true);
    assert_eq!(ack["requestId"], "req-1");
    assert_eq!(ack["shareId"], share_id.as_str());

    let update = recv_json(&mut bob).await;
    assert_eq!(update["content"], "hello");

    // B shares "world", replacing A's share
    send_json(&mut bob, json!({"event": "share-text", "content": "world"})).await;

    let update = recv_json(&mut alice).await;
    assert_eq!(update["content"], "world");
    assert_eq!(update["userName"], "Bob");

    let update = recv_json(&mut bob).await;
    assert_eq!(update["content"], "world");
    let ack = recv_json(&mut bob).await;
    assert_eq!(ack["success"], true);

    // A clears the text slot
    send_json(&mut alice, json!({"event": "clear-shared-text"})).await;

    let cleared = recv_json(&mut alice).await;
    assert_eq!(cleared["event"], "shared-text-cleared");
    assert_eq!(cleared["clearedBy"], "Alice");
    let cleared = recv_json(&mut bob).await;
    assert_eq!(cleared["clearedBy"], "Alice");
}

#[tokio::test]
async fn test_join_after_shares_receives_snapshot_before_broadcasts() {
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    recv_json(&mut alice).await; // user-count 1

    // Alice shares text and file
    send_json(&mut alice, json!({"event": "share-text", "content": "hello"})).await;
    recv_json(&mut alice).await; // shared-text-updated
    recv_json(&mut alice).await; // ack
    send_json(
        &mut alice,
        json!({
            "event": "share-file",
            "fileName": "notes.txt",
            "fileSize": 5,
            "fileType": "text/plain",
            "content": "data:text/plain;base64,aGVsbG8="
        }),
    )
    .await;
    recv_json(&mut alice).await; // shared-file-updated
    recv_json(&mut alice).await; // ack

    // Bob joins after both shares exist
    let mut bob = connect_client(&addr, "bob", "Bob").await;

    let first = recv_json(&mut bob).await;
    assert_eq!(first["event"], "user-count");
    assert_eq!(first["count"], 2);

    let second = recv_json(&mut bob).await;
    assert_eq!(second["event"], "current-shared-text");
    assert_eq!(second["content"], "hello");
    assert_eq!(second["userName"], "Alice");

    let third = recv_json(&mut bob).await;
    assert_eq!(third["event"], "current-shared-file");
    assert_eq!(third["fileName"], "notes.txt");
    assert_eq!(third["fileType"], "text/plain");
}

#[tokio::test]
async fn test_validation_rejection_reaches_requester_only() {
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    recv_json(&mut alice).await;
    let mut bob = connect_client(&addr, "bob", "Bob").await;
    recv_json(&mut bob).await;
    recv_json(&mut alice).await; // user-count 2

    // Alice sends an invalid (empty) share
    send_json(
        &mut alice,
        json!({"event": "share-text", "content": "", "requestId": "bad-1"}),
    )
    .await;

    let ack = recv_json(&mut alice).await;
    assert_eq!(ack["event"], "ack");
    assert_eq!(ack["success"], false);
    assert_eq!(ack["error"], "Invalid text content");
    assert_eq!(ack["requestId"], "bad-1");

    // Alice then sends a valid share; the very next event Bob sees is that
    // share, proving the rejected request produced no fan-out
    send_json(&mut alice, json!({"event": "share-text", "content": "ok"})).await;
    let update = recv_json(&mut bob).await;
    assert_eq!(update["event"], "shared-text-updated");
    assert_eq!(update["content"], "ok");
}

#[tokio::test]
async fn test_legacy_share_code_event_is_accepted() {
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    recv_json(&mut alice).await;

    send_json(
        &mut alice,
        json!({"event": "share-code", "content": "fn main() {}"}),
    )
    .await;

    let update = recv_json(&mut alice).await;
    assert_eq!(update["event"], "shared-text-updated");
    assert_eq!(update["content"], "fn main() {}");
    let ack = recv_json(&mut alice).await;
    assert_eq!(ack["success"], true);
}

#[tokio::test]
async fn test_get_current_content_returns_both_slots() {
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    recv_json(&mut alice).await;

    send_json(&mut alice, json!({"event": "share-text", "content": "hello"})).await;
    recv_json(&mut alice).await; // shared-text-updated
    recv_json(&mut alice).await; // ack

    send_json(&mut alice, json!({"event": "get-current-content"})).await;

    let content = recv_json(&mut alice).await;
    assert_eq!(content["event"], "current-content");
    assert_eq!(content["sharedText"]["content"], "hello");
    assert_eq!(content["sharedFile"], Value::Null);
    assert_eq!(content["connectedUsers"], 1);
}

#[tokio::test]
async fn test_duplicate_session_id_is_rejected() {
    let addr = spawn_server().await;

    let _alice = connect_client(&addr, "alice", "Alice").await;

    let url = format!("ws://{}/ws?session_id=alice&display_name=Imposter", addr);
    let result = connect_async(&url).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_user_count_updates_on_disconnect() {
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    recv_json(&mut alice).await; // 1
    let mut bob = connect_client(&addr, "bob", "Bob").await;
    recv_json(&mut bob).await; // 2
    assert_eq!(recv_json(&mut alice).await["count"], 2);

    bob.close(None).await.unwrap();

    let count = recv_json(&mut alice).await;
    assert_eq!(count["event"], "user-count");
    assert_eq!(count["count"], 1);
}

#[tokio::test]
async fn test_unparseable_frame_gets_failure_ack() {
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    recv_json(&mut alice).await;

    alice
        .send(Message::Text("this is not json".into()))
        .await
        .unwrap();

    let ack = recv_json(&mut alice).await;
    assert_eq!(ack["event"], "ack");
    assert_eq!(ack["success"], false);
    assert_eq!(ack["error"], "Invalid request");
}

#[tokio::test]
async fn test_health_and_stats_endpoints() {
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    recv_json(&mut alice).await;
    send_json(&mut alice, json!({"event": "share-text", "content": "hello"})).await;
    recv_json(&mut alice).await;
    recv_json(&mut alice).await;

    let health: Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "OK");
    assert_eq!(health["connectedUsers"], 1);
    assert_eq!(health["hasSharedText"], true);
    assert_eq!(health["hasSharedFile"], false);
    assert!(health["uptime"].as_f64().unwrap() >= 0.0);

    let stats: Value = reqwest::get(format!("http://{}/api/stats", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["connectedUsers"], 1);
    assert_eq!(stats["currentSharedText"]["userName"], "Alice");
    assert_eq!(stats["currentSharedText"]["contentLength"], 5);
    assert_eq!(stats["currentSharedFile"], Value::Null);
}

#[tokio::test]
async fn test_concurrent_shares_observed_in_single_order() {
    // Two sessions submit shares concurrently; every session must observe
    // the same winner order, and the last update each session sees must be
    // the slot's final content.
    let addr = spawn_server().await;

    let mut alice = connect_client(&addr, "alice", "Alice").await;
    recv_json(&mut alice).await;
    let mut bob = connect_client(&addr, "bob", "Bob").await;
    recv_json(&mut bob).await;
    recv_json(&mut alice).await;

    // Fire both shares without awaiting responses in between
    send_json(&mut alice, json!({"event": "share-text", "content": "from-alice"})).await;
    send_json(&mut bob, json!({"event": "share-text", "content": "from-bob"})).await;

    // Each session sees two updates (plus its own ack); collect the update
    // contents in arrival order
    let mut alice_updates = Vec::new();
    let mut bob_updates = Vec::new();
    while alice_updates.len() < 2 {
        let msg = recv_json(&mut alice).await;
        if msg["event"] == "shared-text-updated" {
            alice_updates.push(msg["content"].as_str().unwrap().to_string());
        }
    }
    while bob_updates.len() < 2 {
        let msg = recv_json(&mut bob).await;
        if msg["event"] == "shared-text-updated" {
            bob_updates.push(msg["content"].as_str().unwrap().to_string());
        }
    }

    // Single consistent order across sessions
    assert_eq!(alice_updates, bob_updates);

    // The observed winner matches the slot content reported by the server
    let stats: Value = reqwest::get(format!("http://{}/api/stats", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let winner_length = stats["currentSharedText"]["contentLength"].as_u64().unwrap();
    assert_eq!(winner_length, alice_updates[1].len() as u64);
}
