//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - ドメインイベントをワイヤ形式（JSON）へ変換して送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、イベント送信に
//! 使用します。これにより「WebSocket の生成」と「イベントの送信」が
//! 分離されます：
//! - UI 層: WebSocket 接続の受付、sender の生成
//! - Infrastructure 層: sender の管理、イベントのシリアライズと送信

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, OutboundEvent, PusherChannel, SessionId};
use crate::infrastructure::dto::websocket::ServerMessage;

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `sessions`: 接続中のセッションと対応する WebSocket sender のマップ
pub struct WebSocketMessagePusher {
    /// 接続中のセッションの WebSocket sender
    ///
    /// Key: session_id (String)
    /// Value: PusherChannel
    sessions: Mutex<HashMap<String, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// ドメインイベントをワイヤ形式の JSON にシリアライズ
    fn serialize(event: OutboundEvent) -> Result<String, MessagePushError> {
        serde_json::to_string(&ServerMessage::from(event))
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id.as_str().to_string(), sender);
        tracing::debug!("Session '{}' registered to MessagePusher", session_id.as_str());
    }

    async fn unregister_session(&self, session_id: &SessionId) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id.as_str());
        tracing::debug!(
            "Session '{}' unregistered from MessagePusher",
            session_id.as_str()
        );
    }

    async fn push_to(
        &self,
        session_id: &SessionId,
        event: OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let payload = Self::serialize(event)?;
        let sessions = self.sessions.lock().await;

        if let Some(sender) = sessions.get(session_id.as_str()) {
            sender
                .send(payload)
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed event to session '{}'", session_id.as_str());
            Ok(())
        } else {
            Err(MessagePushError::SessionNotFound(
                session_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        event: OutboundEvent,
    ) -> Result<(), MessagePushError> {
        let payload = Self::serialize(event)?;
        let sessions = self.sessions.lock().await;

        for target in targets {
            if let Some(sender) = sessions.get(target.as_str()) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(payload.clone()) {
                    tracing::warn!(
                        "Failed to push event to session '{}': {}",
                        target.as_str(),
                        e
                    );
                } else {
                    tracing::debug!("Broadcasted event to session '{}'", target.as_str());
                }
            } else {
                tracing::warn!(
                    "Session '{}' not found during broadcast, skipping",
                    target.as_str()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher の基本的なイベント送信機能
    // - push_to: 特定のセッションへの送信
    // - broadcast: 複数セッションへの送信
    // - ドメインイベントのワイヤ形式へのシリアライズ
    // - エラーハンドリング（存在しないセッション）
    //
    // 【なぜこのテストが必要か】
    // - MessagePusher は UseCase から呼ばれる通信層の中核
    // - イベントが正しいワイヤ形式で送信されることを保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース（JSON 形式の検証を含む）
    // 2. push_to の失敗ケース（セッションが存在しない）
    // 3. broadcast の成功ケース（複数セッション）
    // 4. broadcast の部分失敗ケース（一部のセッションが存在しない）
    // ========================================

    fn session_id(value: &str) -> SessionId {
        SessionId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のセッションにイベントを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let alice = session_id("alice");
        pusher.register_session(alice.clone(), tx).await;

        // when (操作):
        let result = pusher.push_to(&alice, OutboundEvent::UserCount(1)).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let received = rx.recv().await.unwrap();
        assert!(received.contains(r#""event":"user-count""#));
        assert!(received.contains(r#""count":1"#));
    }

    #[tokio::test]
    async fn test_push_to_session_not_found() {
        // テスト項目: 存在しないセッションへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let nonexistent = session_id("nonexistent");

        // when (操作):
        let result = pusher
            .push_to(&nonexistent, OutboundEvent::UserCount(1))
            .await;

        // then (期待する結果):
        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            MessagePushError::SessionNotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数のセッションにイベントをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = session_id("alice");
        let bob = session_id("bob");
        pusher.register_session(alice.clone(), tx1).await;
        pusher.register_session(bob.clone(), tx2).await;

        // when (操作):
        let targets = vec![alice, bob];
        let result = pusher.broadcast(targets, OutboundEvent::UserCount(2)).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let msg1 = rx1.recv().await.unwrap();
        let msg2 = rx2.recv().await.unwrap();
        assert_eq!(msg1, msg2);
        assert!(msg1.contains(r#""count":2"#));
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: ブロードキャスト時、一部のセッションが存在しなくても成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let alice = session_id("alice");
        let nonexistent = session_id("nonexistent");
        pusher.register_session(alice.clone(), tx1).await;

        // when (操作):
        let targets = vec![alice, nonexistent];
        let result = pusher.broadcast(targets, OutboundEvent::UserCount(1)).await;

        // then (期待する結果):
        assert!(result.is_ok()); // ブロードキャストは部分失敗を許容
        assert!(rx1.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.broadcast(vec![], OutboundEvent::UserCount(0)).await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unregister_stops_delivery() {
        // テスト項目: 登録解除したセッションには送信されない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let alice = session_id("alice");
        pusher.register_session(alice.clone(), tx).await;

        // when (操作):
        pusher.unregister_session(&alice).await;
        let result = pusher.push_to(&alice, OutboundEvent::UserCount(0)).await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(MessagePushError::SessionNotFound(_))
        ));
    }
}
