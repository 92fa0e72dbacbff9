//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - セッションの切断処理（台帳からの削除、流量制御ウィンドウの破棄、
//!   在席者数ブロードキャスト）
//!
//! ### なぜこのテストが必要か
//! - 切断時に流量制御ウィンドウが破棄されることを保証（リーク防止）
//! - 残りのセッションに正しい在席者数が配送されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：セッションの切断と通知
//! - エッジケース：最後のセッションの切断（通知対象なし）
//! - 異常系：存在しないセッションの切断試行

use std::sync::Arc;

use crate::domain::{MessagePusher, OutboundEvent, RateLimiter, SessionId, SessionRegistry};

use super::{error::DisconnectError, fanout_lock::FanoutLock};

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Session Registry（接続台帳の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// RateLimiter（流量制御の抽象化）
    rate_limiter: Arc<dyn RateLimiter>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 更新とファンアウトの直列化ポイント
    lock: Arc<FanoutLock>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        rate_limiter: Arc<dyn RateLimiter>,
        message_pusher: Arc<dyn MessagePusher>,
        lock: Arc<FanoutLock>,
    ) -> Self {
        Self {
            registry,
            rate_limiter,
            message_pusher,
            lock,
        }
    }

    /// セッション切断を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 切断するセッションの ID
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 切断成功（削除完了後の在席者数を返す）
    /// * `Err(DisconnectError)` - セッションが接続していない
    pub async fn execute(&self, session_id: &SessionId) -> Result<usize, DisconnectError> {
        let _guard = self.lock.acquire().await;

        // 1. 台帳から削除
        let session = self.registry.unregister(session_id).await.ok_or_else(|| {
            DisconnectError::SessionNotFound(session_id.as_str().to_string())
        })?;

        // 2. MessagePusher から登録解除
        self.message_pusher.unregister_session(session_id).await;

        // 3. 流量制御ウィンドウを破棄（再接続時のリークを防ぐ）
        self.rate_limiter.forget(session_id).await;

        // 4. 残りの全セッションに在席者数をブロードキャスト
        let count = self.registry.count().await;
        let targets = self.registry.all_session_ids().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, OutboundEvent::UserCount(count))
            .await
        {
            tracing::warn!("Failed to broadcast user-count: {}", e);
        }

        tracing::info!(
            "Session '{}' ({}) left. Total sessions: {}",
            session.id.as_str(),
            session.display_name.as_str(),
            count
        );

        Ok(count)
    }
}
