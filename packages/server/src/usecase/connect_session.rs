//! UseCase: セッション接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectSessionUseCase::execute() メソッド
//! - セッションの接続処理（重複チェック、在席者数ブロードキャスト、
//!   参加時スナップショットの配送）
//!
//! ### なぜこのテストが必要か
//! - 重複接続を防ぐことを保証
//! - 参加直後のセッションが現在の共有を「1 回だけ、後続のブロード
//!   キャストより先に」受け取ることを確認
//! - 在席者数が register 完了直後の count と一致することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規セッションの接続
//! - 異常系：重複した session id での接続試行
//! - エッジケース：共有が存在しない状態での接続（スナップショットなし）

use std::sync::Arc;

use crate::domain::{
    BoardRepository, MessagePusher, OutboundEvent, PusherChannel, RegistryError, Session,
    SessionRegistry,
};

use super::{error::ConnectError, fanout_lock::FanoutLock};

/// セッション接続のユースケース
///
/// 登録 → 在席者数ブロードキャスト → 参加時スナップショットの
/// point-to-point 配送、の順で処理する。全体が FanoutLock の下で
/// 実行されるため、スナップショットは必ず後続のブロードキャストより
/// 先に enqueue される。
pub struct ConnectSessionUseCase {
    /// Session Registry（接続台帳の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Repository（共有スロットの抽象化）
    board: Arc<dyn BoardRepository>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 更新とファンアウトの直列化ポイント
    lock: Arc<FanoutLock>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        board: Arc<dyn BoardRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        lock: Arc<FanoutLock>,
    ) -> Self {
        Self {
            registry,
            board,
            message_pusher,
            lock,
        }
    }

    /// セッション接続を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 接続するセッション
    /// * `sender` - このセッションへのイベント送信用チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - 接続成功（登録完了後の在席者数を返す）
    /// * `Err(ConnectError)` - 接続失敗（session id の重複）
    pub async fn execute(
        &self,
        session: Session,
        sender: PusherChannel,
    ) -> Result<usize, ConnectError> {
        let _guard = self.lock.acquire().await;

        // 1. 台帳に登録（重複チェックを含む）
        self.registry
            .register(session.clone())
            .await
            .map_err(|RegistryError::DuplicateSession(id)| ConnectError::DuplicateSession(id))?;

        // 2. MessagePusher にセッションを登録
        self.message_pusher
            .register_session(session.id.clone(), sender)
            .await;

        // 3. 在席者数を全セッション（新規セッションを含む）にブロードキャスト
        let count = self.registry.count().await;
        let targets = self.registry.all_session_ids().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, OutboundEvent::UserCount(count))
            .await
        {
            tracing::warn!("Failed to broadcast user-count: {}", e);
        }

        // 4. 参加時スナップショット：現在の共有を新規セッションのみに配送
        let snapshot = self.board.snapshot().await;
        if let Some(text) = snapshot.text {
            if let Err(e) = self
                .message_pusher
                .push_to(&session.id, OutboundEvent::CurrentText(text))
                .await
            {
                tracing::warn!(
                    "Failed to push current-shared-text to '{}': {}",
                    session.id.as_str(),
                    e
                );
            }
        }
        if let Some(file) = snapshot.file {
            if let Err(e) = self
                .message_pusher
                .push_to(&session.id, OutboundEvent::CurrentFile(file))
                .await
            {
                tracing::warn!(
                    "Failed to push current-shared-file to '{}': {}",
                    session.id.as_str(),
                    e
                );
            }
        }

        tracing::info!(
            "Session '{}' ({}) joined. Total sessions: {}",
            session.id.as_str(),
            session.display_name.as_str(),
            count
        );

        Ok(count)
    }
}
