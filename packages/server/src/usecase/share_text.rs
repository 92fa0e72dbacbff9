//! UseCase: テキスト共有処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ShareTextUseCase::execute() メソッド
//! - テキスト共有処理（検証、流量制御、スロット置き換え、全員への配送）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：共有は要求者を含む全セッションに配送される
//! - 検証・流量制御の失敗時にスロットが変更されないことを保証
//! - last-write-wins（置き換え）の振る舞いを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：テキスト共有とブロードキャスト
//! - 異常系：空コンテンツ、サイズ超過、流量制御による拒否
//! - エッジケース：境界サイズ（ちょうど 100,000 バイト）

use std::sync::Arc;

use crate::domain::{
    BoardRepository, MessagePusher, OutboundEvent, RateLimiter, Session, SessionRegistry,
    TextContent, TextShare,
};

use super::{error::ShareError, fanout_lock::FanoutLock};

/// テキスト共有のユースケース
///
/// 検証 → 流量制御 → スロット置き換え → 全セッションへのファンアウト、
/// の順で処理する。置き換えとファンアウトは FanoutLock の下で 1 単位と
/// して実行される。
pub struct ShareTextUseCase {
    /// Repository（共有スロットの抽象化）
    board: Arc<dyn BoardRepository>,
    /// Session Registry（接続台帳の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// RateLimiter（流量制御の抽象化）
    rate_limiter: Arc<dyn RateLimiter>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 更新とファンアウトの直列化ポイント
    lock: Arc<FanoutLock>,
}

impl ShareTextUseCase {
    /// 新しい ShareTextUseCase を作成
    pub fn new(
        board: Arc<dyn BoardRepository>,
        registry: Arc<dyn SessionRegistry>,
        rate_limiter: Arc<dyn RateLimiter>,
        message_pusher: Arc<dyn MessagePusher>,
        lock: Arc<FanoutLock>,
    ) -> Self {
        Self {
            board,
            registry,
            rate_limiter,
            message_pusher,
            lock,
        }
    }

    /// テキスト共有を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 共有を要求したセッション
    /// * `content` - 共有するテキスト（未検証の生入力）
    ///
    /// # Returns
    ///
    /// * `Ok(TextShare)` - インストールされたレコード（要求者への ack 用）
    /// * `Err(ShareError)` - 検証失敗または流量制御による拒否
    pub async fn execute(
        &self,
        session: &Session,
        content: String,
    ) -> Result<TextShare, ShareError> {
        // 1. 検証（スロットの状態は変更しない）
        let content = TextContent::new(content)?;

        // 2. 流量制御
        if !self.rate_limiter.allow(&session.id).await {
            tracing::warn!(
                "Rate limit exceeded for session '{}', rejecting share-text",
                session.id.as_str()
            );
            return Err(ShareError::RateLimited);
        }

        // 3. スロット置き換え + ファンアウト（1 単位として直列化）
        let _guard = self.lock.acquire().await;

        let share = self.board.set_text(content, session).await;

        let targets = self.registry.all_session_ids().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, OutboundEvent::TextUpdated(share.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast shared-text-updated: {}", e);
        }

        tracing::info!(
            "Text shared by '{}', replacing previous content",
            session.display_name.as_str()
        );

        Ok(share)
    }
}
