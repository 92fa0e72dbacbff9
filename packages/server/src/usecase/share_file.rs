//! UseCase: ファイル共有処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ShareFileUseCase::execute() メソッド
//! - ファイル共有処理（検証、流量制御、スロット置き換え、全員への配送）
//!
//! ### なぜこのテストが必要か
//! - ファイル名なし・ペイロードなしの入力が拒否されることを保証
//! - ペイロードのサイズ上限（10,000,000 バイト）の境界を確認
//! - テキストスロットとの独立性を確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ファイル共有とブロードキャスト
//! - 異常系：名前なし、サイズ超過、流量制御による拒否
//! - エッジケース：MIME タイプ未指定（octet-stream へのフォールバック）

use std::sync::Arc;

use crate::domain::{
    BoardRepository, FileName, FilePayload, FileShare, FileShareInput, MessagePusher, MimeType,
    OutboundEvent, RateLimiter, Session, SessionRegistry,
};

use super::{error::ShareError, fanout_lock::FanoutLock};

/// ファイル共有のユースケース
pub struct ShareFileUseCase {
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

impl ShareFileUseCase {
    /// 新しい ShareFileUseCase を作成
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

    /// ファイル共有を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 共有を要求したセッション
    /// * `file_name` - ファイル名（未検証の生入力）
    /// * `file_size` - クライアント申告の元ファイルサイズ（メタデータ）
    /// * `file_type` - MIME タイプ（未指定なら octet-stream）
    /// * `content` - エンコード済みペイロード（未検証の生入力）
    ///
    /// # Returns
    ///
    /// * `Ok(FileShare)` - インストールされたレコード（要求者への ack 用）
    /// * `Err(ShareError)` - 検証失敗または流量制御による拒否
    pub async fn execute(
        &self,
        session: &Session,
        file_name: String,
        file_size: u64,
        file_type: Option<String>,
        content: String,
    ) -> Result<FileShare, ShareError> {
        // 1. 検証（スロットの状態は変更しない）
        let input = FileShareInput {
            file_name: FileName::new(file_name)?,
            file_size,
            mime_type: MimeType::from_or_default(file_type),
            payload: FilePayload::new(content)?,
        };

        // 2. 流量制御
        if !self.rate_limiter.allow(&session.id).await {
            tracing::warn!(
                "Rate limit exceeded for session '{}', rejecting share-file",
                session.id.as_str()
            );
            return Err(ShareError::RateLimited);
        }

        // 3. スロット置き換え + ファンアウト（1 単位として直列化）
        let _guard = self.lock.acquire().await;

        let share = self.board.set_file(input, session).await;

        let targets = self.registry.all_session_ids().await;
        if let Err(e) = self
            .message_pusher
            .broadcast(targets, OutboundEvent::FileUpdated(share.clone()))
            .await
        {
            tracing::warn!("Failed to broadcast shared-file-updated: {}", e);
        }

        tracing::info!(
            "File shared by '{}': {}, replacing previous file",
            session.display_name.as_str(),
            share.file_name.as_str()
        );

        Ok(share)
    }
}
