//! UseCase: 共有クリア処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ClearShareUseCase::execute() メソッド
//! - スロットのクリアと、クリア通知の全員への配送
//!
//! ### なぜこのテストが必要か
//! - クリア通知がクリアしたセッションの表示名を運ぶことを保証
//! - 空スロットのクリアが no-op でも通知は配送されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：コンテンツありのスロットのクリア
//! - エッジケース：既に空のスロットのクリア
//! - スロットの独立性（テキストのクリアはファイルに影響しない）

use std::sync::Arc;

use crate::domain::{
    BoardRepository, MessagePusher, OutboundEvent, Session, SessionRegistry, ShareKind,
};

use super::fanout_lock::FanoutLock;

/// 共有クリアのユースケース
///
/// クリアは検証も流量制御もなく無条件で実行される。既に空のスロットの
/// クリアは no-op だが、クリア通知は配送される。
pub struct ClearShareUseCase {
    /// Repository（共有スロットの抽象化）
    board: Arc<dyn BoardRepository>,
    /// Session Registry（接続台帳の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 更新とファンアウトの直列化ポイント
    lock: Arc<FanoutLock>,
}

impl ClearShareUseCase {
    /// 新しい ClearShareUseCase を作成
    pub fn new(
        board: Arc<dyn BoardRepository>,
        registry: Arc<dyn SessionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        lock: Arc<FanoutLock>,
    ) -> Self {
        Self {
            board,
            registry,
            message_pusher,
            lock,
        }
    }

    /// 共有クリアを実行
    ///
    /// # Arguments
    ///
    /// * `session` - クリアを要求したセッション
    /// * `kind` - クリアするスロットの種別
    ///
    /// # Returns
    ///
    /// クリア前にスロットにコンテンツが存在していたか
    pub async fn execute(&self, session: &Session, kind: ShareKind) -> bool {
        // クリア + ファンアウト（1 単位として直列化）
        let _guard = self.lock.acquire().await;

        let was_present = match kind {
            ShareKind::Text => self.board.clear_text().await,
            ShareKind::File => self.board.clear_file().await,
        };

        let event = match kind {
            ShareKind::Text => OutboundEvent::TextCleared {
                cleared_by: session.display_name.clone(),
            },
            ShareKind::File => OutboundEvent::FileCleared {
                cleared_by: session.display_name.clone(),
            },
        };

        let targets = self.registry.all_session_ids().await;
        if let Err(e) = self.message_pusher.broadcast(targets, event).await {
            tracing::warn!("Failed to broadcast clear notification: {}", e);
        }

        match kind {
            ShareKind::Text => tracing::info!(
                "Shared text cleared by '{}'",
                session.display_name.as_str()
            ),
            ShareKind::File => tracing::info!(
                "Shared file cleared by '{}'",
                session.display_name.as_str()
            ),
        }

        was_present
    }
}
