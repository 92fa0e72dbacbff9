//! UseCase: 現在の共有コンテンツ取得処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GetCurrentContentUseCase::execute() メソッド
//! - 両スロットの内容と在席者数の、要求セッションのみへの配送
//!
//! ### なぜこのテストが必要か
//! - 応答が要求セッション以外に配送されないことを保証
//! - 読み取りが FanoutLock の下で行われ、応答が古い内容で後続の
//!   更新を上書きして見えないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：両スロットにコンテンツがある状態での取得
//! - エッジケース：両スロットが空の状態での取得

use std::sync::Arc;

use crate::domain::{
    BoardRepository, MessagePushError, MessagePusher, OutboundEvent, SessionId, SessionRegistry,
};

use super::fanout_lock::FanoutLock;

/// 現在の共有コンテンツ取得のユースケース
pub struct GetCurrentContentUseCase {
    /// Repository（共有スロットの抽象化）
    board: Arc<dyn BoardRepository>,
    /// Session Registry（接続台帳の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（イベント配送の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// 更新とファンアウトの直列化ポイント
    lock: Arc<FanoutLock>,
}

impl GetCurrentContentUseCase {
    /// 新しい GetCurrentContentUseCase を作成
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

    /// 現在の共有コンテンツを要求セッションに配送する
    ///
    /// # Arguments
    ///
    /// * `session_id` - 要求したセッションの ID
    pub async fn execute(&self, session_id: &SessionId) -> Result<(), MessagePushError> {
        // 読み取りと応答の enqueue を更新と直列化する。これにより、
        // 応答が古いスナップショットで後続の更新の後に届くことはない。
        let _guard = self.lock.acquire().await;

        let snapshot = self.board.snapshot().await;
        let connected_users = self.registry.count().await;

        self.message_pusher
            .push_to(
                session_id,
                OutboundEvent::CurrentContent {
                    text: snapshot.text,
                    file: snapshot.file,
                    connected_users,
                },
            )
            .await
    }
}
