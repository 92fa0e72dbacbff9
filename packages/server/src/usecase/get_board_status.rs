//! UseCase: サーバ状態取得処理
//!
//! HTTP の読み取り専用サーフェス（/health, /api/stats）のための
//! 状態取得。副作用はない。

use std::sync::Arc;

use crate::domain::{BoardRepository, FileShare, SessionRegistry, TextShare};

/// サーバ状態のスナップショット
///
/// HTTP 層がこの値から /health と /api/stats の応答を組み立てる。
#[derive(Debug, Clone)]
pub struct BoardStatus {
    /// 接続中のセッション数
    pub connected_users: usize,
    /// 現在のテキスト共有（存在する場合）
    pub text: Option<TextShare>,
    /// 現在のファイル共有（存在する場合）
    pub file: Option<FileShare>,
}

/// サーバ状態取得のユースケース
pub struct GetBoardStatusUseCase {
    /// Repository（共有スロットの抽象化）
    board: Arc<dyn BoardRepository>,
    /// Session Registry（接続台帳の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl GetBoardStatusUseCase {
    /// 新しい GetBoardStatusUseCase を作成
    pub fn new(board: Arc<dyn BoardRepository>, registry: Arc<dyn SessionRegistry>) -> Self {
        Self { board, registry }
    }

    /// サーバ状態を取得
    pub async fn execute(&self) -> BoardStatus {
        let snapshot = self.board.snapshot().await;
        let connected_users = self.registry.count().await;

        BoardStatus {
            connected_users,
            text: snapshot.text,
            file: snapshot.file,
        }
    }
}
