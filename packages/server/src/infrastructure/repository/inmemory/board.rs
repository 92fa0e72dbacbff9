//! InMemory Board Repository 実装
//!
//! ドメイン層が定義する BoardRepository trait の具体的な実装。
//! Board ドメインモデルを Mutex で保護し、インメモリ DB として使用します。
//! プロセス再起動で内容は失われます（仕様上の非目標）。
//!
//! レコードの ID とタイムスタンプはこの層で生成します。スロットの
//! 置き換えと返却レコードの組み立ては 1 回のロック区間で行われるため、
//! 呼び出し元に返る ID は必ず実際にインストールされたレコードのものです。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use kairan_shared::time::Clock;

use crate::domain::{
    Board, BoardRepository, BoardSnapshot, FileShare, FileShareInput, Session, ShareId, TextContent,
    TextShare, Timestamp,
};

/// インメモリ Board Repository 実装
///
/// Board ドメインモデルを保持し、ドメイン層の BoardRepository trait を
/// 実装します（依存性の逆転）。
pub struct InMemoryBoardRepository {
    /// Board ドメインモデル
    board: Arc<Mutex<Board>>,
    /// レコードのタイムスタンプ生成に使う Clock
    clock: Arc<dyn Clock>,
}

impl InMemoryBoardRepository {
    /// 新しい InMemoryBoardRepository を作成
    pub fn new(board: Arc<Mutex<Board>>, clock: Arc<dyn Clock>) -> Self {
        Self { board, clock }
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn set_text(&self, content: TextContent, owner: &Session) -> TextShare {
        let share = TextShare::new(
            ShareId::generate(),
            content,
            owner,
            Timestamp::new(self.clock.now_millis()),
        );

        let mut board = self.board.lock().await;
        board.replace_text(share.clone());
        share
    }

    async fn clear_text(&self) -> bool {
        let mut board = self.board.lock().await;
        board.clear_text()
    }

    async fn get_text(&self) -> Option<TextShare> {
        let board = self.board.lock().await;
        board.text().cloned()
    }

    async fn set_file(&self, input: FileShareInput, owner: &Session) -> FileShare {
        let share = FileShare::new(
            ShareId::generate(),
            input,
            owner,
            Timestamp::new(self.clock.now_millis()),
        );

        let mut board = self.board.lock().await;
        board.replace_file(share.clone());
        share
    }

    async fn clear_file(&self) -> bool {
        let mut board = self.board.lock().await;
        board.clear_file()
    }

    async fn get_file(&self) -> Option<FileShare> {
        let board = self.board.lock().await;
        board.file().cloned()
    }

    async fn snapshot(&self) -> BoardSnapshot {
        let board = self.board.lock().await;
        board.snapshot()
    }
}
