//! Session Registry trait 定義
//!
//! 接続中のセッションの台帳。登録・削除・列挙のみを提供し、セッションの
//! ライフサイクルは Connection Gateway が駆動します。

use async_trait::async_trait;
use thiserror::Error;

use super::{entity::Session, value_object::SessionId};

/// Registry 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// 同じ session id が既に登録されている
    #[error("session '{0}' is already registered")]
    DuplicateSession(String),
}

/// Session Registry trait
///
/// `count()` は register / unregister の完了直後に正確であること
/// （在席者数ブロードキャストに使用される）。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// セッションを登録する。session id が重複していればエラー。
    async fn register(&self, session: Session) -> Result<(), RegistryError>;

    /// セッションを削除し、登録されていた Session を返す
    async fn unregister(&self, session_id: &SessionId) -> Option<Session>;

    /// セッションを取得
    async fn get(&self, session_id: &SessionId) -> Option<Session>;

    /// 接続中のセッション数を取得
    async fn count(&self) -> usize;

    /// 接続中の全セッションを取得（session id でソート済み）
    async fn all(&self) -> Vec<Session>;

    /// 接続中の全セッション ID を取得
    async fn all_session_ids(&self) -> Vec<SessionId>;
}
