//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ValueError;

/// 共有リクエストの失敗理由
///
/// どちらの失敗もスロットの状態を変更する前に検出され、要求セッション
/// のみに報告される（他のセッションには何も配送されない）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// 入力の検証に失敗（空・サイズ超過・名前なし）
    #[error(transparent)]
    Validation(#[from] ValueError),

    /// ウィンドウ内のリクエスト数が上限を超えた
    #[error("rate limit exceeded")]
    RateLimited,
}

/// セッション接続の失敗理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// 同じ session id が既に接続している
    #[error("session '{0}' is already connected")]
    DuplicateSession(String),
}

/// セッション切断の失敗理由
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    /// 指定されたセッションが接続していない
    #[error("session '{0}' is not connected")]
    SessionNotFound(String),
}
