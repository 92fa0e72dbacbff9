//! MessagePusher trait とアウトバウンドイベント定義
//!
//! ## 責務
//!
//! - セッションへのイベント送信の抽象化（push_to, broadcast）
//! - ドメイン層はワイヤ形式を知らない：イベントはドメインモデルのまま
//!   渡し、JSON への変換は Infrastructure 層の実装が行う（依存性の逆転）

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::{
    entity::{FileShare, TextShare},
    value_object::{DisplayName, SessionId, ShareId},
};

/// セッションごとの送信チャンネル
///
/// WebSocket 接続の送信側タスクが受信する文字列（シリアライズ済み
/// イベント）のチャンネル。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// イベント送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 宛先セッションが登録されていない
    #[error("session '{0}' is not registered")]
    SessionNotFound(String),

    /// 送信チャンネルへの書き込みに失敗
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// サーバからセッションへ送るイベント
///
/// 共有スロットの更新・クリア、在席者数、参加時スナップショット、
/// リクエストへの応答（ack）をドメインモデルで表現する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundEvent {
    /// テキストスロットが置き換えられた（全セッション宛）
    TextUpdated(TextShare),
    /// ファイルスロットが置き換えられた（全セッション宛）
    FileUpdated(FileShare),
    /// テキストスロットがクリアされた（全セッション宛）
    TextCleared { cleared_by: DisplayName },
    /// ファイルスロットがクリアされた（全セッション宛）
    FileCleared { cleared_by: DisplayName },
    /// 在席者数の更新（全セッション宛）
    UserCount(usize),
    /// 参加時スナップショット：現在のテキスト共有（新規セッション宛）
    CurrentText(TextShare),
    /// 参加時スナップショット：現在のファイル共有（新規セッション宛）
    CurrentFile(FileShare),
    /// get-current-content への応答（要求セッション宛）
    CurrentContent {
        text: Option<TextShare>,
        file: Option<FileShare>,
        connected_users: usize,
    },
    /// 共有リクエストへの応答（要求セッション宛）
    Ack {
        request_id: Option<String>,
        success: bool,
        share_id: Option<ShareId>,
        error: Option<String>,
    },
}

impl OutboundEvent {
    /// Build a success acknowledgement carrying the installed record's id
    pub fn ack_ok(request_id: Option<String>, share_id: ShareId) -> Self {
        Self::Ack {
            request_id,
            success: true,
            share_id: Some(share_id),
            error: None,
        }
    }

    /// Build a failure acknowledgement carrying a rejection reason
    pub fn ack_err(request_id: Option<String>, reason: impl Into<String>) -> Self {
        Self::Ack {
            request_id,
            success: false,
            share_id: None,
            error: Some(reason.into()),
        }
    }
}

/// MessagePusher trait
///
/// UseCase 層はこの trait 経由でイベントを配送する。ブロードキャストは
/// 一部の宛先への送信失敗を許容する（ログのみ）。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションの送信チャンネルを登録
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel);

    /// セッションの送信チャンネルを登録解除
    async fn unregister_session(&self, session_id: &SessionId);

    /// 特定のセッションにイベントを送信
    async fn push_to(
        &self,
        session_id: &SessionId,
        event: OutboundEvent,
    ) -> Result<(), MessagePushError>;

    /// 複数のセッションにイベントを送信（部分失敗を許容）
    async fn broadcast(
        &self,
        targets: Vec<SessionId>,
        event: OutboundEvent,
    ) -> Result<(), MessagePushError>;
}
