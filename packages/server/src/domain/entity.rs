//! ドメインエンティティ定義
//!
//! - `Session`: 接続中のクライアント
//! - `TextShare` / `FileShare`: スロットを占有している共有レコード
//! - `Board`: テキストとファイルの 2 つのスロットを持つ回覧板
//!
//! Board のスロットは「置き換え」のみで更新されます。追記やマージは
//! 存在せず、新しい共有が常に前の共有を完全に置き換えます。

use super::value_object::{
    DisplayName, FileName, FilePayload, MimeType, SessionId, ShareId, TextContent, Timestamp,
};

/// 接続中のセッション
///
/// 表示名は接続時に確定し、以後変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub display_name: DisplayName,
    pub connected_at: Timestamp,
}

impl Session {
    pub fn new(id: SessionId, display_name: DisplayName, connected_at: Timestamp) -> Self {
        Self {
            id,
            display_name,
            connected_at,
        }
    }
}

/// 現在共有されているテキスト
///
/// owner は共有時点のスナップショット。セッションが切断されても
/// レコードは残る（逆参照なし）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextShare {
    pub id: ShareId,
    pub content: TextContent,
    pub owner_session_id: SessionId,
    pub owner_display_name: DisplayName,
    pub created_at: Timestamp,
}

impl TextShare {
    pub fn new(id: ShareId, content: TextContent, owner: &Session, created_at: Timestamp) -> Self {
        Self {
            id,
            content,
            owner_session_id: owner.id.clone(),
            owner_display_name: owner.display_name.clone(),
            created_at,
        }
    }
}

/// 現在共有されているファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileShare {
    pub id: ShareId,
    pub file_name: FileName,
    /// Client-reported size of the original file in bytes (metadata only)
    pub file_size: u64,
    pub mime_type: MimeType,
    pub payload: FilePayload,
    pub owner_session_id: SessionId,
    pub owner_display_name: DisplayName,
    pub created_at: Timestamp,
}

impl FileShare {
    pub fn new(
        id: ShareId,
        input: FileShareInput,
        owner: &Session,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            file_name: input.file_name,
            file_size: input.file_size,
            mime_type: input.mime_type,
            payload: input.payload,
            owner_session_id: owner.id.clone(),
            owner_display_name: owner.display_name.clone(),
            created_at,
        }
    }
}

/// 検証済みのファイル共有入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileShareInput {
    pub file_name: FileName,
    pub file_size: u64,
    pub mime_type: MimeType,
    pub payload: FilePayload,
}

/// 共有コンテンツの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareKind {
    Text,
    File,
}

/// 両スロットの一貫した読み取り結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub text: Option<TextShare>,
    pub file: Option<FileShare>,
}

/// 回覧板：テキストとファイルの 2 つの独立したスロット
///
/// スロットごとの状態遷移は Empty → Present → Present（置き換え）→
/// Empty（クリア）のみ。
#[derive(Debug, Clone, Default)]
pub struct Board {
    text: Option<TextShare>,
    file: Option<FileShare>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a text share, replacing whatever occupied the slot
    pub fn replace_text(&mut self, share: TextShare) {
        self.text = Some(share);
    }

    /// Empty the text slot. Returns whether something was present.
    pub fn clear_text(&mut self) -> bool {
        self.text.take().is_some()
    }

    pub fn text(&self) -> Option<&TextShare> {
        self.text.as_ref()
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Install a file share, replacing whatever occupied the slot
    pub fn replace_file(&mut self, share: FileShare) {
        self.file = Some(share);
    }

    /// Empty the file slot. Returns whether something was present.
    pub fn clear_file(&mut self) -> bool {
        self.file.take().is_some()
    }

    pub fn file(&self) -> Option<&FileShare> {
        self.file.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    /// Read both slots at once
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            text: self.text.clone(),
            file: self.file.clone(),
        }
    }
}
