//! 値オブジェクト定義
//!
//! 共有コンテンツとセッション識別子の制約はすべてここで強制します。
//! 不正な値を持つインスタンスは構築できません。

use thiserror::Error;
use uuid::Uuid;

/// Maximum size of a shared text blob in bytes
pub const MAX_TEXT_CONTENT_BYTES: usize = 100_000;

/// Maximum size of an encoded file payload in bytes
pub const MAX_FILE_PAYLOAD_BYTES: usize = 10_000_000;

/// Maximum length of a display name in bytes
pub const MAX_DISPLAY_NAME_BYTES: usize = 64;

/// Maximum length of a file name in bytes
pub const MAX_FILE_NAME_BYTES: usize = 255;

/// Maximum length of a session id in bytes
pub const MAX_SESSION_ID_BYTES: usize = 128;

/// Validation errors for value object construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("session id must not be empty")]
    EmptySessionId,

    #[error("session id too long ({0} bytes)")]
    SessionIdTooLong(usize),

    #[error("display name must not be empty")]
    EmptyDisplayName,

    #[error("display name too long ({0} bytes)")]
    DisplayNameTooLong(usize),

    #[error("text content must not be empty")]
    EmptyTextContent,

    #[error("text content too large ({0} bytes)")]
    TextContentTooLarge(usize),

    #[error("file name must not be empty")]
    EmptyFileName,

    #[error("file name too long ({0} bytes)")]
    FileNameTooLong(usize),

    #[error("file payload must not be empty")]
    EmptyFilePayload,

    #[error("file payload too large ({0} bytes)")]
    FilePayloadTooLarge(usize),
}

/// セッション ID（接続ごとに一意、接続中は不変）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Err(ValueError::EmptySessionId);
        }
        if value.len() > MAX_SESSION_ID_BYTES {
            return Err(ValueError::SessionIdTooLong(value.len()));
        }
        Ok(Self(value))
    }

    /// Generate a fresh random session id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for SessionId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 表示名（接続時にクライアントが指定、なければ生成）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Err(ValueError::EmptyDisplayName);
        }
        if value.len() > MAX_DISPLAY_NAME_BYTES {
            return Err(ValueError::DisplayNameTooLong(value.len()));
        }
        Ok(Self(value))
    }

    /// Generate a fallback display name ("User<n>") when the client
    /// supplied none
    pub fn generate() -> Self {
        let n = Uuid::new_v4().as_u128() % 1000;
        Self(format!("User{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 共有レコードの ID（共有のたびに新規生成）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShareId(String);

impl ShareId {
    /// Generate a fresh unique share id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 共有テキスト本文（空でない、100,000 バイト以下）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent(String);

impl TextContent {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Err(ValueError::EmptyTextContent);
        }
        if value.len() > MAX_TEXT_CONTENT_BYTES {
            return Err(ValueError::TextContentTooLarge(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for TextContent {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// 共有ファイル名（空でない、255 バイト以下）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName(String);

impl FileName {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Err(ValueError::EmptyFileName);
        }
        if value.len() > MAX_FILE_NAME_BYTES {
            return Err(ValueError::FileNameTooLong(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ファイルのエンコード済みペイロード（空でない、10,000,000 バイト以下）
///
/// The payload is whatever binary-safe encoding the client produced
/// (typically a base64 data URL); the server treats it as opaque text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload(String);

impl FilePayload {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() {
            return Err(ValueError::EmptyFilePayload);
        }
        if value.len() > MAX_FILE_PAYLOAD_BYTES {
            return Err(ValueError::FilePayloadTooLarge(value.len()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// MIME タイプ（未指定の場合は octet-stream にフォールバック）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeType(String);

impl MimeType {
    pub const DEFAULT: &'static str = "application/octet-stream";

    /// Build a mime type from an optional client-supplied value, falling
    /// back to `application/octet-stream` when absent or empty
    pub fn from_or_default(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self(v),
            _ => Self(Self::DEFAULT.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
