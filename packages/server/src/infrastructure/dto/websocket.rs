//! WebSocket message DTOs.
//!
//! ワイヤ上のメッセージは `event` フィールドでタグ付けされた JSON
//! オブジェクト。イベント名は kebab-case、フィールド名は camelCase。

use serde::{Deserialize, Serialize};

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Share a text blob, replacing the current shared text
    ShareText {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
    /// Legacy alias for `share-text`, kept for older clients
    ShareCode {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
    /// Share a file, replacing the current shared file
    ShareFile {
        file_name: String,
        #[serde(default)]
        file_size: u64,
        #[serde(default)]
        file_type: Option<String>,
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
    },
    /// Empty the shared text slot
    ClearSharedText,
    /// Empty the shared file slot
    ClearSharedFile,
    /// Request the current contents of both slots
    GetCurrentContent,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// The shared text slot was replaced (broadcast to all sessions)
    SharedTextUpdated(TextShareDto),
    /// The shared file slot was replaced (broadcast to all sessions)
    SharedFileUpdated(FileShareDto),
    /// The shared text slot was emptied (broadcast to all sessions)
    SharedTextCleared { cleared_by: String },
    /// The shared file slot was emptied (broadcast to all sessions)
    SharedFileCleared { cleared_by: String },
    /// Presence update (broadcast to all sessions)
    UserCount { count: usize },
    /// Join-time catch-up: the current shared text (new session only)
    CurrentSharedText(TextShareDto),
    /// Join-time catch-up: the current shared file (new session only)
    CurrentSharedFile(FileShareDto),
    /// Response to `get-current-content`
    CurrentContent {
        shared_text: Option<TextShareDto>,
        shared_file: Option<FileShareDto>,
        connected_users: usize,
    },
    /// Response to a share request
    Ack {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<String>,
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        share_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
}

/// A shared text record on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextShareDto {
    pub id: String,
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: i64,
}

/// A shared file record on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileShareDto {
    pub id: String,
    pub file_name: String,
    pub file_size: u64,
    pub file_type: String,
    /// Binary-safe encoded file content (typically a base64 data URL)
    pub content: String,
    pub user_id: String,
    pub user_name: String,
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_deserialize_share_text() {
        // テスト項目: share-text イベントが正しくデシリアライズされる
        // given (前提条件):
        let json = r#"{"event":"share-text","content":"hello","requestId":"req-1"}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match msg {
            ClientMessage::ShareText {
                content,
                request_id,
            } => {
                assert_eq!(content, "hello");
                assert_eq!(request_id, Some("req-1".to_string()));
            }
            _ => panic!("Expected ShareText"),
        }
    }

    #[test]
    fn test_client_message_deserialize_share_text_without_request_id() {
        // テスト項目: requestId 省略時は None になる
        // given (前提条件):
        let json = r#"{"event":"share-text","content":"hello"}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match msg {
            ClientMessage::ShareText { request_id, .. } => assert_eq!(request_id, None),
            _ => panic!("Expected ShareText"),
        }
    }

    #[test]
    fn test_client_message_deserialize_legacy_share_code() {
        // テスト項目: 旧イベント名 share-code も受理される
        // given (前提条件):
        let json = r#"{"event":"share-code","content":"fn main() {}"}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match msg {
            ClientMessage::ShareCode { content, .. } => assert_eq!(content, "fn main() {}"),
            _ => panic!("Expected ShareCode"),
        }
    }

    #[test]
    fn test_client_message_deserialize_share_file() {
        // テスト項目: share-file イベントのフィールドが camelCase で読まれる
        // given (前提条件):
        let json = r#"{"event":"share-file","fileName":"notes.txt","fileSize":5,"fileType":"text/plain","content":"data:text/plain;base64,aGVsbG8="}"#;

        // when (操作):
        let msg: ClientMessage = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        match msg {
            ClientMessage::ShareFile {
                file_name,
                file_size,
                file_type,
                content,
                request_id,
            } => {
                assert_eq!(file_name, "notes.txt");
                assert_eq!(file_size, 5);
                assert_eq!(file_type, Some("text/plain".to_string()));
                assert!(content.starts_with("data:text/plain;base64,"));
                assert_eq!(request_id, None);
            }
            _ => panic!("Expected ShareFile"),
        }
    }

    #[test]
    fn test_client_message_deserialize_clear_events() {
        // テスト項目: ペイロードなしのクリアイベントが受理される
        // given (前提条件):
        let clear_text = r#"{"event":"clear-shared-text"}"#;
        let clear_file = r#"{"event":"clear-shared-file"}"#;

        // when (操作):
        let text_msg: ClientMessage = serde_json::from_str(clear_text).unwrap();
        let file_msg: ClientMessage = serde_json::from_str(clear_file).unwrap();

        // then (期待する結果):
        assert!(matches!(text_msg, ClientMessage::ClearSharedText));
        assert!(matches!(file_msg, ClientMessage::ClearSharedFile));
    }

    #[test]
    fn test_server_message_serialize_shared_text_updated() {
        // テスト項目: shared-text-updated がレコードを含む JSON になる
        // given (前提条件):
        let msg = ServerMessage::SharedTextUpdated(TextShareDto {
            id: "share-1".to_string(),
            content: "hello".to_string(),
            user_id: "alice".to_string(),
            user_name: "Alice".to_string(),
            timestamp: 1000,
        });

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""event":"shared-text-updated""#));
        assert!(json.contains(r#""content":"hello""#));
        assert!(json.contains(r#""userId":"alice""#));
        assert!(json.contains(r#""userName":"Alice""#));
    }

    #[test]
    fn test_server_message_serialize_cleared_event() {
        // テスト項目: クリアイベントが clearedBy を含む
        // given (前提条件):
        let msg = ServerMessage::SharedTextCleared {
            cleared_by: "Alice".to_string(),
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""event":"shared-text-cleared""#));
        assert!(json.contains(r#""clearedBy":"Alice""#));
    }

    #[test]
    fn test_server_message_serialize_ack_success() {
        // テスト項目: 成功 ack は shareId を含み error を含まない
        // given (前提条件):
        let msg = ServerMessage::Ack {
            request_id: Some("req-1".to_string()),
            success: true,
            share_id: Some("share-1".to_string()),
            error: None,
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""event":"ack""#));
        assert!(json.contains(r#""requestId":"req-1""#));
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""shareId":"share-1""#));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_server_message_serialize_ack_failure() {
        // テスト項目: 失敗 ack は error を含み shareId を含まない
        // given (前提条件):
        let msg = ServerMessage::Ack {
            request_id: None,
            success: false,
            share_id: None,
            error: Some("Text content too large".to_string()),
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""success":false"#));
        assert!(json.contains(r#""error":"Text content too large""#));
        assert!(!json.contains("shareId"));
    }

    #[test]
    fn test_server_message_serialize_user_count() {
        // テスト項目: user-count イベントが count を含む
        // given (前提条件):
        let msg = ServerMessage::UserCount { count: 3 };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""event":"user-count""#));
        assert!(json.contains(r#""count":3"#));
    }

    #[test]
    fn test_server_message_serialize_current_content() {
        // テスト項目: current-content が両スロットと在席者数を含む
        // given (前提条件):
        let msg = ServerMessage::CurrentContent {
            shared_text: None,
            shared_file: None,
            connected_users: 2,
        };

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();

        // then (期待する結果):
        assert!(json.contains(r#""event":"current-content""#));
        assert!(json.contains(r#""sharedText":null"#));
        assert!(json.contains(r#""sharedFile":null"#));
        assert!(json.contains(r#""connectedUsers":2"#));
    }

    #[test]
    fn test_server_message_roundtrip_shared_file_updated() {
        // テスト項目: shared-file-updated がシリアライズ・デシリアライズで往復できる
        // given (前提条件):
        let msg = ServerMessage::SharedFileUpdated(FileShareDto {
            id: "share-2".to_string(),
            file_name: "notes.txt".to_string(),
            file_size: 5,
            file_type: "text/plain".to_string(),
            content: "data:text/plain;base64,aGVsbG8=".to_string(),
            user_id: "bob".to_string(),
            user_name: "Bob".to_string(),
            timestamp: 2000,
        });

        // when (操作):
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: ServerMessage = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        match parsed {
            ServerMessage::SharedFileUpdated(dto) => {
                assert_eq!(dto.file_name, "notes.txt");
                assert_eq!(dto.file_size, 5);
                assert_eq!(dto.user_name, "Bob");
            }
            _ => panic!("Expected SharedFileUpdated"),
        }
    }
}
