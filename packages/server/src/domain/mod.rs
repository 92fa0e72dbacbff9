//! ドメイン層
//!
//! 値オブジェクト、エンティティ、および Infrastructure 層が実装する
//! trait 群（Repository / Registry / RateLimiter / MessagePusher）。

pub mod entity;
pub mod message_pusher;
pub mod rate_limit;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use entity::{Board, BoardSnapshot, FileShare, FileShareInput, Session, ShareKind, TextShare};
pub use message_pusher::{MessagePushError, MessagePusher, OutboundEvent, PusherChannel};
pub use rate_limit::RateLimiter;
pub use registry::{RegistryError, SessionRegistry};
pub use repository::BoardRepository;
pub use value_object::{
    DisplayName, FileName, FilePayload, MAX_DISPLAY_NAME_BYTES, MAX_FILE_NAME_BYTES,
    MAX_FILE_PAYLOAD_BYTES, MAX_SESSION_ID_BYTES, MAX_TEXT_CONTENT_BYTES, MimeType, SessionId,
    ShareId, TextContent, Timestamp, ValueError,
};

#[cfg(test)]
pub use rate_limit::MockRateLimiter;
