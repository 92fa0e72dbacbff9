//! Conversion logic between DTOs and domain models.

use crate::domain::{FileShare, OutboundEvent, TextShare, ValueError};
use crate::infrastructure::dto::http::{FileStatsDto, TextStatsDto};
use crate::infrastructure::dto::websocket::{FileShareDto, ServerMessage, TextShareDto};
use crate::usecase::ShareError;

// ========================================
// Domain Model → DTO
// ========================================

impl From<TextShare> for TextShareDto {
    fn from(share: TextShare) -> Self {
        Self {
            id: share.id.into_string(),
            content: share.content.into_string(),
            user_id: share.owner_session_id.into_string(),
            user_name: share.owner_display_name.into_string(),
            timestamp: share.created_at.value(),
        }
    }
}

impl From<FileShare> for FileShareDto {
    fn from(share: FileShare) -> Self {
        Self {
            id: share.id.into_string(),
            file_name: share.file_name.into_string(),
            file_size: share.file_size,
            file_type: share.mime_type.into_string(),
            content: share.payload.into_string(),
            user_id: share.owner_session_id.into_string(),
            user_name: share.owner_display_name.into_string(),
            timestamp: share.created_at.value(),
        }
    }
}

impl From<OutboundEvent> for ServerMessage {
    fn from(event: OutboundEvent) -> Self {
        match event {
            OutboundEvent::TextUpdated(share) => Self::SharedTextUpdated(share.into()),
            OutboundEvent::FileUpdated(share) => Self::SharedFileUpdated(share.into()),
            OutboundEvent::TextCleared { cleared_by } => Self::SharedTextCleared {
                cleared_by: cleared_by.into_string(),
            },
            OutboundEvent::FileCleared { cleared_by } => Self::SharedFileCleared {
                cleared_by: cleared_by.into_string(),
            },
            OutboundEvent::UserCount(count) => Self::UserCount { count },
            OutboundEvent::CurrentText(share) => Self::CurrentSharedText(share.into()),
            OutboundEvent::CurrentFile(share) => Self::CurrentSharedFile(share.into()),
            OutboundEvent::CurrentContent {
                text,
                file,
                connected_users,
            } => Self::CurrentContent {
                shared_text: text.map(Into::into),
                shared_file: file.map(Into::into),
                connected_users,
            },
            OutboundEvent::Ack {
                request_id,
                success,
                share_id,
                error,
            } => Self::Ack {
                request_id,
                success,
                share_id: share_id.map(|id| id.into_string()),
                error,
            },
        }
    }
}

impl From<&TextShare> for TextStatsDto {
    fn from(share: &TextShare) -> Self {
        Self {
            user_name: share.owner_display_name.as_str().to_string(),
            timestamp: share.created_at.value(),
            content_length: share.content.len(),
        }
    }
}

impl From<&FileShare> for FileStatsDto {
    fn from(share: &FileShare) -> Self {
        Self {
            file_name: share.file_name.as_str().to_string(),
            user_name: share.owner_display_name.as_str().to_string(),
            timestamp: share.created_at.value(),
            file_size: share.file_size,
        }
    }
}

// ========================================
// Error → wire rejection reason
// ========================================

/// Map a share failure to the rejection string reported to the requester
pub fn share_error_reason(error: &ShareError) -> &'static str {
    match error {
        ShareError::RateLimited => "Rate limit exceeded. Please slow down.",
        ShareError::Validation(value_error) => match value_error {
            ValueError::EmptyTextContent => "Invalid text content",
            ValueError::TextContentTooLarge(_) => "Text content too large",
            ValueError::EmptyFileName
            | ValueError::FileNameTooLong(_)
            | ValueError::EmptyFilePayload => "Invalid file data",
            ValueError::FilePayloadTooLarge(_) => "File too large",
            _ => "Invalid request",
        },
    }
}
