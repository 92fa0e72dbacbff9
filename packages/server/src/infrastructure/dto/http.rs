//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Response body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: String,
    /// RFC 3339 timestamp of the response
    pub timestamp: String,
    /// Process uptime in seconds
    pub uptime: f64,
    pub connected_users: usize,
    pub has_shared_text: bool,
    pub has_shared_file: bool,
}

/// Response body of `GET /api/stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub connected_users: usize,
    pub current_shared_text: Option<TextStatsDto>,
    pub current_shared_file: Option<FileStatsDto>,
}

/// Summary of the current shared text (no content body)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStatsDto {
    pub user_name: String,
    pub timestamp: i64,
    pub content_length: usize,
}

/// Summary of the current shared file (no payload)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStatsDto {
    pub file_name: String,
    pub user_name: String,
    pub timestamp: i64,
    pub file_size: u64,
}
