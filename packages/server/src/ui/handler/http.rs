//! HTTP API endpoint handlers.
//!
//! 読み取り専用のサーフェス（/health, /api/stats）。副作用はなく、
//! ピア IP をキーにした流量制御（100 回/分）の背後に置かれる。

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json,
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use kairan_shared::time::{now_timestamp_millis, timestamp_to_rfc3339};

use crate::infrastructure::dto::http::{FileStatsDto, HealthDto, StatsDto, TextStatsDto};
use crate::ui::state::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let status = state.get_board_status_usecase.execute().await;

    Json(HealthDto {
        status: "OK".to_string(),
        timestamp: timestamp_to_rfc3339(now_timestamp_millis()),
        uptime: state.started_at.elapsed().as_secs_f64(),
        connected_users: status.connected_users,
        has_shared_text: status.text.is_some(),
        has_shared_file: status.file.is_some(),
    })
}

/// Stats endpoint: summaries of the current shares, without payloads
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<StatsDto> {
    let status = state.get_board_status_usecase.execute().await;

    Json(StatsDto {
        connected_users: status.connected_users,
        current_shared_text: status.text.as_ref().map(TextStatsDto::from),
        current_shared_file: status.file.as_ref().map(FileStatsDto::from),
    })
}

/// Transport-entry rate limiting middleware for the HTTP surface,
/// keyed by peer IP
pub async fn http_rate_limit(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !state.http_rate_limiter.allow_key(&addr.ip().to_string()).await {
        tracing::warn!("HTTP rate limit exceeded for {}", addr.ip());
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "Too many requests from this IP, please try again later."
            })),
        )
            .into_response();
    }

    next.run(request).await
}
