//! Server execution logic.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::MessagePusher;
use crate::infrastructure::rate_limit::SlidingWindowRateLimiter;
use crate::usecase::{
    ClearShareUseCase, ConnectSessionUseCase, DisconnectSessionUseCase, GetBoardStatusUseCase,
    GetCurrentContentUseCase, ShareFileUseCase, ShareTextUseCase,
};

use super::{
    handler::{
        http::{get_stats, health_check, http_rate_limit},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Realtime share server
///
/// This struct encapsulates the server configuration and provides methods to
/// run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_session_usecase,
///     disconnect_session_usecase,
///     share_text_usecase,
///     share_file_usecase,
///     clear_share_usecase,
///     get_current_content_usecase,
///     get_board_status_usecase,
///     message_pusher,
///     http_rate_limiter,
/// );
/// server.run("127.0.0.1".to_string(), 3001).await?;
/// ```
pub struct Server {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// ShareTextUseCase（テキスト共有のユースケース）
    share_text_usecase: Arc<ShareTextUseCase>,
    /// ShareFileUseCase（ファイル共有のユースケース）
    share_file_usecase: Arc<ShareFileUseCase>,
    /// ClearShareUseCase（共有クリアのユースケース）
    clear_share_usecase: Arc<ClearShareUseCase>,
    /// GetCurrentContentUseCase（現在コンテンツ取得のユースケース）
    get_current_content_usecase: Arc<GetCurrentContentUseCase>,
    /// GetBoardStatusUseCase（サーバ状態取得のユースケース）
    get_board_status_usecase: Arc<GetBoardStatusUseCase>,
    /// MessagePusher（ack の送信に使用）
    message_pusher: Arc<dyn MessagePusher>,
    /// HTTP エンドポイント用の流量制御
    http_rate_limiter: Arc<SlidingWindowRateLimiter>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        connect_session_usecase: Arc<ConnectSessionUseCase>,
        disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
        share_text_usecase: Arc<ShareTextUseCase>,
        share_file_usecase: Arc<ShareFileUseCase>,
        clear_share_usecase: Arc<ClearShareUseCase>,
        get_current_content_usecase: Arc<GetCurrentContentUseCase>,
        get_board_status_usecase: Arc<GetBoardStatusUseCase>,
        message_pusher: Arc<dyn MessagePusher>,
        http_rate_limiter: Arc<SlidingWindowRateLimiter>,
    ) -> Self {
        Self {
            connect_session_usecase,
            disconnect_session_usecase,
            share_text_usecase,
            share_file_usecase,
            clear_share_usecase,
            get_current_content_usecase,
            get_board_status_usecase,
            message_pusher,
            http_rate_limiter,
        }
    }

    /// Build the axum router for this server
    ///
    /// Exposed separately from [`Server::run`] so integration tests can bind
    /// an ephemeral port and serve the same router.
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            connect_session_usecase: self.connect_session_usecase,
            disconnect_session_usecase: self.disconnect_session_usecase,
            share_text_usecase: self.share_text_usecase,
            share_file_usecase: self.share_file_usecase,
            clear_share_usecase: self.clear_share_usecase,
            get_current_content_usecase: self.get_current_content_usecase,
            get_board_status_usecase: self.get_board_status_usecase,
            message_pusher: self.message_pusher,
            http_rate_limiter: self.http_rate_limiter,
            started_at: Instant::now(),
        });

        // HTTP エンドポイント（ピア IP キーの流量制御付き）
        let api = Router::new()
            .route("/health", get(health_check))
            .route("/api/stats", get(get_stats))
            .layer(middleware::from_fn_with_state(
                app_state.clone(),
                http_rate_limit,
            ))
            .with_state(app_state.clone());

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            .with_state(app_state)
            .merge(api)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the realtime share server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3001)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        let app = self.into_router();

        // Start the server
        tracing::info!(
            "Realtime share server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
