//! Realtime shared pastebin / file-drop server.
//!
//! Holds one shared text slot and one shared file slot. Every share replaces
//! the previous one and is broadcast to all connected WebSocket sessions.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kairan-server
//! cargo run --bin kairan-server -- --host 0.0.0.0 --port 3001
//! ```

use std::sync::Arc;

use clap::Parser;
use tokio::sync::Mutex;

use kairan_server::{
    domain::Board,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        rate_limit::SlidingWindowRateLimiter,
        repository::{InMemoryBoardRepository, InMemorySessionRegistry},
    },
    ui::Server,
    usecase::{
        ClearShareUseCase, ConnectSessionUseCase, DisconnectSessionUseCase, FanoutLock,
        GetBoardStatusUseCase, GetCurrentContentUseCase, ShareFileUseCase, ShareTextUseCase,
    },
};
use kairan_shared::{
    logger::setup_logger,
    time::{Clock, SystemClock},
};

/// HTTP エンドポイントの流量制御上限（リクエスト数/分、ピア IP キー）
const HTTP_RATE_LIMIT_MAX_REQUESTS: usize = 100;

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Realtime shared pastebin / file-drop server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3001")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. Rate limiters
    // 3. MessagePusher + FanoutLock
    // 4. UseCases
    // 5. Server

    // 1. Create repositories (in-memory board + session registry)
    let board = Arc::new(Mutex::new(Board::new()));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let board_repository = Arc::new(InMemoryBoardRepository::new(board, clock.clone()));
    let session_registry = Arc::new(InMemorySessionRegistry::new());

    // 2. Create rate limiters: content operations are keyed by session id,
    //    the HTTP surface by peer IP
    let content_rate_limiter = Arc::new(SlidingWindowRateLimiter::new(clock.clone()));
    let http_rate_limiter = Arc::new(SlidingWindowRateLimiter::with_limits(
        clock.clone(),
        HTTP_RATE_LIMIT_MAX_REQUESTS,
        60_000,
    ));

    // 3. Create MessagePusher (WebSocket implementation) and the lock that
    //    serializes slot mutation + fan-out
    let message_pusher = Arc::new(WebSocketMessagePusher::new());
    let fanout_lock = Arc::new(FanoutLock::new());

    // 4. Create UseCases
    let connect_session_usecase = Arc::new(ConnectSessionUseCase::new(
        session_registry.clone(),
        board_repository.clone(),
        message_pusher.clone(),
        fanout_lock.clone(),
    ));
    let disconnect_session_usecase = Arc::new(DisconnectSessionUseCase::new(
        session_registry.clone(),
        content_rate_limiter.clone(),
        message_pusher.clone(),
        fanout_lock.clone(),
    ));
    let share_text_usecase = Arc::new(ShareTextUseCase::new(
        board_repository.clone(),
        session_registry.clone(),
        content_rate_limiter.clone(),
        message_pusher.clone(),
        fanout_lock.clone(),
    ));
    let share_file_usecase = Arc::new(ShareFileUseCase::new(
        board_repository.clone(),
        session_registry.clone(),
        content_rate_limiter.clone(),
        message_pusher.clone(),
        fanout_lock.clone(),
    ));
    let clear_share_usecase = Arc::new(ClearShareUseCase::new(
        board_repository.clone(),
        session_registry.clone(),
        message_pusher.clone(),
        fanout_lock.clone(),
    ));
    let get_current_content_usecase = Arc::new(GetCurrentContentUseCase::new(
        board_repository.clone(),
        session_registry.clone(),
        message_pusher.clone(),
        fanout_lock.clone(),
    ));
    let get_board_status_usecase = Arc::new(GetBoardStatusUseCase::new(
        board_repository.clone(),
        session_registry.clone(),
    ));

    // 5. Create and run the server
    let server = Server::new(
        connect_session_usecase,
        disconnect_session_usecase,
        share_text_usecase,
        share_file_usecase,
        clear_share_usecase,
        get_current_content_usecase,
        get_board_status_usecase,
        message_pusher,
        http_rate_limiter,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
