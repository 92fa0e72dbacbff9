//! Server state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::MessagePusher;
use crate::infrastructure::rate_limit::SlidingWindowRateLimiter;
use crate::usecase::{
    ClearShareUseCase, ConnectSessionUseCase, DisconnectSessionUseCase, GetBoardStatusUseCase,
    GetCurrentContentUseCase, ShareFileUseCase, ShareTextUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectSessionUseCase（セッション接続のユースケース）
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    /// DisconnectSessionUseCase（セッション切断のユースケース）
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// ShareTextUseCase（テキスト共有のユースケース）
    pub share_text_usecase: Arc<ShareTextUseCase>,
    /// ShareFileUseCase（ファイル共有のユースケース）
    pub share_file_usecase: Arc<ShareFileUseCase>,
    /// ClearShareUseCase（共有クリアのユースケース）
    pub clear_share_usecase: Arc<ClearShareUseCase>,
    /// GetCurrentContentUseCase（現在コンテンツ取得のユースケース）
    pub get_current_content_usecase: Arc<GetCurrentContentUseCase>,
    /// GetBoardStatusUseCase（サーバ状態取得のユースケース）
    pub get_board_status_usecase: Arc<GetBoardStatusUseCase>,
    /// MessagePusher（ack の送信に使用）
    pub message_pusher: Arc<dyn MessagePusher>,
    /// HTTP エンドポイント用の流量制御（ピア IP キー）
    pub http_rate_limiter: Arc<SlidingWindowRateLimiter>,
    /// プロセス起動時刻（/health の uptime 用）
    pub started_at: Instant,
}
