//! スライディングウィンドウ Rate Limiter 実装
//!
//! キーごとに直近ウィンドウ内のリクエスト時刻を記録し、上限を超えた
//! リクエストを拒否します。ウィンドウ外のエントリはチェックのたびに
//! 破棄されます（遅延プルーニング）。
//!
//! コンテンツ操作（session id キー、50 回/分）と HTTP エンドポイント
//! （ピア IP キー、100 回/分）の両方で同じ実装を使います。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use kairan_shared::time::Clock;

use crate::domain::{RateLimiter, SessionId};

/// コンテンツ操作のデフォルト上限（リクエスト数/ウィンドウ）
pub const DEFAULT_MAX_REQUESTS: usize = 50;

/// デフォルトのウィンドウ幅（ミリ秒）
pub const DEFAULT_WINDOW_MILLIS: i64 = 60_000;

/// スライディングウィンドウ Rate Limiter
pub struct SlidingWindowRateLimiter {
    /// キーごとのリクエスト時刻の記録
    windows: Mutex<HashMap<String, Vec<i64>>>,
    /// 現在時刻の取得に使う Clock
    clock: Arc<dyn Clock>,
    /// ウィンドウ内に許容するリクエスト数
    max_requests: usize,
    /// ウィンドウ幅（ミリ秒）
    window_millis: i64,
}

impl SlidingWindowRateLimiter {
    /// デフォルトの上限（50 回/分）で作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_limits(clock, DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MILLIS)
    }

    /// 上限とウィンドウ幅を指定して作成
    pub fn with_limits(clock: Arc<dyn Clock>, max_requests: usize, window_millis: i64) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            clock,
            max_requests,
            window_millis,
        }
    }

    /// 任意の文字列キーでリクエストを判定する
    ///
    /// ウィンドウ内の記録数が上限未満なら現在時刻を記録して true、
    /// 上限以上なら記録せずに false を返す。
    pub async fn allow_key(&self, key: &str) -> bool {
        let now = self.clock.now_millis();
        let mut windows = self.windows.lock().await;
        let window = windows.entry(key.to_string()).or_default();

        // ウィンドウ外のエントリを破棄
        window.retain(|&t| now - t < self.window_millis);

        if window.len() >= self.max_requests {
            return false;
        }

        window.push(now);
        true
    }

    /// キーの記録を完全に破棄する
    pub async fn forget_key(&self, key: &str) {
        let mut windows = self.windows.lock().await;
        windows.remove(key);
    }
}

#[async_trait]
impl RateLimiter for SlidingWindowRateLimiter {
    async fn allow(&self, session_id: &SessionId) -> bool {
        self.allow_key(session_id.as_str()).await
    }

    async fn forget(&self, session_id: &SessionId) {
        self.forget_key(session_id.as_str()).await;
    }
}
