//! Rate Limiter trait 定義
//!
//! セッション単位のスライディングウィンドウによる流量制御。
//! セキュリティ境界ではなく助言的なスロットリング：新しい session id で
//! 再接続すれば予算はリセットされる（許容済みの弱点）。

use async_trait::async_trait;

use super::value_object::SessionId;

/// Rate Limiter trait
///
/// `allow` はウィンドウ内の記録数が上限未満なら現在時刻を記録して true、
/// 上限以上なら記録せずに false を返す。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// このセッションのリクエストを受け付けてよいか判定する
    async fn allow(&self, session_id: &SessionId) -> bool;

    /// セッション切断時にウィンドウを破棄する（再接続時のリークを防ぐ）
    async fn forget(&self, session_id: &SessionId);
}
