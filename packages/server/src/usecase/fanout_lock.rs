//! 状態更新とファンアウトの直列化ポイント
//!
//! スロットの更新・セッション台帳の変更と、その結果のファンアウト
//! （各セッションの送信チャンネルへの enqueue）は 1 つの論理ステップ
//! として直列化されなければならない。このロックを全 UseCase が共有する
//! ことで、どのセッションから見ても置き換えの順序が一意に定まり、
//! 参加直後のスナップショットが後続のブロードキャストより先に届く。
//!
//! 送信チャンネルは unbounded なので enqueue はブロックしない。
//! ロック保持中に待つのはスロットとレジストリの内部ロックのみ。

use tokio::sync::{Mutex, MutexGuard};

/// 更新＋ファンアウトを 1 単位として直列化するロック
pub struct FanoutLock {
    inner: Mutex<()>,
}

impl FanoutLock {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(()),
        }
    }

    /// ロックを取得する。guard を保持している間、他の更新は開始されない。
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.inner.lock().await
    }
}

impl Default for FanoutLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lock_is_exclusive_while_held() {
        // テスト項目: guard 保持中は他の取得がブロックされる
        // given (前提条件):
        let lock = FanoutLock::new();

        // when (操作):
        let guard = lock.acquire().await;

        // then (期待する結果):
        assert!(lock.inner.try_lock().is_err());
        drop(guard);
        assert!(lock.inner.try_lock().is_ok());
    }
}
