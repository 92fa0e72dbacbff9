//! InMemory Session Registry 実装
//!
//! 接続中のセッションを HashMap で管理します。セッションの登録・削除は
//! Connection Gateway（UI 層）が接続ライフサイクルに合わせて駆動します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RegistryError, Session, SessionId, SessionRegistry};

/// インメモリ Session Registry 実装
pub struct InMemorySessionRegistry {
    /// 接続中のセッション
    ///
    /// Key: session_id (String)
    /// Value: Session
    sessions: Mutex<HashMap<String, Session>>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn register(&self, session: Session) -> Result<(), RegistryError> {
        let mut sessions = self.sessions.lock().await;
        let key = session.id.as_str().to_string();
        if sessions.contains_key(&key) {
            return Err(RegistryError::DuplicateSession(key));
        }
        sessions.insert(key, session);
        Ok(())
    }

    async fn unregister(&self, session_id: &SessionId) -> Option<Session> {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id.as_str())
    }

    async fn get(&self, session_id: &SessionId) -> Option<Session> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id.as_str()).cloned()
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }

    async fn all(&self) -> Vec<Session> {
        let sessions = self.sessions.lock().await;
        let mut all: Vec<Session> = sessions.values().cloned().collect();

        // Sort by session_id for consistent ordering
        all.sort_by(|a, b| a.id.cmp(&b.id));

        all
    }

    async fn all_session_ids(&self) -> Vec<SessionId> {
        let sessions = self.sessions.lock().await;
        sessions.values().map(|s| s.id.clone()).collect()
    }
}
