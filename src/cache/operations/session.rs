use std::time::Duration;

use uuid::Uuid;

use crate::cache::keys::session_key;
use crate::cache::models::session::{CachedSession, SessionIdentity};
use crate::cache::store::{CacheError, CacheStore, MAX_TTL};

/// 会话缓存操作
pub struct SessionCacheOperations;

impl SessionCacheOperations {
    /// 创建新会话并写入缓存，会话 ID 为随机 UUID
    pub async fn create_session(
        store: &CacheStore,
        identity: SessionIdentity,
        ttl: Duration,
    ) -> Result<CachedSession, CacheError> {
        let now = chrono::Utc::now().timestamp();
        let ttl = ttl.min(MAX_TTL);
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let session = CachedSession {
            session_id: Uuid::new_v4().simple().to_string(),
            identity,
            created_at: now,
            expires_at: now.saturating_add(ttl_secs),
        };

        let json = serde_json::to_string(&session)?;
        store
            .set_ex(&session_key(&session.session_id), json, ttl)
            .await?;

        Ok(session)
    }

    /// 获取会话
    pub async fn get_session(
        store: &CacheStore,
        session_id: &str,
    ) -> Result<Option<CachedSession>, CacheError> {
        let Some(json) = store.get(&session_key(session_id)).await? else {
            return Ok(None);
        };

        // 无法解析的会话（例如旧版本写入的）按不存在处理
        match serde_json::from_str(&json) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("ignoring undecodable session {}: {}", session_id, e);
                Ok(None)
            }
        }
    }

    /// 删除会话，不存在时也视为成功
    pub async fn remove_session(store: &CacheStore, session_id: &str) -> Result<(), CacheError> {
        store.del(&session_key(session_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visitor(name: &str) -> SessionIdentity {
        SessionIdentity::Visitor {
            username: name.into(),
        }
    }

    #[tokio::test]
    async fn created_session_can_be_read_back() {
        let store = CacheStore::memory();
        let ttl = Duration::from_secs(300);
        let session = SessionCacheOperations::create_session(&store, visitor("ann"), ttl)
            .await
            .unwrap();

        let loaded = SessionCacheOperations::get_session(&store, &session.session_id)
            .await
            .unwrap();
        assert_eq!(loaded, Some(session.clone()));
        assert_eq!(session.expires_at - session.created_at, 300);
    }

    #[tokio::test]
    async fn session_ids_are_unique() {
        let store = CacheStore::memory();
        let ttl = Duration::from_secs(60);
        let a = SessionCacheOperations::create_session(&store, visitor("a"), ttl)
            .await
            .unwrap();
        let b = SessionCacheOperations::create_session(&store, visitor("a"), ttl)
            .await
            .unwrap();
        assert_ne!(a.session_id, b.session_id);
    }

    #[tokio::test]
    async fn removed_session_is_gone() {
        let store = CacheStore::memory();
        let session =
            SessionCacheOperations::create_session(&store, visitor("ann"), Duration::from_secs(60))
                .await
                .unwrap();

        SessionCacheOperations::remove_session(&store, &session.session_id)
            .await
            .unwrap();
        SessionCacheOperations::remove_session(&store, &session.session_id)
            .await
            .unwrap();

        assert!(
            SessionCacheOperations::get_session(&store, &session.session_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn undecodable_session_is_treated_as_missing() {
        let store = CacheStore::memory();
        store
            .set_ex(&session_key("bad"), "not json".into(), Duration::from_secs(60))
            .await
            .unwrap();

        let loaded = SessionCacheOperations::get_session(&store, "bad").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn huge_ttl_does_not_overflow_expiry() {
        let store = CacheStore::memory();
        let session = SessionCacheOperations::create_session(
            &store,
            visitor("ann"),
            Duration::from_secs(u64::MAX),
        )
        .await
        .unwrap();

        assert_eq!(
            session.expires_at - session.created_at,
            MAX_TTL.as_secs() as i64
        );
        assert!(
            SessionCacheOperations::get_session(&store, &session.session_id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn session_expires_with_ttl() {
        let store = CacheStore::memory();
        let session =
            SessionCacheOperations::create_session(&store, visitor("ann"), Duration::from_secs(10))
                .await
                .unwrap();

        tokio::time::advance(Duration::from_secs(11)).await;
        assert!(
            SessionCacheOperations::get_session(&store, &session.session_id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
