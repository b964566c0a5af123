use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use redis::{AsyncCommands, Client as RedisClient};
use tokio::time::{Instant, MissedTickBehavior};

/// 单个条目允许的最长有效期（十年）
pub const MAX_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

/// 内存缓存清理过期条目的间隔
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 键值缓存存储
///
/// 默认使用进程内存储；配置了 `REDIS_URL` 时使用 Redis。
/// 所有值都是字符串，过期时间在写入时指定。
#[derive(Clone)]
pub enum CacheStore {
    Memory(Arc<MemoryStore>),
    Redis(Arc<RedisClient>),
}

impl CacheStore {
    pub fn memory() -> Self {
        CacheStore::Memory(MemoryStore::with_sweeper())
    }

    pub fn redis(client: RedisClient) -> Self {
        CacheStore::Redis(Arc::new(client))
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            CacheStore::Memory(_) => "memory",
            CacheStore::Redis(_) => "redis",
        }
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        match self {
            CacheStore::Memory(store) => Ok(store.get(key)),
            CacheStore::Redis(redis) => {
                let mut conn = redis.get_multiplexed_async_connection().await?;
                let value: Option<String> = conn.get(key).await?;
                Ok(value)
            }
        }
    }

    pub async fn set_ex(&self, key: &str, value: String, ttl: Duration) -> Result<(), CacheError> {
        match self {
            CacheStore::Memory(store) => {
                store.set_ex(key, value, ttl);
                Ok(())
            }
            CacheStore::Redis(redis) => {
                let mut conn = redis.get_multiplexed_async_connection().await?;
                // Redis 的 SETEX 不接受 0 秒
                let secs = ttl.min(MAX_TTL).as_secs().max(1);
                let _: () = conn.set_ex(key, value, secs).await?;
                Ok(())
            }
        }
    }

    pub async fn del(&self, key: &str) -> Result<(), CacheError> {
        match self {
            CacheStore::Memory(store) => {
                store.del(key);
                Ok(())
            }
            CacheStore::Redis(redis) => {
                let mut conn = redis.get_multiplexed_async_connection().await?;
                let _: () = conn.del(key).await?;
                Ok(())
            }
        }
    }

    /// 删除指定前缀下的全部键，返回删除数量
    pub async fn clear_prefix(&self, prefix: &str) -> Result<usize, CacheError> {
        match self {
            CacheStore::Memory(store) => Ok(store.clear_prefix(prefix)),
            CacheStore::Redis(redis) => {
                let mut conn = redis.get_multiplexed_async_connection().await?;
                let keys: Vec<String> = conn.keys(format!("{}*", prefix)).await?;
                if keys.is_empty() {
                    return Ok(0);
                }
                let removed: usize = conn.del(&keys).await?;
                Ok(removed)
            }
        }
    }
}

struct MemoryEntry {
    value: String,
    expires_at: Instant,
}

impl MemoryEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// 进程内缓存
///
/// 过期条目在读取时删除，另有后台任务按 [`SWEEP_INTERVAL`] 定期清理无人再读的条目。
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, MemoryEntry>,
}

impl MemoryStore {
    /// 创建存储并在当前 tokio 运行时上启动清理任务
    pub fn with_sweeper() -> Arc<Self> {
        let store = Arc::new(Self::default());
        store.start_sweeper();
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        let entry = self.entries.get(key)?;
        if entry.is_live(now) {
            return Some(entry.value.clone());
        }
        // 先释放读引用，否则同一分片上的删除会死锁
        drop(entry);
        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        None
    }

    pub fn set_ex(&self, key: &str, value: String, ttl: Duration) {
        let entry = MemoryEntry {
            value,
            expires_at: Instant::now() + ttl.min(MAX_TTL),
        };
        self.entries.insert(key.to_string(), entry);
    }

    pub fn del(&self, key: &str) {
        self.entries.remove(key);
    }

    pub fn clear_prefix(&self, prefix: &str) -> usize {
        let mut removed = 0;
        self.entries.retain(|key, _| {
            let keep = !key.starts_with(prefix);
            if !keep {
                removed += 1;
            }
            keep
        });
        removed
    }

    /// 删除所有已过期条目，返回删除数量
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        self.entries.retain(|_, entry| {
            let live = entry.is_live(now);
            if !live {
                removed += 1;
            }
            live
        });
        removed
    }

    /// 当前保存的条目数（包括尚未清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // 任务只持有弱引用，存储被释放后自动退出
    fn start_sweeper(self: &Arc<Self>) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no tokio runtime, memory cache sweeper not started");
            return;
        };

        let store = Arc::downgrade(self);
        let mut ticker = tokio::time::interval_at(Instant::now() + SWEEP_INTERVAL, SWEEP_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        handle.spawn(async move {
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let removed = store.purge_expired();
                if removed > 0 {
                    tracing::debug!("swept {} expired cache entries", removed);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let store = CacheStore::memory();
        store
            .set_ex("view:a", "1".into(), Duration::from_secs(60))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(store.get("view:a").await.unwrap().as_deref(), Some("1"));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(store.get("view:a").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_removed_on_read() {
        let store = MemoryStore::default();
        store.set_ex("k", "v".into(), Duration::from_secs(1));
        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn purge_removes_only_expired_entries() {
        let store = MemoryStore::default();
        store.set_ex("short", "1".into(), Duration::from_secs(1));
        store.set_ex("long", "2".into(), Duration::from_secs(600));
        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("long").as_deref(), Some("2"));
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_reclaims_unread_entries() {
        let store = MemoryStore::with_sweeper();
        for i in 0..1000 {
            store.set_ex(&format!("session:{}", i), "{}".into(), Duration::from_secs(1));
        }
        assert_eq!(store.len(), 1000);

        tokio::time::advance(Duration::from_secs(3600)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn huge_ttl_is_capped() {
        let store = CacheStore::memory();
        store
            .set_ex("view:a", "1".into(), Duration::from_secs(u64::MAX))
            .await
            .unwrap();
        assert_eq!(store.get("view:a").await.unwrap().as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn clear_prefix_keeps_other_namespaces() {
        let store = CacheStore::memory();
        let ttl = Duration::from_secs(60);
        store.set_ex("view:a", "1".into(), ttl).await.unwrap();
        store.set_ex("view:b", "2".into(), ttl).await.unwrap();
        store.set_ex("session:s", "3".into(), ttl).await.unwrap();

        assert_eq!(store.clear_prefix("view:").await.unwrap(), 2);
        assert_eq!(store.get("view:a").await.unwrap(), None);
        assert_eq!(store.get("session:s").await.unwrap().as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn del_missing_key_is_noop() {
        let store = CacheStore::memory();
        store.del("nothing").await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }
}
