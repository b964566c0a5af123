use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};

use crate::cache::keys::{VIEW_PREFIX, view_key};
use crate::cache::store::{CacheError, CacheStore};

/// 视图缓存操作
///
/// 同一个键在有效期内只计算一次。并发未命中时各自计算，不做合并。
pub struct ViewCacheOperations;

impl ViewCacheOperations {
    /// 命中时直接返回缓存值，未命中时调用 `compute` 并按 `timeout` 写入缓存。
    /// `compute` 失败时错误原样返回，不写缓存。
    pub async fn get_or_compute<T, E, F, Fut>(
        store: &CacheStore,
        name: &str,
        timeout: Duration,
        compute: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        E: From<CacheError>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = view_key(name);

        if let Some(json) = store.get(&key).await? {
            match serde_json::from_str(&json) {
                Ok(value) => {
                    tracing::debug!("cache hit: {}", key);
                    return Ok(value);
                }
                Err(e) => tracing::warn!("discarding undecodable cache entry {}: {}", key, e),
            }
        }

        tracing::debug!("cache miss: {}", key);
        let value = compute().await?;

        let json = serde_json::to_string(&value).map_err(CacheError::from)?;
        store.set_ex(&key, json, timeout).await?;

        Ok(value)
    }

    /// 清空所有视图缓存，无论是否过期
    pub async fn invalidate_all(store: &CacheStore) -> Result<usize, CacheError> {
        let removed = store.clear_prefix(VIEW_PREFIX).await?;
        tracing::info!("cleared {} cached views", removed);
        Ok(removed)
    }
}
