// 缓存模块
// 包含缓存存储、数据结构和操作逻辑

pub mod keys;
pub mod models;
pub mod operations;
pub mod store;

pub use models::{CachedSession, SessionIdentity};
pub use operations::{SessionCacheOperations, ViewCacheOperations};
pub use store::{CacheError, CacheStore, MAX_TTL, MemoryStore};
