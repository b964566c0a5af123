/// 缓存操作
pub mod session;
pub mod view;

pub use session::SessionCacheOperations;
pub use view::ViewCacheOperations;
