/// 缓存键模块
/// 会话与视图缓存共用同一个存储，通过前缀区分命名空间

/// 会话缓存键前缀
pub const SESSION_PREFIX: &str = "session:";

/// 视图缓存键前缀
pub const VIEW_PREFIX: &str = "view:";

/// 生成会话缓存键
pub fn session_key(session_id: &str) -> String {
    format!("{}{}", SESSION_PREFIX, session_id)
}

/// 生成视图缓存键
pub fn view_key(name: &str) -> String {
    format!("{}{}", VIEW_PREFIX, name)
}
