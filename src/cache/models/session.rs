use serde::{Deserialize, Serialize};

/// 会话身份
///
/// `User` 由注册或密码登录建立，`Visitor` 只记录访客自报的用户名。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionIdentity {
    User { user_id: i64, username: String },
    Visitor { username: String },
}

impl SessionIdentity {
    pub fn username(&self) -> &str {
        match self {
            SessionIdentity::User { username, .. } | SessionIdentity::Visitor { username } => {
                username
            }
        }
    }

    pub fn user_id(&self) -> Option<i64> {
        match self {
            SessionIdentity::User { user_id, .. } => Some(*user_id),
            SessionIdentity::Visitor { .. } => None,
        }
    }
}

/// 会话缓存数据模型
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CachedSession {
    pub session_id: String,
    pub identity: SessionIdentity,
    pub created_at: i64, // Unix timestamp
    pub expires_at: i64, // Unix timestamp
}
