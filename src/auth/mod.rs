//! 会话认证
//!
//! 负责注册、登录、登出以及受保护路由的会话校验。会话保存在 [`CacheStore`] 中，
//! 客户端只持有不透明的会话 ID。

use std::time::Duration;

use sqlx::SqlitePool;

use crate::AppState;
use crate::cache::{CacheStore, CachedSession, SessionCacheOperations, SessionIdentity};
use crate::database::UserOperation;
use crate::error::AppError;
use crate::utils::{hash_password, verify_password};

/// 用户名最大长度，与表单校验一致
pub const MAX_USERNAME_LEN: usize = 150;

#[derive(Clone)]
pub struct Authenticator {
    pool: SqlitePool,
    cache: CacheStore,
    session_ttl: Duration,
    hash_cost: u32,
}

impl Authenticator {
    pub fn new(pool: SqlitePool, cache: CacheStore, session_ttl: Duration, hash_cost: u32) -> Self {
        Self {
            pool,
            cache,
            session_ttl,
            hash_cost,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            state.pool.clone(),
            state.cache.clone(),
            state.config.session_ttl(),
            state.config.password_hash_cost,
        )
    }

    /// 注册新用户并建立会话
    pub async fn register(&self, username: &str, password: &str) -> Result<CachedSession, AppError> {
        let username = validate_credentials(username, password)?;
        let password_hash = hash_password(password, self.hash_cost).await?;

        // 唯一性检查与插入是同一条语句，避免并发注册出现重名
        let user = match UserOperation::create(&self.pool, username, &password_hash).await {
            Ok(user) => user,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                tracing::info!("registration rejected, username taken: {}", username);
                return Err(AppError::DuplicateUser);
            }
            Err(e) => return Err(e.into()),
        };

        self.establish(SessionIdentity::User {
            user_id: user.id,
            username: user.username,
        })
        .await
    }

    /// 校验用户名和密码并建立会话
    pub async fn login(&self, username: &str, password: &str) -> Result<CachedSession, AppError> {
        let username = username.trim();
        let Some(user) = UserOperation::find_by_username(&self.pool, username).await? else {
            tracing::warn!("login failed, unknown user: {}", username);
            return Err(AppError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash).await? {
            tracing::warn!("login failed, wrong password for user: {}", username);
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!("user logged in: {}", user.username);
        self.establish(SessionIdentity::User {
            user_id: user.id,
            username: user.username,
        })
        .await
    }

    /// 访客会话，只记录用户名，不校验密码
    pub async fn start_visitor_session(&self, username: &str) -> Result<CachedSession, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::validation("Username is required."));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(AppError::validation("Username is too long."));
        }

        self.establish(SessionIdentity::Visitor {
            username: username.to_string(),
        })
        .await
    }

    /// 销毁会话。没有会话或会话已失效时什么也不做。
    pub async fn logout(&self, session_id: Option<&str>) -> Result<(), AppError> {
        if let Some(session_id) = session_id {
            SessionCacheOperations::remove_session(&self.cache, session_id).await?;
            tracing::debug!("session destroyed: {}", session_id);
        }
        Ok(())
    }

    /// 查找当前会话，不存在时返回 `None`
    pub async fn current_session(
        &self,
        session_id: Option<&str>,
    ) -> Result<Option<CachedSession>, AppError> {
        match session_id {
            Some(id) if !id.is_empty() => {
                Ok(SessionCacheOperations::get_session(&self.cache, id).await?)
            }
            _ => Ok(None),
        }
    }

    /// 受保护路由的入口检查，只接受注册用户的会话
    pub async fn require_session(&self, session_id: Option<&str>) -> Result<CachedSession, AppError> {
        match self.current_session(session_id).await? {
            Some(session) if session.identity.user_id().is_some() => Ok(session),
            _ => Err(AppError::Unauthenticated),
        }
    }

    async fn establish(&self, identity: SessionIdentity) -> Result<CachedSession, AppError> {
        let session =
            SessionCacheOperations::create_session(&self.cache, identity, self.session_ttl).await?;
        Ok(session)
    }
}

fn validate_credentials<'a>(username: &'a str, password: &str) -> Result<&'a str, AppError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::validation("Username and password are required."));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(AppError::validation("Username is too long."));
    }
    Ok(username)
}
