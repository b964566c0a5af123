use sqlx::SqlitePool;

use crate::database::models::user::UserEntity;

/// 用户数据库操作
pub struct UserOperation;

impl UserOperation {
    /// 插入用户。用户名唯一性由表约束保证，重复时返回唯一约束错误。
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(chrono::Utc::now())
        .fetch_one(pool)
        .await?;

        tracing::info!("created user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<UserEntity>, sqlx::Error> {
        sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}
