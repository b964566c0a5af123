use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use bcrypt::{hash, verify};

use crate::config::Config;
use crate::error::AppError;

/// bcrypt 计算量大，放到阻塞线程池执行
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(password.as_bytes(), cost))
        .await
        .map_err(|e| {
            tracing::error!("password hashing task failed: {}", e);
            AppError::InternalServerError
        })??;
    Ok(hashed)
}

pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let matched = tokio::task::spawn_blocking(move || verify(password.as_bytes(), &hash))
        .await
        .map_err(|e| {
            tracing::error!("password verification task failed: {}", e);
            AppError::InternalServerError
        })??;
    Ok(matched)
}

/// 会话 Cookie，仅限 HTTP 访问
pub fn session_cookie(config: &Config, session_id: &str) -> Cookie<'static> {
    Cookie::build((config.session_cookie_name.clone(), session_id.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// 用于删除会话 Cookie，路径需与写入时一致
pub fn expired_session_cookie(config: &Config) -> Cookie<'static> {
    Cookie::build((config.session_cookie_name.clone(), ""))
        .path("/")
        .build()
}

/// 从请求 Cookie 中取出会话 ID
pub fn session_id_from(jar: &CookieJar, config: &Config) -> Option<String> {
    jar.get(&config.session_cookie_name)
        .map(|cookie| cookie.value().to_owned())
        .filter(|value| !value.is_empty())
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
