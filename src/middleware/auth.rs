use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{AppState, auth::Authenticator, error::AppError, utils::session_id_from};

/// 受保护路由的会话检查
///
/// 通过后把会话放入请求扩展，处理函数用 `Extension<CachedSession>` 取出；
/// 未登录时返回 [`AppError::Unauthenticated`]，即重定向到登录页。
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session_id = session_id_from(&jar, &state.config);
    let session = Authenticator::from_state(&state)
        .require_session(session_id.as_deref())
        .await
        .inspect_err(|_| tracing::debug!("unauthenticated request to {}", req.uri().path()))?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
