use axum::{
    Extension, Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    AppState,
    auth::Authenticator,
    cache::CachedSession,
    error::AppError,
    utils::{expired_session_cookie, session_cookie, session_id_from},
    views,
};

use super::model::CredentialsForm;

pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Result<Html<String>, AppError> {
    let session_id = session_id_from(&jar, &state.config);
    let session = Authenticator::from_state(&state)
        .current_session(session_id.as_deref())
        .await?;
    Ok(views::index(session.as_ref().map(|s| s.identity.username())))
}

pub async fn register_form() -> Html<String> {
    views::register_page(None)
}

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let auth = Authenticator::from_state(&state);
    match auth.register(&req.username, &req.password).await {
        Ok(session) => Ok(start_session(&state, &auth, jar, session).await?),
        Err(e) if e.is_user_facing() => {
            Ok((e.status_code(), views::register_page(Some(&e.to_string()))).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn login_form() -> Html<String> {
    views::login_page(None)
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<CredentialsForm>,
) -> Result<Response, AppError> {
    let auth = Authenticator::from_state(&state);
    match auth.login(&req.username, &req.password).await {
        Ok(session) => Ok(start_session(&state, &auth, jar, session).await?),
        Err(e) if e.is_user_facing() => {
            Ok((e.status_code(), views::login_page(Some(&e.to_string()))).into_response())
        }
        Err(e) => Err(e),
    }
}

/// 受保护路由，会话已由中间件校验
pub async fn logout(
    State(state): State<AppState>,
    Extension(session): Extension<CachedSession>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AppError> {
    Authenticator::from_state(&state)
        .logout(Some(&session.session_id))
        .await?;
    tracing::info!("user logged out: {}", session.identity.username());
    Ok((
        jar.remove(expired_session_cookie(&state.config)),
        Redirect::to("/login"),
    ))
}

// 丢弃请求中带来的旧会话，写入新会话 Cookie 并跳转到总览页
async fn start_session(
    state: &AppState,
    auth: &Authenticator,
    jar: CookieJar,
    session: CachedSession,
) -> Result<Response, AppError> {
    if let Some(old) = session_id_from(&jar, &state.config) {
        auth.logout(Some(&old)).await?;
    }
    let jar = jar.add(session_cookie(&state.config, &session.session_id));
    Ok((jar, Redirect::to("/dashboard")).into_response())
}
