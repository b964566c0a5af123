use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    AppState,
    auth::Authenticator,
    error::AppError,
    utils::{expired_session_cookie, session_cookie, session_id_from},
    views,
};

use super::model::VisitorLoginForm;

pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Result<String, AppError> {
    let session_id = session_id_from(&jar, &state.config);
    let session = Authenticator::from_state(&state)
        .current_session(session_id.as_deref())
        .await?;

    Ok(match session {
        Some(session) => format!("Logged in as {}", session.identity.username()),
        None => "You are not logged in".to_string(),
    })
}

pub async fn login_form() -> Html<String> {
    views::demo_login_page(None)
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(req): Form<VisitorLoginForm>,
) -> Result<Response, AppError> {
    let auth = Authenticator::from_state(&state);
    let session = match auth.start_visitor_session(&req.username).await {
        Ok(session) => session,
        Err(e) if e.is_user_facing() => {
            return Ok((e.status_code(), views::demo_login_page(Some(&e.to_string()))).into_response());
        }
        Err(e) => return Err(e),
    };

    auth.logout(session_id_from(&jar, &state.config).as_deref())
        .await?;
    let jar = jar.add(session_cookie(&state.config, &session.session_id));
    Ok((jar, Redirect::to("/demo")).into_response())
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    Authenticator::from_state(&state)
        .logout(session_id_from(&jar, &state.config).as_deref())
        .await?;
    let jar = jar.remove(expired_session_cookie(&state.config));
    Ok((jar, Redirect::to("/demo")).into_response())
}
