use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::cache::CacheError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("User already exists.")]
    DuplicateUser,
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("Please log in to access this page.")]
    Unauthenticated,
    #[error("{0}")]
    Validation(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error("internal server error")]
    InternalServerError,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DuplicateUser => StatusCode::CONFLICT,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Unauthenticated => StatusCode::SEE_OTHER,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_)
            | AppError::Cache(_)
            | AppError::PasswordHash(_)
            | AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 是否可以在表单页上直接展示给用户
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AppError::DuplicateUser | AppError::InvalidCredentials | AppError::Validation(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            e if e.is_user_facing() => (e.status_code(), e.to_string()).into_response(),
            e => {
                // 具体原因只写日志，不返回给客户端
                tracing::error!("request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn unauthenticated_redirects_to_login() {
        let response = AppError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[test]
    fn infrastructure_errors_are_generic() {
        let response = AppError::Database(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!AppError::InternalServerError.is_user_facing());
    }

    #[test]
    fn duplicate_user_is_conflict() {
        assert_eq!(AppError::DuplicateUser.status_code(), StatusCode::CONFLICT);
        assert!(AppError::DuplicateUser.is_user_facing());
    }
}
