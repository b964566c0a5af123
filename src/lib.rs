use axum::{Router, routing::get};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod utils;
pub mod views;

use cache::CacheStore;
use config::Config;
use middleware::{auth_middleware, log_errors};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub cache: CacheStore,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config, cache: CacheStore) -> Self {
        Self {
            pool,
            config,
            cache,
        }
    }
}

/// 路由表：路径 + 方法 -> 处理函数
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(routes::user::index))
        .route(
            "/register",
            get(routes::user::register_form).post(routes::user::register),
        )
        .route(
            "/login",
            get(routes::user::login_form).post(routes::user::login),
        )
        // 缓存演示
        .route("/expensive_query", get(routes::cache::expensive_query))
        .route("/clear_cache", get(routes::cache::clear_cache))
        // 访客会话演示
        .route("/demo", get(routes::demo::index))
        .route(
            "/demo/login",
            get(routes::demo::login_form).post(routes::demo::login),
        )
        .route("/demo/logout", get(routes::demo::logout));

    let protected_routes = Router::new()
        .route("/dashboard", get(routes::school::dashboard))
        .route(
            "/add_student",
            get(routes::school::add_student_form).post(routes::school::add_student),
        )
        .route(
            "/add_teacher",
            get(routes::school::add_teacher_form).post(routes::school::add_teacher),
        )
        .route(
            "/add_grade",
            get(routes::school::add_grade_form).post(routes::school::add_grade),
        )
        .route("/logout", get(routes::user::logout))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(log_errors)),
        )
        .with_state(state)
}
