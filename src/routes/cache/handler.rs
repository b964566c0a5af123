use std::time::Duration;

use axum::{extract::State, response::IntoResponse};

use crate::{AppState, cache::ViewCacheOperations, error::AppError};

/// 缓存键取路由路径
const EXPENSIVE_QUERY_KEY: &str = "/expensive_query";

const EXPENSIVE_QUERY_RESULT: &str = "This is a result of a time-consuming query!";

// 模拟一次耗时的数据库查询
async fn run_expensive_query(delay: Duration) -> Result<String, AppError> {
    tokio::time::sleep(delay).await;
    Ok(EXPENSIVE_QUERY_RESULT.to_string())
}

/// 结果缓存 `CACHE_TIMEOUT` 秒，响应头 `X-Cache` 标明是否命中
pub async fn expensive_query(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let delay = state.config.expensive_query_delay();
    let mut computed = false;
    let flag = &mut computed;

    let result: String = ViewCacheOperations::get_or_compute(
        &state.cache,
        EXPENSIVE_QUERY_KEY,
        state.config.cache_timeout(),
        move || async move {
            *flag = true;
            run_expensive_query(delay).await
        },
    )
    .await?;

    let status = if computed { "MISS" } else { "HIT" };
    Ok(([("x-cache", status)], result))
}

pub async fn clear_cache(State(state): State<AppState>) -> Result<&'static str, AppError> {
    ViewCacheOperations::invalidate_all(&state.cache).await?;
    Ok("Cache cleared!")
}
