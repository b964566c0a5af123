use std::net::SocketAddr;

use schoolhouse::{AppState, build_router, cache::CacheStore, config::Config, database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    // 数据库连接池和表结构
    let pool = database::connect(&config.database_url, config.database_max_connections)
        .await
        .expect("Failed to connect to database");
    database::init_schema(&pool)
        .await
        .expect("Failed to create database schema");

    // 配置了 REDIS_URL 时使用 Redis，否则使用进程内缓存
    let cache = match &config.redis_url {
        Some(url) => CacheStore::redis(redis::Client::open(url.as_str()).expect("Invalid REDIS_URL")),
        None => CacheStore::memory(),
    };
    tracing::info!("Using {} cache backend", cache.backend_name());

    let state = AppState::new(pool, config.clone(), cache);
    let app = build_router(state);

    let addr = SocketAddr::new(config.server_host, config.server_port);
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Failed to start server");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 无法监听信号时一直运行，直到进程被外部终止
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
