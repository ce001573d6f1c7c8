//! # 코칭 대시보드 백엔드 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 연결 풀 생성과 마이그레이션
//! 4. 동기화 서비스, 레이트 리미터 준비
//! 5. 백그라운드 작업(레이트 리밋 정리, 정기 동기화) 시작
//! 6. API 라우터 설정과 HTTP 서버 시작
//! 7. Ctrl+C 시 서버를 멈추고 백그라운드 작업을 취소한 뒤 종료

mod config;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use config::Config;
use middleware::RateLimiter;
use routes::AppState;
use services::sheets::GoogleSheetsClient;
use services::sync::{spawn_scheduled_sync, SyncService};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 만료된 레이트 리밋 항목을 정리하는 주기
const RATE_LIMIT_CLEANUP_EVERY: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅 초기화 ──
    // RUST_LOG가 없으면 coachboard, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coachboard=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting coachboard server on {}:{}", config.host, config.port);
    tracing::debug!(?config, "Loaded configuration");
    if config.sheets_api_key.is_none() && config.sheets_access_token.is_none() {
        tracing::warn!("No Google Sheets credentials configured, sync requests will likely fail");
    }

    // ── 4단계: SQLite 연결 풀과 마이그레이션 ──
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 5단계: 서비스와 공유 상태 ──
    let sync = Arc::new(SyncService::new(GoogleSheetsClient::new(&config), pool.clone()));
    let rate_limiter = Arc::new(RateLimiter::new(
        config.sync_rate_limit,
        config.sync_rate_window,
    ));

    let state = AppState {
        pool: pool.clone(),
        sync: sync.clone(),
        rate_limiter: rate_limiter.clone(),
    };

    // ── 6단계: 백그라운드 작업 ──
    // 종료 시 하나의 토큰으로 모두 취소합니다.
    let shutdown = CancellationToken::new();
    let mut background = vec![rate_limiter.spawn_cleanup(RATE_LIMIT_CLEANUP_EVERY, shutdown.clone())];

    match config.sync_interval {
        Some(every) => {
            tracing::info!("Scheduled sync every {}s", every.as_secs());
            background.push(spawn_scheduled_sync(sync, every, shutdown.clone()));
        }
        None => tracing::info!("Scheduled sync disabled (SYNC_INTERVAL_SECS not set)"),
    }

    // ── 7단계: API 라우터 ──
    // axum 0.8 경로 파라미터 문법: `{client_id}`
    let api_routes = Router::new()
        .route("/clients", get(routes::list_clients))
        .route("/clients/{client_id}", get(routes::get_client))
        .route("/sync", post(routes::trigger_sync))
        .route("/health", get(routes::health_check))
        .with_state(state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 빌드된 프론트엔드가 있으면 같은 서버에서 서빙합니다 (SPA이므로 없는 경로는 index.html).
    let frontend_dist = &config.frontend_dist;
    let app = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from {}", frontend_dist.display());

        let serve_dir = ServeDir::new(frontend_dist)
            .not_found_service(ServeFile::new(frontend_dist.join("index.html")));

        Router::new()
            .nest("/api/v1", api_routes)
            .fallback_service(serve_dir)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    } else {
        tracing::warn!(
            "Frontend dist directory {} not found, serving API only",
            frontend_dist.display()
        );

        Router::new()
            .nest("/api/v1", api_routes)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    };

    // ── 8단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ── 9단계: 정리 ──
    tracing::info!("Shutting down background tasks...");
    shutdown.cancel();
    for handle in background {
        if let Err(e) = handle.await {
            tracing::error!("Background task ended abnormally: {}", e);
        }
    }
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // 신호를 받을 수 없으면 종료 트리거 없이 계속 실행합니다.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
