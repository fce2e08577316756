//! 레시피 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use axum::{http::StatusCode, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use recipe_api::auth::TokenService;
use recipe_api::config::ApiConfig;
use recipe_api::repository::PgStore;
use recipe_api::routes::create_api_router;
use recipe_api::state::AppState;
use recipe_core::{init_logging_from_env, MemoryStore, RecipeStore};

/// 저장소 생성.
///
/// `DATABASE_URL`이 있으면 PostgreSQL에 연결하고 마이그레이션을 적용합니다.
async fn create_store(config: &ApiConfig) -> anyhow::Result<Arc<dyn RecipeStore>> {
    let Some(database_url) = config.database_url.as_deref() else {
        warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .context("failed to connect to database")?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .context("failed to run database migrations")?;

    info!("Connected to PostgreSQL and applied migrations");
    Ok(Arc::new(PgStore::new(pool)))
}

/// CORS 레이어 생성.
///
/// `CORS_ORIGINS`(쉼표 구분)가 없으면 모든 origin을 허용합니다.
fn cors_layer() -> CorsLayer {
    let allow_origin = match std::env::var("CORS_ORIGINS") {
        Ok(origins) if !origins.is_empty() => {
            let origins: Vec<_> = origins
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            info!("CORS configured with {} allowed origins", origins.len());
            AllowOrigin::list(origins)
        }
        _ => {
            warn!("CORS_ORIGINS not set, allowing any origin (development mode)");
            AllowOrigin::any()
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
}

fn create_router(state: AppState) -> Router {
    create_api_router(&state)
        .with_state(Arc::new(state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    init_logging_from_env().map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    info!("Starting Recipe API server...");

    let config = ApiConfig::load().map_err(|e| {
        error!(error = %e, "설정 로드 실패. JWT_KEY 환경변수를 확인하세요.");
        e
    })?;
    let addr = config.socket_addr().map_err(|e| {
        error!(
            host = %config.host,
            port = config.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. API_HOST, API_PORT 환경변수를 확인하세요."
        );
        e
    })?;

    let tokens = TokenService::new(&config.jwt_key)?
        .with_ttl(config.token_ttl());
    info!(ttl_hours = config.jwt_ttl_hours, "Token service initialized");

    let store = create_store(&config).await?;
    let state = AppState::new(Arc::new(tokens), store);
    info!(version = %state.version, "Application state initialized");

    let app = create_router(state);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
