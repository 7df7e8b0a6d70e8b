//! Benefits API Server
//!
//! A small HTTP service for managing employee benefits: create, list,
//! activate, deactivate and delete. Uses hexagonal (ports & adapters)
//! architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    routing::{delete, get, put},
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::SqlBenefitRepository;
use app::BenefitService;
use config::Config;
use error::AppError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub benefit_service: Arc<BenefitService<SqlBenefitRepository>>,
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        let benefit_repo = Arc::new(SqlBenefitRepository::new(db.clone()));
        Self {
            benefit_service: Arc::new(BenefitService::new(benefit_repo)),
            db,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    status: &'static str,
    version: &'static str,
    database: &'static str,
    timestamp: String,
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, label, database) = match state.db.ping().await {
        Ok(()) => (StatusCode::OK, "ok", "connected"),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", "disconnected")
        }
    };

    (
        status,
        Json(HealthResponse {
            success: status.is_success(),
            status: label,
            version: env!("CARGO_PKG_VERSION"),
            database,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }),
    )
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

/// Build the HTTP router over the given state
pub fn router(state: AppState) -> Router {
    let benefit_routes = Router::new()
        .route(
            "/benefits",
            get(handlers::list_benefits).post(handlers::create_benefit),
        )
        .route("/benefits/count", get(handlers::count_benefits))
        .route("/benefits/:id/activate", put(handlers::activate_benefit))
        .route(
            "/benefits/:id/deactivate",
            put(handlers::deactivate_benefit),
        )
        .route("/benefits/:id", delete(handlers::delete_benefit));

    Router::new()
        .route("/health", get(health))
        .nest("/api", benefit_routes)
        .fallback(route_not_found)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,benefits_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Benefits API...");

    // Load configuration
    let config = Config::from_env();

    tracing::info!("Connecting to database...");
    let db = adapters::connect(&config)
        .await
        .context("Failed to connect to database")?;

    if config.db_sync_schema {
        adapters::sync_schema(&db)
            .await
            .context("Failed to synchronize database schema")?;
    }

    let state = AppState::new(db.clone());

    if config.db_seed {
        let inserted = state
            .benefit_service
            .seed_sample_data()
            .await
            .context("Failed to seed sample data")?;
        tracing::info!(inserted, "Seed step finished");
    }

    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    db.close().await.context("Failed to close database")?;
    tracing::info!("Database connection closed");

    Ok(())
}
