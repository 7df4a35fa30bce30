//! Portfolio API - library for app logic and testing

pub mod db;
pub mod logging;
pub mod routes;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use thiserror::Error;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use db::{DbConfig, DocumentStore, MongoStore, StoreError};

/// Shared handler state: the store connector, injected once at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to connect to the document store: {0}")]
    Store(#[from] StoreError),
    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) when set, otherwise any origin.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS").ok().and_then(|s| {
        let origins: Vec<HeaderValue> = s
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();
        if origins.is_empty() {
            None
        } else {
            Some(origins)
        }
    });

    let allow_origin = match allowed_origins {
        Some(origins) => AllowOrigin::list(origins),
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Create and configure the application router.
pub fn create_app(state: AppState) -> Router {
    let cors = configure_cors();

    Router::new()
        .route("/", get(routes::health::server_status))
        .route("/api/v1/services", get(routes::services::list_services))
        .route(
            "/api/v1/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/api/v1/projects/{id}",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route("/api/v1/educations", get(routes::educations::list_educations))
        .route(
            "/api/v1/skills",
            get(routes::skills::list_skills).post(routes::skills::create_skill),
        )
        .route(
            "/api/v1/skills/{id}",
            axum::routing::put(routes::skills::update_skill).delete(routes::skills::delete_skill),
        )
        .route(
            "/api/v1/blogs",
            get(routes::blogs::list_blogs).post(routes::blogs::create_blog),
        )
        .route(
            "/api/v1/blogs/{id}",
            get(routes::blogs::get_blog)
                .put(routes::blogs::update_blog)
                .delete(routes::blogs::delete_blog),
        )
        .with_state(state)
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        // Same 2 MB cap axum applies to JSON bodies by default
        .layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(cors)
}

/// Resolve the listen address from HOST / PORT.
pub fn listen_addr() -> Result<SocketAddr, StartupError> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);
    let raw = format!("{}:{}", host, port);
    raw.parse().map_err(|_| StartupError::InvalidAddress(raw))
}

/// Run the server (used by main).
pub async fn run() -> Result<(), StartupError> {
    dotenvy::dotenv().ok();

    // Dropping the guards stops the background log writers.
    let _log_guards = logging::init(&logging::LogConfig::from_env());

    routes::health::init_start_time();

    let addr = listen_addr()?;

    // The store must be reachable before any route is served.
    let store = MongoStore::connect(&DbConfig::default())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to connect to MongoDB"))?;

    let app = create_app(AppState::new(Arc::new(store)));
    tracing::info!("CORS configured");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server is running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::MemoryStore;

    #[test]
    fn test_create_app_accepts_any_store() {
        let _app = create_app(AppState::new(Arc::new(MemoryStore::new())));
    }

    #[test]
    fn test_listen_addr_defaults() {
        if std::env::var("HOST").is_err() && std::env::var("PORT").is_err() {
            let addr = listen_addr().unwrap();
            assert_eq!(addr.port(), 5000);
            assert!(addr.ip().is_unspecified());
        }
    }

    #[tokio::test]
    async fn test_unknown_route_returns_not_found() {
        let (app, _) = routes::test_support::test_app();
        let (status, _) =
            routes::test_support::send(&app, "GET", "/api/v1/unknown", None).await;
        assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        use axum::body::Body;
        use axum::http::Request;
        use tower::ServiceExt;

        if std::env::var("ALLOWED_ORIGINS").is_ok() {
            return;
        }
        let (app, _) = routes::test_support::test_app();
        let req = Request::get("/api/v1/services")
            .header("origin", "https://portfolio.example.dev")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        assert_eq!(
            res.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
