/**
 * Health Routes
 * Liveness endpoint; never touches the document store
 */
use axum::{http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// Seconds since startup
    pub uptime: u64,
}

/// GET / - Liveness
pub async fn server_status() -> impl IntoResponse {
    let response = StatusResponse {
        message: "Server is running smoothly".to_string(),
        timestamp: Utc::now(),
        uptime: SERVER_START.elapsed().as_secs(),
    };

    (StatusCode::OK, Json(response))
}
