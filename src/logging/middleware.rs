use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use std::time::{Duration, Instant};
use tower_http::request_id::{
    MakeRequestUuid, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};

fn request_id(request: &Request) -> String {
    request
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Logs every request on entry and on completion, at a level that follows
/// the response status.
pub async fn log_request(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let req_id = request_id(&request);

    tracing::info!(
        request_id = %req_id,
        method = %method,
        uri = %uri,
        version = ?request.version(),
        "incoming request"
    );

    let response = next.run(request).await;

    log_completion(&req_id, &method, &uri, response.status(), start.elapsed());

    response
}

fn log_completion(
    req_id: &str,
    method: &axum::http::Method,
    uri: &axum::http::Uri,
    status: StatusCode,
    duration: Duration,
) {
    let duration_ms = duration.as_millis();

    if status.is_server_error() {
        tracing::error!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration_ms,
            "request completed with error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration_ms,
            "request completed with client error"
        );
    } else {
        tracing::info!(
            request_id = %req_id,
            method = %method,
            uri = %uri,
            status = %status,
            duration_ms = %duration_ms,
            "request completed successfully"
        );
    }
}

pub fn request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}
