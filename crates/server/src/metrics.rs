//! Prometheus counters for the land parcel API, exposed at `/metrics`.

use axum::extract::{MatchedPath, Request};
use axum::http::{header, Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

pub static LAND_PARCEL_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "landparcel_requests_total",
        "Land parcel API requests by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("register landparcel_requests_total")
});

/// CRUD operation name for a matched route.
pub fn operation(method: &Method, matched_path: Option<&str>) -> &'static str {
    let by_id = matched_path.is_some_and(|p| p.ends_with("/:id"));
    match (method, by_id) {
        (&Method::GET, false) => "list",
        (&Method::GET, true) => "get",
        (&Method::POST, _) => "create",
        (&Method::PUT, _) => "update",
        (&Method::DELETE, _) => "delete",
        _ => "other",
    }
}

pub fn outcome(status: StatusCode) -> &'static str {
    match status {
        StatusCode::OK => "ok",
        StatusCode::CREATED => "created",
        StatusCode::NO_CONTENT => "no_content",
        StatusCode::NOT_FOUND => "not_found",
        s if s.is_client_error() => "bad_request",
        _ => "error",
    }
}

/// Route layer counting every land parcel request once its response is known.
pub async fn track(req: Request, next: Next) -> Response {
    let op = operation(req.method(), req.extensions().get::<MatchedPath>().map(MatchedPath::as_str));
    let response = next.run(req).await;
    LAND_PARCEL_REQUESTS.with_label_values(&[op, outcome(response.status())]).inc();
    response
}

pub async fn render() -> Response {
    let encoder = TextEncoder::new();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buf) {
        return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response();
    }
    match String::from_utf8(buf) {
        Ok(body) => ([(header::CONTENT_TYPE, encoder.format_type().to_string())], body).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
