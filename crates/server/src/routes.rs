use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::land_parcel::{LandParcelRepository, ParcelService};

use crate::{metrics, openapi};

pub mod land_parcels;

/// Shared handler state: the parcel service over whichever store was wired in.
#[derive(Clone)]
pub struct ServerState {
    pub parcels: Arc<ParcelService<dyn LandParcelRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn LandParcelRepository>) -> Self {
        Self { parcels: Arc::new(ParcelService::new(repo)) }
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router: land parcel CRUD plus health, metrics
/// and the OpenAPI document.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route(
            "/api/landParcel",
            get(land_parcels::list_land_parcels)
                .post(land_parcels::create_land_parcel)
                .put(land_parcels::update_land_parcel),
        )
        .route(
            "/api/landParcel/:id",
            get(land_parcels::get_land_parcel).delete(land_parcels::delete_land_parcel),
        )
        .route_layer(middleware::from_fn(metrics::track));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::render))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    ops.merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
