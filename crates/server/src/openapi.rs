use axum::Json;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

#[derive(Serialize, ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusDoc {
    Saved,
    ShortListed,
    UnderConsideration,
    Approved,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LandParcelDoc {
    pub id: i64,
    pub name: String,
    pub status: StatusDoc,
    pub area: f64,
    pub has_constraints: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLandParcelDoc {
    pub name: String,
    pub status: StatusDoc,
    pub area: f64,
    pub has_constraints: bool,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LandParcelResponseDoc {
    pub land_parcels: Vec<LandParcelDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::land_parcels::list_land_parcels,
        crate::routes::land_parcels::get_land_parcel,
        crate::routes::land_parcels::create_land_parcel,
        crate::routes::land_parcels::update_land_parcel,
        crate::routes::land_parcels::delete_land_parcel,
    ),
    components(
        schemas(
            HealthResponse,
            StatusDoc,
            LandParcelDoc,
            CreateLandParcelDoc,
            LandParcelResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "land_parcel", description = "CRUD operations on land parcels")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
