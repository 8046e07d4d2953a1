use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::info;

use models::errors::ModelError;
use models::{LandParcel, NewLandParcel, Status};

use crate::errors::ParcelApiError;
use crate::routes::ServerState;

/// Body of `POST /api/landParcel`. Unknown fields, `id` included, are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLandParcelInput {
    pub name: String,
    pub status: Status,
    pub area: f64,
    pub has_constraints: bool,
}

impl CreateLandParcelInput {
    pub fn into_candidate(self) -> Result<NewLandParcel, ModelError> {
        NewLandParcel::new(self.name, self.status, self.area, self.has_constraints)
    }
}

/// Body of `PUT /api/landParcel`: every field is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLandParcelInput {
    pub id: i64,
    pub name: String,
    pub status: Status,
    pub area: f64,
    pub has_constraints: bool,
}

impl UpdateLandParcelInput {
    pub fn into_candidate(self) -> Result<LandParcel, ModelError> {
        let fields = NewLandParcel::new(self.name, self.status, self.area, self.has_constraints)?;
        Ok(fields.into_parcel(self.id))
    }
}

#[utoipa::path(
    get, path = "/api/landParcel", tag = "land_parcel",
    responses(
        (status = 200, description = "Land parcels in a `landParcels` array", body = crate::openapi::LandParcelResponseDoc),
        (status = 204, description = "No land parcels stored"),
        (status = 500, description = "The request was unsuccessful")
    )
)]
pub async fn list_land_parcels(State(state): State<ServerState>) -> Result<Response, ParcelApiError> {
    let response = state
        .parcels
        .list_parcels()
        .await
        .map_err(|e| ParcelApiError::Internal(e.to_string()))?;
    if response.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    info!(count = response.len(), "list land parcels");
    Ok((StatusCode::OK, Json(response)).into_response())
}

#[utoipa::path(
    get, path = "/api/landParcel/{id}", tag = "land_parcel",
    params(("id" = i64, Path, description = "Object id of the land parcel")),
    responses(
        (status = 200, description = "The land parcel", body = crate::openapi::LandParcelDoc),
        (status = 204, description = "No land parcel with this id"),
        (status = 400, description = "Id is not a 64-bit integer"),
        (status = 500, description = "The request was unsuccessful")
    )
)]
pub async fn get_land_parcel(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Response, ParcelApiError> {
    let Path(id) = id?;
    let found = state
        .parcels
        .get_parcel(id)
        .await
        .map_err(|e| ParcelApiError::Internal(e.to_string()))?;
    Ok(match found {
        Some(parcel) => Json(parcel).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

#[utoipa::path(
    post, path = "/api/landParcel", tag = "land_parcel",
    request_body = crate::openapi::CreateLandParcelDoc,
    responses(
        (status = 201, description = "Created; the id is assigned by the server", body = crate::openapi::LandParcelDoc),
        (status = 400, description = "Malformed or invalid land parcel")
    )
)]
pub async fn create_land_parcel(
    State(state): State<ServerState>,
    payload: Result<Json<CreateLandParcelInput>, JsonRejection>,
) -> Result<(StatusCode, Json<LandParcel>), ParcelApiError> {
    let Json(input) = payload?;
    let candidate = input.into_candidate()?;
    let created = state
        .parcels
        .create_parcel(candidate)
        .await
        .map_err(|e| ParcelApiError::BadRequest(e.to_string()))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put, path = "/api/landParcel", tag = "land_parcel",
    request_body = crate::openapi::LandParcelDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::LandParcelDoc),
        (status = 400, description = "Malformed land parcel or update failed"),
        (status = 404, description = "No land parcel with this id", body = String, content_type = "text/plain")
    )
)]
pub async fn update_land_parcel(
    State(state): State<ServerState>,
    payload: Result<Json<UpdateLandParcelInput>, JsonRejection>,
) -> Result<Json<LandParcel>, ParcelApiError> {
    let Json(input) = payload?;
    let candidate = input.into_candidate()?;
    let updated = state
        .parcels
        .update_parcel(candidate)
        .await
        .map_err(|e| ParcelApiError::not_found_or(e, ParcelApiError::BadRequest))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/api/landParcel/{id}", tag = "land_parcel",
    params(("id" = i64, Path, description = "Object id of the land parcel")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 400, description = "Id is not a 64-bit integer"),
        (status = 404, description = "No land parcel with this id", body = String, content_type = "text/plain"),
        (status = 500, description = "The request was unsuccessful")
    )
)]
pub async fn delete_land_parcel(
    State(state): State<ServerState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ParcelApiError> {
    let Path(id) = id?;
    state
        .parcels
        .delete_parcel(id)
        .await
        .map_err(|e| ParcelApiError::not_found_or(e, ParcelApiError::Internal))?;
    Ok(StatusCode::OK)
}
