use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::database::models::doctor::{self, DoctorPatch, NewDoctor};
use crate::error::ApiError;
use crate::AppState;

use super::params::{parse_id, ListParams};

/// POST /api/v1/doctors
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewDoctor>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.models.doctors.insert(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "doctor": created }))))
}

/// GET /api/v1/doctors/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let found = state.models.doctors.get(id).await?;
    Ok(Json(found))
}

/// GET /api/v1/doctors?sort=&filter=&page=&page_size=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filters = params.into_filters("id", doctor::SORT_SAFELIST)?;
    let (doctors, metadata) = state.models.doctors.list(&filters).await?;
    Ok(Json(json!({ "metadata": metadata, "doctors": doctors })))
}

/// PUT /api/v1/doctors/:id - partial patch, absent fields are kept
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DoctorPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let updated = state.models.doctors.update(id, patch).await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/doctors/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.models.doctors.delete(id).await?;
    Ok(Json(json!({ "result": "success" })))
}
