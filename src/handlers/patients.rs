use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::database::models::patient::{self, NewPatient, PatientPatch};
use crate::error::ApiError;
use crate::AppState;

use super::params::{parse_id, ListParams};

/// POST /api/v1/patients
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewPatient>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.models.patients.insert(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "patient": created }))))
}

/// GET /api/v1/patients/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let found = state.models.patients.get(id).await?;
    Ok(Json(found))
}

/// GET /api/v1/patients?sort=&filter=&page=&page_size=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filters = params.into_filters("id", patient::SORT_SAFELIST)?;
    let (patients, metadata) = state.models.patients.list(&filters).await?;
    Ok(Json(json!({ "metadata": metadata, "patients": patients })))
}

/// PUT /api/v1/patients/:id - partial patch, absent fields are kept
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<PatientPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let updated = state.models.patients.update(id, patch).await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/patients/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.models.patients.delete(id).await?;
    Ok(Json(json!({ "result": "success" })))
}
