use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::database::models::appointment::{self, AppointmentPatch, NewAppointment};
use crate::error::ApiError;
use crate::AppState;

use super::params::{parse_id, ListParams};

/// POST /api/v1/appointments
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<NewAppointment>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.models.appointments.insert(input).await?;
    Ok((StatusCode::CREATED, Json(json!({ "appointment": created }))))
}

/// GET /api/v1/appointments/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let found = state.models.appointments.get(id).await?;
    Ok(Json(found))
}

/// GET /api/v1/appointments?sort=&filter=&page=&page_size=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let filters = params.into_filters("id", appointment::SORT_SAFELIST)?;
    let (appointments, metadata) = state.models.appointments.list(&filters).await?;
    Ok(Json(json!({ "metadata": metadata, "appointments": appointments })))
}

/// PUT /api/v1/appointments/:id - partial patch, absent fields are kept
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AppointmentPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    let updated = state.models.appointments.update(id, patch).await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/appointments/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.models.appointments.delete(id).await?;
    Ok(Json(json!({ "result": "success" })))
}

/// GET /api/v1/doctors/:id/appointments
pub async fn by_doctor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    // 404 for an unknown doctor rather than an empty list
    state.models.doctors.get(id).await?;
    let appointments = state.models.appointments.by_doctor(id).await?;
    Ok(Json(json!({ "appointments": appointments })))
}

/// GET /api/v1/patients/:id/appointments
pub async fn by_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id)?;
    state.models.patients.get(id).await?;
    let appointments = state.models.appointments.by_patient(id).await?;
    Ok(Json(json!({ "appointments": appointments })))
}
