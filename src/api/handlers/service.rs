use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::dtos::requests::CreateServiceRequest;
use crate::api::extractors::{auth::AuthUser, garage::GarageId};
use crate::domain::models::{schedule::MAX_INTERVAL_MIN, service::Service};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    let services = state.service_repo.list(&garage_id).await?;
    Ok(Json(services))
}

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Service name must not be empty".into()));
    }
    if payload.estimated_minutes < 0 || payload.estimated_minutes as i64 > MAX_INTERVAL_MIN {
        return Err(AppError::Validation(format!("estimated_minutes must be between 0 and {}", MAX_INTERVAL_MIN)));
    }

    let mut service = Service::new(garage_id.clone(), payload.name, payload.estimated_minutes);
    service.is_waiter = payload.is_waiter;
    service.is_dropoff = payload.is_dropoff;
    service.is_pickup = payload.is_pickup;

    let created = state.service_repo.create(&service).await?;
    info!("Service created: {} in garage: {}", created.id, garage_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_service(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Path((_, service_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    state.service_repo.delete(&garage_id, &service_id).await?;
    info!("Service deleted: {} in garage: {}", service_id, garage_id);
    Ok(StatusCode::NO_CONTENT)
}
