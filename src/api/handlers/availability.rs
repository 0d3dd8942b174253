use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::AvailabilityResponse;
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::{garage::Garage, schedule::Mode, service::ServiceId};
use crate::domain::services::{availability::compute_availability, schedule_loader::load_schedule_config};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// Query keys a service selection may arrive under.
const SERVICE_KEYS: [&str; 3] = ["services", "services[]", "service_ids"];

/// Calendar flow: the owner's own garage only.
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path((garage_id, mode)): Path<(String, String)>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    let mode = Mode::from_path(&mode)?;

    let garage = state.garage_repo.find_by_id(&garage_id).await?
        .ok_or(AppError::NotFound("Garage not found".into()))?;

    let response = build_response(&state, &garage, mode, &params).await?;
    Ok(Json(response))
}

/// Lead intake flow: unauthenticated, resolved by garage slug.
pub async fn get_public_availability(
    State(state): State<Arc<AppState>>,
    Path((slug, mode)): Path<(String, String)>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<impl IntoResponse, AppError> {
    let mode = Mode::from_path(&mode)?;

    let garage = state.garage_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Garage not found".into()))?;

    let response = build_response(&state, &garage, mode, &params).await?;
    Ok(Json(response))
}

fn selected_services(params: &[(String, String)]) -> Vec<ServiceId> {
    ServiceId::parse_list(
        params
            .iter()
            .filter(|(key, _)| SERVICE_KEYS.contains(&key.as_str()))
            .map(|(_, value)| value.as_str()),
    )
}

async fn build_response(
    state: &AppState,
    garage: &Garage,
    mode: Mode,
    params: &[(String, String)],
) -> Result<AvailabilityResponse, AppError> {
    let service_ids = selected_services(params);
    let config = load_schedule_config(state, garage, mode, &service_ids).await?;
    let availability = compute_availability(&config, Utc::now());

    info!(
        garage_id = %garage.id,
        mode = %mode,
        services = service_ids.len(),
        days = availability.days.len(),
        "availability computed"
    );

    Ok(AvailabilityResponse {
        message: format!("{} availability fetched successfully", mode),
        month: availability.booking_window,
        availability: availability.days,
        notes: availability.notes,
    })
}
