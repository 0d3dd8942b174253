use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CalendarNoteRequest, MiscSettingsRequest};
use crate::api::extractors::{auth::AuthUser, garage::GarageId};
use crate::domain::models::settings::{CalendarNote, MiscSettings, MAX_BOOKING_WINDOW_MONTHS};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub async fn get_misc_settings(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    let settings = state.settings_repo.find_misc(&garage_id).await?
        .ok_or(AppError::NotFound("Misc settings are not configured".into()))?;
    Ok(Json(settings))
}

pub async fn upsert_misc_settings(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Json(payload): Json<MiscSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;

    let mut settings = state.settings_repo.find_misc(&garage_id).await?
        .unwrap_or_else(|| MiscSettings::new(garage_id.clone()));

    if let Some(window) = payload.booking_window {
        if !(0..=MAX_BOOKING_WINDOW_MONTHS).contains(&window) {
            return Err(AppError::Validation(format!("booking_window must be between 0 and {}", MAX_BOOKING_WINDOW_MONTHS)));
        }
        settings.booking_window = window;
    }
    if let Some(sum) = payload.is_use_single_service_duration {
        settings.is_use_single_service_duration = sum;
    }
    settings.updated_at = Utc::now();

    let saved = state.settings_repo.upsert_misc(&settings).await?;
    info!("Misc settings updated for garage: {}", garage_id);
    Ok(Json(saved))
}

pub async fn get_calendar_notes(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    let note = state.settings_repo.find_note(&garage_id).await?
        .ok_or(AppError::NotFound("Calendar notes are not configured".into()))?;
    Ok(Json(note))
}

pub async fn upsert_calendar_notes(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Json(payload): Json<CalendarNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;

    let mut note = state.settings_repo.find_note(&garage_id).await?
        .unwrap_or_else(|| CalendarNote::new(garage_id.clone()));

    if let Some(text) = payload.dropoff {
        note.dropoff = text;
    }
    if let Some(text) = payload.waiter {
        note.waiter = text;
    }
    if let Some(text) = payload.pickup {
        note.pickup = text;
    }
    note.updated_at = Utc::now();

    let saved = state.settings_repo.upsert_note(&note).await?;
    info!("Calendar notes updated for garage: {}", garage_id);
    Ok(Json(saved))
}
