use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{requests::CapacitySettingRequest, responses::CapacitySettingResponse};
use crate::api::extractors::{auth::AuthUser, garage::GarageId};
use crate::domain::models::{
    capacity::{CapacitySetting, SCHEDULE_AUTOMATIC, SCHEDULE_MANUAL},
    schedule::{parse_clock, Mode, MAX_INTERVAL_MIN},
};
use crate::error::AppError;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

pub async fn get_capacity(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Path((_, mode)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    let mode = Mode::from_path(&mode)?;

    let setting = state.capacity_repo.find(&garage_id, mode).await?
        .ok_or_else(|| AppError::NotFound(format!("Capacity settings for {} are not configured", mode)))?;

    Ok(Json(CapacitySettingResponse::from(setting)))
}

pub async fn upsert_capacity(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Path((_, mode)): Path<(String, String)>,
    Json(payload): Json<CapacitySettingRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    let mode = Mode::from_path(&mode)?;

    let mut setting = state.capacity_repo.find(&garage_id, mode).await?
        .unwrap_or_else(|| CapacitySetting::new(garage_id.clone(), mode));

    if let Some(schedule_mode) = payload.schedule_mode {
        let normalized = schedule_mode.trim().to_lowercase();
        if normalized != SCHEDULE_AUTOMATIC && normalized != SCHEDULE_MANUAL {
            return Err(AppError::Validation("schedule_mode must be 'automatic' or 'manual'".into()));
        }
        setting.schedule_mode = normalized;
    }
    if let Some(show) = payload.show_timeslots {
        setting.show_timeslots = show;
    }
    if let Some(interval) = payload.timeslot_interval {
        if interval <= 0 || interval as i64 > MAX_INTERVAL_MIN {
            return Err(AppError::Validation(format!("timeslot_interval must be between 1 and {}", MAX_INTERVAL_MIN)));
        }
        setting.timeslot_interval = interval;
    }
    if let Some(hours) = payload.scheduling_hours {
        for entry in hours.iter().filter(|h| !h.is_closed) {
            if parse_clock(&entry.start).is_none() || parse_clock(&entry.end).is_none() {
                return Err(AppError::Validation(format!("Invalid scheduling hours for {}", entry.day)));
            }
        }
        setting.scheduling_hours_json = to_json(&hours)?;
    }
    if let Some(text_slots) = payload.text_timeslots {
        if let Some(bad) = text_slots.iter().find(|t| parse_clock(&t.time).is_none()) {
            return Err(AppError::Validation(format!("Invalid time '{}' for text timeslot '{}'", bad.time, bad.label)));
        }
        setting.text_timeslots_json = to_json(&text_slots)?;
    }
    if let Some(manual) = payload.manual_timings {
        for day in &manual {
            if let Some(bad) = day.timings.iter().find(|t| parse_clock(&t.start).is_none()) {
                return Err(AppError::Validation(format!("Invalid manual timing '{}' for {}", bad.start, day.day)));
            }
        }
        setting.manual_timings_json = to_json(&manual)?;
    }
    setting.updated_at = Utc::now();

    let saved = state.capacity_repo.upsert(&setting).await?;
    info!("Capacity settings for {} updated in garage: {}", mode, garage_id);
    Ok(Json(CapacitySettingResponse::from(saved)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError::InternalWithMsg(e.to_string()))
}
