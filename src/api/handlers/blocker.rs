use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::api::dtos::{requests::BlockerRequest, responses::BlockerResponse};
use crate::api::extractors::{auth::AuthUser, garage::GarageId};
use crate::domain::models::{
    blocker::{AppointmentScope, BlockType, Blocker, TimeScope},
    schedule::{parse_weekday, weekday_name},
};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_blockers(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    let blockers = state.blocker_repo.list(&garage_id).await?;
    Ok(Json(blockers.into_iter().map(BlockerResponse::from).collect::<Vec<_>>()))
}

pub async fn create_blocker(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Json(payload): Json<BlockerRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;

    let kind = parse_block_type(&payload.block_type)?;
    let mut blocker = Blocker::new(garage_id.clone(), kind);
    apply_request(&mut blocker, payload)?;

    let created = state.blocker_repo.create(&blocker).await?;
    info!("Blocker {} ({}) created in garage: {}", created.id, created.block_type, garage_id);
    Ok((StatusCode::CREATED, Json(BlockerResponse::from(created))))
}

pub async fn update_blocker(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Path((_, blocker_id)): Path<(String, String)>,
    Json(payload): Json<BlockerRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;

    let existing = state.blocker_repo.find_by_id(&garage_id, &blocker_id).await?
        .ok_or(AppError::NotFound("Blocker not found".into()))?;

    let kind = parse_block_type(&payload.block_type)?;
    let mut blocker = Blocker::new(garage_id.clone(), kind);
    blocker.id = existing.id;
    blocker.created_at = existing.created_at;
    apply_request(&mut blocker, payload)?;

    let updated = state.blocker_repo.update(&blocker).await?;
    info!("Blocker {} updated in garage: {}", blocker_id, garage_id);
    Ok(Json(BlockerResponse::from(updated)))
}

pub async fn delete_blocker(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Path((_, blocker_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;
    state.blocker_repo.delete(&garage_id, &blocker_id).await?;
    info!("Blocker {} deleted in garage: {}", blocker_id, garage_id);
    Ok(StatusCode::NO_CONTENT)
}

fn parse_block_type(raw: &str) -> Result<BlockType, AppError> {
    raw.trim().parse::<BlockType>().map_err(AppError::Validation)
}

/// Copies a validated request onto `blocker`, replacing every rule field.
fn apply_request(blocker: &mut Blocker, payload: BlockerRequest) -> Result<(), AppError> {
    if let (Some(start), Some(end)) = (payload.start_on, payload.end_on) {
        if end < start {
            return Err(AppError::Validation("end_on must not be before start_on".into()));
        }
    }
    if payload.end_on.is_some() && payload.start_on.is_none() {
        return Err(AppError::Validation("end_on requires start_on".into()));
    }

    let after = day_count(payload.block_after_days.map(|v| v.into_text()), "block_after_days")?;
    let length = day_count(payload.block_for_days.map(|v| v.into_text()), "block_for_days")?;

    let mut days = Vec::new();
    for raw in split_values(payload.days_of_week.map(|d| d.into_vec()).unwrap_or_default()) {
        let day = parse_weekday(&raw)
            .ok_or_else(|| AppError::Validation(format!("Unknown day '{}'", raw)))?;
        let name = weekday_name(day);
        if !days.contains(&name) {
            days.push(name);
        }
    }

    let mut scopes = Vec::new();
    for raw in split_values(payload.apply_to_appointment_types.map(|a| a.into_vec()).unwrap_or_default()) {
        let scope: AppointmentScope = serde_json::from_value(serde_json::Value::String(raw.to_lowercase()))
            .map_err(|_| AppError::Validation(format!("Unknown appointment type '{}'", raw)))?;
        if !scopes.contains(&scope) {
            scopes.push(scope);
        }
    }
    if scopes.is_empty() {
        scopes.push(AppointmentScope::All);
    }

    blocker.is_enable = payload.is_enable.unwrap_or(true);
    blocker.start_on = payload.start_on;
    blocker.end_on = payload.end_on;
    blocker.block_after_days = after;
    blocker.block_for_days = length;
    blocker.days_of_week_json = to_json(&days)?;
    blocker.start_time = payload.start_time.filter(|s| !s.trim().is_empty());
    blocker.end_time = payload.end_time.filter(|s| !s.trim().is_empty());
    blocker.apply_to_json = to_json(&scopes)?;
    blocker.holiday_name = payload.selected_holiday.as_ref().map(|h| h.name.clone());
    blocker.holiday_date = payload.selected_holiday.map(|h| h.date);

    match blocker.time_scope() {
        TimeScope::Incomplete => {
            return Err(AppError::Validation("start_time and end_time must both be valid times, or both omitted".into()));
        }
        TimeScope::Range(from, to) if from >= to => {
            return Err(AppError::Validation("end_time must be after start_time".into()));
        }
        _ => {}
    }
    if blocker.kind() == Some(BlockType::HolidayBlocker) && blocker.holiday_date.is_none() {
        return Err(AppError::Validation("holiday_blocker requires selected_holiday".into()));
    }
    Ok(())
}

/// Splits comma-delimited entries so `"monday,friday"` and `["monday", "friday"]` read the same.
fn split_values(values: Vec<String>) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.split(','))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn day_count(raw: Option<String>, field: &str) -> Result<Option<String>, AppError> {
    match raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<u32>()
            .map(|n| Some(n.to_string()))
            .map_err(|_| AppError::Validation(format!("{} must be a non-negative whole number", field))),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string(value).map_err(|e| AppError::InternalWithMsg(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dtos::requests::NumberOrText;
    use crate::domain::models::schedule::{Mode, OneOrMany};
    use chrono::Weekday;

    fn request(block_type: &str) -> BlockerRequest {
        BlockerRequest {
            block_type: block_type.into(),
            is_enable: None,
            start_on: None,
            end_on: None,
            block_after_days: None,
            block_for_days: None,
            days_of_week: None,
            start_time: None,
            end_time: None,
            apply_to_appointment_types: None,
            selected_holiday: None,
        }
    }

    #[test]
    fn test_apply_request_normalizes_lists() {
        let mut payload = request("schedule_blocker");
        payload.days_of_week = Some(OneOrMany::One("Monday, fri".into()));
        payload.apply_to_appointment_types = Some(OneOrMany::Many(vec!["Waiter".into(), "pickup".into()]));
        payload.start_time = Some("11:00 AM".into());
        payload.end_time = Some("12:00 PM".into());

        let mut blocker = Blocker::new("g".into(), BlockType::ScheduleBlocker);
        apply_request(&mut blocker, payload).unwrap();

        assert_eq!(blocker.days_of_week(), vec![Weekday::Mon, Weekday::Fri]);
        assert!(blocker.applies_to(Mode::Waiter));
        assert!(blocker.applies_to(Mode::Pickup));
        assert!(!blocker.applies_to(Mode::Dropoff));
    }

    #[test]
    fn test_apply_request_accepts_numeric_day_counts() {
        let mut payload = request("schedule_blocker");
        payload.block_after_days = Some(NumberOrText::Number(2));
        payload.block_for_days = Some(NumberOrText::Text(" 3 ".into()));

        let mut blocker = Blocker::new("g".into(), BlockType::ScheduleBlocker);
        apply_request(&mut blocker, payload).unwrap();
        assert_eq!(blocker.relative_window(), Some((2, 3)));
    }

    #[test]
    fn test_apply_request_rejects_bad_input() {
        let mut half_range = request("schedule_blocker");
        half_range.start_time = Some("11:00 AM".into());
        let mut blocker = Blocker::new("g".into(), BlockType::ScheduleBlocker);
        assert!(matches!(apply_request(&mut blocker, half_range), Err(AppError::Validation(_))));

        let mut bad_day = request("schedule_blocker");
        bad_day.days_of_week = Some(OneOrMany::One("someday".into()));
        assert!(matches!(apply_request(&mut blocker, bad_day), Err(AppError::Validation(_))));

        let mut negative = request("schedule_blocker");
        negative.block_for_days = Some(NumberOrText::Number(-1));
        assert!(matches!(apply_request(&mut blocker, negative), Err(AppError::Validation(_))));

        let mut inverted = request("schedule_blocker");
        inverted.start_time = Some("2:00 PM".into());
        inverted.end_time = Some("11:00 AM".into());
        match apply_request(&mut blocker, inverted) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "end_time must be after start_time"),
            other => panic!("inverted range accepted: {:?}", other),
        }

        let mut empty = request("schedule_blocker");
        empty.start_time = Some("11:00 AM".into());
        empty.end_time = Some("11:00 AM".into());
        assert!(matches!(apply_request(&mut blocker, empty), Err(AppError::Validation(_))));

        let mut holiday = Blocker::new("g".into(), BlockType::HolidayBlocker);
        assert!(matches!(apply_request(&mut holiday, request("holiday_blocker")), Err(AppError::Validation(_))));

        assert!(parse_block_type("vacation").is_err());
    }
}
