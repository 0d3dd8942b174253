use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::{
    requests::{CreateGarageRequest, UpdateGarageRequest, ShopHoursRequest},
    responses::GarageCreatedResponse,
};
use crate::api::extractors::{auth::AuthUser, garage::GarageId};
use crate::domain::models::{
    garage::Garage, schedule::parse_clock, settings::{CalendarNote, MiscSettings}, user::User,
};
use std::sync::Arc;
use crate::error::AppError;
use chrono_tz::Tz;
use rand::{distributions::Alphanumeric, Rng};
use argon2::{password_hash::SaltString, Argon2, PasswordHasher};
use tracing::info;

const DEFAULT_OWNER_USERNAME: &str = "owner";

pub async fn create_garage(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateGarageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let slug = payload.slug.trim().to_lowercase();
    if slug.is_empty() {
        return Err(AppError::Validation("Slug must not be empty".into()));
    }

    let timezone = payload.timezone.unwrap_or_else(|| "UTC".to_string());
    validate_timezone(&timezone)?;

    let garage = Garage::new(payload.name, slug, timezone);
    let created_garage = state.garage_repo.create(&garage).await?;

    info!("Garage created: {}", created_garage.id);

    let owner_password: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect();

    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::default()
        .hash_password(owner_password.as_bytes(), &salt)
        .map_err(|_| AppError::Internal)?
        .to_string();

    let owner_username = payload.owner_username
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_OWNER_USERNAME.to_string());

    let owner = User::new_owner(created_garage.id.clone(), owner_username.clone(), password_hash);
    state.user_repo.create(&owner).await?;

    // Capacity settings stay unconfigured until the owner sets them per mode.
    state.settings_repo.upsert_misc(&MiscSettings::new(created_garage.id.clone())).await?;
    state.settings_repo.upsert_note(&CalendarNote::new(created_garage.id.clone())).await?;

    Ok(Json(GarageCreatedResponse {
        garage_id: created_garage.id,
        owner_username,
        owner_secret: owner_password,
    }))
}

pub async fn get_garage_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let garage = state.garage_repo.find_by_slug(&slug).await?
        .ok_or(AppError::NotFound("Garage not found".into()))?;

    Ok(Json(garage))
}

pub async fn get_current_garage(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let garage_id = user.0.garage_id;
    let garage = state.garage_repo.find_by_id(&garage_id).await?
        .ok_or(AppError::NotFound("Garage not found".into()))?;
    Ok(Json(garage))
}

pub async fn update_garage(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<UpdateGarageRequest>,
) -> Result<impl IntoResponse, AppError> {
    let garage_id = user.0.garage_id;
    let mut garage = state.garage_repo.find_by_id(&garage_id).await?
        .ok_or(AppError::NotFound("Garage not found".into()))?;

    if let Some(name) = payload.name {
        garage.name = name;
    }
    if let Some(timezone) = payload.timezone {
        validate_timezone(&timezone)?;
        garage.timezone = timezone;
    }

    let updated = state.garage_repo.update(&garage).await?;
    info!("Garage updated: {}", garage_id);
    Ok(Json(updated))
}

pub async fn update_shop_hours(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    GarageId(garage_id): GarageId,
    Json(payload): Json<ShopHoursRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.ensure_owner(&garage_id)?;

    for entry in payload.shop_hours.iter().filter(|h| !h.is_closed) {
        if parse_clock(&entry.start).is_none() || parse_clock(&entry.end).is_none() {
            return Err(AppError::Validation(format!("Invalid shop hours for {}", entry.day)));
        }
    }

    let mut garage = state.garage_repo.find_by_id(&garage_id).await?
        .ok_or(AppError::NotFound("Garage not found".into()))?;

    garage.shop_hours_json = serde_json::to_string(&payload.shop_hours)
        .map_err(|e| AppError::InternalWithMsg(e.to_string()))?;

    let updated = state.garage_repo.update(&garage).await?;
    info!("Shop hours updated for garage: {}", garage_id);
    Ok(Json(updated.shop_hours()))
}

fn validate_timezone(timezone: &str) -> Result<(), AppError> {
    timezone.parse::<Tz>()
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("Invalid timezone '{}'", timezone)))
}
