use crate::domain::models::{
    garage::Garage, user::User, auth::RefreshTokenRecord, capacity::CapacitySetting,
    blocker::Blocker, settings::{MiscSettings, CalendarNote}, service::{Service, ServiceId},
    schedule::Mode,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait GarageRepository: Send + Sync {
    async fn create(&self, garage: &Garage) -> Result<Garage, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Garage>, AppError>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Garage>, AppError>;
    async fn update(&self, garage: &Garage) -> Result<Garage, AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_username(
        &self,
        garage_id: &str,
        username: &str,
    ) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, garage_id: &str, id: &str) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn create_refresh_token(&self, record: &RefreshTokenRecord) -> Result<(), AppError>;
    async fn find_refresh_token(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshTokenRecord>, AppError>;
    async fn delete_refresh_token(&self, token_hash: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait CapacityRepository: Send + Sync {
    async fn upsert(&self, setting: &CapacitySetting) -> Result<CapacitySetting, AppError>;
    async fn find(&self, garage_id: &str, mode: Mode) -> Result<Option<CapacitySetting>, AppError>;
}

#[async_trait]
pub trait BlockerRepository: Send + Sync {
    async fn create(&self, blocker: &Blocker) -> Result<Blocker, AppError>;
    async fn find_by_id(&self, garage_id: &str, id: &str) -> Result<Option<Blocker>, AppError>;
    async fn list(&self, garage_id: &str) -> Result<Vec<Blocker>, AppError>;
    async fn list_enabled(&self, garage_id: &str) -> Result<Vec<Blocker>, AppError>;
    async fn update(&self, blocker: &Blocker) -> Result<Blocker, AppError>;
    async fn delete(&self, garage_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn upsert_misc(&self, settings: &MiscSettings) -> Result<MiscSettings, AppError>;
    async fn find_misc(&self, garage_id: &str) -> Result<Option<MiscSettings>, AppError>;
    async fn upsert_note(&self, note: &CalendarNote) -> Result<CalendarNote, AppError>;
    async fn find_note(&self, garage_id: &str) -> Result<Option<CalendarNote>, AppError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn list(&self, garage_id: &str) -> Result<Vec<Service>, AppError>;
    async fn find_by_ids(
        &self,
        garage_id: &str,
        ids: &[ServiceId],
    ) -> Result<Vec<Service>, AppError>;
    async fn delete(&self, garage_id: &str, id: &str) -> Result<(), AppError>;
}
