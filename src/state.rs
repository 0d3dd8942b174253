use std::sync::Arc;
use crate::domain::ports::{
    GarageRepository, UserRepository, AuthRepository, CapacityRepository,
    BlockerRepository, SettingsRepository, ServiceRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub garage_repo: Arc<dyn GarageRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub capacity_repo: Arc<dyn CapacityRepository>,
    pub blocker_repo: Arc<dyn BlockerRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub auth_service: Arc<AuthService>,
}
