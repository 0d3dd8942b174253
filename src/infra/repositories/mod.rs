pub mod sqlite_garage_repo;
pub mod sqlite_user_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_capacity_repo;
pub mod sqlite_blocker_repo;
pub mod sqlite_settings_repo;
pub mod sqlite_service_repo;

pub mod postgres_garage_repo;
pub mod postgres_user_repo;
pub mod postgres_auth_repo;
pub mod postgres_capacity_repo;
pub mod postgres_blocker_repo;
pub mod postgres_settings_repo;
pub mod postgres_service_repo;
