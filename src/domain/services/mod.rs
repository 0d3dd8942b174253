pub mod auth_service;
pub mod availability;
pub mod blockers;
pub mod schedule_loader;
