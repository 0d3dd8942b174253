pub mod auth;
pub mod availability;
pub mod blocker;
pub mod capacity;
pub mod garage;
pub mod schedule;
pub mod service;
pub mod settings;
pub mod user;
