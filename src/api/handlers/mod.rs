pub mod auth;
pub mod availability;
pub mod blocker;
pub mod capacity;
pub mod garage;
pub mod health;
pub mod service;
pub mod settings;
