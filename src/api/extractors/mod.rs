pub mod auth;
pub mod garage;
