use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const ROLE_OWNER: &str = "OWNER";

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub garage_id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new_owner(garage_id: String, username: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            garage_id,
            username,
            password_hash,
            role: ROLE_OWNER.to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn is_owner_of(&self, garage_id: &str) -> bool {
        self.garage_id == garage_id && self.role == ROLE_OWNER
    }
}
