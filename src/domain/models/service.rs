use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;
use crate::domain::models::schedule::Mode;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub garage_id: String,
    pub name: String,
    pub estimated_minutes: i32,
    pub is_waiter: bool,
    pub is_dropoff: bool,
    pub is_pickup: bool,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn new(garage_id: String, name: String, estimated_minutes: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            garage_id,
            name,
            estimated_minutes,
            is_waiter: false,
            is_dropoff: false,
            is_pickup: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_eligible_for(&self, mode: Mode) -> bool {
        match mode {
            Mode::Dropoff => self.is_dropoff,
            Mode::Waiter => self.is_waiter,
            Mode::Pickup => self.is_pickup,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceId(pub Uuid);

impl ServiceId {
    /// Single entry point for service selections. Accepts repeated values and
    /// comma-delimited strings (optionally wrapped in `[...]` or quotes) in any
    /// mix; fragments that are not valid identifiers are dropped silently.
    pub fn parse_list<'a, I>(values: I) -> Vec<ServiceId>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ids: Vec<ServiceId> = Vec::new();
        for raw in values {
            let trimmed = raw.trim().trim_start_matches('[').trim_end_matches(']');
            for fragment in trimmed.split(',') {
                let cleaned = fragment.trim().trim_matches('"').trim_matches('\'');
                if let Ok(uuid) = Uuid::parse_str(cleaned) {
                    let id = ServiceId(uuid);
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
            }
        }
        ids
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
