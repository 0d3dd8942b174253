use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc, Weekday};
use chrono_tz::Tz;
use sqlx::FromRow;
use crate::domain::models::schedule::weekday_serde;

/// Garage-wide operating hours for one weekday.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShopHours {
    #[serde(with = "weekday_serde")]
    pub day: Weekday,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub is_closed: bool,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Garage {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub timezone: String,
    pub shop_hours_json: String,
    pub created_at: DateTime<Utc>,
}

impl Garage {
    pub fn new(name: String, slug: String, timezone: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            slug,
            timezone,
            shop_hours_json: "[]".to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }

    pub fn shop_hours(&self) -> Vec<ShopHours> {
        serde_json::from_str(&self.shop_hours_json).unwrap_or_default()
    }
}
