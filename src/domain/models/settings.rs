use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use crate::domain::models::schedule::Mode;

pub const MAX_BOOKING_WINDOW_MONTHS: i32 = 24;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct MiscSettings {
    pub garage_id: String,
    /// Months ahead to generate availability for.
    pub booking_window: i32,
    /// Sum the selected services' durations instead of taking the longest one.
    pub is_use_single_service_duration: bool,
    pub updated_at: DateTime<Utc>,
}

impl MiscSettings {
    pub fn new(garage_id: String) -> Self {
        Self {
            garage_id,
            booking_window: 3,
            is_use_single_service_duration: false,
            updated_at: Utc::now(),
        }
    }

    pub fn booking_window_months(&self) -> u32 {
        self.booking_window.clamp(0, MAX_BOOKING_WINDOW_MONTHS) as u32
    }
}

/// Notes shown in place of generated slots when slot display is disabled.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CalendarNote {
    pub garage_id: String,
    pub dropoff: String,
    pub waiter: String,
    pub pickup: String,
    pub updated_at: DateTime<Utc>,
}

impl CalendarNote {
    pub fn new(garage_id: String) -> Self {
        Self {
            garage_id,
            dropoff: String::new(),
            waiter: String::new(),
            pickup: String::new(),
            updated_at: Utc::now(),
        }
    }

    pub fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Dropoff => &self.dropoff,
            Mode::Waiter => &self.waiter,
            Mode::Pickup => &self.pickup,
        }
    }
}
