use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc, Weekday};
use sqlx::FromRow;
use uuid::Uuid;
use crate::domain::models::schedule::{weekday_serde, Mode};

pub const SCHEDULE_AUTOMATIC: &str = "automatic";
pub const SCHEDULE_MANUAL: &str = "manual";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    Automatic,
    Manual,
}

/// Capacity-schedule hours for one weekday in automatic mode.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SchedulingHours {
    #[serde(with = "weekday_serde")]
    pub day: Weekday,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub is_closed: bool,
}

/// A fixed, labelled slot appended to every generated day.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TextTimeslot {
    pub id: String,
    pub label: String,
    pub time: String,
    #[serde(default)]
    pub is_always_available: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ManualTiming {
    pub start: String,
    #[serde(default)]
    pub label: String,
}

/// Free-form timings entered by hand for one weekday in manual mode.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ManualDay {
    #[serde(with = "weekday_serde")]
    pub day: Weekday,
    #[serde(default)]
    pub timings: Vec<ManualTiming>,
}

/// Per-garage, per-mode capacity configuration. Only the fields of the active
/// `schedule_mode` are consulted when generating availability.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct CapacitySetting {
    pub id: String,
    pub garage_id: String,
    pub mode: String,
    pub schedule_mode: String,
    pub show_timeslots: bool,
    pub timeslot_interval: i32,
    pub scheduling_hours_json: String,
    pub text_timeslots_json: String,
    pub manual_timings_json: String,
    pub updated_at: DateTime<Utc>,
}

impl CapacitySetting {
    pub fn new(garage_id: String, mode: Mode) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            garage_id,
            mode: mode.as_str().to_string(),
            schedule_mode: SCHEDULE_AUTOMATIC.to_string(),
            show_timeslots: true,
            timeslot_interval: 30,
            scheduling_hours_json: "[]".to_string(),
            text_timeslots_json: "[]".to_string(),
            manual_timings_json: "[]".to_string(),
            updated_at: Utc::now(),
        }
    }

    pub fn schedule_mode(&self) -> ScheduleMode {
        if self.schedule_mode.eq_ignore_ascii_case(SCHEDULE_MANUAL) {
            ScheduleMode::Manual
        } else {
            ScheduleMode::Automatic
        }
    }

    pub fn scheduling_hours(&self) -> Vec<SchedulingHours> {
        serde_json::from_str(&self.scheduling_hours_json).unwrap_or_default()
    }

    pub fn text_timeslots(&self) -> Vec<TextTimeslot> {
        serde_json::from_str(&self.text_timeslots_json).unwrap_or_default()
    }

    pub fn manual_timings(&self) -> Vec<ManualDay> {
        serde_json::from_str(&self.manual_timings_json).unwrap_or_default()
    }
}
