use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use crate::domain::models::schedule::{parse_clock, parse_weekday, Mode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    HolidayBlocker,
    ScheduleBlocker,
    ScheduleBlockerRepeating,
    CalendarNotes,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::HolidayBlocker => "holiday_blocker",
            BlockType::ScheduleBlocker => "schedule_blocker",
            BlockType::ScheduleBlockerRepeating => "schedule_blocker_repeating",
            BlockType::CalendarNotes => "calendar_notes",
        }
    }
}

impl FromStr for BlockType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "holiday_blocker" => Ok(BlockType::HolidayBlocker),
            "schedule_blocker" => Ok(BlockType::ScheduleBlocker),
            "schedule_blocker_repeating" => Ok(BlockType::ScheduleBlockerRepeating),
            "calendar_notes" => Ok(BlockType::CalendarNotes),
            other => Err(format!("Unknown block_type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentScope {
    Waiter,
    Dropoff,
    Pickup,
    All,
}

impl AppointmentScope {
    pub fn covers(&self, mode: Mode) -> bool {
        matches!(
            (self, mode),
            (AppointmentScope::All, _)
                | (AppointmentScope::Waiter, Mode::Waiter)
                | (AppointmentScope::Dropoff, Mode::Dropoff)
                | (AppointmentScope::Pickup, Mode::Pickup)
        )
    }
}

/// Time bounds of a weekday-scoped blocker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeScope {
    /// Neither bound set: the whole day is blocked.
    FullDay,
    /// Slots starting in `[from, to)` are removed.
    Range(NaiveTime, NaiveTime),
    /// Only one bound set, or a bound that does not parse. Blocks nothing.
    Incomplete,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Blocker {
    pub id: String,
    pub garage_id: String,
    pub block_type: String,
    pub is_enable: bool,
    pub start_on: Option<NaiveDate>,
    pub end_on: Option<NaiveDate>,
    pub block_after_days: Option<String>,
    pub block_for_days: Option<String>,
    pub days_of_week_json: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub apply_to_json: String,
    pub holiday_name: Option<String>,
    pub holiday_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Blocker {
    pub fn new(garage_id: String, block_type: BlockType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            garage_id,
            block_type: block_type.as_str().to_string(),
            is_enable: true,
            start_on: None,
            end_on: None,
            block_after_days: None,
            block_for_days: None,
            days_of_week_json: "[]".to_string(),
            start_time: None,
            end_time: None,
            apply_to_json: "[\"all\"]".to_string(),
            holiday_name: None,
            holiday_date: None,
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> Option<BlockType> {
        self.block_type.parse().ok()
    }

    /// Unknown day names are dropped.
    pub fn days_of_week(&self) -> Vec<Weekday> {
        let names: Vec<String> = serde_json::from_str(&self.days_of_week_json).unwrap_or_default();
        names.iter().filter_map(|n| parse_weekday(n)).collect()
    }

    pub fn apply_to(&self) -> Vec<AppointmentScope> {
        serde_json::from_str(&self.apply_to_json).unwrap_or_default()
    }

    /// An empty scope list applies to every mode.
    pub fn applies_to(&self, mode: Mode) -> bool {
        let scopes = self.apply_to();
        scopes.is_empty() || scopes.iter().any(|s| s.covers(mode))
    }

    pub fn time_scope(&self) -> TimeScope {
        let start = self.start_time.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let end = self.end_time.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (start, end) {
            (None, None) => TimeScope::FullDay,
            (Some(s), Some(e)) => match (parse_clock(s), parse_clock(e)) {
                (Some(from), Some(to)) => TimeScope::Range(from, to),
                _ => TimeScope::Incomplete,
            },
            _ => TimeScope::Incomplete,
        }
    }

    /// `(block_after_days, block_for_days)` when both parse as non-negative integers.
    pub fn relative_window(&self) -> Option<(u32, u32)> {
        let after = self.block_after_days.as_deref()?.trim().parse::<u32>().ok()?;
        let length = self.block_for_days.as_deref()?.trim().parse::<u32>().ok()?;
        Some((after, length))
    }
}
