use serde::Serialize;
use chrono::{DateTime, FixedOffset, NaiveDate};

/// A bookable unit within a day, or a note placeholder with no times.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Slot {
    pub id: String,
    pub label: String,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_text_timeslot: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_always_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_slot_id: Option<String>,
}

impl Slot {
    pub fn note(id: String, label: String) -> Self {
        Self {
            id,
            label,
            start: None,
            end: None,
            is_text_timeslot: None,
            is_always_available: None,
            text_slot_id: None,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub timeslots: Vec<Slot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub days: Vec<DayAvailability>,
    pub notes: String,
    pub booking_window: u32,
}
