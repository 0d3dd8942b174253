use crate::domain::models::{
    capacity::{ManualDay, SchedulingHours, TextTimeslot},
    garage::ShopHours,
    schedule::OneOrMany,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateGarageRequest {
    pub name: String,
    pub slug: String,
    pub timezone: Option<String>,
    pub owner_username: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateGarageRequest {
    pub name: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Deserialize)]
pub struct ShopHoursRequest {
    pub shop_hours: Vec<ShopHours>,
}

/// Partial update of one mode's capacity settings; absent fields keep their
/// current value.
#[derive(Deserialize)]
pub struct CapacitySettingRequest {
    pub schedule_mode: Option<String>,
    pub show_timeslots: Option<bool>,
    pub timeslot_interval: Option<i32>,
    pub scheduling_hours: Option<Vec<SchedulingHours>>,
    pub text_timeslots: Option<Vec<TextTimeslot>>,
    pub manual_timings: Option<Vec<ManualDay>>,
}

#[derive(Deserialize)]
pub struct MiscSettingsRequest {
    pub booking_window: Option<i32>,
    pub is_use_single_service_duration: Option<bool>,
}

#[derive(Deserialize)]
pub struct CalendarNoteRequest {
    pub dropoff: Option<String>,
    pub waiter: Option<String>,
    pub pickup: Option<String>,
}

/// Day counts arrive either as JSON numbers or as strings.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    pub fn into_text(self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct SelectedHoliday {
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Deserialize)]
pub struct BlockerRequest {
    pub block_type: String,
    pub is_enable: Option<bool>,
    pub start_on: Option<NaiveDate>,
    pub end_on: Option<NaiveDate>,
    pub block_after_days: Option<NumberOrText>,
    pub block_for_days: Option<NumberOrText>,
    pub days_of_week: Option<OneOrMany<String>>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(alias = "apply_to")]
    pub apply_to_appointment_types: Option<OneOrMany<String>>,
    pub selected_holiday: Option<SelectedHoliday>,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub estimated_minutes: i32,
    #[serde(default)]
    pub is_waiter: bool,
    #[serde(default)]
    pub is_dropoff: bool,
    #[serde(default)]
    pub is_pickup: bool,
}
