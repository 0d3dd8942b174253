use crate::domain::models::{
    availability::DayAvailability,
    blocker::{AppointmentScope, Blocker},
    capacity::{CapacitySetting, ManualDay, SchedulingHours, TextTimeslot},
    schedule::weekday_name,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct GarageCreatedResponse {
    pub garage_id: String,
    pub owner_username: String,
    pub owner_secret: String,
}

#[derive(Serialize)]
pub struct AvailabilityResponse {
    pub message: String,
    /// Booking window length in months.
    pub month: u32,
    pub availability: Vec<DayAvailability>,
    pub notes: String,
}

#[derive(Serialize)]
pub struct CapacitySettingResponse {
    pub id: String,
    pub garage_id: String,
    pub mode: String,
    pub schedule_mode: String,
    pub show_timeslots: bool,
    pub timeslot_interval: i32,
    pub scheduling_hours: Vec<SchedulingHours>,
    pub text_timeslots: Vec<TextTimeslot>,
    pub manual_timings: Vec<ManualDay>,
    pub updated_at: DateTime<Utc>,
}

impl From<CapacitySetting> for CapacitySettingResponse {
    fn from(c: CapacitySetting) -> Self {
        Self {
            scheduling_hours: c.scheduling_hours(),
            text_timeslots: c.text_timeslots(),
            manual_timings: c.manual_timings(),
            id: c.id,
            garage_id: c.garage_id,
            mode: c.mode,
            schedule_mode: c.schedule_mode,
            show_timeslots: c.show_timeslots,
            timeslot_interval: c.timeslot_interval,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct BlockerResponse {
    pub id: String,
    pub garage_id: String,
    pub block_type: String,
    pub is_enable: bool,
    pub start_on: Option<NaiveDate>,
    pub end_on: Option<NaiveDate>,
    pub block_after_days: Option<String>,
    pub block_for_days: Option<String>,
    pub days_of_week: Vec<&'static str>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub apply_to_appointment_types: Vec<AppointmentScope>,
    pub holiday_name: Option<String>,
    pub holiday_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<Blocker> for BlockerResponse {
    fn from(b: Blocker) -> Self {
        Self {
            days_of_week: b.days_of_week().into_iter().map(weekday_name).collect(),
            apply_to_appointment_types: b.apply_to(),
            id: b.id,
            garage_id: b.garage_id,
            block_type: b.block_type,
            is_enable: b.is_enable,
            start_on: b.start_on,
            end_on: b.end_on,
            block_after_days: b.block_after_days,
            block_for_days: b.block_for_days,
            start_time: b.start_time,
            end_time: b.end_time,
            holiday_name: b.holiday_name,
            holiday_date: b.holiday_date,
            created_at: b.created_at,
        }
    }
}
