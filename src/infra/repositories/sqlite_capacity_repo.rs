use crate::domain::{models::{capacity::CapacitySetting, schedule::Mode}, ports::CapacityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteCapacityRepo {
    pool: SqlitePool,
}

impl SqliteCapacityRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl CapacityRepository for SqliteCapacityRepo {
    async fn upsert(&self, setting: &CapacitySetting) -> Result<CapacitySetting, AppError> {
        sqlx::query_as::<_, CapacitySetting>(
            r#"INSERT INTO capacity_settings (id, garage_id, mode, schedule_mode, show_timeslots, timeslot_interval, scheduling_hours_json, text_timeslots_json, manual_timings_json, updated_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(garage_id, mode) DO UPDATE SET
               schedule_mode=excluded.schedule_mode,
               show_timeslots=excluded.show_timeslots,
               timeslot_interval=excluded.timeslot_interval,
               scheduling_hours_json=excluded.scheduling_hours_json,
               text_timeslots_json=excluded.text_timeslots_json,
               manual_timings_json=excluded.manual_timings_json,
               updated_at=excluded.updated_at
               RETURNING *"#
        )
            .bind(&setting.id)
            .bind(&setting.garage_id)
            .bind(&setting.mode)
            .bind(&setting.schedule_mode)
            .bind(setting.show_timeslots)
            .bind(setting.timeslot_interval)
            .bind(&setting.scheduling_hours_json)
            .bind(&setting.text_timeslots_json)
            .bind(&setting.manual_timings_json)
            .bind(setting.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find(&self, garage_id: &str, mode: Mode) -> Result<Option<CapacitySetting>, AppError> {
        sqlx::query_as::<_, CapacitySetting>(
            "SELECT * FROM capacity_settings WHERE garage_id = ? AND mode = ?"
        )
            .bind(garage_id)
            .bind(mode.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
