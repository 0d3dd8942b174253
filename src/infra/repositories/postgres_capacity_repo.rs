use crate::domain::{models::{capacity::CapacitySetting, schedule::Mode}, ports::CapacityRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresCapacityRepo {
    pool: PgPool,
}

impl PostgresCapacityRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl CapacityRepository for PostgresCapacityRepo {
    async fn upsert(&self, setting: &CapacitySetting) -> Result<CapacitySetting, AppError> {
        sqlx::query_as::<_, CapacitySetting>(
            r#"INSERT INTO capacity_settings (id, garage_id, mode, schedule_mode, show_timeslots, timeslot_interval, scheduling_hours_json, text_timeslots_json, manual_timings_json, updated_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
               ON CONFLICT(garage_id, mode) DO UPDATE SET
               schedule_mode=EXCLUDED.schedule_mode,
               show_timeslots=EXCLUDED.show_timeslots,
               timeslot_interval=EXCLUDED.timeslot_interval,
               scheduling_hours_json=EXCLUDED.scheduling_hours_json,
               text_timeslots_json=EXCLUDED.text_timeslots_json,
               manual_timings_json=EXCLUDED.manual_timings_json,
               updated_at=EXCLUDED.updated_at
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
            "SELECT * FROM capacity_settings WHERE garage_id = $1 AND mode = $2"
        )
            .bind(garage_id)
            .bind(mode.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
