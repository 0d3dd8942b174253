use crate::domain::{models::settings::{CalendarNote, MiscSettings}, ports::SettingsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresSettingsRepo {
    pool: PgPool,
}

impl PostgresSettingsRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepo {
    async fn upsert_misc(&self, settings: &MiscSettings) -> Result<MiscSettings, AppError> {
        sqlx::query_as::<_, MiscSettings>(
            r#"INSERT INTO misc_settings (garage_id, booking_window, is_use_single_service_duration, updated_at)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT(garage_id) DO UPDATE SET
               booking_window=EXCLUDED.booking_window,
               is_use_single_service_duration=EXCLUDED.is_use_single_service_duration,
               updated_at=EXCLUDED.updated_at
               RETURNING *"#
        )
            .bind(&settings.garage_id)
            .bind(settings.booking_window)
            .bind(settings.is_use_single_service_duration)
            .bind(settings.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_misc(&self, garage_id: &str) -> Result<Option<MiscSettings>, AppError> {
        sqlx::query_as::<_, MiscSettings>("SELECT * FROM misc_settings WHERE garage_id = $1")
            .bind(garage_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert_note(&self, note: &CalendarNote) -> Result<CalendarNote, AppError> {
        sqlx::query_as::<_, CalendarNote>(
            r#"INSERT INTO calendar_notes (garage_id, dropoff, waiter, pickup, updated_at)
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT(garage_id) DO UPDATE SET
               dropoff=EXCLUDED.dropoff,
               waiter=EXCLUDED.waiter,
               pickup=EXCLUDED.pickup,
               updated_at=EXCLUDED.updated_at
               RETURNING *"#
        )
            .bind(&note.garage_id)
            .bind(&note.dropoff)
            .bind(&note.waiter)
            .bind(&note.pickup)
            .bind(note.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_note(&self, garage_id: &str) -> Result<Option<CalendarNote>, AppError> {
        sqlx::query_as::<_, CalendarNote>("SELECT * FROM calendar_notes WHERE garage_id = $1")
            .bind(garage_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
