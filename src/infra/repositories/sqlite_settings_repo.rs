use crate::domain::{models::settings::{CalendarNote, MiscSettings}, ports::SettingsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSettingsRepo {
    pool: SqlitePool,
}

impl SqliteSettingsRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepo {
    async fn upsert_misc(&self, settings: &MiscSettings) -> Result<MiscSettings, AppError> {
        sqlx::query_as::<_, MiscSettings>(
            r#"INSERT INTO misc_settings (garage_id, booking_window, is_use_single_service_duration, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT(garage_id) DO UPDATE SET
               booking_window=excluded.booking_window,
               is_use_single_service_duration=excluded.is_use_single_service_duration,
               updated_at=excluded.updated_at
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
        sqlx::query_as::<_, MiscSettings>("SELECT * FROM misc_settings WHERE garage_id = ?")
            .bind(garage_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn upsert_note(&self, note: &CalendarNote) -> Result<CalendarNote, AppError> {
        sqlx::query_as::<_, CalendarNote>(
            r#"INSERT INTO calendar_notes (garage_id, dropoff, waiter, pickup, updated_at)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT(garage_id) DO UPDATE SET
               dropoff=excluded.dropoff,
               waiter=excluded.waiter,
               pickup=excluded.pickup,
               updated_at=excluded.updated_at
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
        sqlx::query_as::<_, CalendarNote>("SELECT * FROM calendar_notes WHERE garage_id = ?")
            .bind(garage_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
