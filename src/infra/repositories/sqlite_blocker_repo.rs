use crate::domain::{models::blocker::Blocker, ports::BlockerRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBlockerRepo {
    pool: SqlitePool,
}

impl SqliteBlockerRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl BlockerRepository for SqliteBlockerRepo {
    async fn create(&self, blocker: &Blocker) -> Result<Blocker, AppError> {
        sqlx::query_as::<_, Blocker>(
            r#"INSERT INTO blockers (id, garage_id, block_type, is_enable, start_on, end_on, block_after_days, block_for_days, days_of_week_json, start_time, end_time, apply_to_json, holiday_name, holiday_date, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&blocker.id)
            .bind(&blocker.garage_id)
            .bind(&blocker.block_type)
            .bind(blocker.is_enable)
            .bind(blocker.start_on)
            .bind(blocker.end_on)
            .bind(&blocker.block_after_days)
            .bind(&blocker.block_for_days)
            .bind(&blocker.days_of_week_json)
            .bind(&blocker.start_time)
            .bind(&blocker.end_time)
            .bind(&blocker.apply_to_json)
            .bind(&blocker.holiday_name)
            .bind(blocker.holiday_date)
            .bind(blocker.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, garage_id: &str, id: &str) -> Result<Option<Blocker>, AppError> {
        sqlx::query_as::<_, Blocker>("SELECT * FROM blockers WHERE garage_id = ? AND id = ?")
            .bind(garage_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, garage_id: &str) -> Result<Vec<Blocker>, AppError> {
        sqlx::query_as::<_, Blocker>("SELECT * FROM blockers WHERE garage_id = ? ORDER BY created_at ASC")
            .bind(garage_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_enabled(&self, garage_id: &str) -> Result<Vec<Blocker>, AppError> {
        sqlx::query_as::<_, Blocker>("SELECT * FROM blockers WHERE garage_id = ? AND is_enable = ? ORDER BY created_at ASC")
            .bind(garage_id)
            .bind(true)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, blocker: &Blocker) -> Result<Blocker, AppError> {
        sqlx::query_as::<_, Blocker>(
            r#"UPDATE blockers SET block_type=?, is_enable=?, start_on=?, end_on=?, block_after_days=?, block_for_days=?, days_of_week_json=?, start_time=?, end_time=?, apply_to_json=?, holiday_name=?, holiday_date=?
               WHERE garage_id = ? AND id = ?
               RETURNING *"#
        )
            .bind(&blocker.block_type)
            .bind(blocker.is_enable)
            .bind(blocker.start_on)
            .bind(blocker.end_on)
            .bind(&blocker.block_after_days)
            .bind(&blocker.block_for_days)
            .bind(&blocker.days_of_week_json)
            .bind(&blocker.start_time)
            .bind(&blocker.end_time)
            .bind(&blocker.apply_to_json)
            .bind(&blocker.holiday_name)
            .bind(blocker.holiday_date)
            .bind(&blocker.garage_id)
            .bind(&blocker.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, garage_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM blockers WHERE garage_id = ? AND id = ?")
            .bind(garage_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Blocker not found".into()));
        }
        Ok(())
    }
}
