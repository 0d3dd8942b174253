use crate::domain::{models::service::{Service, ServiceId}, ports::ServiceRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder, Postgres};

pub struct PostgresServiceRepo {
    pool: PgPool,
}

impl PostgresServiceRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl ServiceRepository for PostgresServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, garage_id, name, estimated_minutes, is_waiter, is_dropoff, is_pickup, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *"
        )
            .bind(&service.id)
            .bind(&service.garage_id)
            .bind(&service.name)
            .bind(service.estimated_minutes)
            .bind(service.is_waiter)
            .bind(service.is_dropoff)
            .bind(service.is_pickup)
            .bind(service.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, garage_id: &str) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE garage_id = $1 ORDER BY name ASC")
            .bind(garage_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_ids(
        &self,
        garage_id: &str,
        ids: &[ServiceId],
    ) -> Result<Vec<Service>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM services WHERE garage_id = ");
        query.push_bind(garage_id);
        query.push(" AND id IN (");
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        query
            .build_query_as::<Service>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, garage_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM services WHERE garage_id = $1 AND id = $2")
            .bind(garage_id)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Service not found".into()));
        }
        Ok(())
    }
}
