use crate::domain::{models::garage::Garage, ports::GarageRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresGarageRepo {
    pool: PgPool,
}

impl PostgresGarageRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GarageRepository for PostgresGarageRepo {
    async fn create(&self, garage: &Garage) -> Result<Garage, AppError> {
        sqlx::query_as::<_, Garage>(
            "INSERT INTO garages (id, name, slug, timezone, shop_hours_json, created_at) VALUES ($1, $2, $3, $4, $5, $6) RETURNING *"
        )
            .bind(&garage.id)
            .bind(&garage.name)
            .bind(&garage.slug)
            .bind(&garage.timezone)
            .bind(&garage.shop_hours_json)
            .bind(garage.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Garage>, AppError> {
        sqlx::query_as::<_, Garage>("SELECT * FROM garages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Garage>, AppError> {
        sqlx::query_as::<_, Garage>("SELECT * FROM garages WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, garage: &Garage) -> Result<Garage, AppError> {
        sqlx::query_as::<_, Garage>(
            "UPDATE garages SET name=$1, timezone=$2, shop_hours_json=$3 WHERE id=$4 RETURNING *"
        )
            .bind(&garage.name)
            .bind(&garage.timezone)
            .bind(&garage.shop_hours_json)
            .bind(&garage.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
