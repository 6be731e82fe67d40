use sqlx::PgPool;

use crate::dto::common::CheckedPayload;
use crate::dto::content_dto::{StatisticsPatch, StatisticsPayload};
use crate::error::{Error, Result};
use crate::models::statistics::Statistics;
use crate::models::translation::Language;

/// Several rows may exist; the public list only shows the newest one.
#[derive(Clone)]
pub struct StatisticsService {
    pool: PgPool,
    primary: Language,
}

impl StatisticsService {
    pub fn new(pool: PgPool, primary: Language) -> Self {
        Self { pool, primary }
    }

    pub async fn latest(&self) -> Result<Option<Statistics>> {
        let row = sqlx::query_as::<_, Statistics>(
            "SELECT * FROM statistics ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Statistics> {
        let row = sqlx::query_as::<_, Statistics>("SELECT * FROM statistics WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, payload: &StatisticsPayload) -> Result<Statistics> {
        let row = sqlx::query_as::<_, Statistics>(
            r#"
            INSERT INTO statistics (
                services_count, regional_offices_count, pumping_stations_count, employees_count
            ) VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(payload.services_count)
        .bind(payload.regional_offices_count)
        .bind(payload.pumping_stations_count)
        .bind(payload.employees_count)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, payload: &StatisticsPayload) -> Result<Statistics> {
        let row = sqlx::query_as::<_, Statistics>(
            r#"
            UPDATE statistics
            SET services_count = $2,
                regional_offices_count = $3,
                pumping_stations_count = $4,
                employees_count = $5,
                updated_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.services_count)
        .bind(payload.regional_offices_count)
        .bind(payload.pumping_stations_count)
        .bind(payload.employees_count)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn patch(&self, id: i64, patch: StatisticsPatch) -> Result<Statistics> {
        let current = self.get_by_id(id).await?;
        let mut fields = StatisticsPayload::from(&current);
        patch.apply(&mut fields);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM statistics WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Statistics not found".to_string()));
        }
        Ok(())
    }
}
