use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::common::CheckedPayload;
use crate::dto::content_dto::{AboutPatch, AboutPayload};
use crate::error::{Error, Result};
use crate::models::about::About;
use crate::models::translation::Language;

#[derive(Clone)]
pub struct AboutService {
    pool: PgPool,
    primary: Language,
}

impl AboutService {
    pub fn new(pool: PgPool, primary: Language) -> Self {
        Self { pool, primary }
    }

    pub async fn latest(&self) -> Result<Option<About>> {
        let row = sqlx::query_as::<_, About>("SELECT * FROM about ORDER BY id DESC LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<About> {
        let row = sqlx::query_as::<_, About>("SELECT * FROM about WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, payload: &AboutPayload) -> Result<About> {
        let row = sqlx::query_as::<_, About>(
            r#"
            INSERT INTO about (
                inn, short_name, legal_form, activity_status, founder,
                region, district, address, state_share, economic_share
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&payload.inn)
        .bind(Json(&payload.short_name))
        .bind(Json(&payload.legal_form))
        .bind(Json(&payload.activity_status))
        .bind(Json(&payload.founder))
        .bind(payload.region.as_str())
        .bind(Json(&payload.district))
        .bind(Json(&payload.address))
        .bind(payload.state_share)
        .bind(payload.economic_share)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, payload: &AboutPayload) -> Result<About> {
        let row = sqlx::query_as::<_, About>(
            r#"
            UPDATE about
            SET inn = $2,
                short_name = $3,
                legal_form = $4,
                activity_status = $5,
                founder = $6,
                region = $7,
                district = $8,
                address = $9,
                state_share = $10,
                economic_share = $11,
                updated_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.inn)
        .bind(Json(&payload.short_name))
        .bind(Json(&payload.legal_form))
        .bind(Json(&payload.activity_status))
        .bind(Json(&payload.founder))
        .bind(payload.region.as_str())
        .bind(Json(&payload.district))
        .bind(Json(&payload.address))
        .bind(payload.state_share)
        .bind(payload.economic_share)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn patch(&self, id: i64, patch: AboutPatch) -> Result<About> {
        let current = self.get_by_id(id).await?;
        let mut fields = AboutPayload::try_from(&current)?;
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM about WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("About record not found".to_string()));
        }
        Ok(())
    }
}
