use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::content_dto::{BannerPatch, BannerPayload};
use crate::dto::pagination::{Listing, PageRequest};
use crate::error::{Error, Result};
use crate::models::banner::Banner;
use crate::models::translation::Language;
use crate::services::query::{fetch_page, Filter};

#[derive(Clone)]
pub struct BannerService {
    pool: PgPool,
    primary: Language,
}

impl BannerService {
    pub fn new(pool: PgPool, primary: Language) -> Self {
        Self { pool, primary }
    }

    pub async fn list(&self, query: &ListQuery, page: PageRequest) -> Result<Listing<Banner>> {
        let filter = Filter::new().search_translated(&["title"], query.search_term());
        fetch_page(
            &self.pool,
            "SELECT *",
            "FROM banners",
            &filter,
            "ORDER BY created_date DESC, id DESC",
            page,
        )
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Banner> {
        let banner = sqlx::query_as::<_, Banner>("SELECT * FROM banners WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(banner)
    }

    pub async fn create(&self, payload: &BannerPayload) -> Result<Banner> {
        let banner = sqlx::query_as::<_, Banner>(
            "INSERT INTO banners (title, image) VALUES ($1, $2) RETURNING *",
        )
        .bind(Json(&payload.title))
        .bind(&payload.image)
        .fetch_one(&self.pool)
        .await?;
        Ok(banner)
    }

    pub async fn update(&self, id: i64, payload: &BannerPayload) -> Result<Banner> {
        let banner = sqlx::query_as::<_, Banner>(
            r#"
            UPDATE banners
            SET title = $2, image = $3, updated_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(&payload.title))
        .bind(&payload.image)
        .fetch_one(&self.pool)
        .await?;
        Ok(banner)
    }

    pub async fn patch(&self, id: i64, patch: BannerPatch) -> Result<Banner> {
        let current = self.get_by_id(id).await?;
        let mut fields = BannerPayload::from(&current);
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM banners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Banner not found".to_string()));
        }
        Ok(())
    }
}
