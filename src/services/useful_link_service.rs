use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::content_dto::{UsefulLinkPatch, UsefulLinkPayload};
use crate::dto::pagination::{Listing, PageRequest};
use crate::error::{Error, Result};
use crate::models::translation::Language;
use crate::models::useful_link::UsefulLink;
use crate::services::query::{fetch_page, Filter};

#[derive(Clone)]
pub struct UsefulLinkService {
    pool: PgPool,
    primary: Language,
}

impl UsefulLinkService {
    pub fn new(pool: PgPool, primary: Language) -> Self {
        Self { pool, primary }
    }

    pub async fn list(&self, query: &ListQuery, page: PageRequest) -> Result<Listing<UsefulLink>> {
        let filter = Filter::new().search_translated(&["name"], query.search_term());
        fetch_page(
            &self.pool,
            "SELECT *",
            "FROM useful_links",
            &filter,
            "ORDER BY created_date DESC, id DESC",
            page,
        )
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<UsefulLink> {
        let link = sqlx::query_as::<_, UsefulLink>("SELECT * FROM useful_links WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(link)
    }

    pub async fn create(&self, payload: &UsefulLinkPayload) -> Result<UsefulLink> {
        let link = sqlx::query_as::<_, UsefulLink>(
            "INSERT INTO useful_links (name, link, icon) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(Json(&payload.name))
        .bind(&payload.link)
        .bind(&payload.icon)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn update(&self, id: i64, payload: &UsefulLinkPayload) -> Result<UsefulLink> {
        let link = sqlx::query_as::<_, UsefulLink>(
            r#"
            UPDATE useful_links
            SET name = $2, link = $3, icon = $4, updated_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(&payload.name))
        .bind(&payload.link)
        .bind(&payload.icon)
        .fetch_one(&self.pool)
        .await?;
        Ok(link)
    }

    pub async fn patch(&self, id: i64, patch: UsefulLinkPatch) -> Result<UsefulLink> {
        let current = self.get_by_id(id).await?;
        let mut fields = UsefulLinkPayload::from(&current);
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM useful_links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Useful link not found".to_string()));
        }
        Ok(())
    }
}
