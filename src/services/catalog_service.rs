use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::catalog_dto::{CatalogPatch, CatalogPayload};
use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::pagination::{Listing, PageRequest};
use crate::error::{Error, Result};
use crate::models::catalog::{Catalog, CatalogEntry};
use crate::models::translation::Language;
use crate::services::query::{fetch_page, Filter};

/// Departments and types of work. Table names come from [`Catalog`].
#[derive(Clone)]
pub struct CatalogService {
    pool: PgPool,
    primary: Language,
}

impl CatalogService {
    pub fn new(pool: PgPool, primary: Language) -> Self {
        Self { pool, primary }
    }

    pub async fn list(
        &self,
        catalog: Catalog,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<Listing<CatalogEntry>> {
        let filter = Filter::new().search_translated(&["title"], query.search_term());
        let from = format!("FROM {}", catalog.table());
        fetch_page(&self.pool, "SELECT *", &from, &filter, "ORDER BY id", page).await
    }

    pub async fn get_by_id(&self, catalog: Catalog, id: i64) -> Result<CatalogEntry> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", catalog.table());
        let entry = sqlx::query_as::<_, CatalogEntry>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(entry)
    }

    pub async fn create(&self, catalog: Catalog, payload: &CatalogPayload) -> Result<CatalogEntry> {
        let sql = format!(
            "INSERT INTO {} (title) VALUES ($1) RETURNING *",
            catalog.table()
        );
        let entry = sqlx::query_as::<_, CatalogEntry>(&sql)
            .bind(Json(&payload.title))
            .fetch_one(&self.pool)
            .await?;
        Ok(entry)
    }

    pub async fn update(
        &self,
        catalog: Catalog,
        id: i64,
        payload: &CatalogPayload,
    ) -> Result<CatalogEntry> {
        let sql = format!(
            "UPDATE {} SET title = $2, updated_date = NOW() WHERE id = $1 RETURNING *",
            catalog.table()
        );
        let entry = sqlx::query_as::<_, CatalogEntry>(&sql)
            .bind(id)
            .bind(Json(&payload.title))
            .fetch_one(&self.pool)
            .await?;
        Ok(entry)
    }

    pub async fn patch(&self, catalog: Catalog, id: i64, patch: CatalogPatch) -> Result<CatalogEntry> {
        let current = self.get_by_id(catalog, id).await?;
        let mut fields = CatalogPayload::from(&current);
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(catalog, id, &fields).await
    }

    pub async fn delete(&self, catalog: Catalog, id: i64) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", catalog.table());
        let res = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound(format!("{} not found", catalog.label())));
        }
        Ok(())
    }
}
