use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::leadership_dto::{LeadershipPatch, LeadershipPayload};
use crate::dto::pagination::{Listing, PageRequest};
use crate::error::{Error, Result};
use crate::models::leadership::Leadership;
use crate::models::translation::Language;
use crate::services::query::{fetch_page, Filter};
use crate::utils::slug::{slugify, with_unique_slug};

#[derive(Clone)]
pub struct LeadershipService {
    pool: PgPool,
    primary: Language,
}

impl LeadershipService {
    pub fn new(pool: PgPool, primary: Language) -> Self {
        Self { pool, primary }
    }

    pub async fn list(&self, query: &ListQuery, page: PageRequest) -> Result<Listing<Leadership>> {
        let filter =
            Filter::new().search_translated(&["full_name", "position"], query.search_term());
        fetch_page(
            &self.pool,
            "SELECT *",
            "FROM leadership",
            &filter,
            "ORDER BY created_date DESC, id DESC",
            page,
        )
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Leadership> {
        let row = sqlx::query_as::<_, Leadership>("SELECT * FROM leadership WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, payload: &LeadershipPayload) -> Result<Leadership> {
        let base = slugify(&format!(
            "{}-{}",
            payload.full_name.primary(self.primary),
            payload.position.primary(self.primary)
        ));
        let row = with_unique_slug(
            &self.pool,
            "leadership",
            payload.slug.as_deref(),
            &base,
            "leadership",
            move |slug| self.insert(payload, slug),
        )
        .await?;
        tracing::info!(id = row.id, slug = %row.slug, "leadership created");
        Ok(row)
    }

    async fn insert(&self, payload: &LeadershipPayload, slug: String) -> Result<Leadership> {
        let row = sqlx::query_as::<_, Leadership>(
            r#"
            INSERT INTO leadership (
                full_name, position, image, reception_time, phone_number,
                about, labor_activity, slug
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Json(&payload.full_name))
        .bind(Json(&payload.position))
        .bind(payload.image.as_deref().filter(|i| !i.is_empty()))
        .bind(Json(&payload.reception_time))
        .bind(&payload.phone_number)
        .bind(Json(&payload.about))
        .bind(Json(&payload.labor_activity))
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, payload: &LeadershipPayload) -> Result<Leadership> {
        let row = sqlx::query_as::<_, Leadership>(
            r#"
            UPDATE leadership
            SET full_name = $2,
                position = $3,
                image = $4,
                reception_time = $5,
                phone_number = $6,
                about = $7,
                labor_activity = $8,
                updated_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(&payload.full_name))
        .bind(Json(&payload.position))
        .bind(payload.image.as_deref().filter(|i| !i.is_empty()))
        .bind(Json(&payload.reception_time))
        .bind(&payload.phone_number)
        .bind(Json(&payload.about))
        .bind(Json(&payload.labor_activity))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn patch(&self, id: i64, patch: LeadershipPatch) -> Result<Leadership> {
        let current = self.get_by_id(id).await?;
        let mut fields = LeadershipPayload::from(&current);
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    /// Vacancies owned by this person go with it (FK cascade).
    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM leadership WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Leadership not found".to_string()));
        }
        Ok(())
    }
}
