use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::pagination::{Listing, PageRequest};
use crate::dto::publication_dto::{InteractiveServicePatch, InteractiveServicePayload};
use crate::error::Result;
use crate::models::interactive_service::InteractiveService;
use crate::models::translation::Language;
use crate::models::view_hit::ViewTarget;
use crate::services::query::{fetch_page, Filter};
use crate::services::view_service::ViewService;
use crate::utils::slug::{slugify, with_unique_slug};

const TARGET: ViewTarget = ViewTarget::InteractiveService;

#[derive(Clone)]
pub struct InteractiveServiceService {
    pool: PgPool,
    primary: Language,
    views: ViewService,
}

impl InteractiveServiceService {
    pub fn new(pool: PgPool, primary: Language, views: ViewService) -> Self {
        Self {
            pool,
            primary,
            views,
        }
    }

    fn select() -> String {
        format!("SELECT s.*, {} AS views_count", TARGET.count_expr("s"))
    }

    fn returning() -> String {
        format!(
            "RETURNING *, {} AS views_count",
            TARGET.count_expr(TARGET.table())
        )
    }

    pub async fn list(
        &self,
        query: &ListQuery,
        page: PageRequest,
    ) -> Result<Listing<InteractiveService>> {
        let filter = Filter::new().search_translated(&["s.title", "s.about"], query.search_term());
        fetch_page(
            &self.pool,
            &Self::select(),
            "FROM interactive_services s",
            &filter,
            "ORDER BY s.created_date DESC, s.id DESC",
            page,
        )
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<InteractiveService> {
        let sql = format!("{} FROM interactive_services s WHERE s.id = $1", Self::select());
        let row = sqlx::query_as::<_, InteractiveService>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, payload: &InteractiveServicePayload) -> Result<InteractiveService> {
        let base = slugify(payload.title.primary(self.primary));
        let row = with_unique_slug(
            &self.pool,
            TARGET.table(),
            payload.slug.as_deref(),
            &base,
            "service",
            move |slug| self.insert(payload, slug),
        )
        .await?;
        tracing::info!(id = row.id, slug = %row.slug, "interactive service created");
        Ok(row)
    }

    async fn insert(
        &self,
        payload: &InteractiveServicePayload,
        slug: String,
    ) -> Result<InteractiveService> {
        let sql = format!(
            "INSERT INTO interactive_services (title, about, slug) VALUES ($1, $2, $3) {}",
            Self::returning()
        );
        let row = sqlx::query_as::<_, InteractiveService>(&sql)
            .bind(Json(&payload.title))
            .bind(Json(&payload.about))
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(
        &self,
        id: i64,
        payload: &InteractiveServicePayload,
    ) -> Result<InteractiveService> {
        let sql = format!(
            r#"
            UPDATE interactive_services
            SET title = $2, about = $3, updated_date = NOW()
            WHERE id = $1
            {}
            "#,
            Self::returning()
        );
        let row = sqlx::query_as::<_, InteractiveService>(&sql)
            .bind(id)
            .bind(Json(&payload.title))
            .bind(Json(&payload.about))
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn patch(
        &self,
        id: i64,
        patch: InteractiveServicePatch,
    ) -> Result<InteractiveService> {
        let current = self.get_by_id(id).await?;
        let mut fields = InteractiveServicePayload::from(&current);
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.views.delete_with_hits(TARGET, id).await
    }
}
