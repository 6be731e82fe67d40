use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::pagination::{Listing, PageRequest};
use crate::dto::publication_dto::{DecisionPatch, DecisionPayload};
use crate::error::Result;
use crate::models::decision::Decision;
use crate::models::translation::Language;
use crate::models::view_hit::ViewTarget;
use crate::services::query::{fetch_page, order_by, primary_text, Filter};
use crate::services::view_service::ViewService;
use crate::utils::slug::{with_day_stamp, with_unique_slug};
use crate::utils::time::now;

const TARGET: ViewTarget = ViewTarget::Decision;

#[derive(Clone)]
pub struct DecisionService {
    pool: PgPool,
    primary: Language,
    views: ViewService,
}

impl DecisionService {
    pub fn new(pool: PgPool, primary: Language, views: ViewService) -> Self {
        Self {
            pool,
            primary,
            views,
        }
    }

    fn select() -> String {
        format!("SELECT d.*, {} AS views_count", TARGET.count_expr("d"))
    }

    fn returning() -> String {
        format!(
            "RETURNING *, {} AS views_count",
            TARGET.count_expr(TARGET.table())
        )
    }

    pub async fn list(&self, query: &ListQuery, page: PageRequest) -> Result<Listing<Decision>> {
        let filter =
            Filter::new().search_translated(&["d.title", "d.content"], query.search_term());
        let allowed = [
            ("created_date", "d.created_date".to_string()),
            ("title", primary_text("d.title", self.primary)),
        ];
        let order = order_by(
            query.ordering.as_deref(),
            &allowed,
            "d.created_date DESC, d.id DESC",
        );
        fetch_page(&self.pool, &Self::select(), "FROM decisions d", &filter, &order, page).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Decision> {
        let sql = format!("{} FROM decisions d WHERE d.id = $1", Self::select());
        let row = sqlx::query_as::<_, Decision>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, payload: &DecisionPayload) -> Result<Decision> {
        let base = with_day_stamp(payload.title.primary(self.primary), now());
        let row = with_unique_slug(
            &self.pool,
            TARGET.table(),
            payload.slug.as_deref(),
            &base,
            "decision",
            move |slug| self.insert(payload, slug),
        )
        .await?;
        tracing::info!(id = row.id, slug = %row.slug, "decision created");
        Ok(row)
    }

    async fn insert(&self, payload: &DecisionPayload, slug: String) -> Result<Decision> {
        let sql = format!(
            "INSERT INTO decisions (title, content, slug) VALUES ($1, $2, $3) {}",
            Self::returning()
        );
        let row = sqlx::query_as::<_, Decision>(&sql)
            .bind(Json(&payload.title))
            .bind(Json(&payload.content))
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i64, payload: &DecisionPayload) -> Result<Decision> {
        let sql = format!(
            r#"
            UPDATE decisions
            SET title = $2, content = $3, updated_date = NOW()
            WHERE id = $1
            {}
            "#,
            Self::returning()
        );
        let row = sqlx::query_as::<_, Decision>(&sql)
            .bind(id)
            .bind(Json(&payload.title))
            .bind(Json(&payload.content))
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn patch(&self, id: i64, patch: DecisionPatch) -> Result<Decision> {
        let current = self.get_by_id(id).await?;
        let mut fields = DecisionPayload::from(&current);
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.views.delete_with_hits(TARGET, id).await
    }
}
