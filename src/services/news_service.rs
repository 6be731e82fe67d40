use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::news_dto::{NewsPatch, NewsPayload};
use crate::dto::pagination::{Listing, PageRequest};
use crate::error::Result;
use crate::models::news::News;
use crate::models::translation::Language;
use crate::models::view_hit::ViewTarget;
use crate::services::query::{fetch_page, order_by, primary_text, Filter};
use crate::services::view_service::ViewService;
use crate::utils::slug::{with_minute_stamp, with_unique_slug};
use crate::utils::time::now;

const TARGET: ViewTarget = ViewTarget::News;

#[derive(Clone)]
pub struct NewsService {
    pool: PgPool,
    primary: Language,
    views: ViewService,
}

impl NewsService {
    pub fn new(pool: PgPool, primary: Language, views: ViewService) -> Self {
        Self {
            pool,
            primary,
            views,
        }
    }

    fn select() -> String {
        format!("SELECT n.*, {} AS views_count", TARGET.count_expr("n"))
    }

    fn returning() -> String {
        format!("RETURNING *, {} AS views_count", TARGET.count_expr("news"))
    }

    pub async fn list(&self, query: &ListQuery, page: PageRequest) -> Result<Listing<News>> {
        let filter = Filter::new()
            .eq_translated("n.category", self.primary, query.category.as_deref())
            .search_translated(&["n.title", "n.content", "n.category"], query.search_term());
        let allowed = [
            ("created_date", "n.created_date".to_string()),
            ("title", primary_text("n.title", self.primary)),
            ("minutes_to_read", "n.minutes_to_read".to_string()),
        ];
        let order = order_by(
            query.ordering.as_deref(),
            &allowed,
            "n.created_date DESC, n.id DESC",
        );
        fetch_page(&self.pool, &Self::select(), "FROM news n", &filter, &order, page).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<News> {
        let sql = format!("{} FROM news n WHERE n.id = $1", Self::select());
        let news = sqlx::query_as::<_, News>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(news)
    }

    pub async fn create(&self, payload: &NewsPayload) -> Result<News> {
        let base = with_minute_stamp(payload.title.primary(self.primary), now());
        let news = with_unique_slug(
            &self.pool,
            TARGET.table(),
            payload.slug.as_deref(),
            &base,
            "news",
            move |slug| self.insert(payload, slug),
        )
        .await?;
        tracing::info!(id = news.id, slug = %news.slug, "news created");
        Ok(news)
    }

    async fn insert(&self, payload: &NewsPayload, slug: String) -> Result<News> {
        let sql = format!(
            r#"
            INSERT INTO news (title, main_image, category, minutes_to_read, content, slug)
            VALUES ($1, $2, $3, $4, $5, $6)
            {}
            "#,
            Self::returning()
        );
        let news = sqlx::query_as::<_, News>(&sql)
            .bind(Json(&payload.title))
            .bind(&payload.main_image)
            .bind(payload.category.as_ref().map(Json))
            .bind(payload.minutes_to_read)
            .bind(Json(&payload.content))
            .bind(slug)
            .fetch_one(&self.pool)
            .await?;
        Ok(news)
    }

    /// Full replacement of the editable fields; the slug is left as is.
    pub async fn update(&self, id: i64, payload: &NewsPayload) -> Result<News> {
        let sql = format!(
            r#"
            UPDATE news
            SET title = $2,
                main_image = $3,
                category = $4,
                minutes_to_read = $5,
                content = $6,
                updated_date = NOW()
            WHERE id = $1
            {}
            "#,
            Self::returning()
        );
        let news = sqlx::query_as::<_, News>(&sql)
            .bind(id)
            .bind(Json(&payload.title))
            .bind(&payload.main_image)
            .bind(payload.category.as_ref().map(Json))
            .bind(payload.minutes_to_read)
            .bind(Json(&payload.content))
            .fetch_one(&self.pool)
            .await?;
        Ok(news)
    }

    pub async fn patch(&self, id: i64, patch: NewsPatch) -> Result<News> {
        let current = self.get_by_id(id).await?;
        let mut fields = NewsPayload::from(&current);
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        self.views.delete_with_hits(TARGET, id).await
    }
}
