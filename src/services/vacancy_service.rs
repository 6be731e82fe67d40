use sqlx::types::Json;
use sqlx::PgPool;

use crate::dto::common::{CheckedPayload, ListQuery};
use crate::dto::pagination::{Listing, PageRequest};
use crate::dto::vacancy_dto::{VacancyPatch, VacancyPayload};
use crate::error::{Error, Result};
use crate::models::job_vacancy::JobVacancy;
use crate::models::translation::Language;
use crate::services::query::{fetch_page, order_by, primary_text, Filter};
use crate::utils::slug::{with_day_stamp, with_unique_slug};
use crate::utils::time::now;

const SELECT: &str = r#"
    SELECT v.*,
           l.full_name AS leadership_name,
           d.title AS department_name,
           w.title AS type_of_work_name
"#;

const FROM: &str = r#"
    FROM job_vacancies v
    JOIN leadership l ON l.id = v.leadership_id
    JOIN job_vacancy_departments d ON d.id = v.department_id
    JOIN types_of_work w ON w.id = v.type_of_work_id
"#;

#[derive(Clone)]
pub struct VacancyService {
    pool: PgPool,
    primary: Language,
}

impl VacancyService {
    pub fn new(pool: PgPool, primary: Language) -> Self {
        Self { pool, primary }
    }

    pub async fn list(&self, query: &ListQuery, page: PageRequest) -> Result<Listing<JobVacancy>> {
        let filter = Filter::new()
            .eq_int("v.leadership_id", query.leadership)
            .eq_int("v.department_id", query.department)
            .eq_int("v.type_of_work_id", query.type_of_work)
            .search_translated(&["v.title", "v.description"], query.search_term());
        let allowed = [
            ("created_date", "v.created_date".to_string()),
            ("title", primary_text("v.title", self.primary)),
        ];
        let order = order_by(
            query.ordering.as_deref(),
            &allowed,
            "v.created_date DESC, v.id DESC",
        );
        fetch_page(&self.pool, SELECT, FROM, &filter, &order, page).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<JobVacancy> {
        let sql = format!("{} {} WHERE v.id = $1", SELECT, FROM);
        let vacancy = sqlx::query_as::<_, JobVacancy>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(vacancy)
    }

    pub async fn create(&self, payload: &VacancyPayload) -> Result<JobVacancy> {
        let base = with_day_stamp(payload.title.primary(self.primary), now());
        let id = with_unique_slug(
            &self.pool,
            "job_vacancies",
            payload.slug.as_deref(),
            &base,
            "vacancy",
            move |slug| self.insert(payload, slug),
        )
        .await?;
        tracing::info!(id, "vacancy created");
        self.get_by_id(id).await
    }

    async fn insert(&self, payload: &VacancyPayload, slug: String) -> Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO job_vacancies (
                title, leadership_id, department_id, location, type_of_work_id, description, slug
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(Json(&payload.title))
        .bind(payload.leadership)
        .bind(payload.department)
        .bind(Json(&payload.location))
        .bind(payload.type_of_work)
        .bind(Json(&payload.description))
        .bind(slug)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    pub async fn update(&self, id: i64, payload: &VacancyPayload) -> Result<JobVacancy> {
        let updated: i64 = sqlx::query_scalar(
            r#"
            UPDATE job_vacancies
            SET title = $2,
                leadership_id = $3,
                department_id = $4,
                location = $5,
                type_of_work_id = $6,
                description = $7,
                updated_date = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(Json(&payload.title))
        .bind(payload.leadership)
        .bind(payload.department)
        .bind(Json(&payload.location))
        .bind(payload.type_of_work)
        .bind(Json(&payload.description))
        .fetch_one(&self.pool)
        .await?;
        self.get_by_id(updated).await
    }

    pub async fn patch(&self, id: i64, patch: VacancyPatch) -> Result<JobVacancy> {
        let current = self.get_by_id(id).await?;
        let mut fields = VacancyPayload::from(&current);
        patch.apply(&mut fields, self.primary);
        fields.check(self.primary)?;
        self.update(id, &fields).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM job_vacancies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if res.rows_affected() == 0 {
            return Err(Error::NotFound("Vacancy not found".to_string()));
        }
        Ok(())
    }
}
