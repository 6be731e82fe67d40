use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::dto::common::{validate_slug, CheckedPayload};
use crate::models::job_vacancy::JobVacancy;
use crate::models::translation::{Language, Translated, TranslationCheck};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VacancyPayload {
    pub title: Translated,
    #[validate(range(min = 1))]
    pub leadership: i64,
    #[validate(range(min = 1))]
    pub department: i64,
    pub location: Translated,
    #[validate(range(min = 1))]
    pub type_of_work: i64,
    pub description: Translated,
    #[serde(default)]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
}

impl CheckedPayload for VacancyPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::after(primary, self.validate())
            .required("title", &self.title, Some(255))
            .required("location", &self.location, Some(255))
            .required("description", &self.description, None)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VacancyPatch {
    pub title: Option<Translated>,
    pub leadership: Option<i64>,
    pub department: Option<i64>,
    pub location: Option<Translated>,
    pub type_of_work: Option<i64>,
    pub description: Option<Translated>,
}

impl VacancyPatch {
    pub fn apply(self, fields: &mut VacancyPayload, primary: Language) {
        if let Some(title) = self.title {
            fields.title.merge(title, primary);
        }
        if let Some(id) = self.leadership {
            fields.leadership = id;
        }
        if let Some(id) = self.department {
            fields.department = id;
        }
        if let Some(location) = self.location {
            fields.location.merge(location, primary);
        }
        if let Some(id) = self.type_of_work {
            fields.type_of_work = id;
        }
        if let Some(description) = self.description {
            fields.description.merge(description, primary);
        }
    }
}

impl From<&JobVacancy> for VacancyPayload {
    fn from(value: &JobVacancy) -> Self {
        Self {
            title: value.title.0.clone(),
            leadership: value.leadership_id,
            department: value.department_id,
            location: value.location.0.clone(),
            type_of_work: value.type_of_work_id,
            description: value.description.0.clone(),
            slug: Some(value.slug.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyResponse {
    pub id: i64,
    pub title: Translated,
    pub leadership: i64,
    pub leadership_name: String,
    pub department: i64,
    pub department_name: String,
    pub location: Translated,
    pub type_of_work: i64,
    pub type_of_work_name: String,
    pub description: Translated,
    pub slug: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl VacancyResponse {
    pub fn build(value: JobVacancy, primary: Language) -> Self {
        Self {
            id: value.id,
            title: value.title.0,
            leadership: value.leadership_id,
            leadership_name: value.leadership_name.primary(primary).to_string(),
            department: value.department_id,
            department_name: value.department_name.primary(primary).to_string(),
            location: value.location.0,
            type_of_work: value.type_of_work_id,
            type_of_work_name: value.type_of_work_name.primary(primary).to_string(),
            description: value.description.0,
            slug: value.slug,
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}
