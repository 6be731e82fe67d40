use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::translation::Translated;

/// Title-only lookup tables referenced by job vacancies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Catalog {
    Department,
    TypeOfWork,
}

impl Catalog {
    pub fn table(self) -> &'static str {
        match self {
            Catalog::Department => "job_vacancy_departments",
            Catalog::TypeOfWork => "types_of_work",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Catalog::Department => "Department",
            Catalog::TypeOfWork => "Type of work",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CatalogEntry {
    pub id: i64,
    pub title: Json<Translated>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}
