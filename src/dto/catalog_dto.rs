use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use crate::dto::common::CheckedPayload;
use crate::models::catalog::CatalogEntry;
use crate::models::translation::{Language, Translated, TranslationCheck};

/// Departments and types of work share one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPayload {
    pub title: Translated,
}

impl CheckedPayload for CatalogPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::new(primary)
            .required("title", &self.title, Some(100))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogPatch {
    pub title: Option<Translated>,
}

impl CatalogPatch {
    pub fn apply(self, fields: &mut CatalogPayload, primary: Language) {
        if let Some(title) = self.title {
            fields.title.merge(title, primary);
        }
    }
}

impl From<&CatalogEntry> for CatalogPayload {
    fn from(value: &CatalogEntry) -> Self {
        Self {
            title: value.title.0.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub id: i64,
    pub title: Translated,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl From<CatalogEntry> for CatalogResponse {
    fn from(value: CatalogEntry) -> Self {
        Self {
            id: value.id,
            title: value.title.0,
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}
