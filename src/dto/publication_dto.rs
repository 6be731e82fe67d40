//! Interactive services and decisions: title plus one body field, a slug and
//! a view counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::dto::common::{validate_slug, CheckedPayload};
use crate::models::decision::Decision;
use crate::models::interactive_service::InteractiveService;
use crate::models::translation::{Language, Translated, TranslationCheck};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InteractiveServicePayload {
    pub title: Translated,
    pub about: Translated,
    #[serde(default)]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
}

impl CheckedPayload for InteractiveServicePayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::after(primary, self.validate())
            .required("title", &self.title, Some(255))
            .required("about", &self.about, None)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InteractiveServicePatch {
    pub title: Option<Translated>,
    pub about: Option<Translated>,
}

impl InteractiveServicePatch {
    pub fn apply(self, fields: &mut InteractiveServicePayload, primary: Language) {
        if let Some(title) = self.title {
            fields.title.merge(title, primary);
        }
        if let Some(about) = self.about {
            fields.about.merge(about, primary);
        }
    }
}

impl From<&InteractiveService> for InteractiveServicePayload {
    fn from(value: &InteractiveService) -> Self {
        Self {
            title: value.title.0.clone(),
            about: value.about.0.clone(),
            slug: Some(value.slug.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractiveServiceResponse {
    pub id: i64,
    pub title: Translated,
    pub about: Translated,
    pub slug: String,
    pub views_count: i64,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl From<InteractiveService> for InteractiveServiceResponse {
    fn from(value: InteractiveService) -> Self {
        Self {
            id: value.id,
            title: value.title.0,
            about: value.about.0,
            slug: value.slug,
            views_count: value.views_count,
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DecisionPayload {
    pub title: Translated,
    pub content: Translated,
    #[serde(default)]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
}

impl CheckedPayload for DecisionPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::after(primary, self.validate())
            .required("title", &self.title, Some(255))
            .required("content", &self.content, None)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DecisionPatch {
    pub title: Option<Translated>,
    pub content: Option<Translated>,
}

impl DecisionPatch {
    pub fn apply(self, fields: &mut DecisionPayload, primary: Language) {
        if let Some(title) = self.title {
            fields.title.merge(title, primary);
        }
        if let Some(content) = self.content {
            fields.content.merge(content, primary);
        }
    }
}

impl From<&Decision> for DecisionPayload {
    fn from(value: &Decision) -> Self {
        Self {
            title: value.title.0.clone(),
            content: value.content.0.clone(),
            slug: Some(value.slug.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionResponse {
    pub id: i64,
    pub title: Translated,
    pub content: Translated,
    pub slug: String,
    pub views_count: i64,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl From<Decision> for DecisionResponse {
    fn from(value: Decision) -> Self {
        Self {
            id: value.id,
            title: value.title.0,
            content: value.content.0,
            slug: value.slug,
            views_count: value.views_count,
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewsResponse {
    pub views: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decision_requires_primary_content() {
        let payload: DecisionPayload = serde_json::from_value(json!({
            "title": {"uz": "Qaror", "ru": "Решение"},
            "content": {"ru": "Текст"}
        }))
        .unwrap();
        let err = payload.check(Language::UzLatn).unwrap_err();
        assert!(err.field_errors().contains_key("content"));
        assert!(!err.field_errors().contains_key("title"));
    }

    #[test]
    fn explicit_slug_must_be_url_safe() {
        let payload: InteractiveServicePayload = serde_json::from_value(json!({
            "title": {"uz": "Onlayn ariza"},
            "about": {"uz": "Tavsif"},
            "slug": "Onlayn Ariza"
        }))
        .unwrap();
        let err = payload.check(Language::UzLatn).unwrap_err();
        assert!(err.field_errors().contains_key("slug"));
    }
}
