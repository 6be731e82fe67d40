use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::dto::common::{validate_slug, CheckedPayload};
use crate::models::news::{News, DEFAULT_MINUTES_TO_READ};
use crate::models::translation::{Language, Translated, TranslationCheck};
use crate::utils::media::MediaBase;

fn default_minutes_to_read() -> i32 {
    DEFAULT_MINUTES_TO_READ
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewsPayload {
    pub title: Translated,
    #[validate(length(min = 1, max = 255))]
    pub main_image: String,
    #[serde(default)]
    pub category: Option<Translated>,
    #[serde(default = "default_minutes_to_read")]
    #[validate(range(min = 1, max = 60))]
    pub minutes_to_read: i32,
    pub content: Translated,
    /// Generated from the title when absent; never changed afterwards.
    #[serde(default)]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
}

impl CheckedPayload for NewsPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::after(primary, self.validate())
            .required("title", &self.title, Some(255))
            .optional("category", self.category.as_ref(), Some(100))
            .required("content", &self.content, None)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewsPatch {
    pub title: Option<Translated>,
    pub main_image: Option<String>,
    pub category: Option<Translated>,
    pub minutes_to_read: Option<i32>,
    pub content: Option<Translated>,
}

impl NewsPatch {
    pub fn apply(self, fields: &mut NewsPayload, primary: Language) {
        if let Some(title) = self.title {
            fields.title.merge(title, primary);
        }
        if let Some(image) = self.main_image {
            fields.main_image = image;
        }
        if let Some(category) = self.category {
            match fields.category.as_mut() {
                Some(current) => current.merge(category, primary),
                None => fields.category = Some(category),
            }
        }
        if let Some(minutes) = self.minutes_to_read {
            fields.minutes_to_read = minutes;
        }
        if let Some(content) = self.content {
            fields.content.merge(content, primary);
        }
    }
}

impl From<&News> for NewsPayload {
    fn from(value: &News) -> Self {
        Self {
            title: value.title.0.clone(),
            main_image: value.main_image.clone(),
            category: value.category.as_ref().map(|c| c.0.clone()),
            minutes_to_read: value.minutes_to_read,
            content: value.content.0.clone(),
            slug: Some(value.slug.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    pub id: i64,
    pub title: Translated,
    pub main_image: String,
    pub category: Option<Translated>,
    pub minutes_to_read: i32,
    pub content: Translated,
    pub slug: String,
    pub views_count: i64,
    pub translated_title: String,
    pub translated_content: String,
    pub translated_category: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl NewsResponse {
    /// `language` is the raw `?language=` value; unknown codes resolve to the
    /// primary language.
    pub fn build(value: News, media: &MediaBase, language: &str, primary: Language) -> Self {
        let title = value.title.0;
        let content = value.content.0;
        let category = value.category.map(|c| c.0);

        Self {
            id: value.id,
            translated_title: title.resolve(language, primary).to_string(),
            translated_content: content.resolve(language, primary).to_string(),
            translated_category: category
                .as_ref()
                .map(|c| c.resolve(language, primary).to_string())
                .filter(|c| !c.is_empty()),
            title,
            main_image: media.url(&value.main_image),
            category,
            minutes_to_read: value.minutes_to_read,
            content,
            slug: value.slug,
            views_count: value.views_count,
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::types::Json;

    fn news() -> News {
        News {
            id: 7,
            title: Json(
                Translated::new(Language::UzLatn, "Suv tejash")
                    .with(Language::Ru, "Экономия воды"),
            ),
            main_image: "news/a.jpg".into(),
            category: Some(Json(
                Translated::new(Language::UzLatn, "Yangiliklar").with(Language::UzCyrl, "Янгиликлар"),
            )),
            minutes_to_read: 4,
            content: Json(Translated::new(Language::UzLatn, "<p>Matn</p>")),
            slug: "suv-tejash-202601011200".into(),
            views_count: 12,
            created_date: Utc::now(),
            updated_date: Utc::now(),
        }
    }

    #[test]
    fn russian_request_uses_russian_title_and_falls_back_for_content() {
        let response = NewsResponse::build(news(), &MediaBase(None), "ru", Language::UzLatn);
        assert_eq!(response.translated_title, "Экономия воды");
        assert_eq!(response.translated_content, "<p>Matn</p>");
        assert_eq!(response.translated_category.as_deref(), Some("Yangiliklar"));
        assert_eq!(response.main_image, "/media/news/a.jpg");
    }

    #[test]
    fn cyrillic_request_resolves_category() {
        let response = NewsResponse::build(news(), &MediaBase(None), "uz-cyrl", Language::UzLatn);
        assert_eq!(response.translated_title, "Suv tejash");
        assert_eq!(response.translated_category.as_deref(), Some("Янгиликлар"));
    }

    #[test]
    fn primary_request_always_returns_primary() {
        let response = NewsResponse::build(news(), &MediaBase(None), "uz", Language::UzLatn);
        assert_eq!(response.translated_title, "Suv tejash");
        assert_eq!(response.translated_category.as_deref(), Some("Yangiliklar"));
    }

    #[test]
    fn minutes_to_read_defaults_and_is_bounded() {
        let payload: NewsPayload = serde_json::from_value(json!({
            "title": {"uz": "Sarlavha"},
            "main_image": "news/a.jpg",
            "content": {"uz": "Matn"}
        }))
        .unwrap();
        assert_eq!(payload.minutes_to_read, 5);
        assert!(payload.check(Language::UzLatn).is_ok());

        let mut too_long = payload.clone();
        too_long.minutes_to_read = 61;
        let err = too_long.check(Language::UzLatn).unwrap_err();
        assert!(err.field_errors().contains_key("minutes_to_read"));
    }

    #[test]
    fn patch_cannot_touch_slug() {
        let mut fields = NewsPayload::from(&news());
        let patch: NewsPatch = serde_json::from_value(json!({
            "slug": "hijacked",
            "minutes_to_read": 9
        }))
        .unwrap();
        patch.apply(&mut fields, Language::UzLatn);
        assert_eq!(fields.slug.as_deref(), Some("suv-tejash-202601011200"));
        assert_eq!(fields.minutes_to_read, 9);
    }
}
