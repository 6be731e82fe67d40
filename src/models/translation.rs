//! Multilingual text fields.
//!
//! Every translatable field is stored as one JSONB map from language code to
//! text. The primary language value is required; the other variants are
//! optional and fall back to the primary value when empty.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "uz")]
    UzLatn,
    #[serde(rename = "uz-cyrl")]
    UzCyrl,
    #[serde(rename = "ru")]
    Ru,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::UzLatn, Language::UzCyrl, Language::Ru];

    pub fn code(self) -> &'static str {
        match self {
            Language::UzLatn => "uz",
            Language::UzCyrl => "uz-cyrl",
            Language::Ru => "ru",
        }
    }

    /// Case-insensitive; `uz_cyrl` is accepted for `uz-cyrl`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "uz" => Some(Language::UzLatn),
            "uz-cyrl" => Some(Language::UzCyrl),
            "ru" => Some(Language::Ru),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Translated(BTreeMap<String, String>);

impl Translated {
    pub fn new(primary: Language, value: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(primary.code().to_string(), value.into());
        Self(map)
    }

    pub fn with(mut self, language: Language, value: impl Into<String>) -> Self {
        self.0.insert(language.code().to_string(), value.into());
        self
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        self.0.get(language.code()).map(String::as_str)
    }

    pub fn primary(&self, primary: Language) -> &str {
        self.get(primary).unwrap_or("")
    }

    /// Picks the requested variant, falling back to the primary value when the
    /// variant is missing or empty. Unknown codes resolve to the primary value.
    pub fn resolve(&self, requested: &str, primary: Language) -> &str {
        match Language::from_code(requested) {
            Some(language) if language != primary => self
                .get(language)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| self.primary(primary)),
            _ => self.primary(primary),
        }
    }

    /// Overlays the variants present in `patch`. An empty non-primary variant
    /// removes that translation.
    pub fn merge(&mut self, patch: Translated, primary: Language) {
        for (code, value) in patch.0 {
            if value.is_empty() && code != primary.code() {
                self.0.remove(&code);
            } else {
                self.0.insert(code, value);
            }
        }
    }

    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(code, value)| (code.as_str(), value.as_str()))
    }
}

/// Collects field-level errors for the translated fields of a payload.
pub struct TranslationCheck {
    primary: Language,
    errors: ValidationErrors,
}

impl TranslationCheck {
    pub fn new(primary: Language) -> Self {
        Self {
            primary,
            errors: ValidationErrors::new(),
        }
    }

    /// Starts from the result of the derive-based `validate()` so both kinds
    /// of errors come back in one response.
    pub fn after(primary: Language, derived: Result<(), ValidationErrors>) -> Self {
        Self {
            primary,
            errors: derived.err().unwrap_or_else(ValidationErrors::new),
        }
    }

    pub fn required(mut self, field: &'static str, value: &Translated, max_len: Option<usize>) -> Self {
        if value.primary(self.primary).trim().is_empty() {
            let mut err = ValidationError::new("required");
            err.message = Some(
                format!("A non-empty '{}' value is required.", self.primary.code()).into(),
            );
            self.errors.add(field, err);
        }
        self.check_variants(field, value, max_len);
        self
    }

    pub fn optional(mut self, field: &'static str, value: Option<&Translated>, max_len: Option<usize>) -> Self {
        if let Some(value) = value {
            self.check_variants(field, value, max_len);
        }
        self
    }

    fn check_variants(&mut self, field: &'static str, value: &Translated, max_len: Option<usize>) {
        for (code, text) in value.values() {
            if !Language::ALL.iter().any(|language| language.code() == code) {
                let mut err = ValidationError::new("language");
                err.message = Some(format!("Unsupported language code '{}'.", code).into());
                self.errors.add(field, err);
                continue;
            }
            if let Some(max) = max_len {
                if text.chars().count() > max {
                    let mut err = ValidationError::new("length");
                    err.message = Some(
                        format!("Ensure the '{}' value has at most {} characters.", code, max)
                            .into(),
                    );
                    self.errors.add(field, err);
                }
            }
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.errors().is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news_title() -> Translated {
        Translated::new(Language::UzLatn, "Suv tejash")
            .with(Language::Ru, "Экономия воды")
            .with(Language::UzCyrl, "")
    }

    #[test]
    fn resolves_requested_language_when_present() {
        let title = news_title();
        assert_eq!(title.resolve("ru", Language::UzLatn), "Экономия воды");
    }

    #[test]
    fn empty_variant_falls_back_to_primary() {
        let title = news_title();
        assert_eq!(title.resolve("uz-cyrl", Language::UzLatn), "Suv tejash");
    }

    #[test]
    fn primary_request_ignores_translations() {
        let title = news_title();
        assert_eq!(title.resolve("uz", Language::UzLatn), "Suv tejash");
    }

    #[test]
    fn unknown_code_resolves_to_primary() {
        let title = news_title();
        assert_eq!(title.resolve("en", Language::UzLatn), "Suv tejash");
        assert_eq!(title.resolve("", Language::UzLatn), "Suv tejash");
    }

    #[test]
    fn language_codes_are_lenient() {
        assert_eq!(Language::from_code("UZ_CYRL"), Some(Language::UzCyrl));
        assert_eq!(Language::from_code(" ru "), Some(Language::Ru));
        assert_eq!(Language::from_code("kk"), None);
    }

    #[test]
    fn merge_overlays_and_removes_empty_translations() {
        let mut title = news_title();
        title.merge(
            Translated::new(Language::Ru, "").with(Language::UzCyrl, "Сув тежаш"),
            Language::UzLatn,
        );
        assert_eq!(title.get(Language::Ru), None);
        assert_eq!(title.get(Language::UzCyrl), Some("Сув тежаш"));
        assert_eq!(title.get(Language::UzLatn), Some("Suv tejash"));
    }

    #[test]
    fn check_requires_primary_value() {
        let only_ru = Translated::new(Language::Ru, "Заголовок");
        let err = TranslationCheck::new(Language::UzLatn)
            .required("title", &only_ru, Some(255))
            .finish()
            .unwrap_err();
        assert!(err.field_errors().contains_key("title"));
    }

    #[test]
    fn check_rejects_unknown_language_and_long_values() {
        let value = Translated::new(Language::UzLatn, "x".repeat(5)).with(Language::Ru, "ok");
        let mut raw: BTreeMap<String, String> = value.0.clone();
        raw.insert("en".into(), "Title".into());
        let err = TranslationCheck::new(Language::UzLatn)
            .required("title", &Translated(raw), Some(4))
            .finish()
            .unwrap_err();
        let title_errors = &err.field_errors()["title"];
        assert_eq!(title_errors.len(), 2);
    }

    #[test]
    fn serializes_as_plain_map() {
        let json = serde_json::to_value(news_title()).unwrap();
        assert_eq!(json["uz"], "Suv tejash");
        assert_eq!(json["ru"], "Экономия воды");
    }
}
