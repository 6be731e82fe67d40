use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors};

use crate::models::translation::Language;

/// Query parameters accepted by list endpoints. Each resource reads the
/// subset it supports and ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub language: Option<String>,
    pub category: Option<String>,
    pub leadership: Option<i64>,
    pub department: Option<i64>,
    pub type_of_work: Option<i64>,
    pub is_read: Option<bool>,
}

impl ListQuery {
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LanguageQuery {
    pub language: Option<String>,
}

impl LanguageQuery {
    pub fn code(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }
}

/// Full validation of a write payload: derive rules plus translated fields.
pub trait CheckedPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors>;
}

pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = !slug.is_empty()
        && slug.len() <= 300
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("slug");
        err.message = Some(
            "Use only lowercase letters, numbers, underscores or hyphens.".into(),
        );
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_validation() {
        assert!(validate_slug("suv-tejash-202601011200").is_ok());
        assert!(validate_slug("Suv Tejash").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn blank_search_is_ignored() {
        let query = ListQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(query.search_term(), None);
    }
}
