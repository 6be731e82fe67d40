use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::dto::common::{validate_slug, CheckedPayload};
use crate::models::leadership::Leadership;
use crate::models::translation::{Language, Translated, TranslationCheck};
use crate::utils::media::MediaBase;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LeadershipPayload {
    pub full_name: Translated,
    pub position: Translated,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub image: Option<String>,
    pub reception_time: Translated,
    #[validate(length(min = 1, max = 255))]
    pub phone_number: String,
    pub about: Translated,
    pub labor_activity: Translated,
    #[serde(default)]
    #[validate(custom(function = "validate_slug"))]
    pub slug: Option<String>,
}

impl CheckedPayload for LeadershipPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::after(primary, self.validate())
            .required("full_name", &self.full_name, Some(255))
            .required("position", &self.position, Some(255))
            .required("reception_time", &self.reception_time, Some(255))
            .required("about", &self.about, None)
            .required("labor_activity", &self.labor_activity, None)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadershipPatch {
    pub full_name: Option<Translated>,
    pub position: Option<Translated>,
    pub image: Option<String>,
    pub reception_time: Option<Translated>,
    pub phone_number: Option<String>,
    pub about: Option<Translated>,
    pub labor_activity: Option<Translated>,
}

impl LeadershipPatch {
    pub fn apply(self, fields: &mut LeadershipPayload, primary: Language) {
        if let Some(v) = self.full_name {
            fields.full_name.merge(v, primary);
        }
        if let Some(v) = self.position {
            fields.position.merge(v, primary);
        }
        if let Some(image) = self.image {
            // An empty string clears the photo.
            fields.image = Some(image).filter(|i| !i.is_empty());
        }
        if let Some(v) = self.reception_time {
            fields.reception_time.merge(v, primary);
        }
        if let Some(phone) = self.phone_number {
            fields.phone_number = phone;
        }
        if let Some(v) = self.about {
            fields.about.merge(v, primary);
        }
        if let Some(v) = self.labor_activity {
            fields.labor_activity.merge(v, primary);
        }
    }
}

impl From<&Leadership> for LeadershipPayload {
    fn from(value: &Leadership) -> Self {
        Self {
            full_name: value.full_name.0.clone(),
            position: value.position.0.clone(),
            image: value.image.clone(),
            reception_time: value.reception_time.0.clone(),
            phone_number: value.phone_number.clone(),
            about: value.about.0.clone(),
            labor_activity: value.labor_activity.0.clone(),
            slug: Some(value.slug.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadershipResponse {
    pub id: i64,
    pub full_name: Translated,
    pub position: Translated,
    pub image: Option<String>,
    pub reception_time: Translated,
    pub phone_number: String,
    pub about: Translated,
    pub labor_activity: Translated,
    pub slug: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl LeadershipResponse {
    pub fn build(value: Leadership, media: &MediaBase) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name.0,
            position: value.position.0,
            image: media.opt_url(value.image.as_deref()),
            reception_time: value.reception_time.0,
            phone_number: value.phone_number,
            about: value.about.0,
            labor_activity: value.labor_activity.0,
            slug: value.slug,
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}
