//! Banners, statistics, useful links and the organisation profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::dto::common::CheckedPayload;
use crate::models::about::{About, Region};
use crate::models::banner::Banner;
use crate::models::statistics::Statistics;
use crate::models::translation::{Language, Translated, TranslationCheck};
use crate::models::useful_link::UsefulLink;
use crate::utils::media::MediaBase;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BannerPayload {
    pub title: Translated,
    #[validate(length(min = 1, max = 255))]
    pub image: String,
}

impl CheckedPayload for BannerPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::after(primary, self.validate())
            .required("title", &self.title, Some(255))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BannerPatch {
    pub title: Option<Translated>,
    pub image: Option<String>,
}

impl BannerPatch {
    pub fn apply(self, fields: &mut BannerPayload, primary: Language) {
        if let Some(title) = self.title {
            fields.title.merge(title, primary);
        }
        if let Some(image) = self.image {
            fields.image = image;
        }
    }
}

impl From<&Banner> for BannerPayload {
    fn from(value: &Banner) -> Self {
        Self {
            title: value.title.0.clone(),
            image: value.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerResponse {
    pub id: i64,
    pub title: Translated,
    pub image: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl BannerResponse {
    pub fn build(value: Banner, media: &MediaBase) -> Self {
        Self {
            id: value.id,
            title: value.title.0,
            image: media.url(&value.image),
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StatisticsPayload {
    #[validate(range(min = 0))]
    pub services_count: i32,
    #[validate(range(min = 0))]
    pub regional_offices_count: i32,
    #[validate(range(min = 0))]
    pub pumping_stations_count: i32,
    #[validate(range(min = 0))]
    pub employees_count: i32,
}

impl CheckedPayload for StatisticsPayload {
    fn check(&self, _primary: Language) -> Result<(), ValidationErrors> {
        self.validate()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatisticsPatch {
    pub services_count: Option<i32>,
    pub regional_offices_count: Option<i32>,
    pub pumping_stations_count: Option<i32>,
    pub employees_count: Option<i32>,
}

impl StatisticsPatch {
    pub fn apply(self, fields: &mut StatisticsPayload) {
        if let Some(v) = self.services_count {
            fields.services_count = v;
        }
        if let Some(v) = self.regional_offices_count {
            fields.regional_offices_count = v;
        }
        if let Some(v) = self.pumping_stations_count {
            fields.pumping_stations_count = v;
        }
        if let Some(v) = self.employees_count {
            fields.employees_count = v;
        }
    }
}

impl From<&Statistics> for StatisticsPayload {
    fn from(value: &Statistics) -> Self {
        Self {
            services_count: value.services_count,
            regional_offices_count: value.regional_offices_count,
            pumping_stations_count: value.pumping_stations_count,
            employees_count: value.employees_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UsefulLinkPayload {
    pub name: Translated,
    #[validate(url, length(max = 200))]
    pub link: String,
    #[validate(length(min = 1, max = 255))]
    pub icon: String,
}

impl CheckedPayload for UsefulLinkPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::after(primary, self.validate())
            .required("name", &self.name, Some(255))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UsefulLinkPatch {
    pub name: Option<Translated>,
    pub link: Option<String>,
    pub icon: Option<String>,
}

impl UsefulLinkPatch {
    pub fn apply(self, fields: &mut UsefulLinkPayload, primary: Language) {
        if let Some(name) = self.name {
            fields.name.merge(name, primary);
        }
        if let Some(link) = self.link {
            fields.link = link;
        }
        if let Some(icon) = self.icon {
            fields.icon = icon;
        }
    }
}

impl From<&UsefulLink> for UsefulLinkPayload {
    fn from(value: &UsefulLink) -> Self {
        Self {
            name: value.name.0.clone(),
            link: value.link.clone(),
            icon: value.icon.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsefulLinkResponse {
    pub id: i64,
    pub name: Translated,
    pub link: String,
    pub icon: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl UsefulLinkResponse {
    pub fn build(value: UsefulLink, media: &MediaBase) -> Self {
        Self {
            id: value.id,
            name: value.name.0,
            link: value.link,
            icon: media.url(&value.icon),
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AboutPayload {
    #[validate(length(min = 1, max = 25))]
    pub inn: String,
    pub short_name: Translated,
    pub legal_form: Translated,
    pub activity_status: Translated,
    pub founder: Translated,
    pub region: Region,
    pub district: Translated,
    pub address: Translated,
    #[validate(range(min = 0.0, max = 100.0))]
    pub state_share: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub economic_share: f64,
}

impl CheckedPayload for AboutPayload {
    fn check(&self, primary: Language) -> Result<(), ValidationErrors> {
        TranslationCheck::after(primary, self.validate())
            .required("short_name", &self.short_name, Some(255))
            .required("legal_form", &self.legal_form, Some(100))
            .required("activity_status", &self.activity_status, Some(255))
            .required("founder", &self.founder, Some(255))
            .required("district", &self.district, Some(255))
            .required("address", &self.address, Some(255))
            .finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AboutPatch {
    pub inn: Option<String>,
    pub short_name: Option<Translated>,
    pub legal_form: Option<Translated>,
    pub activity_status: Option<Translated>,
    pub founder: Option<Translated>,
    pub region: Option<Region>,
    pub district: Option<Translated>,
    pub address: Option<Translated>,
    pub state_share: Option<f64>,
    pub economic_share: Option<f64>,
}

impl AboutPatch {
    pub fn apply(self, fields: &mut AboutPayload, primary: Language) {
        if let Some(inn) = self.inn {
            fields.inn = inn;
        }
        if let Some(v) = self.short_name {
            fields.short_name.merge(v, primary);
        }
        if let Some(v) = self.legal_form {
            fields.legal_form.merge(v, primary);
        }
        if let Some(v) = self.activity_status {
            fields.activity_status.merge(v, primary);
        }
        if let Some(v) = self.founder {
            fields.founder.merge(v, primary);
        }
        if let Some(region) = self.region {
            fields.region = region;
        }
        if let Some(v) = self.district {
            fields.district.merge(v, primary);
        }
        if let Some(v) = self.address {
            fields.address.merge(v, primary);
        }
        if let Some(v) = self.state_share {
            fields.state_share = v;
        }
        if let Some(v) = self.economic_share {
            fields.economic_share = v;
        }
    }
}

impl TryFrom<&About> for AboutPayload {
    type Error = crate::error::Error;

    fn try_from(value: &About) -> Result<Self, Self::Error> {
        let region = value
            .region
            .parse::<Region>()
            .map_err(crate::error::Error::Internal)?;
        Ok(Self {
            inn: value.inn.clone(),
            short_name: value.short_name.0.clone(),
            legal_form: value.legal_form.0.clone(),
            activity_status: value.activity_status.0.clone(),
            founder: value.founder.0.clone(),
            region,
            district: value.district.0.clone(),
            address: value.address.0.clone(),
            state_share: value.state_share,
            economic_share: value.economic_share,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutResponse {
    pub id: i64,
    pub inn: String,
    pub short_name: Translated,
    pub legal_form: Translated,
    pub activity_status: Translated,
    pub founder: Translated,
    pub region: String,
    pub region_display: String,
    pub district: Translated,
    pub address: Translated,
    pub state_share: f64,
    pub economic_share: f64,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl From<About> for AboutResponse {
    fn from(value: About) -> Self {
        let region_display = value.region_display();
        Self {
            id: value.id,
            inn: value.inn,
            short_name: value.short_name.0,
            legal_form: value.legal_form.0,
            activity_status: value.activity_status.0,
            founder: value.founder.0,
            region: value.region,
            region_display,
            district: value.district.0,
            address: value.address.0,
            state_share: value.state_share,
            economic_share: value.economic_share,
            created_date: value.created_date,
            updated_date: value.updated_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn about_payload() -> AboutPayload {
        serde_json::from_value(json!({
            "inn": "201234567",
            "short_name": {"uz": "Suv xo'jaligi"},
            "legal_form": {"uz": "Davlat muassasasi"},
            "activity_status": {"uz": "Faol"},
            "founder": {"uz": "Vazirlik"},
            "region": "navoiy_viloyati",
            "district": {"uz": "Karmana"},
            "address": {"uz": "Navoiy sh."},
            "state_share": 100.0,
            "economic_share": 0.0
        }))
        .unwrap()
    }

    #[test]
    fn about_shares_must_be_percentages() {
        let mut payload = about_payload();
        assert!(payload.check(Language::UzLatn).is_ok());
        payload.state_share = 100.5;
        let err = payload.check(Language::UzLatn).unwrap_err();
        assert!(err.field_errors().contains_key("state_share"));
    }

    #[test]
    fn about_reports_missing_primary_together_with_range_errors() {
        let mut payload = about_payload();
        payload.economic_share = -1.0;
        payload.founder = Translated::new(Language::Ru, "Министерство");
        let err = payload.check(Language::UzLatn).unwrap_err();
        let fields = err.field_errors();
        assert!(fields.contains_key("economic_share"));
        assert!(fields.contains_key("founder"));
    }

    #[test]
    fn useful_link_requires_valid_url() {
        let payload = UsefulLinkPayload {
            name: Translated::new(Language::UzLatn, "Hukumat portali"),
            link: "not a url".into(),
            icon: "links_icons/gov.png".into(),
        };
        let err = payload.check(Language::UzLatn).unwrap_err();
        assert!(err.field_errors().contains_key("link"));
    }

    #[test]
    fn statistics_counters_are_non_negative() {
        let payload = StatisticsPayload {
            employees_count: -3,
            ..Default::default()
        };
        assert!(payload.check(Language::UzLatn).is_err());
    }

    #[test]
    fn banner_patch_merges_title_translations() {
        let mut fields = BannerPayload {
            title: Translated::new(Language::UzLatn, "Bahor"),
            image: "banners/a.jpg".into(),
        };
        let patch: BannerPatch = serde_json::from_value(json!({"title": {"ru": "Весна"}})).unwrap();
        patch.apply(&mut fields, Language::UzLatn);
        assert_eq!(fields.title.get(Language::UzLatn), Some("Bahor"));
        assert_eq!(fields.title.get(Language::Ru), Some("Весна"));
        assert_eq!(fields.image, "banners/a.jpg");
    }
}
