use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::translation::Translated;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    ToshkentShahri,
    ToshkentViloyati,
    AndijonViloyati,
    BuxoroViloyati,
    FargonaViloyati,
    JizzaxViloyati,
    XorazmViloyati,
    NamanganViloyati,
    NavoiyViloyati,
    QashqadaryoViloyati,
    Qoraqalpogiston,
    SamarqandViloyati,
    SirdaryoViloyati,
    SurxondaryoViloyati,
}

impl Region {
    pub const ALL: [Region; 14] = [
        Region::ToshkentShahri,
        Region::ToshkentViloyati,
        Region::AndijonViloyati,
        Region::BuxoroViloyati,
        Region::FargonaViloyati,
        Region::JizzaxViloyati,
        Region::XorazmViloyati,
        Region::NamanganViloyati,
        Region::NavoiyViloyati,
        Region::QashqadaryoViloyati,
        Region::Qoraqalpogiston,
        Region::SamarqandViloyati,
        Region::SirdaryoViloyati,
        Region::SurxondaryoViloyati,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Region::ToshkentShahri => "toshkent_shahri",
            Region::ToshkentViloyati => "toshkent_viloyati",
            Region::AndijonViloyati => "andijon_viloyati",
            Region::BuxoroViloyati => "buxoro_viloyati",
            Region::FargonaViloyati => "fargona_viloyati",
            Region::JizzaxViloyati => "jizzax_viloyati",
            Region::XorazmViloyati => "xorazm_viloyati",
            Region::NamanganViloyati => "namangan_viloyati",
            Region::NavoiyViloyati => "navoiy_viloyati",
            Region::QashqadaryoViloyati => "qashqadaryo_viloyati",
            Region::Qoraqalpogiston => "qoraqalpogiston",
            Region::SamarqandViloyati => "samarqand_viloyati",
            Region::SirdaryoViloyati => "sirdaryo_viloyati",
            Region::SurxondaryoViloyati => "surxondaryo_viloyati",
        }
    }

    /// Uzbek (Latin) label shown on the site.
    pub fn display_uz(self) -> &'static str {
        match self {
            Region::ToshkentShahri => "Toshkent shahri",
            Region::ToshkentViloyati => "Toshkent viloyati",
            Region::AndijonViloyati => "Andijon viloyati",
            Region::BuxoroViloyati => "Buxoro viloyati",
            Region::FargonaViloyati => "Farg'ona viloyati",
            Region::JizzaxViloyati => "Jizzax viloyati",
            Region::XorazmViloyati => "Xorazm viloyati",
            Region::NamanganViloyati => "Namangan viloyati",
            Region::NavoiyViloyati => "Navoiy viloyati",
            Region::QashqadaryoViloyati => "Qashqadaryo viloyati",
            Region::Qoraqalpogiston => "Qoraqalpog'iston Respublikasi",
            Region::SamarqandViloyati => "Samarqand viloyati",
            Region::SirdaryoViloyati => "Sirdaryo viloyati",
            Region::SurxondaryoViloyati => "Surxondaryo viloyati",
        }
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| format!("Unknown region '{}'", s))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct About {
    pub id: i64,
    pub inn: String,
    pub short_name: Json<Translated>,
    pub legal_form: Json<Translated>,
    pub activity_status: Json<Translated>,
    pub founder: Json<Translated>,
    pub region: String,
    pub district: Json<Translated>,
    pub address: Json<Translated>,
    pub state_share: f64,
    pub economic_share: f64,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl About {
    /// Falls back to the raw value for rows written before a region rename.
    pub fn region_display(&self) -> String {
        self.region
            .parse::<Region>()
            .map(|region| region.display_uz().to_string())
            .unwrap_or_else(|_| self.region.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_wire_values_round_trip() {
        for region in Region::ALL {
            let json = serde_json::to_value(region).unwrap();
            assert_eq!(json, region.as_str());
            assert_eq!(region.as_str().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn unknown_region_is_rejected() {
        assert!("moskva".parse::<Region>().is_err());
        assert!(serde_json::from_str::<Region>("\"moskva\"").is_err());
    }

    #[test]
    fn display_label_uses_uzbek_names() {
        assert_eq!(Region::Qoraqalpogiston.display_uz(), "Qoraqalpog'iston Respublikasi");
        assert_eq!(Region::FargonaViloyati.display_uz(), "Farg'ona viloyati");
    }
}
