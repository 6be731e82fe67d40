use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::translation::Translated;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Leadership {
    pub id: i64,
    pub full_name: Json<Translated>,
    pub position: Json<Translated>,
    pub image: Option<String>,
    pub reception_time: Json<Translated>,
    pub phone_number: String,
    pub about: Json<Translated>,
    pub labor_activity: Json<Translated>,
    pub slug: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}
