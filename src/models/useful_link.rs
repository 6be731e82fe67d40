use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::translation::Translated;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UsefulLink {
    pub id: i64,
    pub name: Json<Translated>,
    pub link: String,
    pub icon: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}
