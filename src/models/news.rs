use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::translation::Translated;

pub const DEFAULT_MINUTES_TO_READ: i32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct News {
    pub id: i64,
    pub title: Json<Translated>,
    pub main_image: String,
    pub category: Option<Json<Translated>>,
    pub minutes_to_read: i32,
    pub content: Json<Translated>,
    pub slug: String,
    /// Counted from `view_hits` at read time.
    pub views_count: i64,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}
