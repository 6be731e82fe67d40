use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub id: i64,
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}
