use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Statistics {
    pub id: i64,
    pub services_count: i32,
    pub regional_offices_count: i32,
    pub pumping_stations_count: i32,
    pub employees_count: i32,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}
