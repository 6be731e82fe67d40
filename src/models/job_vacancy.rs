use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::translation::Translated;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobVacancy {
    pub id: i64,
    pub title: Json<Translated>,
    pub leadership_id: i64,
    pub department_id: i64,
    pub location: Json<Translated>,
    pub type_of_work_id: i64,
    pub description: Json<Translated>,
    pub slug: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
    /// Joined from the parent rows.
    pub leadership_name: Json<Translated>,
    pub department_name: Json<Translated>,
    pub type_of_work_name: Json<Translated>,
}
