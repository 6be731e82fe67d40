use std::net::IpAddr;

use sqlx::types::ipnetwork::IpNetwork;
use sqlx::PgPool;

use crate::error::{Error, Result};
use crate::models::view_hit::ViewTarget;

/// Append-only view log. Totals are counted from `view_hits` on read.
#[derive(Clone)]
pub struct ViewService {
    pool: PgPool,
    per_ip_limit: i64,
    window_days: i64,
}

impl ViewService {
    pub fn new(pool: PgPool, per_ip_limit: i64, window_days: i64) -> Self {
        Self {
            pool,
            per_ip_limit,
            window_days: window_days.max(1),
        }
    }

    /// Records one hit and returns the new total. With a per-IP limit set, a
    /// client that already reached it inside the window only gets the total.
    pub async fn increment(
        &self,
        target: ViewTarget,
        id: i64,
        ip: Option<IpAddr>,
        user_agent: Option<&str>,
    ) -> Result<i64> {
        self.ensure_exists(target, id).await?;

        let ip = ip.map(IpNetwork::from);
        if let Some(ip) = ip.filter(|_| self.per_ip_limit > 0) {
            let recent: i64 = sqlx::query_scalar(
                r#"
                SELECT COUNT(*) FROM view_hits
                WHERE entity_type = $1 AND entity_id = $2 AND ip_address = $3
                  AND created_date > NOW() - ($4::float8 * INTERVAL '1 day')
                "#,
            )
            .bind(target.entity_type())
            .bind(id)
            .bind(ip)
            .bind(self.window_days as f64)
            .fetch_one(&self.pool)
            .await?;

            if recent >= self.per_ip_limit {
                tracing::debug!(entity = target.entity_type(), id, %ip, "view hit throttled");
                return self.count(target, id).await;
            }
        }

        sqlx::query(
            "INSERT INTO view_hits (entity_type, entity_id, ip_address, user_agent) VALUES ($1, $2, $3, $4)",
        )
        .bind(target.entity_type())
        .bind(id)
        .bind(ip)
        .bind(user_agent)
        .execute(&self.pool)
        .await?;

        self.count(target, id).await
    }

    pub async fn count(&self, target: ViewTarget, id: i64) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM view_hits WHERE entity_type = $1 AND entity_id = $2",
        )
        .bind(target.entity_type())
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    /// Deletes the row and its hit log in one transaction.
    pub async fn delete_with_hits(&self, target: ViewTarget, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", target.table()))
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            return Err(not_found(target));
        }

        let hits = sqlx::query("DELETE FROM view_hits WHERE entity_type = $1 AND entity_id = $2")
            .bind(target.entity_type())
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(
            entity = target.entity_type(),
            id,
            hits = hits.rows_affected(),
            "deleted with view log"
        );
        Ok(())
    }

    async fn ensure_exists(&self, target: ViewTarget, id: i64) -> Result<()> {
        let exists: bool = sqlx::query_scalar(&format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)",
            target.table()
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if exists {
            Ok(())
        } else {
            Err(not_found(target))
        }
    }
}

fn not_found(target: ViewTarget) -> Error {
    Error::NotFound(format!("{} not found", target.label()))
}
