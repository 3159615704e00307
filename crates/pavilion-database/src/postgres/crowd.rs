//! PostgreSQL crowd repository: occupancy readings, samples, alerts.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use pavilion_core::error::AppError;
use pavilion_core::result::AppResult;
use pavilion_core::types::id::{AlertId, SampleId, ZoneId};
use pavilion_entity::zone::{Alert, OccupancyChange, Zone};

use super::{map_db_err, with_read_retry};
use crate::store::CrowdStore;

/// Crowd repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct CrowdRepository {
    pool: PgPool,
}

impl CrowdRepository {
    /// Create a new crowd repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrowdStore for CrowdRepository {
    async fn record_occupancy(&self, zone: ZoneId, occupancy: i32) -> AppResult<OccupancyChange> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_err("begin occupancy report", e))?;

        // Lock the zone row so the previous reading, the overwrite, and
        // the sample append form one atomic unit per zone.
        let previous: i32 = sqlx::query_scalar(
            "SELECT current_occupancy FROM zones WHERE id = $1 AND active FOR UPDATE",
        )
        .bind(zone)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_db_err("lock zone", e))?
        .ok_or_else(|| AppError::not_found("zone not found or inactive"))?;

        let updated = sqlx::query_as::<_, Zone>(
            "UPDATE zones SET current_occupancy = $2 WHERE id = $1 RETURNING *",
        )
        .bind(zone)
        .bind(occupancy)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_err("update occupancy", e))?;

        sqlx::query(
            "INSERT INTO occupancy_samples (id, zone_id, occupancy, recorded_at) \
             VALUES ($1, $2, $3, NOW())",
        )
        .bind(SampleId::new())
        .bind(zone)
        .bind(occupancy)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_db_err("append occupancy sample", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_err("commit occupancy report", e))?;

        debug!(zone_id = %zone, previous, occupancy, "Occupancy recorded");
        Ok(OccupancyChange {
            zone: updated,
            previous_occupancy: previous,
        })
    }

    async fn find_zone(&self, zone: ZoneId) -> AppResult<Option<Zone>> {
        with_read_retry(|| async {
            sqlx::query_as::<_, Zone>("SELECT * FROM zones WHERE id = $1")
                .bind(zone)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_db_err("find zone", e))
        })
        .await
    }

    async fn active_zones(&self) -> AppResult<Vec<Zone>> {
        with_read_retry(|| async {
            sqlx::query_as::<_, Zone>("SELECT * FROM zones WHERE active ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_db_err("list active zones", e))
        })
        .await
    }

    async fn try_raise_alert(
        &self,
        zone: ZoneId,
        occupancy: i32,
        threshold: i32,
    ) -> AppResult<Option<Alert>> {
        // The partial unique index on open alerts makes this a
        // conflict-free insert-if-absent: concurrent crossings for the
        // same zone produce exactly one alert row.
        sqlx::query_as::<_, Alert>(
            "INSERT INTO alerts (id, zone_id, occupancy, threshold, raised_at, resolved) \
             VALUES ($1, $2, $3, $4, NOW(), FALSE) \
             ON CONFLICT (zone_id) WHERE NOT resolved DO NOTHING \
             RETURNING *",
        )
        .bind(AlertId::new())
        .bind(zone)
        .bind(occupancy)
        .bind(threshold)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err("raise alert", e))
    }

    async fn open_alerts(&self) -> AppResult<Vec<Alert>> {
        with_read_retry(|| async {
            sqlx::query_as::<_, Alert>(
                "SELECT * FROM alerts WHERE NOT resolved ORDER BY raised_at DESC",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_db_err("list open alerts", e))
        })
        .await
    }

    async fn resolve_alert(&self, alert: AlertId) -> AppResult<Alert> {
        sqlx::query_as::<_, Alert>(
            "UPDATE alerts SET resolved = TRUE, resolved_at = NOW() \
             WHERE id = $1 AND NOT resolved \
             RETURNING *",
        )
        .bind(alert)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err("resolve alert", e))?
        .ok_or_else(|| AppError::not_found("alert not found or already resolved"))
    }
}
