//! Crowd store trait: occupancy readings, samples, and alerts.

use async_trait::async_trait;

use pavilion_core::result::AppResult;
use pavilion_core::types::id::{AlertId, ZoneId};
use pavilion_entity::zone::{Alert, OccupancyChange, Zone};

/// Persistence seam for zone occupancy and crowd alerts.
#[async_trait]
pub trait CrowdStore: Send + Sync + 'static {
    /// Overwrite a zone's occupancy and append a sample, atomically.
    ///
    /// Returns the previous reading taken inside the same atomic
    /// section so the alert evaluator can detect threshold crossings
    /// without a second racy read. `NotFound` for unknown or inactive
    /// zones.
    async fn record_occupancy(&self, zone: ZoneId, occupancy: i32) -> AppResult<OccupancyChange>;

    /// Find a zone by id.
    async fn find_zone(&self, zone: ZoneId) -> AppResult<Option<Zone>>;

    /// All active zones, ordered by name.
    async fn active_zones(&self) -> AppResult<Vec<Zone>>;

    /// Raise an alert for a zone in breach, unless one is already open.
    ///
    /// Returns `None` when the zone already has an unresolved alert; at
    /// most one open alert exists per zone at any time, including under
    /// concurrent reports.
    async fn try_raise_alert(
        &self,
        zone: ZoneId,
        occupancy: i32,
        threshold: i32,
    ) -> AppResult<Option<Alert>>;

    /// All unresolved alerts, newest first.
    async fn open_alerts(&self) -> AppResult<Vec<Alert>>;

    /// Resolve an open alert (operator action).
    ///
    /// `NotFound` if the alert does not exist or is already resolved.
    async fn resolve_alert(&self, alert: AlertId) -> AppResult<Alert>;
}
