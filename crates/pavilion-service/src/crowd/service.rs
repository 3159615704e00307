//! Crowd monitoring service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use pavilion_core::error::AppError;
use pavilion_core::events::{CrowdEvent, DomainEvent, EventPayload};
use pavilion_core::result::AppResult;
use pavilion_core::traits::EventSink;
use pavilion_core::types::id::{AlertId, ZoneId};
use pavilion_database::CrowdStore;
use pavilion_entity::zone::{Alert, ZoneStatus};

/// Outcome of an accepted occupancy report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyReport {
    /// The zone after the report, with its derived alert level.
    pub status: ZoneStatus,
    /// The alert raised by this report, if it opened a breach episode.
    pub alert: Option<Alert>,
}

/// Orchestrates occupancy reports and the alert evaluator.
#[derive(Clone)]
pub struct CrowdService {
    /// Crowd store.
    store: Arc<dyn CrowdStore>,
    /// Sink for occupancy and alert events.
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for CrowdService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrowdService").finish()
    }
}

impl CrowdService {
    /// Creates a new crowd service.
    pub fn new(store: Arc<dyn CrowdStore>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    /// Record a staff occupancy report for a zone.
    ///
    /// Overwrites the zone's reading, appends a history sample, and runs
    /// the alert evaluator: a report that moves the zone from below its
    /// threshold to at or above it opens an alert, unless one is already
    /// open for the zone. Reports that stay in breach never open a
    /// second alert in the same episode.
    pub async fn report(&self, zone: ZoneId, occupancy: i32) -> AppResult<OccupancyReport> {
        if occupancy < 0 {
            return Err(AppError::validation("occupancy cannot be negative"));
        }

        let change = self.store.record_occupancy(zone, occupancy).await?;
        let crossed = change.crossed_into_breach();
        let status = ZoneStatus::from(change.zone);

        self.events.emit(DomainEvent::new(EventPayload::Crowd(
            CrowdEvent::OccupancyChanged {
                zone_id: zone,
                occupancy,
                alert_level: status.alert_level,
            },
        )));

        let alert = if crossed {
            self.store
                .try_raise_alert(zone, occupancy, status.zone.alert_threshold)
                .await?
        } else {
            None
        };

        if let Some(ref alert) = alert {
            warn!(
                zone_id = %zone,
                alert_id = %alert.id,
                occupancy,
                threshold = alert.threshold,
                "Zone crossed its alert threshold"
            );
            self.events.emit(DomainEvent::new(EventPayload::Crowd(
                CrowdEvent::AlertRaised {
                    zone_id: zone,
                    alert_id: alert.id,
                    occupancy,
                    threshold: alert.threshold,
                },
            )));
        }

        Ok(OccupancyReport { status, alert })
    }

    /// One zone's current reading with its derived alert level.
    pub async fn zone_status(&self, zone: ZoneId) -> AppResult<ZoneStatus> {
        self.store
            .find_zone(zone)
            .await?
            .map(ZoneStatus::from)
            .ok_or_else(|| AppError::not_found("zone not found"))
    }

    /// All active zones with derived alert levels, for the operator
    /// overview board.
    pub async fn overview(&self) -> AppResult<Vec<ZoneStatus>> {
        Ok(self
            .store
            .active_zones()
            .await?
            .into_iter()
            .map(ZoneStatus::from)
            .collect())
    }

    /// All unresolved alerts, newest first.
    pub async fn open_alerts(&self) -> AppResult<Vec<Alert>> {
        self.store.open_alerts().await
    }

    /// Resolve an open alert. Resolution is an operator judgment; it is
    /// never triggered automatically by a low reading.
    pub async fn resolve_alert(&self, alert: AlertId) -> AppResult<Alert> {
        let resolved = self.store.resolve_alert(alert).await?;
        info!(alert_id = %resolved.id, zone_id = %resolved.zone_id, "Alert resolved");
        Ok(resolved)
    }
}
