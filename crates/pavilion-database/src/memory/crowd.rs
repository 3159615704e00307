//! In-memory crowd store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use pavilion_core::error::AppError;
use pavilion_core::result::AppResult;
use pavilion_core::types::id::{AlertId, SampleId, ZoneId};
use pavilion_entity::zone::{Alert, OccupancyChange, OccupancySample, Zone};

use crate::store::CrowdStore;

#[derive(Debug, Default)]
struct Inner {
    zones: HashMap<ZoneId, Zone>,
    samples: Vec<OccupancySample>,
    alerts: Vec<Alert>,
}

/// Crowd store backed by mutex-guarded maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryCrowdStore {
    state: Arc<Mutex<Inner>>,
}

impl MemoryCrowdStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a zone. Zones are administered externally in production;
    /// tests insert them directly.
    pub async fn insert_zone(&self, zone: Zone) {
        let mut inner = self.state.lock().await;
        inner.zones.insert(zone.id, zone);
    }

    /// Samples recorded for a zone, oldest first.
    pub async fn samples_for(&self, zone: ZoneId) -> Vec<OccupancySample> {
        let inner = self.state.lock().await;
        inner
            .samples
            .iter()
            .filter(|s| s.zone_id == zone)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CrowdStore for MemoryCrowdStore {
    async fn record_occupancy(&self, zone: ZoneId, occupancy: i32) -> AppResult<OccupancyChange> {
        let mut inner = self.state.lock().await;
        let sample = OccupancySample {
            id: SampleId::new(),
            zone_id: zone,
            occupancy,
            recorded_at: Utc::now(),
        };
        let updated = match inner.zones.get_mut(&zone) {
            Some(z) if z.active => {
                let previous = z.current_occupancy;
                z.current_occupancy = occupancy;
                OccupancyChange {
                    zone: z.clone(),
                    previous_occupancy: previous,
                }
            }
            _ => return Err(AppError::not_found("zone not found or inactive")),
        };
        inner.samples.push(sample);
        Ok(updated)
    }

    async fn find_zone(&self, zone: ZoneId) -> AppResult<Option<Zone>> {
        let inner = self.state.lock().await;
        Ok(inner.zones.get(&zone).cloned())
    }

    async fn active_zones(&self) -> AppResult<Vec<Zone>> {
        let inner = self.state.lock().await;
        let mut out: Vec<Zone> = inner.zones.values().filter(|z| z.active).cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn try_raise_alert(
        &self,
        zone: ZoneId,
        occupancy: i32,
        threshold: i32,
    ) -> AppResult<Option<Alert>> {
        let mut inner = self.state.lock().await;
        // At most one open alert per zone; a second raise in the same
        // breach episode is a no-op.
        if inner.alerts.iter().any(|a| a.zone_id == zone && !a.resolved) {
            return Ok(None);
        }
        let alert = Alert {
            id: AlertId::new(),
            zone_id: zone,
            occupancy,
            threshold,
            raised_at: Utc::now(),
            resolved: false,
            resolved_at: None,
        };
        inner.alerts.push(alert.clone());
        Ok(Some(alert))
    }

    async fn open_alerts(&self) -> AppResult<Vec<Alert>> {
        let inner = self.state.lock().await;
        let mut out: Vec<Alert> = inner.alerts.iter().filter(|a| !a.resolved).cloned().collect();
        out.sort_by(|a, b| b.raised_at.cmp(&a.raised_at));
        Ok(out)
    }

    async fn resolve_alert(&self, alert: AlertId) -> AppResult<Alert> {
        let mut inner = self.state.lock().await;
        match inner.alerts.iter_mut().find(|a| a.id == alert && !a.resolved) {
            Some(a) => {
                a.resolved = true;
                a.resolved_at = Some(Utc::now());
                Ok(a.clone())
            }
            None => Err(AppError::not_found("alert not found or already resolved")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(occupancy: i32) -> Zone {
        Zone {
            id: ZoneId::new(),
            name: "East Wing".to_string(),
            zone_type: "gallery".to_string(),
            max_capacity: 200,
            current_occupancy: occupancy,
            alert_threshold: 150,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_one_open_alert_per_zone_per_episode() {
        let store = MemoryCrowdStore::new();
        let z = zone(0);
        let id = z.id;
        store.insert_zone(z).await;

        let first = store.try_raise_alert(id, 160, 150).await.unwrap();
        assert!(first.is_some());
        assert!(store.try_raise_alert(id, 170, 150).await.unwrap().is_none());

        store.resolve_alert(first.unwrap().id).await.unwrap();
        assert!(store.try_raise_alert(id, 180, 150).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_reports_append_samples_and_overwrite_the_reading() {
        let store = MemoryCrowdStore::new();
        let z = zone(40);
        let id = z.id;
        store.insert_zone(z).await;

        let change = store.record_occupancy(id, 90).await.unwrap();
        assert_eq!(change.previous_occupancy, 40);
        assert_eq!(change.zone.current_occupancy, 90);

        store.record_occupancy(id, 10).await.unwrap();
        assert_eq!(store.samples_for(id).await.len(), 2);
    }
}
