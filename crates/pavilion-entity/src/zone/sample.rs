//! Occupancy sample entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pavilion_core::types::id::{SampleId, ZoneId};

/// Append-only historical record of one occupancy report.
///
/// Written once per report and never mutated or deleted; retained for
/// external trend reporting.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OccupancySample {
    /// Unique sample identifier.
    pub id: SampleId,
    /// The zone the reading belongs to.
    pub zone_id: ZoneId,
    /// The reported occupancy.
    pub occupancy: i32,
    /// When the report was recorded.
    pub recorded_at: DateTime<Utc>,
}
