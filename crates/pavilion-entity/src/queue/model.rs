//! Queue entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use pavilion_core::types::id::{EntryId, QueueId, VisitorId};

use super::QueueEntryStatus;

/// One visitor's ticket in a named queue.
///
/// Positions are a historical ordering assigned at join time: 1-based,
/// strictly increasing per queue, and never reused after a leave. Live
/// rank is always derived (see [`QueueStanding`]), never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QueueEntry {
    /// Unique entry identifier.
    pub id: EntryId,
    /// The queue this entry belongs to.
    pub queue_id: QueueId,
    /// The visitor holding the ticket.
    pub visitor_id: VisitorId,
    /// Permanent position assigned at join time.
    pub position: i32,
    /// Whether the visitor is still waiting.
    pub status: QueueEntryStatus,
    /// When the visitor joined.
    pub joined_at: DateTime<Utc>,
}

/// Derived live standing for a waiting visitor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct QueueStanding {
    /// The historical position assigned at join time.
    pub position: i32,
    /// Active entries ahead (lower position, still waiting).
    pub ahead: i64,
}

impl QueueStanding {
    /// Live 1-based rank in the queue.
    pub fn live_rank(&self) -> i64 {
        self.ahead + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_rank_is_derived_from_entries_ahead() {
        let standing = QueueStanding {
            position: 7,
            ahead: 2,
        };
        assert_eq!(standing.live_rank(), 3);
    }
}
