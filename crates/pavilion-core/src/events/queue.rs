//! Queue-related domain events.

use serde::{Deserialize, Serialize};

use crate::types::id::QueueId;

/// Events related to queue ticketing.
///
/// Payloads carry identifiers only; subscribers re-query the ledger for
/// the ordered state they care about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QueueEvent {
    /// The ordered state of a queue changed (a visitor joined or left).
    Changed {
        /// The queue that changed.
        queue_id: QueueId,
    },
}
