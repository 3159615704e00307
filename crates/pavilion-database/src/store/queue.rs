//! Queue store trait: the FIFO ticket ledger.

use async_trait::async_trait;

use pavilion_core::result::AppResult;
use pavilion_core::types::id::{QueueId, VisitorId};
use pavilion_entity::queue::{QueueEntry, QueueStanding};

/// Persistence seam for queue ticketing.
///
/// The authoritative position counter per queue lives inside the store
/// and is only advanced within `join`; two concurrent joins must never
/// receive the same position, and a position is never reassigned after a
/// leave.
#[async_trait]
pub trait QueueStore: Send + Sync + 'static {
    /// Assign the next position in the queue to the visitor.
    ///
    /// Position is `1 + (max position ever assigned)`, computed and
    /// persisted atomically. The ledger row for an unknown queue is
    /// created lazily on first join.
    async fn join(&self, queue: QueueId, visitor: VisitorId) -> AppResult<QueueEntry>;

    /// Cancel the visitor's active entries in the queue.
    ///
    /// Returns the number of entries cancelled; zero when the visitor
    /// had no active entry (idempotent no-op, not an error). Remaining
    /// entries are never renumbered.
    async fn leave(&self, queue: QueueId, visitor: VisitorId) -> AppResult<u64>;

    /// Derived live standing for the visitor's active entry, if any.
    async fn standing(
        &self,
        queue: QueueId,
        visitor: VisitorId,
    ) -> AppResult<Option<QueueStanding>>;
}
