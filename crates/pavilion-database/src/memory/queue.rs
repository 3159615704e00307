//! In-memory queue store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use pavilion_core::result::AppResult;
use pavilion_core::types::id::{EntryId, QueueId, VisitorId};
use pavilion_entity::queue::{QueueEntry, QueueEntryStatus, QueueStanding};

use crate::store::QueueStore;

#[derive(Debug, Default)]
struct Inner {
    // Mirrors the `queues.last_position` ledger row: advances on every
    // join and never rewinds, so positions are never reissued.
    counters: HashMap<QueueId, i32>,
    entries: Vec<QueueEntry>,
}

/// Queue store backed by a mutex-guarded ledger.
#[derive(Debug, Clone, Default)]
pub struct MemoryQueueStore {
    state: Arc<Mutex<Inner>>,
}

impl MemoryQueueStore {
    /// Create an empty store. Ledgers are created lazily on first join.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueStore for MemoryQueueStore {
    async fn join(&self, queue: QueueId, visitor: VisitorId) -> AppResult<QueueEntry> {
        let mut inner = self.state.lock().await;
        let counter = inner.counters.entry(queue).or_insert(0);
        *counter += 1;
        let position = *counter;

        let entry = QueueEntry {
            id: EntryId::new(),
            queue_id: queue,
            visitor_id: visitor,
            position,
            status: QueueEntryStatus::Active,
            joined_at: Utc::now(),
        };
        inner.entries.push(entry.clone());
        Ok(entry)
    }

    async fn leave(&self, queue: QueueId, visitor: VisitorId) -> AppResult<u64> {
        let mut inner = self.state.lock().await;
        let mut cancelled = 0u64;
        for entry in inner.entries.iter_mut().filter(|e| {
            e.queue_id == queue
                && e.visitor_id == visitor
                && e.status == QueueEntryStatus::Active
        }) {
            entry.status = QueueEntryStatus::Cancelled;
            cancelled += 1;
        }
        Ok(cancelled)
    }

    async fn standing(
        &self,
        queue: QueueId,
        visitor: VisitorId,
    ) -> AppResult<Option<QueueStanding>> {
        let inner = self.state.lock().await;
        let position = inner
            .entries
            .iter()
            .filter(|e| {
                e.queue_id == queue
                    && e.visitor_id == visitor
                    && e.status == QueueEntryStatus::Active
            })
            .map(|e| e.position)
            .min();
        Ok(position.map(|position| QueueStanding {
            position,
            ahead: inner
                .entries
                .iter()
                .filter(|e| {
                    e.queue_id == queue
                        && e.status == QueueEntryStatus::Active
                        && e.position < position
                })
                .count() as i64,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_positions_are_never_reissued_after_a_leave() {
        let store = MemoryQueueStore::new();
        let queue = QueueId::new();
        let (a, b, c) = (VisitorId::new(), VisitorId::new(), VisitorId::new());

        assert_eq!(store.join(queue, a).await.unwrap().position, 1);
        assert_eq!(store.join(queue, b).await.unwrap().position, 2);
        assert_eq!(store.leave(queue, b).await.unwrap(), 1);
        assert_eq!(store.join(queue, c).await.unwrap().position, 3);
    }

    #[tokio::test]
    async fn test_standing_counts_only_active_entries_ahead() {
        let store = MemoryQueueStore::new();
        let queue = QueueId::new();
        let (a, b, c) = (VisitorId::new(), VisitorId::new(), VisitorId::new());

        store.join(queue, a).await.unwrap();
        store.join(queue, b).await.unwrap();
        store.join(queue, c).await.unwrap();
        store.leave(queue, a).await.unwrap();

        let standing = store.standing(queue, c).await.unwrap().unwrap();
        assert_eq!(standing.position, 3);
        assert_eq!(standing.ahead, 1);
        assert_eq!(standing.live_rank(), 2);

        assert!(store.standing(queue, a).await.unwrap().is_none());
    }
}
