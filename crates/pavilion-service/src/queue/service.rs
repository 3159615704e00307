//! Queue ticketing service.

use std::sync::Arc;

use tracing::info;

use pavilion_core::events::{DomainEvent, EventPayload, QueueEvent};
use pavilion_core::result::AppResult;
use pavilion_core::traits::EventSink;
use pavilion_core::types::id::{QueueId, VisitorId};
use pavilion_database::QueueStore;
use pavilion_entity::queue::{QueueEntry, QueueStanding};

/// Orchestrates queue joins and leaves over the ticket ledger.
#[derive(Clone)]
pub struct QueueService {
    /// Queue store.
    store: Arc<dyn QueueStore>,
    /// Sink for queue-change events.
    events: Arc<dyn EventSink>,
}

impl std::fmt::Debug for QueueService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueService").finish()
    }
}

impl QueueService {
    /// Creates a new queue service.
    pub fn new(store: Arc<dyn QueueStore>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    /// Join a queue, receiving the next never-reused position.
    pub async fn join(&self, queue: QueueId, visitor: VisitorId) -> AppResult<QueueEntry> {
        let entry = self.store.join(queue, visitor).await?;
        info!(
            queue_id = %queue,
            visitor_id = %visitor,
            position = entry.position,
            "Queue joined"
        );
        self.events
            .emit(DomainEvent::new(EventPayload::Queue(QueueEvent::Changed {
                queue_id: queue,
            })));
        Ok(entry)
    }

    /// Leave a queue. A visitor with no active entry is a no-op, and no
    /// change event is emitted for it.
    pub async fn leave(&self, queue: QueueId, visitor: VisitorId) -> AppResult<u64> {
        let cancelled = self.store.leave(queue, visitor).await?;
        if cancelled > 0 {
            info!(queue_id = %queue, visitor_id = %visitor, cancelled, "Queue left");
            self.events
                .emit(DomainEvent::new(EventPayload::Queue(QueueEvent::Changed {
                    queue_id: queue,
                })));
        }
        Ok(cancelled)
    }

    /// The visitor's live standing in the queue, if they hold an active
    /// entry. `ahead` counts only entries still active, so the rank
    /// improves as earlier visitors leave even though positions never
    /// renumber.
    pub async fn standing(
        &self,
        queue: QueueId,
        visitor: VisitorId,
    ) -> AppResult<Option<QueueStanding>> {
        self.store.standing(queue, visitor).await
    }
}
