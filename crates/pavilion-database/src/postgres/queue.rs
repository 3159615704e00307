//! PostgreSQL queue repository: the FIFO ticket ledger.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use pavilion_core::result::AppResult;
use pavilion_core::types::id::{EntryId, QueueId, VisitorId};
use pavilion_entity::queue::{QueueEntry, QueueStanding};

use super::{map_db_err, with_read_retry};
use crate::store::QueueStore;

/// Queue repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct QueueRepository {
    pool: PgPool,
}

impl QueueRepository {
    /// Create a new queue repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueStore for QueueRepository {
    async fn join(&self, queue: QueueId, visitor: VisitorId) -> AppResult<QueueEntry> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_db_err("begin queue join", e))?;

        // Single-statement counter advance. The upsert takes the ledger
        // row lock, so concurrent joins are serialized and each counter
        // value is handed out exactly once. The ledger row is created
        // lazily on first join.
        let position: i32 = sqlx::query_scalar(
            "INSERT INTO queues (id, last_position) VALUES ($1, 1) \
             ON CONFLICT (id) DO UPDATE SET last_position = queues.last_position + 1 \
             RETURNING last_position",
        )
        .bind(queue)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_err("advance queue counter", e))?;

        let entry = sqlx::query_as::<_, QueueEntry>(
            "INSERT INTO queue_entries (id, queue_id, visitor_id, position, status, joined_at) \
             VALUES ($1, $2, $3, $4, 'active', NOW()) \
             RETURNING *",
        )
        .bind(EntryId::new())
        .bind(queue)
        .bind(visitor)
        .bind(position)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_err("insert queue entry", e))?;

        tx.commit()
            .await
            .map_err(|e| map_db_err("commit queue join", e))?;

        debug!(queue_id = %queue, position, "Queue position assigned");
        Ok(entry)
    }

    async fn leave(&self, queue: QueueId, visitor: VisitorId) -> AppResult<u64> {
        // Positions are historical; leaving cancels the entry without
        // renumbering anyone behind it. No matching entry is a no-op.
        let result = sqlx::query(
            "UPDATE queue_entries SET status = 'cancelled' \
             WHERE queue_id = $1 AND visitor_id = $2 AND status = 'active'",
        )
        .bind(queue)
        .bind(visitor)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_err("cancel queue entries", e))?;

        Ok(result.rows_affected())
    }

    async fn standing(
        &self,
        queue: QueueId,
        visitor: VisitorId,
    ) -> AppResult<Option<QueueStanding>> {
        with_read_retry(|| async {
            sqlx::query_as::<_, QueueStanding>(
                "SELECT e.position, \
                        (SELECT COUNT(*) FROM queue_entries a \
                          WHERE a.queue_id = e.queue_id AND a.status = 'active' \
                            AND a.position < e.position) AS ahead \
                 FROM queue_entries e \
                 WHERE e.queue_id = $1 AND e.visitor_id = $2 AND e.status = 'active' \
                 ORDER BY e.position \
                 LIMIT 1",
            )
            .bind(queue)
            .bind(visitor)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_db_err("query queue standing", e))
        })
        .await
    }
}
