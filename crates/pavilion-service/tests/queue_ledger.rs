//! Integration tests for the queue ticket ledger.

mod helpers;

use futures::future::join_all;

use pavilion_core::events::{EventPayload, QueueEvent};
use pavilion_core::types::id::{QueueId, VisitorId};

#[tokio::test]
async fn test_concurrent_joins_receive_distinct_contiguous_positions() {
    let (service, _sink) = helpers::queue_service();
    let queue = QueueId::new();

    let entries = join_all((0..10).map(|_| {
        let service = service.clone();
        async move { service.join(queue, VisitorId::new()).await }
    }))
    .await;

    let mut positions: Vec<i32> = entries.into_iter().map(|e| e.unwrap().position).collect();
    positions.sort_unstable();
    assert_eq!(positions, (1..=10).collect::<Vec<i32>>());
}

#[tokio::test]
async fn test_positions_are_never_reissued() {
    let (service, _sink) = helpers::queue_service();
    let queue = QueueId::new();
    let (a, b, c) = (VisitorId::new(), VisitorId::new(), VisitorId::new());

    assert_eq!(service.join(queue, a).await.unwrap().position, 1);
    assert_eq!(service.join(queue, b).await.unwrap().position, 2);
    assert_eq!(service.leave(queue, b).await.unwrap(), 1);
    assert_eq!(service.join(queue, c).await.unwrap().position, 3);
}

#[tokio::test]
async fn test_standing_improves_as_earlier_visitors_leave() {
    let (service, _sink) = helpers::queue_service();
    let queue = QueueId::new();
    let (a, b, c) = (VisitorId::new(), VisitorId::new(), VisitorId::new());

    service.join(queue, a).await.unwrap();
    service.join(queue, b).await.unwrap();
    service.join(queue, c).await.unwrap();

    let standing = service.standing(queue, c).await.unwrap().unwrap();
    assert_eq!(standing.position, 3);
    assert_eq!(standing.ahead, 2);
    assert_eq!(standing.live_rank(), 3);

    service.leave(queue, a).await.unwrap();

    // Position stays, rank improves.
    let standing = service.standing(queue, c).await.unwrap().unwrap();
    assert_eq!(standing.position, 3);
    assert_eq!(standing.ahead, 1);
    assert_eq!(standing.live_rank(), 2);

    assert!(service.standing(queue, a).await.unwrap().is_none());
}

#[tokio::test]
async fn test_leave_without_entry_is_a_silent_no_op() {
    let (service, sink) = helpers::queue_service();
    let queue = QueueId::new();

    assert_eq!(service.leave(queue, VisitorId::new()).await.unwrap(), 0);
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn test_joins_and_leaves_emit_change_events() {
    let (service, sink) = helpers::queue_service();
    let queue = QueueId::new();
    let visitor = VisitorId::new();

    service.join(queue, visitor).await.unwrap();
    service.leave(queue, visitor).await.unwrap();

    let events = sink.events();
    assert_eq!(events.len(), 2);
    for event in events {
        let EventPayload::Queue(QueueEvent::Changed { queue_id }) = event.payload else {
            panic!("unexpected event payload");
        };
        assert_eq!(queue_id, queue);
    }
}

#[tokio::test]
async fn test_queues_are_independent_ledgers() {
    let (service, _sink) = helpers::queue_service();
    let (first, second) = (QueueId::new(), QueueId::new());
    let visitor = VisitorId::new();

    assert_eq!(service.join(first, visitor).await.unwrap().position, 1);
    assert_eq!(service.join(second, visitor).await.unwrap().position, 1);
}
