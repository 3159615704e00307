//! Integration tests for slot allocation and the booking lifecycle.

mod helpers;

use futures::future::join_all;

use pavilion_core::error::ErrorKind;
use pavilion_core::types::id::VisitorId;
use pavilion_entity::booking::BookingStatus;
use pavilion_entity::slot::SlotType;
use pavilion_service::ReserveRequest;

fn request() -> ReserveRequest {
    ReserveRequest {
        slot_date: helpers::visit_date(),
        slot_time: helpers::ten_am(),
        slot_type: SlotType::Regular,
        party_size: 2,
    }
}

#[tokio::test]
async fn test_concurrent_reservations_never_exceed_capacity() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(3, 1500)).await;

    let attempts = join_all((0..10).map(|_| {
        let service = service.clone();
        async move { service.reserve(VisitorId::new(), request()).await }
    }))
    .await;

    let confirmed = attempts.iter().filter(|r| r.is_ok()).count();
    assert_eq!(confirmed, 3);
    for failed in attempts.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(failed.kind, ErrorKind::Conflict);
    }

    // The slot is now full.
    let open = service
        .availability(helpers::visit_date(), SlotType::Regular)
        .await
        .unwrap();
    assert!(open.is_empty());
}

#[tokio::test]
async fn test_concurrent_verifications_have_exactly_one_winner() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(5, 0)).await;

    let booking = service
        .reserve(VisitorId::new(), request())
        .await
        .unwrap()
        .booking;
    let token = booking.verification_token.clone();

    let attempts = join_all((0..5).map(|_| {
        let service = service.clone();
        let token = token.clone();
        async move { service.verify(&token).await }
    }))
    .await;

    assert_eq!(attempts.iter().filter(|r| r.is_ok()).count(), 1);
    for failed in attempts.iter().filter_map(|r| r.as_ref().err()) {
        assert_eq!(failed.kind, ErrorKind::Conflict);
        assert!(failed.message.contains("already used"));
    }

    let after = service.booking(booking.visitor_id, booking.id).await.unwrap();
    assert_eq!(after.status, BookingStatus::Completed);
}

#[tokio::test]
async fn test_cancellation_frees_capacity() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(1, 1500)).await;

    let holder = VisitorId::new();
    let booking = service.reserve(holder, request()).await.unwrap().booking;

    let full = service.reserve(VisitorId::new(), request()).await.unwrap_err();
    assert_eq!(full.kind, ErrorKind::Conflict);

    let cancelled = service.cancel(holder, booking.id).await.unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    service.reserve(VisitorId::new(), request()).await.unwrap();
}

#[tokio::test]
async fn test_cancelled_booking_cannot_check_in() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(2, 1500)).await;

    let visitor = VisitorId::new();
    let booking = service.reserve(visitor, request()).await.unwrap().booking;
    service.cancel(visitor, booking.id).await.unwrap();

    let err = service.verify(&booking.verification_token).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert!(err.message.contains("cancelled"));
}

#[tokio::test]
async fn test_cancel_is_owner_scoped_and_single_use() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(2, 1500)).await;

    let owner = VisitorId::new();
    let booking = service.reserve(owner, request()).await.unwrap().booking;

    let stranger = service.cancel(VisitorId::new(), booking.id).await.unwrap_err();
    assert_eq!(stranger.kind, ErrorKind::NotFound);

    service.cancel(owner, booking.id).await.unwrap();
    let again = service.cancel(owner, booking.id).await.unwrap_err();
    assert_eq!(again.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let (service, _store) = helpers::booking_service();
    let err = service.verify("no-such-token").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_party_size_is_validated_before_allocation() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(5, 1500)).await;

    for party_size in [0, -1, 11] {
        let err = service
            .reserve(
                VisitorId::new(),
                ReserveRequest {
                    party_size,
                    ..request()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    // Nothing was allocated.
    let open = service
        .availability(helpers::visit_date(), SlotType::Regular)
        .await
        .unwrap();
    assert_eq!(open[0].booked, 0);
}

#[tokio::test]
async fn test_reservation_without_configuration_is_not_found() {
    let (service, _store) = helpers::booking_service();
    let err = service.reserve(VisitorId::new(), request()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_zero_price_slots_are_settled_at_reservation() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(2, 0)).await;

    let booking = service
        .reserve(VisitorId::new(), request())
        .await
        .unwrap()
        .booking;
    assert_eq!(booking.amount_minor, 0);
    assert_eq!(
        booking.payment_status,
        pavilion_entity::booking::PaymentStatus::Completed
    );
}

#[tokio::test]
async fn test_pass_is_rendered_only_while_confirmed() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(2, 1500)).await;

    let visitor = VisitorId::new();
    let reservation = service.reserve(visitor, request()).await.unwrap();
    let booking = reservation.booking;

    // The pass comes back with the reservation and can be re-rendered.
    assert_eq!(reservation.pass.booking_id, booking.id);
    assert!(
        reservation
            .pass
            .image_data_url
            .starts_with("data:image/png;base64,")
    );

    let pass = service.pass(visitor, booking.id).await.unwrap();
    assert_eq!(pass.verification_token, booking.verification_token);
    assert_eq!(pass.image_data_url, reservation.pass.image_data_url);

    service.cancel(visitor, booking.id).await.unwrap();
    let err = service.pass(visitor, booking.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_availability_reports_live_remaining_capacity() {
    let (service, store) = helpers::booking_service();
    store.insert_slot(helpers::slot_config(2, 1500)).await;

    let open = service
        .availability(helpers::visit_date(), SlotType::Regular)
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].remaining, 2);

    service.reserve(VisitorId::new(), request()).await.unwrap();
    let open = service
        .availability(helpers::visit_date(), SlotType::Regular)
        .await
        .unwrap();
    assert_eq!(open[0].booked, 1);
    assert_eq!(open[0].remaining, 1);
}
