//! Shared test helpers for service integration tests.
//!
//! All services run over the in-memory stores, which honor the same
//! atomicity contracts as the PostgreSQL repositories, so concurrency
//! properties can be exercised deterministically without a database.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime, Utc};

use pavilion_core::events::DomainEvent;
use pavilion_core::traits::EventSink;
use pavilion_core::types::id::{SlotId, ZoneId};
use pavilion_database::memory::{MemoryBookingStore, MemoryCrowdStore, MemoryQueueStore};
use pavilion_entity::slot::{SlotConfiguration, SlotType};
use pavilion_entity::zone::Zone;
use pavilion_service::{BookingService, CrowdService, QueueService, TokenService};

/// Sink that records every emitted event for assertions.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl CollectingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: DomainEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn slot_config(max_bookings: i32, price_minor: i64) -> SlotConfiguration {
    SlotConfiguration {
        id: SlotId::new(),
        slot_time: ten_am(),
        slot_type: SlotType::Regular,
        max_bookings,
        price_minor,
        active: true,
        created_at: Utc::now(),
    }
}

pub fn zone(name: &str, occupancy: i32, threshold: i32) -> Zone {
    Zone {
        id: ZoneId::new(),
        name: name.to_string(),
        zone_type: "hall".to_string(),
        max_capacity: 500,
        current_occupancy: occupancy,
        alert_threshold: threshold,
        active: true,
        created_at: Utc::now(),
    }
}

pub fn ten_am() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap()
}

pub fn visit_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 1).unwrap()
}

pub fn booking_service() -> (BookingService, MemoryBookingStore) {
    let store = MemoryBookingStore::new();
    let service = BookingService::new(Arc::new(store.clone()), Arc::new(TokenService::new()));
    (service, store)
}

pub fn queue_service() -> (QueueService, Arc<CollectingSink>) {
    let sink = CollectingSink::new();
    let service = QueueService::new(Arc::new(MemoryQueueStore::new()), sink.clone());
    (service, sink)
}

pub fn crowd_service() -> (CrowdService, MemoryCrowdStore, Arc<CollectingSink>) {
    let store = MemoryCrowdStore::new();
    let sink = CollectingSink::new();
    let service = CrowdService::new(Arc::new(store.clone()), sink.clone());
    (service, store, sink)
}
