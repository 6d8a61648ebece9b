// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for pingdom-provider
//!
//! Deterministic maintenance windows and seeded in-memory APIs. All
//! timestamps are fixed constants so tests are reproducible.
//!
//! # Design Principles
//! - No `Utc::now()`: every instant is derived from [`FIXED_START`]
//! - Fixtures are the only place that seeds the in-memory API
//! - Every test gets its own API instance; nothing is shared

#![allow(dead_code)]

use std::sync::Arc;

use pingdom_provider::domain::{MaintenanceWindow, OccurrenceId, RecurrenceType};
use pingdom_provider::service::{InMemoryPingdom, MaintenanceService};

/// 2026-01-19T12:00:00Z
pub const FIXED_START: i64 = 1_768_824_000;
pub const FIXED_START_RFC3339: &str = "2026-01-19T12:00:00Z";

pub const HOUR: i64 = 3_600;
pub const DAY: i64 = 86_400;

/// Maintenance id used by the query scenarios
pub const SCENARIO_MAINTENANCE_ID: i64 = 42;

/// Daily one-hour window repeating four times
pub fn daily_maintenance() -> MaintenanceWindow {
    MaintenanceWindow {
        description: "nightly database vacuum".to_string(),
        from: FIXED_START,
        to: FIXED_START + HOUR,
        effective_to: Some(FIXED_START + 3 * DAY + HOUR),
        recurrence_type: RecurrenceType::Day,
        repeat_every: Some(1),
        uptime_ids: vec![1001, 1002],
        ..Default::default()
    }
}

/// In-memory API holding [`daily_maintenance`]; returns the maintenance id
pub async fn seeded_api() -> (Arc<InMemoryPingdom>, i64) {
    let api = Arc::new(InMemoryPingdom::new());
    let maintenance_id = api
        .create_maintenance(&daily_maintenance())
        .await
        .expect("Failed to seed maintenance window");
    (api, maintenance_id)
}

/// Effective window covering every occurrence of [`daily_maintenance`]
pub fn full_range() -> (i64, i64) {
    (FIXED_START, FIXED_START + 3 * DAY + HOUR)
}

/// In-memory API with `count` occurrences of maintenance 42 inside
/// `[1000, 2000]`, returned in creation order
pub async fn scenario_api(count: usize) -> (Arc<InMemoryPingdom>, Vec<OccurrenceId>) {
    let api = Arc::new(InMemoryPingdom::new());
    let mut ids = Vec::with_capacity(count);
    for n in 0..count as i64 {
        let from = 1000 + n * 100;
        ids.push(
            api.insert_occurrence(SCENARIO_MAINTENANCE_ID, from, from + 50)
                .await,
        );
    }
    (api, ids)
}
