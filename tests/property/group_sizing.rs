// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Group Sizing and Bulk Operations
//!
//! A group's size is the number of seeded occurrences inside its window,
//! bulk delete removes exactly those, and bulk update touches each match
//! exactly once.

use std::sync::Arc;

use pingdom_provider::domain::{OccurrencePatch, OccurrenceQuery};
use pingdom_provider::occurrence::OccurrenceGroup;
use pingdom_provider::service::memory::RecordedCall;
use pingdom_provider::service::InMemoryPingdom;
use proptest::prelude::*;

const MAINTENANCE_ID: i64 = 7;

// ============================================================================
// Strategies
// ============================================================================

/// Occurrence windows as (start, duration)
fn windows() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..10_000, 1i64..500), 0..24)
}

fn effective_range() -> impl Strategy<Value = (i64, i64)> {
    (0i64..10_000, 0i64..10_000).prop_map(|(a, b)| (a.min(b), a.max(b)))
}

fn seed(windows: &[(i64, i64)]) -> Arc<InMemoryPingdom> {
    let api = Arc::new(InMemoryPingdom::new());
    tokio_test::block_on(async {
        for (start, duration) in windows {
            api.insert_occurrence(MAINTENANCE_ID, *start, start + duration)
                .await;
        }
    });
    api
}

fn expected_matches(windows: &[(i64, i64)], from: i64, to: i64) -> usize {
    windows
        .iter()
        .filter(|(start, duration)| *start >= from && start + duration <= to)
        .count()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: size counts exactly the occurrences inside the window
    #[test]
    fn prop_size_counts_contained_occurrences(
        windows in windows(),
        (from, to) in effective_range(),
    ) {
        let api = seed(&windows);
        let group = OccurrenceGroup::new(OccurrenceQuery::new(MAINTENANCE_ID, from, to));

        let size = tokio_test::block_on(group.size(api.as_ref())).unwrap();
        prop_assert_eq!(size, expected_matches(&windows, from, to));
    }

    /// Property: delete removes the group and nothing else
    #[test]
    fn prop_delete_removes_exactly_the_group(
        windows in windows(),
        (from, to) in effective_range(),
    ) {
        let api = seed(&windows);
        let group = OccurrenceGroup::new(OccurrenceQuery::new(MAINTENANCE_ID, from, to));
        let expected = expected_matches(&windows, from, to);

        let deleted = tokio_test::block_on(group.delete(&api)).unwrap();
        prop_assert_eq!(deleted, expected);

        let remaining = tokio_test::block_on(api.occurrences());
        prop_assert_eq!(remaining.len(), windows.len() - expected);
        prop_assert_eq!(tokio_test::block_on(group.size(api.as_ref())).unwrap(), 0);
    }

    /// Property: update issues one call per match
    #[test]
    fn prop_update_touches_each_match_once(
        windows in windows(),
        (from, to) in effective_range(),
    ) {
        let api = seed(&windows);
        let group = OccurrenceGroup::new(OccurrenceQuery::new(MAINTENANCE_ID, from, to));
        let matches = tokio_test::block_on(group.list(api.as_ref())).unwrap();

        let updated = tokio_test::block_on(group.update(&api, 20_000, 20_100)).unwrap();
        prop_assert_eq!(updated, matches.len());

        let calls = tokio_test::block_on(api.calls());
        for occurrence in &matches {
            let count = calls
                .iter()
                .filter(|call| **call == RecordedCall::Update(occurrence.id, OccurrencePatch::new(20_000, 20_100)))
                .count();
            prop_assert_eq!(count, 1);
        }
    }
}
