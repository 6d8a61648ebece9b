// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Group Identifier Codec
//!
//! Any query encodes to an identifier that decodes back to the same query,
//! and text that is not three integers never decodes.

use pingdom_provider::domain::OccurrenceQuery;
use pingdom_provider::occurrence::{decode, encode, OccurrenceError, OccurrenceGroup};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn any_query() -> impl Strategy<Value = OccurrenceQuery> {
    (any::<i64>(), any::<i64>(), any::<i64>())
        .prop_map(|(maintenance_id, from, to)| OccurrenceQuery::new(maintenance_id, from, to))
}

/// Identifiers with a field count other than three
fn wrong_arity() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(any::<i64>(), 0..3),
        prop::collection::vec(any::<i64>(), 4..8),
    ]
    .prop_map(|fields| {
        fields
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(":")
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: decode(encode(q)) == q
    #[test]
    fn prop_identifier_roundtrip(query in any_query()) {
        let identifier = encode(&query);
        prop_assert_eq!(decode(&identifier).unwrap(), query);
    }

    /// Property: the identifier is deterministic
    #[test]
    fn prop_identifier_is_deterministic(query in any_query()) {
        prop_assert_eq!(encode(&query), query.to_string());
        prop_assert_eq!(OccurrenceGroup::new(query).id(), encode(&query));
    }

    /// Property: distinct queries never share an identifier
    #[test]
    fn prop_identifier_is_injective(a in any_query(), b in any_query()) {
        prop_assume!(a != b);
        prop_assert_ne!(encode(&a), encode(&b));
    }

    /// Property: wrong field counts are rejected
    #[test]
    fn prop_wrong_arity_is_malformed(identifier in wrong_arity()) {
        let is_malformed = matches!(
            decode(&identifier),
            Err(OccurrenceError::MalformedIdentifier { .. })
        );
        prop_assert!(is_malformed);
    }

    /// Property: a non-numeric field is rejected
    #[test]
    fn prop_non_numeric_field_is_malformed(
        query in any_query(),
        position in 0usize..3,
        junk in "[a-zA-Z_]{1,8}",
    ) {
        let mut fields: Vec<String> = encode(&query).split(':').map(str::to_string).collect();
        fields[position] = junk;
        let identifier = fields.join(":");

        let is_malformed = matches!(
            decode(&identifier),
            Err(OccurrenceError::MalformedIdentifier { .. })
        );
        prop_assert!(is_malformed);
    }
}
