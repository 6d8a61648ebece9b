// Copyright (c) 2025 - Cowboy AI, Inc.
//! Maintenance occurrence value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remote identifier of a single maintenance occurrence
///
/// Opaque to the occurrence-group engine: it is only ever handed back to
/// the remote service when updating or deleting the occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OccurrenceId(i64);

impl OccurrenceId {
    /// Wrap a raw remote identifier
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw remote identifier
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One concrete scheduled instance of a recurring maintenance window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub id: OccurrenceId,
    #[serde(rename = "maintenanceid")]
    pub maintenance_id: i64,
    /// Start, unix seconds
    pub from: i64,
    /// End, unix seconds
    pub to: i64,
}

/// Query selecting the occurrences of one maintenance window inside a time range
///
/// `from` / `to` are the effective window: an occurrence matches when it
/// belongs to `maintenance_id` and lies entirely inside `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccurrenceQuery {
    #[serde(rename = "maintenanceid")]
    pub maintenance_id: i64,
    pub from: i64,
    pub to: i64,
}

impl OccurrenceQuery {
    /// Create a query for a maintenance window and effective range
    pub const fn new(maintenance_id: i64, from: i64, to: i64) -> Self {
        Self {
            maintenance_id,
            from,
            to,
        }
    }

    /// Whether `occurrence` is selected by this query
    pub fn matches(&self, occurrence: &Occurrence) -> bool {
        occurrence.maintenance_id == self.maintenance_id
            && occurrence.from >= self.from
            && occurrence.to <= self.to
    }
}

/// New window applied to an occurrence
///
/// Both bounds always travel together; the remote API moves an occurrence
/// as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrencePatch {
    pub from: i64,
    pub to: i64,
}

impl OccurrencePatch {
    pub const fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }
}
