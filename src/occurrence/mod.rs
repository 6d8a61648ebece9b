// Copyright (c) 2025 - Cowboy AI, Inc.
//! Occurrence Groups
//!
//! A maintenance window with a recurrence produces many occurrences, and
//! Pingdom has no entity that addresses "all occurrences of window X between
//! A and B". An [`OccurrenceGroup`] is that missing entity: a query that is
//! re-resolved against the remote service on every call.
//!
//! # Architecture
//!
//! ```text
//! identifier ──decode──> OccurrenceQuery ──> OccurrenceGroup
//!                                                │
//!                         list / sample / size / │ must_exist
//!                                                ▼
//!                                       OccurrenceService
//!                                                ▲
//!                          update / delete       │
//! OccurrenceGroup ──list──> fan_out ──one task per occurrence
//! ```
//!
//! # Bulk semantics
//!
//! Bulk updates and deletes are best-effort, not atomic. The first failing
//! occurrence aborts the operation with [`OccurrenceError::PartialFailure`];
//! occurrences already mutated stay mutated and nothing is rolled back.
//! Re-list the group to learn the resulting remote state.

pub mod fanout;
pub mod group;
pub mod identity;
pub mod state;

pub use fanout::{fan_out, FanOutError};
pub use group::OccurrenceGroup;
pub use identity::{decode, encode, SEPARATOR};
pub use state::OccurrenceState;

use thiserror::Error;

use crate::domain::{OccurrenceId, OccurrenceQuery};
use crate::errors::ApiError;

/// Errors produced by occurrence-group operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OccurrenceError {
    /// Identifier does not decode to a query
    #[error("Malformed occurrence group identifier {identifier:?}: {reason}")]
    MalformedIdentifier { identifier: String, reason: String },

    /// Caller supplied an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Query matched no occurrence where at least one was required
    #[error("There are no occurrences matching query {0}")]
    NoMatch(OccurrenceQuery),

    /// A bulk operation failed part way; completed mutations were kept
    #[error("Bulk operation failed on occurrence {occurrence}, completed changes were kept: {source}")]
    PartialFailure {
        occurrence: OccurrenceId,
        source: ApiError,
    },

    /// A bulk worker stopped without reporting an outcome
    #[error("Occurrence worker exited without reporting an outcome")]
    WorkerLost,

    /// Remote API error passed through unchanged
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl OccurrenceError {
    /// Whether the error means the group matched nothing
    pub fn is_no_match(&self) -> bool {
        matches!(self, OccurrenceError::NoMatch(_))
    }
}

/// Result type for occurrence-group operations
pub type OccurrenceResult<T> = Result<T, OccurrenceError>;
