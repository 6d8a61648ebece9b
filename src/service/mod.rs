// Copyright (c) 2025 - Cowboy AI, Inc.
//! Remote Service Interfaces
//!
//! Narrow views of the monitoring API consumed by the occurrence-group
//! engine and the resource lifecycle layer.
//!
//! # Architecture
//!
//! ```text
//! Resource lifecycle
//!     ↓
//! OccurrenceGroup / MaintenanceState
//!     ↓
//! OccurrenceService / MaintenanceService (this module)
//!     ↓
//! PingdomClient (REST)  |  InMemoryPingdom (tests, demos)
//! ```
//!
//! Implementations must be shareable across tasks: bulk occurrence
//! operations call the service from one spawned task per occurrence.

pub mod memory;

pub use memory::InMemoryPingdom;

use async_trait::async_trait;

use crate::domain::{
    MaintenanceResponse, MaintenanceWindow, Occurrence, OccurrenceId, OccurrencePatch,
    OccurrenceQuery,
};
use crate::errors::ApiResult;

/// Maintenance occurrence endpoints
#[async_trait]
pub trait OccurrenceService: Send + Sync {
    /// List occurrences matching `query`
    ///
    /// An empty result is a valid outcome, not an error.
    async fn list_occurrences(&self, query: &OccurrenceQuery) -> ApiResult<Vec<Occurrence>>;

    /// Move one occurrence to a new window
    async fn update_occurrence(&self, id: OccurrenceId, patch: OccurrencePatch) -> ApiResult<()>;

    /// Remove one occurrence
    async fn delete_occurrence(&self, id: OccurrenceId) -> ApiResult<()>;
}

/// Maintenance window endpoints
#[async_trait]
pub trait MaintenanceService: Send + Sync {
    /// Create a window, returning its id
    async fn create_maintenance(&self, window: &MaintenanceWindow) -> ApiResult<i64>;

    /// Read a window
    async fn read_maintenance(&self, id: i64) -> ApiResult<MaintenanceResponse>;

    /// Replace a window definition
    async fn update_maintenance(&self, id: i64, window: &MaintenanceWindow) -> ApiResult<()>;

    /// Delete a window and all of its occurrences
    async fn delete_maintenance(&self, id: i64) -> ApiResult<()>;
}
