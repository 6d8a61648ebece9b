// Copyright (c) 2025 - Cowboy AI, Inc.
//! Maintenance occurrence groups for the Pingdom monitoring API
//!
//! A Pingdom maintenance window with a recurrence expands into many
//! occurrences, each with its own numeric id. This crate manages those
//! occurrences as one addressable group: everything belonging to a single
//! maintenance window inside an effective time range.
//!
//! # Layers
//!
//! ```text
//! resource      create / read / update / delete / import lifecycles
//! occurrence    group queries, bulk update/delete, identity codec, state
//! service       OccurrenceService / MaintenanceService traits + in-memory API
//! adapters      PingdomClient (REST, feature "pingdom")
//! domain        occurrence and maintenance value objects
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pingdom_provider::domain::OccurrenceQuery;
//! use pingdom_provider::occurrence::OccurrenceGroup;
//! use pingdom_provider::service::InMemoryPingdom;
//!
//! # tokio_test::block_on(async {
//! let api = Arc::new(InMemoryPingdom::new());
//! api.insert_occurrence(42, 1000, 1500).await;
//! api.insert_occurrence(42, 2000, 2500).await;
//!
//! let group = OccurrenceGroup::new(OccurrenceQuery::new(42, 0, 3000));
//! assert_eq!(group.size(api.as_ref()).await.unwrap(), 2);
//!
//! group.delete(&api).await.unwrap();
//! assert_eq!(group.size(api.as_ref()).await.unwrap(), 0);
//! # });
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod occurrence;
pub mod resource;
pub mod service;

// Re-export commonly used types
pub use config::ProviderConfig;
pub use errors::{ApiError, ApiResult};
pub use occurrence::{OccurrenceError, OccurrenceGroup, OccurrenceResult, OccurrenceState};
pub use service::{InMemoryPingdom, MaintenanceService, OccurrenceService};

#[cfg(feature = "pingdom")]
pub use adapters::PingdomClient;
