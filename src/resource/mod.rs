// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Lifecycle
//!
//! Create / read / update / delete / import for the declarative resources
//! backed by the monitoring API.
//!
//! - [`occurrence`] - occurrence groups, identified by their encoded query
//! - [`maintenance`] - maintenance windows, identified by the API's numeric id
//!
//! `read` returns `Ok(None)` when the remote entity is gone so the caller can
//! drop it from state instead of failing the refresh.

pub mod maintenance;
pub mod occurrence;

pub use maintenance::{MaintenanceError, MaintenanceResult, MaintenanceState};
