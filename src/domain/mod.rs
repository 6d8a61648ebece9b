// Copyright (c) 2025 - Cowboy AI, Inc.
//! Monitoring Domain Models
//!
//! Value objects shared by the remote services, the occurrence-group engine
//! and the resource lifecycle layer.
//!
//! # Maintenance
//!
//! - [`MaintenanceWindow`] - window definition as sent to the API
//! - [`MaintenanceResponse`] - window as reported by the API
//! - [`RecurrenceType`] - `none`, `day`, `week`, `month`
//!
//! # Occurrences
//!
//! - [`Occurrence`] - one scheduled instance of a maintenance window
//! - [`OccurrenceQuery`] - maintenance id plus effective window
//! - [`OccurrencePatch`] - new window applied to matched occurrences

pub mod maintenance;
pub mod occurrence;

pub use maintenance::{
    MaintenanceChecks, MaintenanceResponse, MaintenanceWindow, RecurrenceType,
    RecurrenceTypeError, MAX_OCCURRENCES,
};
pub use occurrence::{Occurrence, OccurrenceId, OccurrencePatch, OccurrenceQuery};
