// Copyright (c) 2025 - Cowboy AI, Inc.

//! Remote service adapters
//!
//! Concrete implementations of the service traits for real backends. The
//! in-memory implementation lives in [`crate::service::memory`].

#[cfg(feature = "pingdom")]
pub mod pingdom;

#[cfg(feature = "pingdom")]
pub use pingdom::PingdomClient;
