// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory monitoring API
//!
//! Deterministic stand-in for the Pingdom API. Creating a maintenance window
//! expands its recurrence into occurrences the same way the remote service
//! does, so occurrence groups can be exercised without network access.
//!
//! Every mutation call is recorded (even failing ones), failures can be
//! injected per occurrence, and an artificial latency can be added to
//! mutations to widen race windows in concurrency tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use super::{MaintenanceService, OccurrenceService};
use crate::domain::{
    MaintenanceResponse, MaintenanceWindow, Occurrence, OccurrenceId, OccurrencePatch,
    OccurrenceQuery,
};
use crate::errors::{ApiError, ApiResult};

/// Remote call recorded by [`InMemoryPingdom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedCall {
    List(OccurrenceQuery),
    Update(OccurrenceId, OccurrencePatch),
    Delete(OccurrenceId),
}

#[derive(Debug, Default)]
struct Store {
    next_maintenance_id: i64,
    next_occurrence_id: i64,
    maintenances: BTreeMap<i64, MaintenanceWindow>,
    occurrences: BTreeMap<OccurrenceId, Occurrence>,
}

impl Store {
    fn add_occurrence(&mut self, maintenance_id: i64, from: i64, to: i64) -> OccurrenceId {
        self.next_occurrence_id += 1;
        let id = OccurrenceId::new(self.next_occurrence_id);
        self.occurrences.insert(
            id,
            Occurrence {
                id,
                maintenance_id,
                from,
                to,
            },
        );
        id
    }

    fn expand(&mut self, maintenance_id: i64, window: &MaintenanceWindow) {
        self.occurrences
            .retain(|_, occurrence| occurrence.maintenance_id != maintenance_id);
        for (from, to) in window.occurrence_windows() {
            self.add_occurrence(maintenance_id, from, to);
        }
    }
}

/// In-memory implementation of [`OccurrenceService`] and [`MaintenanceService`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryPingdom {
    store: Arc<RwLock<Store>>,
    failures: Arc<RwLock<HashMap<OccurrenceId, ApiError>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    latency: Option<Duration>,
}

impl InMemoryPingdom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every occurrence mutation by `latency` before it takes effect
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Seed a single occurrence without a backing maintenance definition
    pub async fn insert_occurrence(&self, maintenance_id: i64, from: i64, to: i64) -> OccurrenceId {
        self.store
            .write()
            .await
            .add_occurrence(maintenance_id, from, to)
    }

    /// Make every update or delete of `id` fail with `error`
    pub async fn fail_occurrence(&self, id: OccurrenceId, error: ApiError) {
        self.failures.write().await.insert(id, error);
    }

    /// All stored occurrences, ordered by id
    pub async fn occurrences(&self) -> Vec<Occurrence> {
        self.store.read().await.occurrences.values().copied().collect()
    }

    /// Every remote call issued so far, in issue order
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// Number of update and delete calls issued so far
    pub async fn mutation_count(&self) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|call| !matches!(call, RecordedCall::List(_)))
            .count()
    }

    /// Apply a mutation after latency and injected failures; `None` from
    /// `apply` means the occurrence does not exist
    async fn mutate<F>(&self, id: OccurrenceId, apply: F) -> ApiResult<()>
    where
        F: FnOnce(&mut BTreeMap<OccurrenceId, Occurrence>) -> Option<()>,
    {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if let Some(error) = self.failures.read().await.get(&id) {
            return Err(error.clone());
        }
        let mut store = self.store.write().await;
        apply(&mut store.occurrences).ok_or_else(|| ApiError::NotFound(format!("occurrence {}", id)))
    }
}

#[async_trait]
impl OccurrenceService for InMemoryPingdom {
    async fn list_occurrences(&self, query: &OccurrenceQuery) -> ApiResult<Vec<Occurrence>> {
        self.calls.lock().await.push(RecordedCall::List(*query));
        let store = self.store.read().await;
        Ok(store
            .occurrences
            .values()
            .filter(|occurrence| query.matches(occurrence))
            .copied()
            .collect())
    }

    async fn update_occurrence(&self, id: OccurrenceId, patch: OccurrencePatch) -> ApiResult<()> {
        self.calls.lock().await.push(RecordedCall::Update(id, patch));
        debug!(occurrence = %id, from = patch.from, to = patch.to, "Updating occurrence");

        self.mutate(id, |occurrences| {
            let occurrence = occurrences.get_mut(&id)?;
            occurrence.from = patch.from;
            occurrence.to = patch.to;
            Some(())
        })
        .await
    }

    async fn delete_occurrence(&self, id: OccurrenceId) -> ApiResult<()> {
        self.calls.lock().await.push(RecordedCall::Delete(id));
        debug!(occurrence = %id, "Deleting occurrence");

        self.mutate(id, |occurrences| occurrences.remove(&id).map(|_| ()))
            .await
    }
}

#[async_trait]
impl MaintenanceService for InMemoryPingdom {
    async fn create_maintenance(&self, window: &MaintenanceWindow) -> ApiResult<i64> {
        let mut store = self.store.write().await;
        store.next_maintenance_id += 1;
        let id = store.next_maintenance_id;
        store.maintenances.insert(id, window.clone());
        store.expand(id, window);
        debug!(maintenance = id, "Created maintenance window");
        Ok(id)
    }

    async fn read_maintenance(&self, id: i64) -> ApiResult<MaintenanceResponse> {
        let store = self.store.read().await;
        store
            .maintenances
            .get(&id)
            .map(|window| MaintenanceResponse::from_window(id, window))
            .ok_or_else(|| ApiError::NotFound(format!("maintenance {}", id)))
    }

    async fn update_maintenance(&self, id: i64, window: &MaintenanceWindow) -> ApiResult<()> {
        let mut store = self.store.write().await;
        match store.maintenances.get_mut(&id) {
            Some(stored) => *stored = window.clone(),
            None => return Err(ApiError::NotFound(format!("maintenance {}", id))),
        }
        store.expand(id, window);
        Ok(())
    }

    async fn delete_maintenance(&self, id: i64) -> ApiResult<()> {
        let mut store = self.store.write().await;
        if store.maintenances.remove(&id).is_none() {
            return Err(ApiError::NotFound(format!("maintenance {}", id)));
        }
        store
            .occurrences
            .retain(|_, occurrence| occurrence.maintenance_id != id);
        Ok(())
    }
}
