// Copyright (c) 2025 - Cowboy AI, Inc.
//! Occurrence group: a query-defined set of maintenance occurrences

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tracing::{debug, info};

use super::fanout::{fan_out, FanOutError};
use super::identity;
use super::{OccurrenceError, OccurrenceResult};
use crate::domain::{Occurrence, OccurrenceId, OccurrencePatch, OccurrenceQuery};
use crate::errors::ApiResult;
use crate::service::OccurrenceService;

/// All occurrences of one maintenance window inside an effective range
///
/// A group is a plain value. It caches nothing: every operation lists the
/// matching occurrences again, so a group built from stale state still acts
/// on what the remote service reports now.
///
/// # Examples
///
/// ```rust
/// use pingdom_provider::domain::OccurrenceQuery;
/// use pingdom_provider::occurrence::OccurrenceGroup;
///
/// let group = OccurrenceGroup::new(OccurrenceQuery::new(42, 1000, 2000));
/// assert_eq!(group.id(), "42:1000:2000");
///
/// let imported = OccurrenceGroup::from_identifier("42:1000:2000").unwrap();
/// assert_eq!(imported, group);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OccurrenceGroup {
    query: OccurrenceQuery,
}

impl OccurrenceGroup {
    pub const fn new(query: OccurrenceQuery) -> Self {
        Self { query }
    }

    /// Rebuild a group from its identifier
    pub fn from_identifier(identifier: &str) -> OccurrenceResult<Self> {
        identity::decode(identifier).map(Self::new)
    }

    pub fn query(&self) -> &OccurrenceQuery {
        &self.query
    }

    /// Stable identifier; decodes back into the same query
    pub fn id(&self) -> String {
        identity::encode(&self.query)
    }

    /// Occurrences currently matching the query; empty is not an error
    pub async fn list<S>(&self, service: &S) -> OccurrenceResult<Vec<Occurrence>>
    where
        S: OccurrenceService + ?Sized,
    {
        debug!(query = %self.query, "Listing occurrences");
        Ok(service.list_occurrences(&self.query).await?)
    }

    /// First matching occurrence together with the number of matches
    pub async fn sample<S>(&self, service: &S) -> OccurrenceResult<(Occurrence, usize)>
    where
        S: OccurrenceService + ?Sized,
    {
        let occurrences = self.list(service).await?;
        match occurrences.first() {
            Some(sample) => Ok((*sample, occurrences.len())),
            None => Err(OccurrenceError::NoMatch(self.query)),
        }
    }

    /// Number of matching occurrences
    pub async fn size<S>(&self, service: &S) -> OccurrenceResult<usize>
    where
        S: OccurrenceService + ?Sized,
    {
        Ok(self.list(service).await?.len())
    }

    /// Fail with [`OccurrenceError::NoMatch`] unless something matches
    pub async fn must_exist<S>(&self, service: &S) -> OccurrenceResult<()>
    where
        S: OccurrenceService + ?Sized,
    {
        if self.size(service).await? == 0 {
            return Err(OccurrenceError::NoMatch(self.query));
        }
        Ok(())
    }

    /// Move every matching occurrence to `[from, to]`
    ///
    /// Both bounds are required together and must describe a non-empty
    /// window; they are validated before anything is sent. Best-effort and
    /// not atomic: on [`OccurrenceError::PartialFailure`] some occurrences
    /// may already have moved. Returns the number of occurrences updated.
    pub async fn update<S>(&self, service: &Arc<S>, from: i64, to: i64) -> OccurrenceResult<usize>
    where
        S: OccurrenceService + ?Sized + 'static,
    {
        if from == 0 || to == 0 {
            return Err(OccurrenceError::InvalidArgument(format!(
                "'from' and 'to' must be provided at the same time, current values are from: {}, to: {}",
                from, to
            )));
        }
        if from >= to {
            return Err(OccurrenceError::InvalidArgument(format!(
                "'from' must be before 'to', current values are from: {}, to: {}",
                from, to
            )));
        }

        let patch = OccurrencePatch::new(from, to);
        let remote = Arc::clone(service);
        let updated = self
            .bulk(service.as_ref(), move |id| {
                let remote = Arc::clone(&remote);
                async move { remote.update_occurrence(id, patch).await }.boxed()
            })
            .await?;

        info!(query = %self.query, updated, from, to, "Updated occurrences");
        Ok(updated)
    }

    /// Delete every matching occurrence
    ///
    /// Deleting a group that matches nothing succeeds without issuing any
    /// call. Same partial-failure semantics as [`OccurrenceGroup::update`].
    pub async fn delete<S>(&self, service: &Arc<S>) -> OccurrenceResult<usize>
    where
        S: OccurrenceService + ?Sized + 'static,
    {
        let remote = Arc::clone(service);
        let deleted = self
            .bulk(service.as_ref(), move |id| {
                let remote = Arc::clone(&remote);
                async move { remote.delete_occurrence(id).await }.boxed()
            })
            .await?;

        info!(query = %self.query, deleted, "Deleted occurrences");
        Ok(deleted)
    }

    /// Re-list, then run `op` once per matching occurrence
    async fn bulk<S, F>(&self, service: &S, op: F) -> OccurrenceResult<usize>
    where
        S: OccurrenceService + ?Sized,
        F: Fn(OccurrenceId) -> BoxFuture<'static, ApiResult<()>> + Send + Sync + 'static,
    {
        let ids = self
            .list(service)
            .await?
            .into_iter()
            .map(|occurrence| occurrence.id)
            .collect();

        fan_out(ids, op).await.map_err(|err| match err {
            FanOutError::Failed { item, error } => OccurrenceError::PartialFailure {
                occurrence: item,
                source: error,
            },
            FanOutError::WorkerLost => OccurrenceError::WorkerLost,
        })
    }
}

impl From<OccurrenceQuery> for OccurrenceGroup {
    fn from(query: OccurrenceQuery) -> Self {
        Self::new(query)
    }
}
