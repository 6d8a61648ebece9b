// Copyright (c) 2025 - Cowboy AI, Inc.
//! Occurrence-group resource lifecycle
//!
//! Create, read, update, delete and import for the occurrence-group resource.
//! Every function builds a fresh [`OccurrenceGroup`] from the state (or the
//! identifier) it is given; nothing survives between calls.

use std::sync::Arc;

use tracing::{debug, info};

use crate::occurrence::{OccurrenceError, OccurrenceGroup, OccurrenceResult, OccurrenceState};
use crate::service::OccurrenceService;

/// Resolve a planned group and record it
///
/// When the plan also carries `from` and `to`, every matching occurrence is
/// moved there before the state is recorded.
pub async fn create<S>(service: &Arc<S>, planned: OccurrenceState) -> OccurrenceResult<OccurrenceState>
where
    S: OccurrenceService + ?Sized + 'static,
{
    let requested = requested_window(&planned)?;
    let group = OccurrenceGroup::from_state(&planned);
    debug!(query = %group.query(), "Creating occurrence group");

    let mut state = planned;
    state.populate(&group, service.as_ref()).await?;

    if let Some((from, to)) = requested {
        if (state.from, state.to) != (Some(from), Some(to)) {
            group.update(service, from, to).await?;
            state.populate(&group, service.as_ref()).await?;
        }
    }

    info!(id = ?state.id, size = ?state.size, "Created occurrence group");
    Ok(state)
}

/// Refresh recorded state
///
/// `Ok(None)` means the group no longer matches any occurrence and the
/// resource should be dropped from state.
pub async fn read<S>(service: &S, current: &OccurrenceState) -> OccurrenceResult<Option<OccurrenceState>>
where
    S: OccurrenceService + ?Sized,
{
    let group = OccurrenceGroup::from_state(current);
    let mut state = current.clone();
    match state.populate(&group, service).await {
        Ok(()) => Ok(Some(state)),
        Err(OccurrenceError::NoMatch(query)) => {
            debug!(query = %query, "Occurrence group vanished");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Apply a changed plan
///
/// A changed effective window only re-resolves the query. Changed `from` /
/// `to` move every matching occurrence and must be given together. The
/// maintenance id cannot change in place.
pub async fn update<S>(
    service: &Arc<S>,
    prior: &OccurrenceState,
    planned: &OccurrenceState,
) -> OccurrenceResult<OccurrenceState>
where
    S: OccurrenceService + ?Sized + 'static,
{
    if prior.maintenance_id != planned.maintenance_id {
        return Err(OccurrenceError::InvalidArgument(format!(
            "maintenance_id cannot change in place ({} -> {}), replace the resource",
            prior.maintenance_id, planned.maintenance_id
        )));
    }

    let window_changed = (prior.effective_from, prior.effective_to)
        != (planned.effective_from, planned.effective_to);
    let requested = requested_window(planned)?;
    let bounds_changed = requested.is_some_and(|(from, to)| (prior.from, prior.to) != (Some(from), Some(to)));

    if !window_changed && !bounds_changed {
        return Ok(prior.clone());
    }

    let group = OccurrenceGroup::from_state(planned);
    if let Some((from, to)) = requested.filter(|_| bounds_changed) {
        debug!(query = %group.query(), from, to, "Occurrence update");
        group.update(service, from, to).await?;
    }

    let mut state = planned.clone();
    state.populate(&group, service.as_ref()).await?;
    Ok(state)
}

/// Delete every occurrence of the group, returning how many were removed
pub async fn delete<S>(service: &Arc<S>, current: &OccurrenceState) -> OccurrenceResult<usize>
where
    S: OccurrenceService + ?Sized + 'static,
{
    OccurrenceGroup::from_state(current).delete(service).await
}

/// Rebuild state from an identifier alone
pub async fn import<S>(service: &S, identifier: &str) -> OccurrenceResult<OccurrenceState>
where
    S: OccurrenceService + ?Sized,
{
    let group = OccurrenceGroup::from_identifier(identifier)?;
    let mut state = OccurrenceState::from(*group.query());
    state.populate(&group, service).await?;
    Ok(state)
}

/// `from` / `to` requested by a plan, if any
fn requested_window(planned: &OccurrenceState) -> OccurrenceResult<Option<(i64, i64)>> {
    match (planned.from, planned.to) {
        (None, None) => Ok(None),
        (Some(from), Some(to)) if from != 0 && to != 0 => Ok(Some((from, to))),
        (from, to) => Err(OccurrenceError::InvalidArgument(format!(
            "'from' and 'to' must be provided at the same time, current values are from: {}, to: {}",
            from.unwrap_or(0),
            to.unwrap_or(0)
        ))),
    }
}
