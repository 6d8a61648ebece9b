// Copyright (c) 2025 - Cowboy AI, Inc.
//! Observable state of an occurrence-group resource

use serde::{Deserialize, Serialize};

use super::group::OccurrenceGroup;
use super::OccurrenceResult;
use crate::domain::OccurrenceQuery;
use crate::service::OccurrenceService;

/// Resource state of an occurrence group
///
/// `maintenance_id`, `effective_from` and `effective_to` form the query.
/// `from` and `to` are the window of the first matching occurrence and may
/// be set to move every match; `size` is the number of matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub maintenance_id: i64,
    pub effective_from: i64,
    pub effective_to: i64,
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub to: Option<i64>,
    #[serde(default)]
    pub size: Option<usize>,
}

impl OccurrenceState {
    /// Planned state for a group with nothing resolved yet
    pub fn new(maintenance_id: i64, effective_from: i64, effective_to: i64) -> Self {
        Self {
            maintenance_id,
            effective_from,
            effective_to,
            ..Default::default()
        }
    }

    /// Query described by this state
    pub fn query(&self) -> OccurrenceQuery {
        OccurrenceQuery::new(self.maintenance_id, self.effective_from, self.effective_to)
    }

    /// Copy the resolved group into this state
    ///
    /// Samples the group once; on failure the state is left untouched.
    pub async fn populate<S>(&mut self, group: &OccurrenceGroup, service: &S) -> OccurrenceResult<()>
    where
        S: OccurrenceService + ?Sized,
    {
        let (sample, size) = group.sample(service).await?;
        let query = group.query();

        self.id = Some(group.id());
        self.maintenance_id = query.maintenance_id;
        self.effective_from = query.from;
        self.effective_to = query.to;
        self.from = Some(sample.from);
        self.to = Some(sample.to);
        self.size = Some(size);
        Ok(())
    }
}

impl From<&OccurrenceState> for OccurrenceGroup {
    fn from(state: &OccurrenceState) -> Self {
        OccurrenceGroup::new(state.query())
    }
}

impl From<OccurrenceQuery> for OccurrenceState {
    fn from(query: OccurrenceQuery) -> Self {
        Self::new(query.maintenance_id, query.from, query.to)
    }
}

impl OccurrenceGroup {
    /// Build the group described by resource state
    pub fn from_state(state: &OccurrenceState) -> Self {
        Self::from(state)
    }
}
