// Copyright (c) 2025 - Cowboy AI, Inc.
//! Maintenance-window resource
//!
//! Resource state keeps timestamps as RFC 3339 strings; the API speaks unix
//! seconds. Timestamps read back from the API are rendered in UTC, so an
//! offset written by the user is normalised on the next read while the
//! instant is preserved.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{MaintenanceResponse, MaintenanceWindow, RecurrenceType};
use crate::errors::ApiError;
use crate::service::MaintenanceService;

/// Maintenance resource errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MaintenanceError {
    #[error("Invalid {field} timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid maintenance id {0:?}")]
    InvalidId(String),

    #[error("Maintenance state has no id")]
    MissingId,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for maintenance resource operations
pub type MaintenanceResult<T> = Result<T, MaintenanceError>;

/// Resource state of a maintenance window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub description: String,
    /// RFC 3339
    pub from: String,
    /// RFC 3339
    pub to: String,
    /// RFC 3339; computed by the API when not set
    #[serde(default)]
    pub effective_to: Option<String>,
    #[serde(default)]
    pub recurrence_type: RecurrenceType,
    #[serde(default)]
    pub repeat_every: Option<u32>,
    #[serde(default)]
    pub tms_ids: BTreeSet<i64>,
    #[serde(default)]
    pub uptime_ids: BTreeSet<i64>,
}

impl MaintenanceState {
    /// Numeric id of a created window
    pub fn maintenance_id(&self) -> MaintenanceResult<i64> {
        let id = self.id.as_deref().ok_or(MaintenanceError::MissingId)?;
        parse_id(id)
    }

    /// Request body for this state
    pub fn to_window(&self) -> MaintenanceResult<MaintenanceWindow> {
        Ok(MaintenanceWindow {
            description: self.description.clone(),
            from: parse_timestamp("from", &self.from)?,
            to: parse_timestamp("to", &self.to)?,
            effective_to: self
                .effective_to
                .as_deref()
                .map(|value| parse_timestamp("effective_to", value))
                .transpose()?,
            recurrence_type: self.recurrence_type,
            repeat_every: self.repeat_every,
            tms_ids: self.tms_ids.iter().copied().collect(),
            uptime_ids: self.uptime_ids.iter().copied().collect(),
        })
    }

    /// Copy an API response into this state
    pub fn apply_response(&mut self, response: &MaintenanceResponse) {
        self.id = Some(response.id.to_string());
        self.description = response.description.clone();
        self.from = format_timestamp(response.from);
        self.to = format_timestamp(response.to);
        self.effective_to = Some(format_timestamp(response.effective_to));
        self.recurrence_type = response.recurrence_type;
        self.repeat_every = Some(response.repeat_every);
        self.tms_ids = response.checks.tms.iter().copied().collect();
        self.uptime_ids = response.checks.uptime.iter().copied().collect();
    }
}

/// Create the window and record its id
pub async fn create<S>(service: &S, planned: MaintenanceState) -> MaintenanceResult<MaintenanceState>
where
    S: MaintenanceService + ?Sized,
{
    let window = planned.to_window()?;
    let id = service.create_maintenance(&window).await?;
    info!(maintenance = id, description = %window.description, "Created maintenance window");

    let mut state = planned;
    state.id = Some(id.to_string());
    Ok(state)
}

/// Refresh recorded state; `Ok(None)` when the window no longer exists
pub async fn read<S>(service: &S, current: &MaintenanceState) -> MaintenanceResult<Option<MaintenanceState>>
where
    S: MaintenanceService + ?Sized,
{
    let id = current.maintenance_id()?;
    match service.read_maintenance(id).await {
        Ok(response) => {
            let mut state = current.clone();
            state.apply_response(&response);
            Ok(Some(state))
        }
        Err(err) if err.is_not_found() => {
            debug!(maintenance = id, "Maintenance window vanished");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Replace the window definition with the planned one
pub async fn update<S>(service: &S, planned: &MaintenanceState) -> MaintenanceResult<MaintenanceState>
where
    S: MaintenanceService + ?Sized,
{
    let id = planned.maintenance_id()?;
    service.update_maintenance(id, &planned.to_window()?).await?;
    debug!(maintenance = id, "Updated maintenance window");
    Ok(planned.clone())
}

/// Delete the window
pub async fn delete<S>(service: &S, current: &MaintenanceState) -> MaintenanceResult<()>
where
    S: MaintenanceService + ?Sized,
{
    let id = current.maintenance_id()?;
    service.delete_maintenance(id).await?;
    info!(maintenance = id, "Deleted maintenance window");
    Ok(())
}

/// Rebuild state from a maintenance id
pub async fn import<S>(service: &S, identifier: &str) -> MaintenanceResult<MaintenanceState>
where
    S: MaintenanceService + ?Sized,
{
    let response = service.read_maintenance(parse_id(identifier)?).await?;
    let mut state = MaintenanceState::default();
    state.apply_response(&response);
    Ok(state)
}

fn parse_id(id: &str) -> MaintenanceResult<i64> {
    id.parse()
        .map_err(|_| MaintenanceError::InvalidId(id.to_string()))
}

fn parse_timestamp(field: &'static str, value: &str) -> MaintenanceResult<i64> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.timestamp())
        .map_err(|e| MaintenanceError::InvalidTimestamp {
            field,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn format_timestamp(unix: i64) -> String {
    DateTime::from_timestamp(unix, 0)
        .map(|instant| instant.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_else(|| unix.to_string())
}
