// Copyright (c) 2025 - Cowboy AI, Inc.

//! Pingdom REST Adapter
//!
//! Implements [`OccurrenceService`] and [`MaintenanceService`] on top of the
//! Pingdom 3.1 REST API.
//!
//! # Endpoint Mapping
//!
//! ```text
//! list_occurrences(q)      = GET    /maintenance.occurrences?maintenanceid=&from=&to=
//! update_occurrence(id, p) = PUT    /maintenance.occurrences/{id}
//! delete_occurrence(id)    = DELETE /maintenance.occurrences/{id}
//! create_maintenance(w)    = POST   /maintenance
//! read_maintenance(id)     = GET    /maintenance/{id}
//! update_maintenance(id,w) = PUT    /maintenance/{id}
//! delete_maintenance(id)   = DELETE /maintenance/{id}
//! ```
//!
//! Non-success responses carry an `{"error": {...}}` envelope which is
//! decoded into [`ApiError::Status`]; a 404 becomes [`ApiError::NotFound`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pingdom_provider::adapters::PingdomClient;
//! use pingdom_provider::config::ProviderConfig;
//! use pingdom_provider::occurrence::OccurrenceGroup;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(PingdomClient::new(ProviderConfig::from_env()?)?);
//!     let group = OccurrenceGroup::from_identifier("42:1767225600:1769904000")?;
//!
//!     let moved = group.update(&client, 1767258000, 1767261600).await?;
//!     println!("moved {} occurrences", moved);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ProviderConfig;
use crate::domain::{
    MaintenanceResponse, MaintenanceWindow, Occurrence, OccurrenceId, OccurrencePatch,
    OccurrenceQuery,
};
use crate::errors::{ApiError, ApiResult};
use crate::service::{MaintenanceService, OccurrenceService};

#[derive(Debug, Deserialize)]
struct OccurrencesEnvelope {
    #[serde(default)]
    occurrences: Vec<Occurrence>,
}

#[derive(Debug, Deserialize)]
struct MaintenanceEnvelope<T> {
    maintenance: T,
}

#[derive(Debug, Deserialize)]
struct CreatedMaintenance {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "statusdesc", default)]
    status_desc: String,
    #[serde(rename = "errormessage", default)]
    error_message: String,
}

impl ErrorBody {
    fn message(self) -> String {
        match (self.status_desc.is_empty(), self.error_message.is_empty()) {
            (_, true) => self.status_desc,
            (true, false) => self.error_message,
            (false, false) => format!("{}: {}", self.status_desc, self.error_message),
        }
    }
}

/// HTTP client for the Pingdom API
#[derive(Debug, Clone)]
pub struct PingdomClient {
    config: ProviderConfig,
    client: Client,
}

impl PingdomClient {
    /// Build a client with bearer authentication and the configured timeout
    ///
    /// Trailing slashes on `base_url` are dropped so paths join cleanly.
    pub fn new(mut config: ProviderConfig) -> ApiResult<Self> {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        info!(base_url = %config.base_url, "Configuring Pingdom client");

        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|e| ApiError::Configuration(format!("Invalid API token: {}", e)))?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| {
                ApiError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path)
    }

    /// Send a request and map non-success statuses to [`ApiError`]
    async fn send(&self, request: RequestBuilder, what: &str) -> ApiResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .map(|envelope| envelope.error.message())
            .unwrap_or(body);
        warn!(%status, what, %message, "Pingdom request failed");

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("{}: {}", what, message)));
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, what).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl OccurrenceService for PingdomClient {
    async fn list_occurrences(&self, query: &OccurrenceQuery) -> ApiResult<Vec<Occurrence>> {
        debug!(query = %query, "GET maintenance.occurrences");
        let request = self.client.get(self.url("maintenance.occurrences")).query(&[
            ("maintenanceid", query.maintenance_id),
            ("from", query.from),
            ("to", query.to),
        ]);

        let envelope: OccurrencesEnvelope = self.send_json(request, "list occurrences").await?;
        Ok(envelope.occurrences)
    }

    async fn update_occurrence(&self, id: OccurrenceId, patch: OccurrencePatch) -> ApiResult<()> {
        debug!(occurrence = %id, from = patch.from, to = patch.to, "PUT maintenance.occurrences");
        let request = self
            .client
            .put(self.url(&format!("maintenance.occurrences/{}", id)))
            .json(&patch);

        self.send(request, &format!("occurrence {}", id)).await?;
        Ok(())
    }

    async fn delete_occurrence(&self, id: OccurrenceId) -> ApiResult<()> {
        debug!(occurrence = %id, "DELETE maintenance.occurrences");
        let request = self
            .client
            .delete(self.url(&format!("maintenance.occurrences/{}", id)));

        self.send(request, &format!("occurrence {}", id)).await?;
        Ok(())
    }
}

#[async_trait]
impl MaintenanceService for PingdomClient {
    async fn create_maintenance(&self, window: &MaintenanceWindow) -> ApiResult<i64> {
        debug!(description = %window.description, "POST maintenance");
        let request = self.client.post(self.url("maintenance")).json(window);

        let created: MaintenanceEnvelope<CreatedMaintenance> =
            self.send_json(request, "create maintenance").await?;
        info!(maintenance = created.maintenance.id, "Created maintenance window");
        Ok(created.maintenance.id)
    }

    async fn read_maintenance(&self, id: i64) -> ApiResult<MaintenanceResponse> {
        debug!(maintenance = id, "GET maintenance");
        let request = self.client.get(self.url(&format!("maintenance/{}", id)));

        let envelope: MaintenanceEnvelope<MaintenanceResponse> = self
            .send_json(request, &format!("maintenance {}", id))
            .await?;
        Ok(envelope.maintenance)
    }

    async fn update_maintenance(&self, id: i64, window: &MaintenanceWindow) -> ApiResult<()> {
        debug!(maintenance = id, "PUT maintenance");
        let request = self
            .client
            .put(self.url(&format!("maintenance/{}", id)))
            .json(window);

        self.send(request, &format!("maintenance {}", id)).await?;
        Ok(())
    }

    async fn delete_maintenance(&self, id: i64) -> ApiResult<()> {
        debug!(maintenance = id, "DELETE maintenance");
        let request = self.client.delete(self.url(&format!("maintenance/{}", id)));

        self.send(request, &format!("maintenance {}", id)).await?;
        Ok(())
    }
}
