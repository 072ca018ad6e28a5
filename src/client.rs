//! Webex API client
//!
//! Thin blocking wrapper over the handful of read endpoints the exporter
//! needs. Every request carries the bearer token; responses are decoded into
//! the wire types in [`crate::models`].
//!
//! Failure handling is deliberately coarse: any transport error, non-2xx
//! status, or decode error collapses to `None` (or an empty list) and is
//! logged at debug level only. The caller decides whether that means "skip"
//! or "stop". No retries, no backoff, no pagination.

use crate::models::{
    Aggregation, Floor, ItemsEnvelope, Location, MetricItem, Workspace, WorkspaceDetail,
};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Metric name routed to the duration endpoint instead of the sampled one.
pub const DURATION_METRIC: &str = "duration";

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: Client::new(),
            base_url,
            token: token.into(),
        }
    }

    /// Authenticated GET returning the decoded body, or `None` on any
    /// transport, status, or decode failure.
    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Option<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = match self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .query(query)
            .send()
        {
            Ok(response) => response,
            Err(err) => {
                debug!(%url, error = %err, "request failed");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "non-success response");
            return None;
        }

        match response.json::<T>() {
            Ok(body) => Some(body),
            Err(err) => {
                debug!(%url, error = %err, "failed to decode response body");
                None
            }
        }
    }

    /// Probe the identity endpoint; true when the token is accepted.
    pub fn check_credential(&self) -> bool {
        let url = format!("{}/people/me", self.base_url);
        match self.http.get(&url).bearer_auth(&self.token).send() {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                debug!(error = %err, "credential probe failed");
                false
            }
        }
    }

    /// Look up a location by display name; `None` when the lookup fails or
    /// returns no items.
    pub fn resolve_location(&self, display_name: &str) -> Option<String> {
        let found: ItemsEnvelope<Location> =
            self.get_json("/workspaceLocations", &[("displayName", display_name)])?;
        found.items.into_iter().next().map(|location| location.id)
    }

    pub fn list_floors(&self, location_id: &str) -> Vec<Floor> {
        self.get_json::<ItemsEnvelope<Floor>>(
            &format!("/workspaceLocations/{location_id}/floors"),
            &[],
        )
        .map(|envelope| envelope.items)
        .unwrap_or_default()
    }

    pub fn list_workspaces(&self, location_id: &str, floor_id: &str) -> Vec<Workspace> {
        self.get_json::<ItemsEnvelope<Workspace>>(
            "/workspaces",
            &[("locationId", location_id), ("floorId", floor_id)],
        )
        .map(|envelope| envelope.items)
        .unwrap_or_default()
    }

    /// Fetch the display name of a single workspace. Issues a full detail
    /// request on every call.
    pub fn workspace_name(&self, workspace_id: &str) -> Option<String> {
        self.get_json::<WorkspaceDetail>(&format!("/workspaces/{workspace_id}"), &[])?
            .display_name
    }

    /// Fetch the capacity of a single workspace. Issues a full detail
    /// request on every call; callers that want caching must do it
    /// themselves.
    pub fn workspace_capacity(&self, workspace_id: &str) -> Option<i64> {
        self.get_json::<WorkspaceDetail>(&format!("/workspaces/{workspace_id}"), &[])?
            .capacity
    }

    /// Fetch one metric series for a workspace over `[from, to]`.
    ///
    /// The `duration` metric uses its own endpoint and takes no metric-name
    /// parameter; all other metrics go through `/workspaceMetrics`.
    pub fn metric_series(
        &self,
        workspace_id: &str,
        metric_name: &str,
        aggregation: Aggregation,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Option<Vec<MetricItem>> {
        let from = from.to_rfc3339_opts(SecondsFormat::Secs, true);
        let to = to.to_rfc3339_opts(SecondsFormat::Secs, true);

        let envelope: ItemsEnvelope<MetricItem> = if metric_name == DURATION_METRIC {
            self.get_json(
                "/workspaceDurationMetrics",
                &[
                    ("workspaceId", workspace_id),
                    ("aggregation", aggregation.as_str()),
                    ("from", &from),
                    ("to", &to),
                ],
            )?
        } else {
            self.get_json(
                "/workspaceMetrics",
                &[
                    ("workspaceId", workspace_id),
                    ("metricName", metric_name),
                    ("aggregation", aggregation.as_str()),
                    ("from", &from),
                    ("to", &to),
                ],
            )?
        };

        Some(envelope.items)
    }
}
