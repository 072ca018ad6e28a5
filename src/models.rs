//! Core Data Models
//!
//! This module defines the data structures used throughout the workspace
//! metrics export pipeline, from raw Webex API responses to the flattened
//! rows written to the export file.
//!
//! ## Data Flow
//!
//! 1. **Wire types**: [`Location`], [`Floor`], [`Workspace`],
//!    [`WorkspaceDetail`], [`MetricItem`] - decoded from API list and detail
//!    responses, all wrapped in the Webex [`ItemsEnvelope`]
//! 2. **Output**: [`ExportRow`] - the flattened (workspace x floor x metric
//!    sample) projection written to XLSX, CSV, or JSON
//!
//! ## Sentinel Handling
//!
//! Fields that do not apply to a given row (duration for sampled metrics,
//! mean/min/max for duration metrics, missing capacity) are carried as
//! `Option` in memory and serialized as the literal string `N/A`.
//! Deserialization accepts both the numeric form and the sentinel, so a JSON
//! export can be reloaded without loss.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel written for fields that have no value in a given row.
pub const NOT_AVAILABLE: &str = "N/A";

/// Column headers for tabular exports, in output order.
pub const EXPORT_HEADERS: [&str; 10] = [
    "Workspace Name",
    "Floor Number",
    "Capacity",
    "Metric Name",
    "Start Date/Time",
    "End Date/Time",
    "Duration",
    "Mean value",
    "Min value",
    "Max value",
];

/// Time-bucketing granularity for metric series requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Hourly,
    Daily,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Hourly => "hourly",
            Aggregation::Daily => "daily",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Webex list responses wrap their payload in an `items` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: String,
    pub floor_number: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    pub id: String,
}

/// Detail view of a single workspace; only the fields we project are kept.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDetail {
    pub display_name: Option<String>,
    pub capacity: Option<i64>,
}

/// One observation window from a metric series response.
///
/// The duration endpoint populates `duration`; every other metric populates
/// `mean`/`min`/`max`. Timestamps come back as RFC 3339 strings and are
/// passed through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricItem {
    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<f64>,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Flattened export record: one row per (workspace, metric sample).
///
/// Serialized field names are the fixed column headers in
/// [`EXPORT_HEADERS`]; absent values round-trip through the `N/A` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Workspace Name")]
    pub workspace_name: String,
    #[serde(rename = "Floor Number")]
    pub floor_number: i64,
    #[serde(rename = "Capacity", with = "na_opt")]
    pub capacity: Option<i64>,
    #[serde(rename = "Metric Name")]
    pub metric_name: String,
    #[serde(rename = "Start Date/Time")]
    pub start: String,
    #[serde(rename = "End Date/Time")]
    pub end: String,
    #[serde(rename = "Duration", with = "na_opt")]
    pub duration: Option<f64>,
    #[serde(rename = "Mean value", with = "na_opt")]
    pub mean: Option<f64>,
    #[serde(rename = "Min value", with = "na_opt")]
    pub min: Option<f64>,
    #[serde(rename = "Max value", with = "na_opt")]
    pub max: Option<f64>,
}

/// Serde adapter mapping `None` to the `N/A` sentinel and back.
pub(crate) mod na_opt {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(v) => v.serialize(serializer),
            None => serializer.serialize_str(super::NOT_AVAILABLE),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NaOr<T> {
            Value(T),
            Sentinel(String),
        }

        match NaOr::<T>::deserialize(deserializer)? {
            NaOr::Value(v) => Ok(Some(v)),
            NaOr::Sentinel(s) if s == super::NOT_AVAILABLE => Ok(None),
            NaOr::Sentinel(s) => Err(D::Error::custom(format!("unexpected value: {s}"))),
        }
    }
}
