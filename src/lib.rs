//! Workspace Metrics Library
//!
//! Library backing the `workspace-metrics` CLI: fetches workspace sensor and
//! utilization metrics (occupancy duration, sound level, ambient noise,
//! temperature, humidity, TVOC, people count) from the Webex API for every
//! workspace under a named location, flattens them into row records, and
//! exports the result to XLSX, CSV, or JSON.
//!
//! ## Architecture Overview
//!
//! - [`models`] - wire types for API responses and the flattened [`ExportRow`]
//! - [`client`] - authenticated blocking HTTP client, one method per endpoint
//! - [`collector`] - location -> floor -> workspace -> metric walk producing
//!   the full row set for one run
//! - [`export`] - the three export writers and filename derivation
//! - [`prompt`] - interactive prompts and the credential retry loop
//! - [`config`] - layered configuration with environment variable support
//! - [`logging`] - structured logging with JSON and pretty-print formats
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use workspace_metrics::{ApiClient, MetricsCollector};
//! use workspace_metrics::models::Aggregation;
//! use workspace_metrics::collector::window_ending;
//!
//! # fn example() -> anyhow::Result<()> {
//! let client = ApiClient::new("https://webexapis.com/v1", "token");
//! let (from, to) = window_ending(Aggregation::Hourly, chrono::Utc::now());
//!
//! if let Some(location_id) = client.resolve_location("HQ") {
//!     let collector = MetricsCollector::new(client, Aggregation::Hourly, from, to);
//!     let rows = collector.collect(&location_id);
//!     println!("{} rows collected", rows.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod collector;
pub mod config;
pub mod export;
pub mod logging;
pub mod models;
pub mod prompt;

pub use client::ApiClient;
pub use collector::MetricsCollector;
pub use export::ExportFormat;
pub use models::*;
