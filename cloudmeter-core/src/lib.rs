//! cloudmeter-core - Metric-collection orchestration for Azure compute resources
//!
//! Provides the components for collecting utilization time series over a
//! caller-specified window:
//! - Interval quantization (requested step -> supported `az` interval)
//! - Metric name resolution (logical metric -> provider-native name)
//! - Resource listing with client-side name filtering
//! - Per-resource series fetching and data-point normalization
//! - The concurrent collection orchestrator with progress reporting
//!
//! ## Primary API
//!
//! Users should interact with cloudmeter via [`collect`].

// Public modules
pub mod azure;
pub mod collector;
pub mod config;
pub mod error;
pub mod interval;
pub mod metric;
pub mod resources;
pub mod series;

// Public exports
pub use azure::{AzCommand, AzureCli};
pub use collector::{collect, LabeledSeriesMap, TimeWindow};
pub use config::CollectorConfig;
pub use error::{CollectError, Result};
pub use interval::quantize_step;
pub use metric::{resolve_metric_name, MetricType};
pub use resources::{list_resources, Resource};
pub use series::{fetch_series, NormalizedPoint, RawDataPoint};
