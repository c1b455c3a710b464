//! cloudmeter - Concurrent utilization time-series collection for Azure
//! compute resources.
//!
//! This facade re-exports the core API. Most users want [`collect`]: resolve
//! a sampling interval and a native metric name, list the matching resources,
//! then fetch and normalize one time series per resource concurrently while
//! reporting progress.

pub use cloudmeter_core::{
    collect, fetch_series, list_resources, quantize_step, resolve_metric_name, AzCommand,
    AzureCli, CollectError, CollectorConfig, LabeledSeriesMap, MetricType, NormalizedPoint,
    Resource, TimeWindow,
};
