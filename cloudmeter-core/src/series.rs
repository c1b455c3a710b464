//! Per-resource time-series fetching and data-point normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::azure::AzureCli;
use crate::collector::TimeWindow;
use crate::error::{CollectError, Result};
use crate::metric::MetricType;

const BYTES_PER_GB: f64 = 1_000_000_000.0;

/// One data point as the provider returns it. Any subset of the three value
/// fields may be absent for a given timestamp.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataPoint {
    pub time_stamp: DateTime<Utc>,
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub minimum: Option<f64>,
    #[serde(default)]
    pub maximum: Option<f64>,
}

/// A data point in canonical units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Fetches the time series for one resource over `window` at `interval`.
///
/// Returns `None` when the provider reports no time series at all for the
/// resource, and `Some` (possibly empty after normalization) when a series
/// exists. Callers rely on that distinction: a `None` resource contributes no
/// entry to the result map, an empty `Some` does.
pub async fn fetch_series(
    cli: &dyn AzureCli,
    resource_id: &str,
    metric_name: &str,
    metric: MetricType,
    window: &TimeWindow,
    interval: &str,
) -> Result<Option<Vec<NormalizedPoint>>> {
    let args = vec![
        "monitor".to_string(),
        "metrics".to_string(),
        "list".to_string(),
        "--resource".to_string(),
        resource_id.to_string(),
        "--metric".to_string(),
        metric_name.to_string(),
        "--start-time".to_string(),
        window.start.to_rfc3339(),
        "--end-time".to_string(),
        window.end.to_rfc3339(),
        "--interval".to_string(),
        interval.to_string(),
    ];

    let payload = cli.run(&args).await?;
    let Some(raw) = extract_raw_points(&payload, resource_id)? else {
        return Ok(None);
    };
    Ok(Some(normalize_points(raw, metric)))
}

/// Pulls the raw data points out of a metrics-query payload, validating shape
/// along the way.
///
/// The payload is `{"value": [{"timeseries": [{"data": [...]}]}]}`. A missing
/// or empty `value`/`timeseries` array means the resource has no series
/// (`None`); anything present with the wrong type is a malformed response.
fn extract_raw_points(payload: &Value, resource_id: &str) -> Result<Option<Vec<RawDataPoint>>> {
    let malformed = |reason: &str| CollectError::MalformedResponse {
        command: "az monitor metrics list".to_string(),
        reason: reason.to_string(),
    };

    let metrics = payload
        .get("value")
        .ok_or_else(|| malformed("missing `value` field"))?
        .as_array()
        .ok_or_else(|| malformed("`value` is not an array"))?;
    let Some(first_metric) = metrics.first() else {
        return Ok(None);
    };

    let all_series = match first_metric.get("timeseries") {
        None | Some(Value::Null) => return Ok(None),
        Some(ts) => ts
            .as_array()
            .ok_or_else(|| malformed("`timeseries` is not an array"))?,
    };
    let Some(series) = all_series.first() else {
        return Ok(None);
    };
    // The provider is assumed to return exactly one series for a
    // single-resource, single-metric query; flag it if that ever breaks.
    if all_series.len() > 1 {
        warn!(
            "resource {} returned {} time series, using the first",
            resource_id,
            all_series.len()
        );
    }

    let raw = match series.get("data") {
        None | Some(Value::Null) => Vec::new(),
        Some(data) => serde_json::from_value(data.clone())
            .map_err(|e| malformed(&format!("bad data point: {}", e)))?,
    };
    Ok(Some(raw))
}

/// Reduces each raw point to a single value and applies the metric's unit
/// transform, preserving provider order.
///
/// `average` wins, then `minimum`, then `maximum`; a point carrying none of
/// the three is dropped outright rather than kept as a gap marker. RAM values
/// arrive in bytes and are converted to gigabytes; every other metric passes
/// through unchanged.
fn normalize_points(raw: Vec<RawDataPoint>, metric: MetricType) -> Vec<NormalizedPoint> {
    raw.into_iter()
        .filter_map(|point| {
            let value = point.average.or(point.minimum).or(point.maximum)?;
            let value = match metric {
                MetricType::Ram => value / BYTES_PER_GB,
                _ => value,
            };
            Some(NormalizedPoint {
                timestamp: point.time_stamp,
                value,
            })
        })
        .collect()
}
