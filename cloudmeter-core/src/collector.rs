//! The collection orchestrator.
//!
//! Drives a full run: resolve the interval and native metric name, list the
//! candidate resources, then fetch and normalize every resource's series
//! concurrently while reporting completion progress. Any failure aborts the
//! whole run with a typed error; there is no retry and no partial result.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt, TryStreamExt};
use regex::Regex;
use tokio::sync::Mutex;
use tracing::info;

use crate::azure::AzureCli;
use crate::config::CollectorConfig;
use crate::error::{CollectError, Result};
use crate::interval::quantize_step;
use crate::metric::resolve_metric_name;
use crate::resources::list_resources;
use crate::series::{fetch_series, NormalizedPoint};

/// The window a run covers. Constructed once per run.
#[derive(Debug, Clone, Copy)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub step: Duration,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, step: Duration) -> Result<Self> {
        if start >= end {
            return Err(CollectError::InvalidWindow(format!(
                "start {} is not before end {}",
                start, end
            )));
        }
        if step.is_zero() {
            return Err(CollectError::InvalidWindow("step must be positive".into()));
        }
        Ok(Self { start, end, step })
    }
}

/// Resource name -> normalized points, in the order the provider returned
/// them. Resources whose fetch returned no series contribute no entry.
pub type LabeledSeriesMap = HashMap<String, Vec<NormalizedPoint>>;

/// Shared per-run state, mutated by every fetch's completion. A single mutex
/// keeps the counter increment and the map write atomic with respect to each
/// other, so progress events arrive in completion order with no gaps.
struct RunState<F> {
    completed: usize,
    total: usize,
    on_progress: F,
    series: LabeledSeriesMap,
}

/// Collects one metric's time series for every matching resource.
///
/// `on_progress` fires once with `(0, total)` after listing, then once per
/// resource with the updated completion count, in completion order (which is
/// not listing order). If two resources share a name, the later completion
/// wins the map entry.
pub async fn collect<F>(
    cli: &dyn AzureCli,
    window: &TimeWindow,
    config: &CollectorConfig,
    on_progress: F,
) -> Result<LabeledSeriesMap>
where
    F: FnMut(usize, usize) + Send,
{
    // Resolution must succeed before any external invocation happens.
    let interval = quantize_step(window.step);
    let metric_name = resolve_metric_name(&config.resource_type, config.metric)?;
    let pattern = config
        .filter
        .as_deref()
        .filter(|f| !f.is_empty())
        .map(Regex::new)
        .transpose()?;

    let resources = list_resources(
        cli,
        config.resource_group.as_deref(),
        &config.resource_type,
        pattern.as_ref(),
    )
    .await?;
    let total = resources.len();
    info!(
        "collecting `{}` at {} for {} resource(s)",
        metric_name, interval, total
    );

    let state = Arc::new(Mutex::new(RunState {
        completed: 0,
        total,
        on_progress,
        series: HashMap::new(),
    }));
    {
        let mut run = state.lock().await;
        (run.on_progress)(0, total);
    }

    let cap = config.max_in_flight.unwrap_or(total).max(1);
    let fetches = resources.into_iter().map(|resource| {
        let state = Arc::clone(&state);
        async move {
            let points = fetch_series(
                cli,
                &resource.id,
                metric_name,
                config.metric,
                window,
                interval,
            )
            .await?;

            let mut run = state.lock().await;
            if let Some(points) = points {
                run.series.insert(resource.name, points);
            }
            run.completed += 1;
            let (completed, total) = (run.completed, run.total);
            (run.on_progress)(completed, total);
            Ok::<(), CollectError>(())
        }
    });
    // The first error drops the stream, abandoning still-in-flight fetches.
    stream::iter(fetches)
        .buffer_unordered(cap)
        .try_collect::<Vec<()>>()
        .await?;

    let mut run = state.lock().await;
    Ok(std::mem::take(&mut run.series))
}
