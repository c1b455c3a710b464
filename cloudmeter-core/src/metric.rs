//! Logical metric kinds and their provider-native names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CollectError, Result};

/// Logical metric kinds the collector understands.
///
/// Extending this enum requires adding entries to [`METRIC_NAMES`] for every
/// resource type that should support the new kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricType {
    Cpu,
    Ram,
    MemoryPercent,
    Disk,
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricType::Cpu => "cpu",
            MetricType::Ram => "ram",
            MetricType::MemoryPercent => "memory-percent",
            MetricType::Disk => "disk",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MetricType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(MetricType::Cpu),
            "ram" => Ok(MetricType::Ram),
            "memory-percent" => Ok(MetricType::MemoryPercent),
            "disk" => Ok(MetricType::Disk),
            other => Err(format!(
                "unknown metric `{}` (expected cpu, ram, memory-percent or disk)",
                other
            )),
        }
    }
}

/// Native metric names per resource type. A pair absent from this table is an
/// unsupported combination.
const METRIC_NAMES: &[(&str, &[(MetricType, &str)])] = &[
    (
        "Microsoft.Compute/virtualMachines",
        &[
            (MetricType::Cpu, "Percentage CPU"),
            (MetricType::Ram, "Available Memory Bytes"),
            (MetricType::MemoryPercent, "Available Memory Percentage"),
            (MetricType::Disk, "Disk Read Bytes"),
        ],
    ),
    (
        "Microsoft.Compute/virtualMachineScaleSets",
        &[
            (MetricType::Cpu, "Percentage CPU"),
            (MetricType::Ram, "Available Memory Bytes"),
            (MetricType::Disk, "Disk Read Bytes"),
        ],
    ),
];

/// Resolves a logical metric to the provider's native name for the given
/// resource type.
///
/// A plain two-level table lookup; no normalization or fuzzy matching of
/// either string is performed, and a miss at either level is fatal to the run.
pub fn resolve_metric_name(resource_type: &str, metric: MetricType) -> Result<&'static str> {
    METRIC_NAMES
        .iter()
        .find(|(ty, _)| *ty == resource_type)
        .and_then(|(_, names)| {
            names
                .iter()
                .find(|(kind, _)| *kind == metric)
                .map(|(_, name)| *name)
        })
        .ok_or_else(|| CollectError::UnsupportedMetric {
            resource_type: resource_type.to_string(),
            metric,
        })
}
