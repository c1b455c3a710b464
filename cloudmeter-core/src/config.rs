//! Collector configuration.

use serde::{Deserialize, Serialize};

use crate::metric::MetricType;

/// Options for a collection run.
///
/// Matches the option bundle the host framework recognizes: an optional
/// resource-group scope, the provider resource-type identifier, the logical
/// metric, and an optional regular-expression filter on resource names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Scope listing to one resource group; `None` lists the whole
    /// subscription.
    #[serde(default)]
    pub resource_group: Option<String>,
    #[serde(default = "default_resource_type")]
    pub resource_type: String,
    #[serde(default = "default_metric")]
    pub metric: MetricType,
    /// Case-sensitive, unanchored regex applied to resource names.
    #[serde(default)]
    pub filter: Option<String>,
    /// Cap on simultaneous in-flight metric queries; `None` launches every
    /// resource's query at once.
    #[serde(default)]
    pub max_in_flight: Option<usize>,
}

fn default_resource_type() -> String {
    "Microsoft.Compute/virtualMachines".to_string()
}

fn default_metric() -> MetricType {
    MetricType::Cpu
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            resource_group: None,
            resource_type: default_resource_type(),
            metric: default_metric(),
            filter: None,
            max_in_flight: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_cpu_on_virtual_machines() {
        let config: CollectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.resource_type, "Microsoft.Compute/virtualMachines");
        assert_eq!(config.metric, MetricType::Cpu);
        assert!(config.resource_group.is_none());
        assert!(config.filter.is_none());
        assert!(config.max_in_flight.is_none());
    }

    #[test]
    fn deserializes_kebab_case_metric() {
        let config: CollectorConfig =
            serde_json::from_str(r#"{"metric": "memory-percent"}"#).unwrap();
        assert_eq!(config.metric, MetricType::MemoryPercent);
    }
}
