//! Enumeration of candidate resources via the external tool.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::azure::AzureCli;
use crate::error::{CollectError, Result};

/// A provider resource as returned by the enumeration command. Identity is
/// `id`; `name` is the label used in the final series map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
}

/// Lists resources of `resource_type`, optionally scoped to a resource group
/// and filtered by a name pattern.
///
/// The pattern is applied client-side, case-sensitive and unanchored: a match
/// anywhere in the name includes the resource. No pattern includes everything.
/// Order is whatever the external tool returned; no sorting is imposed.
pub async fn list_resources(
    cli: &dyn AzureCli,
    resource_group: Option<&str>,
    resource_type: &str,
    name_pattern: Option<&Regex>,
) -> Result<Vec<Resource>> {
    let mut args = vec![
        "resource".to_string(),
        "list".to_string(),
        "--resource-type".to_string(),
        resource_type.to_string(),
    ];
    if let Some(group) = resource_group {
        args.push("--resource-group".to_string());
        args.push(group.to_string());
    }

    let payload = cli.run(&args).await?;
    let listed: Vec<Resource> =
        serde_json::from_value(payload).map_err(|e| CollectError::MalformedResponse {
            command: "az resource list".to_string(),
            reason: e.to_string(),
        })?;

    let resources: Vec<Resource> = match name_pattern {
        Some(pattern) => listed
            .into_iter()
            .filter(|r| pattern.is_match(&r.name))
            .collect(),
        None => listed,
    };
    info!(
        "found {} {} resource(s)",
        resources.len(),
        resource_type
    );
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct FakeCli {
        payload: Value,
        expected_args: Option<Vec<String>>,
    }

    #[async_trait]
    impl AzureCli for FakeCli {
        async fn run(&self, args: &[String]) -> Result<Value> {
            if let Some(expected) = &self.expected_args {
                assert_eq!(args, expected.as_slice());
            }
            Ok(self.payload.clone())
        }
    }

    fn three_resources() -> Value {
        json!([
            {"id": "/sub/1/vm/web-1", "name": "web-1"},
            {"id": "/sub/1/vm/web-2", "name": "web-2"},
            {"id": "/sub/1/vm/db-1", "name": "db-1"},
        ])
    }

    #[tokio::test]
    async fn filters_by_name_pattern() {
        let cli = FakeCli {
            payload: three_resources(),
            expected_args: None,
        };
        let pattern = Regex::new("^web").unwrap();
        let resources = list_resources(&cli, None, "Microsoft.Compute/virtualMachines", Some(&pattern))
            .await
            .unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["web-1", "web-2"]);
    }

    #[tokio::test]
    async fn no_pattern_keeps_everything_in_order() {
        let cli = FakeCli {
            payload: three_resources(),
            expected_args: None,
        };
        let resources = list_resources(&cli, None, "Microsoft.Compute/virtualMachines", None)
            .await
            .unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["web-1", "web-2", "db-1"]);
    }

    #[tokio::test]
    async fn scopes_to_resource_group_when_given() {
        let cli = FakeCli {
            payload: json!([]),
            expected_args: Some(
                [
                    "resource",
                    "list",
                    "--resource-type",
                    "Microsoft.Compute/virtualMachines",
                    "--resource-group",
                    "prod-rg",
                ]
                .map(String::from)
                .to_vec(),
            ),
        };
        let resources = list_resources(
            &cli,
            Some("prod-rg"),
            "Microsoft.Compute/virtualMachines",
            None,
        )
        .await
        .unwrap();
        assert!(resources.is_empty());
    }

    #[tokio::test]
    async fn non_array_payload_is_malformed() {
        let cli = FakeCli {
            payload: json!({"unexpected": true}),
            expected_args: None,
        };
        let err = list_resources(&cli, None, "Microsoft.Compute/virtualMachines", None)
            .await
            .unwrap_err();
        assert!(matches!(err, CollectError::MalformedResponse { .. }));
    }
}
