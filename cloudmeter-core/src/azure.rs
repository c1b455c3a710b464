//! Subprocess boundary to the Azure CLI.
//!
//! Everything the core knows about the provider arrives through [`AzureCli`]:
//! one trait method that runs the external tool with a list of arguments and
//! returns its parsed JSON payload. Tests substitute a fake; production uses
//! [`AzCommand`], which shells out to `az`.

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use crate::error::{CollectError, Result};

/// Seam to the external Azure CLI executable.
///
/// Implementations must treat a non-zero exit as [`CollectError::ExternalInvocation`]
/// and unparseable success output as [`CollectError::MalformedResponse`]; both
/// are fatal to the whole run.
#[async_trait]
pub trait AzureCli: Send + Sync {
    /// Runs the tool with `args` and returns its JSON output.
    async fn run(&self, args: &[String]) -> Result<Value>;
}

/// Production [`AzureCli`] backed by the `az` executable.
pub struct AzCommand {
    program: String,
}

impl AzCommand {
    pub fn new() -> Self {
        Self::with_program("az")
    }

    /// Uses a different executable name or path, e.g. a wrapper script.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for AzCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AzureCli for AzCommand {
    async fn run(&self, args: &[String]) -> Result<Value> {
        let rendered = format!("{} {}", self.program, args.join(" "));
        debug!("running {}", rendered);

        let output = Command::new(&self.program)
            .args(args)
            .args(["--output", "json"])
            .output()
            .await
            .map_err(|e| CollectError::Launch {
                command: rendered.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(CollectError::ExternalInvocation {
                command: rendered,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|e| CollectError::MalformedResponse {
            command: rendered,
            reason: e.to_string(),
        })
    }
}
