//! Secondary service downloader
//!
//! The secondary service has its own client, invoked as an opaque external
//! program that receives the show identifier as its only argument.

use tokio::process::Command;
use tracing::info;

use crate::error::{AnimeDlError, Result};
use crate::types::FallbackIdentifier;

#[allow(async_fn_in_trait)]
pub trait FallbackRunner {
    async fn run(&self, id: &FallbackIdentifier) -> Result<()>;
}

/// Runs a configured program with the show id appended to its arguments
///
/// The command line is split on whitespace: `"vvvvid-dl --quality hd"`
/// runs `vvvvid-dl --quality hd <id>`.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner {
    command: Option<String>,
}

impl CommandRunner {
    /// Create a runner for the configured command line.
    ///
    /// # Arguments
    /// * `command` - Program and leading arguments; `None` makes every run fail
    ///   with `AnimeDlError::Runner`
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }
}

impl FallbackRunner for CommandRunner {
    async fn run(&self, id: &FallbackIdentifier) -> Result<()> {
        let command = self.command.as_deref().ok_or_else(|| {
            AnimeDlError::Runner(format!(
                "nessun programma configurato per lo show {} (fallback.runner_command)",
                id
            ))
        })?;

        let mut parts = command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AnimeDlError::Runner("comando vuoto".to_string()))?;

        info!(program, id = %id, "starting fallback downloader");
        let status = Command::new(program)
            .args(parts)
            .arg(id.as_str())
            .status()
            .await
            .map_err(|e| AnimeDlError::Runner(format!("{}: {}", program, e)))?;

        if !status.success() {
            return Err(AnimeDlError::Runner(format!("{} terminato con {}", program, status)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_runner_fails() {
        let runner = CommandRunner::new(None);
        let result = runner.run(&FallbackIdentifier::new("12345")).await;
        match result {
            Err(AnimeDlError::Runner(msg)) => assert!(msg.contains("12345")),
            other => panic!("Expected Runner error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_command_is_unconfigured() {
        let runner = CommandRunner::new(Some("   ".to_string()));
        assert!(runner.run(&FallbackIdentifier::new("1")).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_program_fails() {
        let runner = CommandRunner::new(Some("animedl-no-such-program-xyz".to_string()));
        let result = runner.run(&FallbackIdentifier::new("1")).await;
        assert!(matches!(result, Err(AnimeDlError::Runner(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runner_passes_id() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("id.txt");
        let script = dir.path().join("runner.sh");
        std::fs::write(&script, format!("#!/bin/sh\necho \"$1\" > {}\n", out.display())).unwrap();

        let runner = CommandRunner::new(Some(format!("sh {}", script.display())));
        runner.run(&FallbackIdentifier::new("12345")).await.unwrap();

        assert_eq!(std::fs::read_to_string(&out).unwrap().trim(), "12345");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runner_failure_status() {
        let runner = CommandRunner::new(Some("false".to_string()));
        let result = runner.run(&FallbackIdentifier::new("1")).await;
        assert!(matches!(result, Err(AnimeDlError::Runner(_))));
    }
}
