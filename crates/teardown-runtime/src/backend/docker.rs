//! Docker CLI backend.
//!
//! Shells out to `docker rm -f <name>`. Exit status is the only signal
//! used; standard error is kept for the failure reason.

use std::path::PathBuf;
use std::process::Command;

use teardown_common::error::{Result, TeardownError};
use teardown_common::types::ContainerName;

use super::{ContainerRuntime, RemoveOutput};

/// Container runtime backed by the `docker` command-line client.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl DockerCli {
    /// Creates a backend that invokes `program` (a name on `PATH` or a path).
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns the configured program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn resolve(&self) -> PathBuf {
        which::which(&self.program).unwrap_or_else(|_| PathBuf::from(&self.program))
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(teardown_common::constants::DEFAULT_DOCKER_BIN)
    }
}

impl ContainerRuntime for DockerCli {
    fn force_remove(&self, name: &ContainerName) -> Result<RemoveOutput> {
        let program = self.resolve();
        tracing::debug!(program = %program.display(), container = %name, "docker rm -f");

        let output = Command::new(&program)
            .args(["rm", "-f", name.as_str()])
            .output()
            .map_err(|e| TeardownError::Io {
                path: program.clone(),
                source: e,
            })?;

        if output.status.success() {
            return Ok(RemoveOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }
        Err(TeardownError::CommandFailed {
            program: self.program.clone(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }
}
