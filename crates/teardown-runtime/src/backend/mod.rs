//! Container runtime abstraction used by the teardown sequencer.

pub mod docker;

use teardown_common::config::TeardownConfig;
use teardown_common::error::Result;
use teardown_common::types::ContainerName;

/// Output of a successful force-removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOutput {
    /// Whatever the runtime printed on standard output.
    pub stdout: String,
}

/// Something that can force-remove containers by name.
///
/// Implementors must treat a missing container as an error rather than
/// silently succeeding; the sequencer decides what a failure means.
pub trait ContainerRuntime: Send + Sync {
    /// Force-removes the container called `name`, stopping it first if
    /// it is running.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be invoked or reports failure.
    fn force_remove(&self, name: &ContainerName) -> Result<RemoveOutput>;

    /// Returns whether the runtime looks usable on this host.
    fn is_available(&self) -> bool;
}

/// Creates the default runtime for a configuration.
#[must_use]
pub fn detect_runtime(config: &TeardownConfig) -> Box<dyn ContainerRuntime> {
    Box::new(docker::DockerCli::new(&config.docker_bin))
}
