//! Stopping background jobs through an external script.

use std::path::{Path, PathBuf};
use std::process::Command;

use teardown_common::config::JobsConfig;
use teardown_common::constants::SCHEDULER_HOST_VAR;
use teardown_common::error::{Result, TeardownError};

/// Something that stops every background job of the stack.
pub trait JobStopper: Send + Sync {
    /// Stops all jobs on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns an error if the stop action could not run or reported failure.
    fn stop_all_jobs(&self) -> Result<()>;
}

/// Runs a shell script that stops all jobs.
///
/// The script inherits this process's standard output and error so its
/// own messages land between the banners.
#[derive(Debug, Clone)]
pub struct ScriptJobStopper {
    shell: String,
    script: PathBuf,
    env: Vec<(String, String)>,
}

impl ScriptJobStopper {
    /// Creates a stopper from the jobs section of the configuration.
    #[must_use]
    pub fn from_config(config: &JobsConfig) -> Self {
        let mut env = config.env.clone();
        if let Some(host) = &config.scheduler_host {
            env.push((SCHEDULER_HOST_VAR.to_string(), host.clone()));
        }
        Self {
            shell: config.shell.clone(),
            script: config.script.clone(),
            env,
        }
    }

    /// Returns the script path.
    #[must_use]
    pub fn script(&self) -> &Path {
        &self.script
    }
}

impl JobStopper for ScriptJobStopper {
    fn stop_all_jobs(&self) -> Result<()> {
        if !self.script.exists() {
            return Err(TeardownError::NotFound {
                kind: "jobs script",
                id: self.script.display().to_string(),
            });
        }
        tracing::debug!(
            shell = %self.shell,
            script = %self.script.display(),
            "running jobs script"
        );

        let status = Command::new(&self.shell)
            .arg(&self.script)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .map_err(|e| TeardownError::Io {
                path: PathBuf::from(&self.shell),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(TeardownError::CommandFailed {
                program: self.script.display().to_string(),
                code: status.code(),
                stderr: String::new(),
            })
        }
    }
}
