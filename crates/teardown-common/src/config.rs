//! Configuration model for a teardown run.
//!
//! The configuration is assembled once at startup from the process
//! environment and an optional environment file, then passed by reference
//! to everything that needs it. Nothing reads the environment afterwards.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    ADMIN_HOST_VAR, ADMIN_PORT_VAR, DEFAULT_DOCKER_BIN, DEFAULT_SCRIPT_SHELL, DEFAULT_STACK_NAME,
    DEFAULT_STOP_JOBS_SCRIPT, DOCKER_BIN_VAR, STACK_NAME_VAR, STOP_JOBS_SCRIPT_VAR,
    STOP_JOBS_SHELL_VAR,
};
use crate::env_file::{self, Assignments};
use crate::error::{Result, TeardownError};
use crate::types::{ContainerName, ResourceKind};

/// Root configuration for a teardown run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeardownConfig {
    /// Display name of the stack used in banners and notices.
    pub stack_name: String,
    /// Names of the containers to force-remove.
    pub containers: ContainerNames,
    /// How background jobs are stopped.
    pub jobs: JobsConfig,
    /// Container runtime binary.
    pub docker_bin: String,
}

/// Container names for every container-backed resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerNames {
    /// Database container.
    pub database: ContainerName,
    /// Cache container.
    pub cache: ContainerName,
    /// Admin service container.
    pub admin: ContainerName,
    /// Advisor service container.
    pub advisor: ContainerName,
    /// Admin web frontend container.
    pub admin_web: ContainerName,
}

impl ContainerNames {
    /// Returns the container name for a kind, or `None` for [`ResourceKind::Jobs`].
    #[must_use]
    pub const fn get(&self, kind: ResourceKind) -> Option<&ContainerName> {
        match kind {
            ResourceKind::Jobs => None,
            ResourceKind::Database => Some(&self.database),
            ResourceKind::Cache => Some(&self.cache),
            ResourceKind::Admin => Some(&self.admin),
            ResourceKind::Advisor => Some(&self.advisor),
            ResourceKind::AdminWeb => Some(&self.admin_web),
        }
    }

    fn slot_mut(&mut self, kind: ResourceKind) -> Option<&mut ContainerName> {
        match kind {
            ResourceKind::Jobs => None,
            ResourceKind::Database => Some(&mut self.database),
            ResourceKind::Cache => Some(&mut self.cache),
            ResourceKind::Admin => Some(&mut self.admin),
            ResourceKind::Advisor => Some(&mut self.advisor),
            ResourceKind::AdminWeb => Some(&mut self.admin_web),
        }
    }
}

/// Settings for the external job-stopping script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobsConfig {
    /// Path of the script to run.
    pub script: PathBuf,
    /// Interpreter the script is run with.
    pub shell: String,
    /// Scheduler endpoint handed to the script, if known.
    pub scheduler_host: Option<String>,
    /// Extra variables exported to the script.
    pub env: Vec<(String, String)>,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            script: PathBuf::from(DEFAULT_STOP_JOBS_SCRIPT),
            shell: DEFAULT_SCRIPT_SHELL.to_string(),
            scheduler_host: None,
            env: Vec::new(),
        }
    }
}

impl Default for TeardownConfig {
    fn default() -> Self {
        Self {
            stack_name: DEFAULT_STACK_NAME.to_string(),
            containers: ContainerNames::default(),
            jobs: JobsConfig::default(),
            docker_bin: DEFAULT_DOCKER_BIN.to_string(),
        }
    }
}

impl TeardownConfig {
    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// Missing container variables leave the name empty; the sequencer
    /// reports those steps as failed instead of refusing to run.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(name) = non_empty(STACK_NAME_VAR) {
            config.stack_name = name;
        }
        if let Some(bin) = non_empty(DOCKER_BIN_VAR) {
            config.docker_bin = bin;
        }
        if let Some(script) = non_empty(STOP_JOBS_SCRIPT_VAR) {
            config.jobs.script = PathBuf::from(script);
        }
        if let Some(shell) = non_empty(STOP_JOBS_SHELL_VAR) {
            config.jobs.shell = shell;
        }
        config.jobs.scheduler_host = non_empty(ADMIN_HOST_VAR).map(|host| {
            non_empty(ADMIN_PORT_VAR).map_or_else(|| host.clone(), |port| format!("{host}:{port}"))
        });

        for kind in ResourceKind::CONTAINERS {
            let value = kind.env_var().and_then(&lookup).unwrap_or_default();
            if let Some(slot) = config.containers.slot_mut(kind) {
                *slot = ContainerName::new(value);
            }
        }
        config
    }

    /// Builds a configuration from the process environment and an
    /// optional environment file.
    ///
    /// Assignments in the file take precedence over the process
    /// environment, matching the effect of sourcing it. They are also
    /// exported to the job-stopping script.
    ///
    /// # Errors
    ///
    /// Returns an error if the env file is missing, unreadable, or malformed.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        let assignments = match env_file {
            Some(path) => env_file::read(path)?,
            None => Assignments::new(),
        };
        Ok(Self::from_assignments(assignments, |key| std::env::var(key).ok()))
    }

    /// Layers file assignments over a fallback lookup.
    pub fn from_assignments<F>(assignments: Assignments, fallback: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::from_lookup(|key| {
            assignments
                .iter()
                .rev()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .or_else(|| fallback(key))
        });
        config.jobs.env = assignments;
        config
    }

    /// Loads a configuration from a JSON file. Omitted fields take their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, or not valid JSON.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TeardownError::NotFound {
                kind: "config file",
                id: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|e| TeardownError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}
