//! Domain primitive types used across the teardown workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a container as known to the container runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerName(String);

impl ContainerName {
    /// Creates a container name, trimming surrounding whitespace.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether no name was configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ContainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resource the teardown stops, in the order it is stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Background jobs managed by the scheduler.
    Jobs,
    /// Database container.
    Database,
    /// Cache container.
    Cache,
    /// Admin service container.
    Admin,
    /// Advisor service container.
    Advisor,
    /// Admin web frontend container.
    AdminWeb,
}

impl ResourceKind {
    /// Container-backed kinds in teardown order.
    pub const CONTAINERS: [Self; 5] = [
        Self::Database,
        Self::Cache,
        Self::Admin,
        Self::Advisor,
        Self::AdminWeb,
    ];

    /// Human-readable fragment used in banners and failure notices.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Jobs => "Jobs",
            Self::Database => "DB",
            Self::Cache => "Cache",
            Self::Admin => "Admin",
            Self::Advisor => "Advisor",
            Self::AdminWeb => "Admin Web",
        }
    }

    /// Environment variable holding the container name, if container-backed.
    #[must_use]
    pub const fn env_var(self) -> Option<&'static str> {
        match self {
            Self::Jobs => None,
            Self::Database => Some("POSTGRES_HOST"),
            Self::Cache => Some("REDIS_HOST"),
            Self::Admin => Some("ADMIN_HOST"),
            Self::Advisor => Some("ADVISOR_HOST"),
            Self::AdminWeb => Some("ADMIN_WEB_HOST"),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jobs => write!(f, "jobs"),
            Self::Database => write!(f, "database"),
            Self::Cache => write!(f, "cache"),
            Self::Admin => write!(f, "admin"),
            Self::Advisor => write!(f, "advisor"),
            Self::AdminWeb => write!(f, "admin-web"),
        }
    }
}

/// Result of a single teardown step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// The stop action reported success.
    Stopped,
    /// The stop action failed. Missing resources land here too.
    Failed {
        /// Rendered cause of the failure.
        reason: String,
    },
}

impl StepOutcome {
    /// Returns whether the step failed.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}
