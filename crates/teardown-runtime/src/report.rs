//! Per-step results of a teardown run.

use chrono::{DateTime, Utc};
use serde::Serialize;
use teardown_common::types::{ResourceKind, StepOutcome};

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Resource the step targeted.
    pub kind: ResourceKind,
    /// Container name, if the step targeted a container.
    pub target: Option<String>,
    /// Outcome of the stop action.
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Results of a whole run, in step order.
#[derive(Debug, Clone, Serialize)]
pub struct TeardownReport {
    /// When the first step started.
    pub started_at: DateTime<Utc>,
    /// When the closing note was printed.
    pub finished_at: DateTime<Utc>,
    /// One entry per attempted step.
    pub steps: Vec<StepReport>,
}

impl TeardownReport {
    /// Steps whose stop action failed, in order.
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps.iter().filter(|s| s.outcome.is_failed())
    }

    /// Number of failed container steps. The jobs step is not counted.
    #[must_use]
    pub fn failed_containers(&self) -> usize {
        self.failures()
            .filter(|s| s.kind != ResourceKind::Jobs)
            .count()
    }

    /// Returns whether every step succeeded.
    #[must_use]
    pub fn all_stopped(&self) -> bool {
        self.failures().next().is_none()
    }
}
