//! The fixed, ordered list of teardown steps.

use serde::Serialize;
use teardown_common::config::TeardownConfig;
use teardown_common::types::{ContainerName, ResourceKind};

/// One step of the teardown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// What the step stops.
    pub kind: ResourceKind,
    /// Banner text printed before the step runs.
    pub label: String,
    /// Container to remove; `None` for the jobs step.
    pub target: Option<ContainerName>,
}

/// Ordered teardown steps for one stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeardownPlan {
    /// Display name of the stack.
    pub stack_name: String,
    /// Steps in execution order: jobs first, then every container.
    pub steps: Vec<Step>,
}

impl TeardownPlan {
    /// Builds the plan for a configuration.
    #[must_use]
    pub fn from_config(config: &TeardownConfig) -> Self {
        let stack = &config.stack_name;
        let mut steps = Vec::with_capacity(ResourceKind::CONTAINERS.len() + 1);
        steps.push(Step {
            kind: ResourceKind::Jobs,
            label: "Stopping any existing jobs...".to_string(),
            target: None,
        });
        steps.extend(ResourceKind::CONTAINERS.iter().map(|&kind| Step {
            kind,
            label: format!("Stopping {stack}'s {}...", kind.display_name()),
            target: config.containers.get(kind).cloned(),
        }));
        Self {
            stack_name: stack.clone(),
            steps,
        }
    }

    /// Line printed once every step has been attempted.
    #[must_use]
    pub fn closing_note(&self) -> String {
        format!(
            "You'll need to destroy your machine's Docker swarm & wipe {}'s data folder manually",
            self.stack_name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jobs_come_first_then_containers_in_order() {
        let plan = TeardownPlan::from_config(&TeardownConfig::default());
        let kinds: Vec<_> = plan.steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [
                ResourceKind::Jobs,
                ResourceKind::Database,
                ResourceKind::Cache,
                ResourceKind::Admin,
                ResourceKind::Advisor,
                ResourceKind::AdminWeb,
            ]
        );
        assert!(plan.steps[0].target.is_none());
    }

    #[test]
    fn labels_use_stack_name() {
        let config = TeardownConfig {
            stack_name: "Demo".into(),
            ..TeardownConfig::default()
        };
        let plan = TeardownPlan::from_config(&config);
        assert_eq!(plan.steps[1].label, "Stopping Demo's DB...");
        assert_eq!(plan.steps[5].label, "Stopping Demo's Admin Web...");
        assert!(plan.closing_note().contains("wipe Demo's data folder"));
    }

    #[test]
    fn targets_come_from_container_names() {
        let mut config = TeardownConfig::default();
        config.containers.cache = ContainerName::new("redis1");
        let plan = TeardownPlan::from_config(&config);
        assert_eq!(plan.steps[2].target, Some(ContainerName::new("redis1")));
    }
}
