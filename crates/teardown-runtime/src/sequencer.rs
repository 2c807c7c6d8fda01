//! Runs a [`TeardownPlan`] step by step.
//!
//! Every step prints its banner and then performs its stop action. Any
//! failure is recorded and, for container steps, announced with a single
//! notice line; the next step always runs. Console write errors are
//! logged and otherwise ignored, so [`Sequencer::run`] cannot fail.

use std::io::Write;

use chrono::Utc;
use teardown_common::error::TeardownError;
use teardown_common::types::{ContainerName, ResourceKind, StepOutcome};

use crate::backend::ContainerRuntime;
use crate::banner;
use crate::jobs::JobStopper;
use crate::plan::{Step, TeardownPlan};
use crate::report::{StepReport, TeardownReport};

/// Drives the stop collaborators through a plan.
pub struct Sequencer {
    runtime: Box<dyn ContainerRuntime>,
    jobs: Box<dyn JobStopper>,
}

impl Sequencer {
    /// Creates a sequencer over the given collaborators.
    #[must_use]
    pub fn new(runtime: Box<dyn ContainerRuntime>, jobs: Box<dyn JobStopper>) -> Self {
        Self { runtime, jobs }
    }

    /// Attempts every step of `plan` in order, writing console output to `out`.
    pub fn run(&self, plan: &TeardownPlan, out: &mut dyn Write) -> TeardownReport {
        let started_at = Utc::now();
        if !self.runtime.is_available() {
            tracing::warn!("container runtime not found; container steps will fail");
        }

        let steps = plan
            .steps
            .iter()
            .map(|step| self.run_step(plan, step, out))
            .collect();

        let note = plan.closing_note();
        emit(out, |w| writeln!(w, "{note}"));
        emit(out, |w| w.flush());

        TeardownReport {
            started_at,
            finished_at: Utc::now(),
            steps,
        }
    }

    fn run_step(&self, plan: &TeardownPlan, step: &Step, out: &mut dyn Write) -> StepReport {
        emit(out, |w| banner::write_to(w, &step.label));
        tracing::info!(
            kind = %step.kind,
            container = ?step.target.as_ref().map(ContainerName::as_str),
            "teardown step"
        );

        let outcome = match (step.kind, &step.target) {
            (ResourceKind::Jobs, _) => self.stop_jobs(),
            (_, Some(name)) => self.remove_container(name, out),
            (_, None) => failed("no container configured"),
        };

        if outcome.is_failed() && step.kind != ResourceKind::Jobs {
            let name = step
                .target
                .as_ref()
                .map_or("", ContainerName::as_str);
            emit(out, |w| {
                writeln!(
                    w,
                    "Failed to stop {}'s {} (container {name:?})",
                    plan.stack_name,
                    step.kind.display_name()
                )
            });
        }

        StepReport {
            kind: step.kind,
            target: step.target.as_ref().map(ToString::to_string),
            outcome,
        }
    }

    fn stop_jobs(&self) -> StepOutcome {
        match self.jobs.stop_all_jobs() {
            Ok(()) => StepOutcome::Stopped,
            Err(e) => {
                tracing::warn!(error = %e, "failed to stop jobs");
                failed_from(&e)
            }
        }
    }

    fn remove_container(&self, name: &ContainerName, out: &mut dyn Write) -> StepOutcome {
        if name.is_empty() {
            tracing::warn!("container name is empty; skipping removal");
            return failed("container name is empty");
        }
        match self.runtime.force_remove(name) {
            Ok(output) => {
                if !output.stdout.is_empty() {
                    emit(out, |w| w.write_all(output.stdout.as_bytes()));
                }
                StepOutcome::Stopped
            }
            Err(e) => {
                tracing::warn!(container = %name, error = %e, "failed to remove container");
                failed_from(&e)
            }
        }
    }
}

fn failed(reason: &str) -> StepOutcome {
    StepOutcome::Failed {
        reason: reason.to_string(),
    }
}

fn failed_from(err: &TeardownError) -> StepOutcome {
    StepOutcome::Failed {
        reason: err.to_string(),
    }
}

fn emit<F>(out: &mut dyn Write, write: F)
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    if let Err(e) = write(out) {
        tracing::warn!(error = %e, "console write failed");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use teardown_common::config::TeardownConfig;
    use teardown_common::error::Result;

    use super::*;
    use crate::backend::RemoveOutput;

    #[derive(Clone, Default)]
    struct Calls(Arc<Mutex<Vec<String>>>);

    impl Calls {
        fn push(&self, call: impl Into<String>) {
            self.0.lock().unwrap().push(call.into());
        }

        fn take(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    struct FakeRuntime {
        calls: Calls,
        present: Vec<&'static str>,
    }

    impl ContainerRuntime for FakeRuntime {
        fn force_remove(&self, name: &ContainerName) -> Result<RemoveOutput> {
            self.calls.push(format!("rm {name}"));
            if self.present.contains(&name.as_str()) {
                Ok(RemoveOutput {
                    stdout: format!("{name}\n"),
                })
            } else {
                Err(TeardownError::CommandFailed {
                    program: "docker".into(),
                    code: Some(1),
                    stderr: format!("No such container: {name}"),
                })
            }
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    struct FakeJobs {
        calls: Calls,
        fail: bool,
    }

    impl JobStopper for FakeJobs {
        fn stop_all_jobs(&self) -> Result<()> {
            self.calls.push("jobs");
            if self.fail {
                Err(TeardownError::Config {
                    message: "scheduler unreachable".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn config() -> TeardownConfig {
        let mut config = TeardownConfig::default();
        config.containers.database = ContainerName::new("pg1");
        config.containers.cache = ContainerName::new("redis1");
        config.containers.admin = ContainerName::new("admin1");
        config.containers.advisor = ContainerName::new("adv1");
        config.containers.admin_web = ContainerName::new("web1");
        config
    }

    fn sequencer(calls: &Calls, present: Vec<&'static str>, jobs_fail: bool) -> Sequencer {
        Sequencer::new(
            Box::new(FakeRuntime {
                calls: calls.clone(),
                present,
            }),
            Box::new(FakeJobs {
                calls: calls.clone(),
                fail: jobs_fail,
            }),
        )
    }

    #[test]
    fn runs_every_step_in_order_when_nothing_exists() {
        let calls = Calls::default();
        let plan = TeardownPlan::from_config(&config());
        let mut out = Vec::new();
        let report = sequencer(&calls, vec![], false).run(&plan, &mut out);

        assert_eq!(
            calls.take(),
            ["jobs", "rm pg1", "rm redis1", "rm admin1", "rm adv1", "rm web1"]
        );
        assert_eq!(report.steps.len(), 6);
        assert_eq!(report.failed_containers(), 5);
    }

    #[test]
    fn prints_one_notice_per_missing_container_in_order() {
        let calls = Calls::default();
        let plan = TeardownPlan::from_config(&config());
        let mut out = Vec::new();
        let _ = sequencer(&calls, vec![], false).run(&plan, &mut out);
        let text = String::from_utf8(out).unwrap();

        let notices: Vec<_> = text.lines().filter(|l| l.starts_with("Failed to stop")).collect();
        assert_eq!(
            notices,
            [
                r#"Failed to stop Rafiki's DB (container "pg1")"#,
                r#"Failed to stop Rafiki's Cache (container "redis1")"#,
                r#"Failed to stop Rafiki's Admin (container "admin1")"#,
                r#"Failed to stop Rafiki's Advisor (container "adv1")"#,
                r#"Failed to stop Rafiki's Admin Web (container "web1")"#,
            ]
        );
        assert!(text.trim_end().ends_with("wipe Rafiki's data folder manually"));
    }

    #[test]
    fn present_containers_get_no_notice() {
        let calls = Calls::default();
        let plan = TeardownPlan::from_config(&config());
        let mut out = Vec::new();
        let report = sequencer(&calls, vec!["pg1", "adv1"], false).run(&plan, &mut out);
        let text = String::from_utf8(out).unwrap();

        assert!(!text.contains("Rafiki's DB (container"));
        assert!(!text.contains("Rafiki's Advisor (container"));
        assert!(text.contains("Rafiki's Cache (container"));
        assert_eq!(report.failed_containers(), 3);
        assert!(text.lines().any(|l| l == "pg1"));
    }

    #[test]
    fn failing_jobs_step_does_not_halt_or_print_notice() {
        let calls = Calls::default();
        let plan = TeardownPlan::from_config(&config());
        let mut out = Vec::new();
        let all = vec!["pg1", "redis1", "admin1", "adv1", "web1"];
        let report = sequencer(&calls, all, true).run(&plan, &mut out);
        let text = String::from_utf8(out).unwrap();

        assert_eq!(calls.take().len(), 6);
        assert!(report.steps[0].outcome.is_failed());
        assert_eq!(report.failed_containers(), 0);
        assert!(!text.contains("Failed to stop"));
    }

    #[test]
    fn empty_name_fails_without_invoking_runtime() {
        let calls = Calls::default();
        let mut cfg = config();
        cfg.containers.cache = ContainerName::new("");
        let plan = TeardownPlan::from_config(&cfg);
        let mut out = Vec::new();
        let report = sequencer(&calls, vec!["pg1", "admin1", "adv1", "web1"], false)
            .run(&plan, &mut out);

        assert!(!calls.take().iter().any(|c| c == "rm "));
        assert!(report.steps[2].outcome.is_failed());
        assert_eq!(report.failed_containers(), 1);
    }

    #[test]
    fn banners_precede_each_step() {
        let calls = Calls::default();
        let plan = TeardownPlan::from_config(&config());
        let mut out = Vec::new();
        let _ = sequencer(&calls, vec![], false).run(&plan, &mut out);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "-".repeat("Stopping any existing jobs...".len()));
        assert_eq!(lines[1], "Stopping any existing jobs...");
        assert_eq!(lines[2], lines[0]);
        assert_eq!(lines[4], "Stopping Rafiki's DB...");
    }

    #[test]
    fn repeated_runs_produce_identical_output() {
        let calls = Calls::default();
        let plan = TeardownPlan::from_config(&config());
        let seq = sequencer(&calls, vec![], false);

        let mut first = Vec::new();
        let mut second = Vec::new();
        let a = seq.run(&plan, &mut first);
        let b = seq.run(&plan, &mut second);

        assert_eq!(first, second);
        assert_eq!(a.steps, b.steps);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn console_errors_do_not_stop_the_run() {
        let calls = Calls::default();
        let plan = TeardownPlan::from_config(&config());
        let report = sequencer(&calls, vec![], false).run(&plan, &mut BrokenPipe);
        assert_eq!(report.steps.len(), 6);
        assert_eq!(calls.take().len(), 6);
    }
}
