//! `teardown down` — Stop all jobs and force-remove every stack container.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use teardown_common::config::TeardownConfig;
use teardown_runtime::backend::detect_runtime;
use teardown_runtime::jobs::ScriptJobStopper;
use teardown_runtime::plan::TeardownPlan;
use teardown_runtime::sequencer::Sequencer;

use crate::output;

/// Arguments for the `down` command.
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Write a JSON report of every step to this file.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Exit non-zero if any container failed to stop.
    #[arg(long)]
    pub strict: bool,
}

/// Executes the `down` command.
///
/// Every step is attempted regardless of earlier failures. Without
/// `--strict` the command succeeds even when every step failed.
///
/// # Errors
///
/// Returns an error if the report cannot be written, or under `--strict`
/// when at least one container step failed.
pub fn execute(config: &TeardownConfig, args: &DownArgs) -> anyhow::Result<()> {
    let plan = TeardownPlan::from_config(config);
    let sequencer = Sequencer::new(
        detect_runtime(config),
        Box::new(ScriptJobStopper::from_config(&config.jobs)),
    );

    let report = {
        let mut stdout = std::io::stdout().lock();
        sequencer.run(&plan, &mut stdout)
    };
    tracing::info!(
        failed = report.failed_containers(),
        steps = report.steps.len(),
        "teardown finished"
    );

    if let Some(path) = &args.report {
        output::write_report(path, &report)
            .with_context(|| format!("writing report {}", path.display()))?;
    }

    let failed = report.failed_containers();
    if args.strict && failed > 0 {
        anyhow::bail!("{failed} container(s) failed to stop");
    }
    Ok(())
}
