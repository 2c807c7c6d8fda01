//! `teardown plan` — Show the teardown steps without running them.

use std::io::Write;

use clap::Args;
use teardown_common::config::TeardownConfig;
use teardown_runtime::plan::TeardownPlan;

use crate::output;

/// Arguments for the `plan` command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Print the plan as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `plan` command.
///
/// # Errors
///
/// Returns an error if writing to standard output fails.
pub fn execute(config: &TeardownConfig, args: &PlanArgs) -> anyhow::Result<()> {
    let plan = TeardownPlan::from_config(config);
    let mut stdout = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut stdout, &plan)?;
        writeln!(stdout)?;
    } else {
        stdout.write_all(output::format_plan(&plan).as_bytes())?;
    }
    Ok(())
}
