//! CLI command definitions and dispatch.

pub mod down;
pub mod plan;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use teardown_common::config::TeardownConfig;
use teardown_common::constants::DEFAULT_ENV_FILE;

/// teardown — stop every service of a deployed stack.
#[derive(Parser, Debug)]
#[command(name = "teardown", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Environment file to source container names from.
    ///
    /// A missing default file is tolerated; a missing explicit one is an error.
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// JSON configuration file used instead of the environment.
    #[arg(long, global = true, conflicts_with = "env_file")]
    pub config: Option<PathBuf>,

    /// Container runtime binary.
    #[arg(long, global = true)]
    pub docker_bin: Option<String>,

    /// Stack name shown in banners and notices.
    #[arg(long, global = true)]
    pub stack_name: Option<String>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stop all jobs and force-remove every stack container.
    Down(down::DownArgs),
    /// Show the teardown steps without running them.
    Plan(plan::PlanArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the command fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Down(args) => down::execute(&config, &args),
        Command::Plan(args) => plan::execute(&config, &args),
    }
}

/// Resolves the configuration from the global flags.
fn load_config(cli: &Cli) -> anyhow::Result<TeardownConfig> {
    resolve_config(cli, Path::new(DEFAULT_ENV_FILE))
}

/// Resolves the configuration, reading `default_env` when no config source
/// was named and the file exists.
fn resolve_config(cli: &Cli, default_env: &Path) -> anyhow::Result<TeardownConfig> {
    let mut config = if let Some(path) = &cli.config {
        TeardownConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?
    } else if let Some(path) = &cli.env_file {
        TeardownConfig::load(Some(path))
            .with_context(|| format!("loading env file {}", path.display()))?
    } else if default_env.exists() {
        TeardownConfig::load(Some(default_env))
            .with_context(|| format!("loading env file {}", default_env.display()))?
    } else {
        tracing::info!(path = %default_env.display(), "no env file; using process environment");
        TeardownConfig::load(None)?
    };

    if let Some(bin) = &cli.docker_bin {
        config.docker_bin.clone_from(bin);
    }
    if let Some(name) = &cli.stack_name {
        config.stack_name.clone_from(name);
    }
    Ok(config)
}
