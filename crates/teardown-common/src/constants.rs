//! System-wide constants and default paths.

/// Environment file sourced before teardown when no path is given.
pub const DEFAULT_ENV_FILE: &str = ".env.sh";

/// Script that stops every background job known to the scheduler.
pub const DEFAULT_STOP_JOBS_SCRIPT: &str = "scripts/stop_all_jobs.sh";

/// Interpreter used to run the job-stopping script.
pub const DEFAULT_SCRIPT_SHELL: &str = "sh";

/// Container runtime binary invoked for force-removal.
pub const DEFAULT_DOCKER_BIN: &str = "docker";

/// Display name used in banners when `STACK_NAME` is not set.
pub const DEFAULT_STACK_NAME: &str = "Rafiki";

/// Variable naming the stack in banners and notices.
pub const STACK_NAME_VAR: &str = "STACK_NAME";
/// Variable overriding the job-stopping script path.
pub const STOP_JOBS_SCRIPT_VAR: &str = "STOP_JOBS_SCRIPT";
/// Variable overriding the interpreter the job-stopping script runs with.
pub const STOP_JOBS_SHELL_VAR: &str = "STOP_JOBS_SHELL";
/// Variable overriding the container runtime binary.
pub const DOCKER_BIN_VAR: &str = "DOCKER_BIN";
/// Host of the admin service, which doubles as the job scheduler.
pub const ADMIN_HOST_VAR: &str = "ADMIN_HOST";
/// Port of the admin service.
pub const ADMIN_PORT_VAR: &str = "ADMIN_PORT";
/// Variable handed to the job-stopping script with the scheduler endpoint.
pub const SCHEDULER_HOST_VAR: &str = "SCHEDULER_HOST";

