//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use ga_container::DockerRuntime;
use ga_core::Config;
use std::fmt;
use std::path::PathBuf;

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run before the process ends.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Empty: the failure detail has already been reported
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit code for a load that failed for at least one source
pub(crate) const EXIT_PARTIAL_LOAD: i32 = 4;

/// Directory relative paths resolve against
pub(crate) fn base_dir() -> Result<PathBuf> {
    std::env::current_dir().context("Failed to determine current directory")
}

/// Load `--config`, or `graph-admin.yml` from the current directory when present
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Config::load_from_dir(&base_dir()?).context("Failed to load config"),
    }
}

/// Connect to the local Docker daemon
pub(crate) fn connect_docker() -> Result<DockerRuntime> {
    DockerRuntime::connect().context("Failed to connect to Docker")
}
