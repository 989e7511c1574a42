//! Build from the stored config without asking anything.

use super::execute;
use crate::cli::{BuildArgs, RuntimeConfig};
use crate::error::Result;
use crate::release::pipeline::{CommandRunner, RunReport};

/// Load, validate, build.
///
/// A missing or incomplete config fails here, before any child process runs.
pub async fn run<R: CommandRunner>(
    runtime: &RuntimeConfig,
    build: &BuildArgs,
    runner: R,
) -> Result<RunReport> {
    let store = runtime.config_store();
    let config = store.load().await?;
    let credentials = config.validate(&store.path().display().to_string())?;
    runtime.verbose_println(&format!("Using stored config {}", store.path().display()))?;

    let request = build.request(runtime.project_dir(), credentials, config.remote_url());
    execute(runtime, request, runner).await
}
