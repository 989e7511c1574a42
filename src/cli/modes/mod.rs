//! The ways a release can be started.
//!
//! Every mode ends up with [`SigningCredentials`](crate::release::config::SigningCredentials)
//! and hands a [`PipelineRequest`] to [`execute`]. They differ only in where
//! the configuration comes from:
//!
//! - [`interactive`] - prompts, stored values as defaults, saves the result
//! - [`silent`] - the stored config file, no prompts
//! - [`parameterized`] - flags and environment, never touches the stored file
//! - [`show`] - prints the stored config, builds nothing

pub mod interactive;
pub mod parameterized;
pub mod show;
pub mod silent;

use super::RuntimeConfig;
use crate::error::Result;
use crate::release::pipeline::{
    CommandRunner, Orchestrator, PipelineRequest, RunReport, StepStatus,
};

/// Run the pipeline and print what happened.
pub async fn execute<R: CommandRunner>(
    runtime: &RuntimeConfig,
    request: PipelineRequest,
    runner: R,
) -> Result<RunReport> {
    runtime.section("Building release")?;
    runtime.verbose_println(&format!("Project: {}", request.project_dir.display()))?;
    runtime.verbose_println(&format!("Artifacts: {:?}", request.artifacts))?;

    let report = Orchestrator::new(request, runner).run().await?;

    for outcome in &report.steps {
        match outcome.status {
            StepStatus::Executed => runtime.success(outcome.kind.name())?,
            StepStatus::Skipped => {
                runtime.verbose_println(&format!("{} (already done)", outcome.kind))?
            }
        }
    }

    runtime.section("Artifacts")?;
    for artifact in &report.artifacts {
        runtime.success(&format!("{}: {}", artifact.kind, artifact.path.display()))?;
        runtime.indent(&format!("size:   {} bytes", artifact.size))?;
        runtime.indent(&format!("sha256: {}", artifact.checksum))?;
    }

    Ok(report)
}
