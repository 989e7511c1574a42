//! Build from command line flags only, for CI.

use super::execute;
use crate::cli::{BuildArgs, RuntimeConfig, SigningArgs};
use crate::error::Result;
use crate::release::{
    config::{ConfigOverrides, ReleaseConfig, merge},
    pipeline::{CommandRunner, RunReport},
};

/// Source name reported when a flag is missing.
const SOURCE_NAME: &str = "command line";

/// Validate the flags and build. The stored config file is neither read nor written.
pub async fn run<R: CommandRunner>(
    runtime: &RuntimeConfig,
    build: &BuildArgs,
    signing: &SigningArgs,
    runner: R,
) -> Result<RunReport> {
    let config = merge(ReleaseConfig::default(), ConfigOverrides::from(signing));
    let credentials = config.validate(SOURCE_NAME)?;

    let request = build.request(runtime.project_dir(), credentials, config.remote_url());
    execute(runtime, request, runner).await
}
