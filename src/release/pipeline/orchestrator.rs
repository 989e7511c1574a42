//! Main release orchestration and coordination.
//!
//! The [`Orchestrator`] walks [`StepKind::ALL`] in order. For each step it
//! checks the precondition, skips the step if it already holds, otherwise
//! runs the action. The first failure ends the run; nothing is retried.

use super::{
    ArtifactKind, ArtifactSelection, BuiltArtifact, RunReport,
    checksum::{artifact_size, calculate_sha256},
    endpoint,
    runner::{CommandRunner, CommandSpec},
    step::{StepKind, StepOutcome, StepStatus},
};
use crate::release::{
    config::SigningCredentials,
    desktop::{self, DesktopSettings},
    error::{Error, ErrorExt, Result},
    signing,
    toolchain::{self, Tool, ToolchainCandidate},
};
use std::path::{Path, PathBuf};

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    /// Root of the web wrapper project (contains `package.json`)
    pub project_dir: PathBuf,
    pub artifacts: ArtifactSelection,
    pub credentials: SigningCredentials,
    pub remote_service_url: Option<String>,
    /// Also build the desktop bundle and installer
    pub desktop: Option<DesktopSettings>,
    /// SDK locations in priority order
    pub sdk_candidates: Vec<ToolchainCandidate>,
}

impl PipelineRequest {
    /// Request with SDK candidates taken from the process environment.
    pub fn new(
        project_dir: impl Into<PathBuf>,
        artifacts: ArtifactSelection,
        credentials: SigningCredentials,
    ) -> Self {
        Self {
            project_dir: project_dir.into(),
            artifacts,
            credentials,
            remote_service_url: None,
            desktop: None,
            sdk_candidates: toolchain::system_candidates(),
        }
    }

    /// Directory of the generated Android project.
    pub fn android_dir(&self) -> PathBuf {
        self.project_dir.join("android")
    }
}

/// Main release orchestrator.
///
/// Generic over the process runner so tests can observe and script every
/// child process invocation.
///
/// # Examples
///
/// ```no_run
/// use fund_release::release::pipeline::{ArtifactSelection, Orchestrator, PipelineRequest, SystemRunner};
/// use fund_release::release::config::ReleaseConfig;
///
/// # async fn example(config: ReleaseConfig) -> fund_release::release::Result<()> {
/// let credentials = config.validate("example")?;
/// let request = PipelineRequest::new(".", ArtifactSelection::Apk, credentials);
/// let report = Orchestrator::new(request, SystemRunner).run().await?;
/// for artifact in &report.artifacts {
///     println!("{}: {}", artifact.kind, artifact.path.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Orchestrator<R> {
    request: PipelineRequest,
    runner: R,
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(request: PipelineRequest, runner: R) -> Self {
        Self { request, runner }
    }

    /// Run every step in order, stopping at the first failure.
    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();

        for kind in StepKind::ALL {
            if self.is_satisfied(kind).await? {
                log::info!("Skipping '{}': already done", kind);
                report.steps.push(StepOutcome {
                    kind,
                    status: StepStatus::Skipped,
                });
                continue;
            }

            log::info!("Running '{}'", kind);
            match self.execute(kind).await {
                Ok(artifacts) => report.artifacts.extend(artifacts),
                Err(e) => {
                    log::debug!("Step '{}' failed: {}", kind, e);
                    return Err(e);
                }
            }
            report.steps.push(StepOutcome {
                kind,
                status: StepStatus::Executed,
            });
        }

        Ok(report)
    }

    /// Precondition check for `kind`.
    async fn is_satisfied(&self, kind: StepKind) -> Result<bool> {
        let project = &self.request.project_dir;
        let android = self.request.android_dir();

        match kind {
            StepKind::DepsInstalled => Ok(project.join("node_modules").is_dir()),
            StepKind::ProjectScaffolded => Ok(android.is_dir()),
            StepKind::EnvironmentConfigured => {
                let env = toolchain::resolve_toolchain_root(&self.request.sdk_candidates)?;
                toolchain::local_properties_current(&android, &env.sdk_root).await
            }
            StepKind::SigningVerified => {
                signing::is_configured(&android, &self.request.credentials).await
            }
            StepKind::AssetsSynced | StepKind::ArtifactsBuilt => Ok(false),
        }
    }

    /// Action for `kind`. Returns artifacts produced by the step.
    async fn execute(&self, kind: StepKind) -> Result<Vec<BuiltArtifact>> {
        let project = &self.request.project_dir;
        let android = self.request.android_dir();

        match kind {
            StepKind::DepsInstalled => {
                self.invoke(kind, CommandSpec::tool(Tool::Npm, project).arg("install"))
                    .await?;
            }
            StepKind::ProjectScaffolded => {
                self.invoke(
                    kind,
                    CommandSpec::tool(Tool::Npx, project).args(["cap", "add", "android"]),
                )
                .await?;
            }
            StepKind::EnvironmentConfigured => {
                let env = toolchain::resolve_toolchain_root(&self.request.sdk_candidates)?;
                toolchain::write_local_properties(&android, &env.sdk_root).await?;
            }
            StepKind::SigningVerified => {
                signing::configure(&android, &self.request.credentials).await?;
                signing::verify(&android).await?;
            }
            StepKind::AssetsSynced => {
                if let Some(url) = self.request.remote_service_url.as_deref() {
                    endpoint::inject_remote_url(project, url).await?;
                }
                self.invoke(
                    kind,
                    CommandSpec::tool(Tool::Npx, project).args(["cap", "sync", "android"]),
                )
                .await?;
            }
            StepKind::ArtifactsBuilt => return self.build_artifacts(&android).await,
        }

        Ok(Vec::new())
    }

    async fn build_artifacts(&self, android: &Path) -> Result<Vec<BuiltArtifact>> {
        let mut artifacts = Vec::new();

        for &artifact in self.request.artifacts.kinds() {
            let (task, output) = match artifact {
                ArtifactKind::Apk => ("assembleRelease", apk_output(android)),
                ArtifactKind::Aab => ("bundleRelease", aab_output(android)),
                _ => continue,
            };
            clear_output(&output).await?;
            self.invoke(
                StepKind::ArtifactsBuilt,
                CommandSpec::gradle_wrapper(android).arg(task),
            )
            .await?;
            artifacts.push(collect_artifact(artifact, output).await?);
        }

        if let Some(settings) = &self.request.desktop {
            artifacts.extend(self.build_desktop(settings).await?);
        }

        Ok(artifacts)
    }

    async fn build_desktop(&self, settings: &DesktopSettings) -> Result<Vec<BuiltArtifact>> {
        let project = &self.request.project_dir;

        let entry = desktop::packager::entry_script(project);
        if !entry.is_file() {
            return Err(Error::GenericError(format!(
                "Desktop entry script not found: {}",
                entry.display()
            )));
        }

        let bundle_dir = desktop::packager::bundle_dir(project, settings);
        clear_output(&bundle_dir).await?;
        self.invoke(
            StepKind::ArtifactsBuilt,
            desktop::packager::pyinstaller_command(project, settings),
        )
        .await?;
        let bundle = collect_artifact(ArtifactKind::DesktopBundle, bundle_dir.clone()).await?;

        let nsi_path = desktop::installer::generate_nsi_script(project, settings, &bundle_dir).await?;
        let installer_path = desktop::installer::installer_path(project, settings);
        clear_output(&installer_path).await?;
        self.invoke(
            StepKind::ArtifactsBuilt,
            desktop::installer::makensis_command(&nsi_path, &installer_path, project),
        )
        .await?;
        let installer = collect_artifact(ArtifactKind::Installer, installer_path).await?;

        Ok(vec![bundle, installer])
    }

    /// Run a child process and map a non-zero exit to [`Error::StepFailed`].
    async fn invoke(&self, kind: StepKind, command: CommandSpec) -> Result<()> {
        let code = self.runner.run(&command).await?;
        if code != 0 {
            return Err(Error::StepFailed {
                step: format!("{} ({})", kind.name(), command),
                exit_code: code,
                hint: kind.hint().to_string(),
            });
        }
        Ok(())
    }
}

/// Release APK produced by `assembleRelease`.
pub fn apk_output(android: &Path) -> PathBuf {
    android.join("app/build/outputs/apk/release/app-release.apk")
}

/// Release bundle produced by `bundleRelease`.
pub fn aab_output(android: &Path) -> PathBuf {
    android.join("app/build/outputs/bundle/release/app-release.aab")
}

/// Remove a previous build's output so only a fresh one satisfies [`collect_artifact`].
async fn clear_output(path: &Path) -> Result<()> {
    let removed = if path.is_dir() {
        tokio::fs::remove_dir_all(path).await
    } else {
        tokio::fs::remove_file(path).await
    };
    match removed {
        Ok(()) => {
            log::debug!("Removed previous output {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing previous output", path),
    }
}

/// Confirm the expected output exists and record its size and checksum.
async fn collect_artifact(kind: ArtifactKind, path: PathBuf) -> Result<BuiltArtifact> {
    if !path.exists() {
        return Err(Error::ArtifactMissing {
            step: format!("{} ({kind})", StepKind::ArtifactsBuilt.name()),
            path,
        });
    }

    let size = artifact_size(&path).await?;
    let checksum = calculate_sha256(&path).await?;
    log::info!("✓ Built {}: {} ({} bytes)", kind, path.display(), size);

    Ok(BuiltArtifact {
        kind,
        path,
        size,
        checksum,
    })
}
