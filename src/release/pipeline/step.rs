//! Pipeline step identities.

use std::fmt;

/// The fixed step sequence. Variants are named after the state each step
/// establishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StepKind {
    DepsInstalled,
    ProjectScaffolded,
    EnvironmentConfigured,
    SigningVerified,
    AssetsSynced,
    ArtifactsBuilt,
}

impl StepKind {
    /// Every step in execution order.
    pub const ALL: [StepKind; 6] = [
        StepKind::DepsInstalled,
        StepKind::ProjectScaffolded,
        StepKind::EnvironmentConfigured,
        StepKind::SigningVerified,
        StepKind::AssetsSynced,
        StepKind::ArtifactsBuilt,
    ];

    /// Human-readable step name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            StepKind::DepsInstalled => "install dependencies",
            StepKind::ProjectScaffolded => "scaffold android project",
            StepKind::EnvironmentConfigured => "configure environment",
            StepKind::SigningVerified => "verify signing",
            StepKind::AssetsSynced => "sync assets",
            StepKind::ArtifactsBuilt => "build artifacts",
        }
    }

    /// What the operator should do when this step fails.
    pub fn hint(self) -> &'static str {
        match self {
            StepKind::DepsInstalled => {
                "Check network access and package.json, then re-run; delete node_modules to force a clean install."
            }
            StepKind::ProjectScaffolded => {
                "Remove the partial android/ directory and re-run to scaffold it again."
            }
            StepKind::EnvironmentConfigured => {
                "Install the Android SDK or set ANDROID_HOME, then re-run."
            }
            StepKind::SigningVerified => {
                "Run the configuration step with your keystore first (fund_release interactive)."
            }
            StepKind::AssetsSynced => {
                "Check capacitor.config.json and the web asset directory, then re-run."
            }
            StepKind::ArtifactsBuilt => {
                "Inspect the Gradle output above; verify the keystore passwords and key alias."
            }
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a step ran or was short-circuited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Executed,
    Skipped,
}

/// Outcome of one completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub kind: StepKind,
    pub status: StepStatus,
}
