//! Release pipeline orchestration.
//!
//! This module provides the [`Orchestrator`] that drives the fixed step
//! sequence from a fresh checkout to signed artifacts:
//!
//! 1. install JavaScript dependencies
//! 2. scaffold the Android project
//! 3. point Gradle at the Android SDK
//! 4. write and verify the signing hook
//! 5. inject the remote service URL and sync web assets
//! 6. run the Gradle release tasks (plus the optional desktop installer)
//!
//! Steps whose precondition already holds are skipped, so the pipeline can be
//! re-run after fixing whatever made the previous run stop.
//!
//! # Module Organization
//!
//! - [`runner`] - child process seam ([`CommandRunner`], [`SystemRunner`])
//! - [`step`] - step identities, names and remediation hints
//! - [`orchestrator`] - the step loop and per-step actions
//! - [`endpoint`] - `capacitor.config.json` server URL injection
//! - [`checksum`] - SHA-256 of produced artifacts

mod checksum;
pub mod endpoint;
mod orchestrator;
pub mod runner;
pub mod step;

pub use checksum::calculate_sha256;
pub use orchestrator::{Orchestrator, PipelineRequest};
pub use runner::{CommandRunner, CommandSpec, SystemRunner};
pub use step::{StepKind, StepOutcome, StepStatus};

use clap::ValueEnum;
use std::{fmt, path::PathBuf};

/// Which Android release artifacts to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ArtifactSelection {
    /// Installable package (`assembleRelease`)
    #[default]
    Apk,
    /// Play Store bundle (`bundleRelease`)
    Aab,
    /// Both package and bundle
    Both,
}

impl ArtifactSelection {
    /// Mobile artifact kinds in build order.
    pub fn kinds(self) -> &'static [ArtifactKind] {
        match self {
            ArtifactSelection::Apk => &[ArtifactKind::Apk],
            ArtifactSelection::Aab => &[ArtifactKind::Aab],
            ArtifactSelection::Both => &[ArtifactKind::Apk, ArtifactKind::Aab],
        }
    }
}

/// Kind of a produced artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Apk,
    Aab,
    /// PyInstaller one-dir bundle
    DesktopBundle,
    /// NSIS setup executable
    Installer,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArtifactKind::Apk => "apk",
            ArtifactKind::Aab => "aab",
            ArtifactKind::DesktopBundle => "desktop-bundle",
            ArtifactKind::Installer => "installer",
        })
    }
}

/// A file or directory the pipeline produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    /// Total size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256
    pub checksum: String,
}

/// Result of a successful run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub steps: Vec<StepOutcome>,
    pub artifacts: Vec<BuiltArtifact>,
}

impl RunReport {
    /// Steps that actually ran.
    pub fn executed(&self) -> impl Iterator<Item = StepKind> + '_ {
        self.steps
            .iter()
            .filter(|o| o.status == StepStatus::Executed)
            .map(|o| o.kind)
    }
}
