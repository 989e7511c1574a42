//! Android SDK discovery.
//!
//! Candidates are checked in a fixed priority order and the first directory
//! that exists wins:
//!
//! 1. An explicitly requested directory (`--android-sdk`), when given
//! 2. `ANDROID_HOME`
//! 3. `ANDROID_SDK_ROOT`
//! 4. The Android Studio default install location for the host OS
//!
//! The resolved root is written into `android/local.properties` by the
//! pipeline so Gradle can find it.

mod detection;

pub use detection::{Tool, require_tool};

use crate::release::{
    error::{Error, Result},
    utils::{fs, properties},
};
use std::path::{Path, PathBuf};

/// Primary SDK environment variable.
pub const PRIMARY_ENV: &str = "ANDROID_HOME";
/// Secondary SDK environment variable.
pub const SECONDARY_ENV: &str = "ANDROID_SDK_ROOT";
/// Build-local properties file read by Gradle.
pub const LOCAL_PROPERTIES: &str = "local.properties";

/// Where a candidate path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    /// Directory named on the command line
    Explicit,
    /// Named environment variable
    EnvVar(&'static str),
    /// Per-OS default install location
    DefaultInstall,
}

/// One place the SDK might live. `path` is `None` for an unset variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainCandidate {
    pub source: CandidateSource,
    pub path: Option<PathBuf>,
}

impl ToolchainCandidate {
    fn describe(&self) -> String {
        match (&self.source, &self.path) {
            (CandidateSource::Explicit, Some(p)) => format!("--android-sdk {}", p.display()),
            (CandidateSource::Explicit, None) => "--android-sdk (unset)".to_string(),
            (CandidateSource::EnvVar(name), Some(p)) => format!("{name}={}", p.display()),
            (CandidateSource::EnvVar(name), None) => format!("{name} (unset)"),
            (CandidateSource::DefaultInstall, Some(p)) => {
                format!("default install location {}", p.display())
            }
            (CandidateSource::DefaultInstall, None) => {
                "default install location (home directory unknown)".to_string()
            }
        }
    }
}

/// Resolved SDK root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentInfo {
    pub sdk_root: PathBuf,
    pub source: CandidateSource,
}

/// Build the candidate list from an environment lookup.
///
/// Blank variables count as unset.
pub fn android_sdk_candidates<F>(lookup: F) -> Vec<ToolchainCandidate>
where
    F: Fn(&str) -> Option<String>,
{
    let from_env = |name: &'static str| ToolchainCandidate {
        source: CandidateSource::EnvVar(name),
        path: lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from),
    };

    vec![
        from_env(PRIMARY_ENV),
        from_env(SECONDARY_ENV),
        ToolchainCandidate {
            source: CandidateSource::DefaultInstall,
            path: default_sdk_location(),
        },
    ]
}

/// Candidates from the process environment.
pub fn system_candidates() -> Vec<ToolchainCandidate> {
    android_sdk_candidates(|name| std::env::var(name).ok())
}

/// `candidates` with `explicit` tried first.
pub fn with_explicit(explicit: &Path, mut candidates: Vec<ToolchainCandidate>) -> Vec<ToolchainCandidate> {
    candidates.insert(
        0,
        ToolchainCandidate {
            source: CandidateSource::Explicit,
            path: Some(explicit.to_path_buf()),
        },
    );
    candidates
}

fn default_sdk_location() -> Option<PathBuf> {
    if cfg!(windows) {
        dirs::data_local_dir().map(|d| d.join("Android").join("Sdk"))
    } else if cfg!(target_os = "macos") {
        dirs::home_dir().map(|d| d.join("Library").join("Android").join("sdk"))
    } else {
        dirs::home_dir().map(|d| d.join("Android").join("Sdk"))
    }
}

/// Return the first candidate whose path is an existing directory.
pub fn resolve_toolchain_root(candidates: &[ToolchainCandidate]) -> Result<EnvironmentInfo> {
    for candidate in candidates {
        let Some(path) = &candidate.path else {
            continue;
        };
        if path.is_dir() {
            log::info!("Using Android SDK: {}", candidate.describe());
            return Ok(EnvironmentInfo {
                sdk_root: path.clone(),
                source: candidate.source.clone(),
            });
        }
        log::debug!("SDK candidate does not exist: {}", candidate.describe());
    }

    Err(Error::ToolchainNotFound {
        candidates: candidates.iter().map(ToolchainCandidate::describe).collect(),
    })
}

/// Contents of `local.properties` pointing at `sdk_root`.
pub fn render_local_properties(sdk_root: &Path) -> String {
    properties::render(
        "Generated by fund_release. Do not commit.",
        &[("sdk.dir", &sdk_root.to_string_lossy())],
    )
}

/// True when `android_dir/local.properties` already names `sdk_root`.
pub async fn local_properties_current(android_dir: &Path, sdk_root: &Path) -> Result<bool> {
    let path = android_dir.join(LOCAL_PROPERTIES);
    fs::has_content(&path, &render_local_properties(sdk_root)).await
}

/// Write `android_dir/local.properties` for `sdk_root`.
pub async fn write_local_properties(android_dir: &Path, sdk_root: &Path) -> Result<PathBuf> {
    let path = android_dir.join(LOCAL_PROPERTIES);
    fs::write_file(&path, render_local_properties(sdk_root)).await?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_candidate(name: &'static str, path: Option<&Path>) -> ToolchainCandidate {
        ToolchainCandidate {
            source: CandidateSource::EnvVar(name),
            path: path.map(Path::to_path_buf),
        }
    }

    #[test]
    fn empty_candidate_list_fails() {
        match resolve_toolchain_root(&[]) {
            Err(Error::ToolchainNotFound { candidates }) => assert!(candidates.is_empty()),
            other => panic!("expected ToolchainNotFound, got {other:?}"),
        }
    }

    #[test]
    fn no_existing_candidate_lists_all_tried() {
        let candidates = vec![
            env_candidate(PRIMARY_ENV, None),
            env_candidate(SECONDARY_ENV, Some(Path::new("/nope/sdk"))),
            ToolchainCandidate {
                source: CandidateSource::DefaultInstall,
                path: Some(PathBuf::from("/also/nope")),
            },
        ];

        match resolve_toolchain_root(&candidates) {
            Err(Error::ToolchainNotFound { candidates }) => {
                assert_eq!(candidates.len(), 3);
                assert_eq!(candidates[0], "ANDROID_HOME (unset)");
                assert!(candidates[1].contains("/nope/sdk"));
                assert!(candidates[2].contains("/also/nope"));
            }
            other => panic!("expected ToolchainNotFound, got {other:?}"),
        }
    }

    #[test]
    fn first_existing_candidate_wins() {
        let primary = tempfile::tempdir().unwrap();
        let secondary = tempfile::tempdir().unwrap();
        let candidates = vec![
            env_candidate(PRIMARY_ENV, Some(Path::new("/nope/sdk"))),
            env_candidate(SECONDARY_ENV, Some(secondary.path())),
            env_candidate(PRIMARY_ENV, Some(primary.path())),
        ];

        let info = resolve_toolchain_root(&candidates).unwrap();
        assert_eq!(info.sdk_root, secondary.path());
        assert_eq!(info.source, CandidateSource::EnvVar(SECONDARY_ENV));
    }

    #[test]
    fn candidates_follow_priority_and_ignore_blank_values() {
        let candidates = android_sdk_candidates(|name| match name {
            PRIMARY_ENV => Some("  ".to_string()),
            SECONDARY_ENV => Some("/opt/android".to_string()),
            _ => None,
        });

        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0], env_candidate(PRIMARY_ENV, None));
        assert_eq!(
            candidates[1],
            env_candidate(SECONDARY_ENV, Some(Path::new("/opt/android")))
        );
        assert_eq!(candidates[2].source, CandidateSource::DefaultInstall);
    }

    #[tokio::test]
    async fn local_properties_written_once() {
        let android = tempfile::tempdir().unwrap();
        let sdk = Path::new("/opt/android");

        assert!(!local_properties_current(android.path(), sdk).await.unwrap());
        write_local_properties(android.path(), sdk).await.unwrap();
        assert!(local_properties_current(android.path(), sdk).await.unwrap());

        let content = tokio::fs::read_to_string(android.path().join(LOCAL_PROPERTIES))
            .await
            .unwrap();
        assert!(content.contains("sdk.dir=/opt/android\n"));
    }
}
