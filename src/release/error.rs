//! Error taxonomy for release operations.
//!
//! Every variant is terminal for the current run. Messages carry enough
//! context (missing path, missing field, failing step) for the operator to
//! fix the problem and re-invoke the pipeline.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Result type alias for release operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the config store, resolver, signing configurator and pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// No candidate SDK directory exists on disk.
    #[error(
        "Android SDK not found. Tried:\n{}\nSet ANDROID_HOME to your SDK directory and re-run.",
        format_candidates(.candidates)
    )]
    ToolchainNotFound {
        /// Every candidate tried, in priority order
        candidates: Vec<String>,
    },

    /// The native project directory has not been generated yet.
    #[error(
        "Project not scaffolded: {} does not exist. Run `{command}` first.",
        .project_dir.display()
    )]
    ProjectNotScaffolded {
        /// Expected project directory
        project_dir: PathBuf,
        /// Command that creates it
        command: String,
    },

    /// The configured keystore file does not exist.
    #[error("Keystore not found: {}", .path.display())]
    KeystoreNotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// Stored or supplied configuration is missing required fields.
    #[error("Release config incomplete ({source_name}): missing {}", .missing.join(", "))]
    ConfigIncomplete {
        /// Where the config came from (file path or "command line")
        source_name: String,
        /// Names of the blank fields
        missing: Vec<&'static str>,
    },

    /// Stored configuration could not be parsed.
    #[error("Release config is corrupt: {}: {source}", .path.display())]
    ConfigCorrupt {
        /// Config file path
        path: PathBuf,
        /// Parse failure
        source: serde_json::Error,
    },

    /// No stored configuration exists.
    #[error(
        "No stored release config at {}. Run `fund_release interactive` to create one.",
        .path.display()
    )]
    ConfigNotFound {
        /// Config file path
        path: PathBuf,
    },

    /// The remote service URL is not an http(s) URL.
    #[error("Invalid remote service URL '{url}': {reason}")]
    InvalidRemoteUrl {
        /// Offending value
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A pipeline step's child process exited unsuccessfully.
    #[error("Step '{step}' failed with exit code {exit_code}. {hint}")]
    StepFailed {
        /// Name of the failing step
        step: String,
        /// Exit code of the child process (-1 when killed by a signal)
        exit_code: i32,
        /// Remediation hint
        hint: String,
    },

    /// The builder exited successfully but its output file is absent.
    #[error("Step '{step}' succeeded but expected artifact is missing: {}", .path.display())]
    ArtifactMissing {
        /// Step that should have produced the file
        step: String,
        /// Expected output path
        path: PathBuf,
    },

    /// A required external tool is not on PATH.
    #[error("{tool} not found in PATH. {hint}")]
    ToolNotFound {
        /// Tool name
        tool: String,
        /// Install hint
        hint: String,
    },

    /// Filesystem operation failed.
    #[error("{context} {}: {source}", .path.display())]
    Fs {
        /// What was being done
        context: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A child process could not be spawned.
    #[error("failed to run `{command}`: {error}")]
    CommandFailed {
        /// Command line
        command: String,
        /// Spawn error
        error: std::io::Error,
    },

    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// JSON error outside config loading.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn format_candidates(candidates: &[String]) -> String {
    candidates
        .iter()
        .map(|c| format!("  - {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Step failures propagate the child's code; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::StepFailed { exit_code, .. } if *exit_code > 0 => *exit_code,
            _ => 1,
        }
    }
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Convert an IO error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

/// Attach a message to `Option`s and foreign errors.
pub trait Context<T> {
    /// Turn `None`/`Err` into [`Error::GenericError`] prefixed with `msg`.
    fn context<C: Display>(self, msg: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, msg: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{msg}: {e}")))
    }
}

/// Return early with a [`Error::GenericError`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::release::Error::GenericError(format!($($arg)*)))
    };
}
