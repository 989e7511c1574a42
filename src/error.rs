//! Top-level error types with actionable messages and recovery suggestions.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, ReleaseError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Pipeline, config and signing errors
    #[error("{0}")]
    Release(#[from] crate::release::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Prompt input ended or failed
    #[error("Prompt failed: {reason}")]
    PromptFailed {
        /// Reason for the error
        reason: String,
    },
}

impl ReleaseError {
    /// Process exit code: the failing step's code, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReleaseError::Release(e) => e.exit_code(),
            _ => 1,
        }
    }

    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::release::Error as E;

        match self {
            ReleaseError::Release(E::ToolchainNotFound { .. }) => vec![
                "Install the Android SDK (Android Studio installs it by default)".to_string(),
                "Or export ANDROID_HOME=/path/to/Android/Sdk".to_string(),
            ],
            ReleaseError::Release(E::ProjectNotScaffolded { command, .. }) => {
                vec![format!("Run `{command}` in the project directory")]
            }
            ReleaseError::Release(E::KeystoreNotFound { .. }) => vec![
                "Check the keystore path, or create one with:".to_string(),
                "keytool -genkeypair -v -keystore release.jks -keyalg RSA -keysize 2048 -validity 10000 -alias release".to_string(),
            ],
            ReleaseError::Release(E::ConfigIncomplete { .. } | E::ConfigNotFound { .. }) => vec![
                "Run `fund_release interactive` to fill in the stored config".to_string(),
                "Or pass every field to `fund_release ci`".to_string(),
            ],
            ReleaseError::Release(E::ConfigCorrupt { path, .. }) => vec![format!(
                "Fix or delete {} and run `fund_release interactive`",
                path.display()
            )],
            ReleaseError::Release(E::StepFailed { hint, .. }) => vec![
                hint.clone(),
                "Completed steps are skipped on the next run".to_string(),
            ],
            ReleaseError::Release(E::ToolNotFound { hint, .. }) => vec![hint.clone()],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::Error;

    #[test]
    fn exit_code_comes_from_failing_step() {
        let err = ReleaseError::from(Error::StepFailed {
            step: "build artifacts".into(),
            exit_code: 2,
            hint: "x".into(),
        });
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            ReleaseError::from(CliError::InvalidArguments { reason: "x".into() }).exit_code(),
            1
        );
    }

    #[test]
    fn incomplete_config_suggests_interactive() {
        let err = ReleaseError::from(Error::ConfigIncomplete {
            source_name: "file".into(),
            missing: vec!["keyAlias"],
        });
        assert!(err.recovery_suggestions()[0].contains("interactive"));
    }
}
