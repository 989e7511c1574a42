//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation of
//! the project directory and the runtime configuration derived from it.

use crate::error::{CliError, Result};
use crate::release::{
    config::{ConfigOverrides, ConfigStore, Secret, SigningCredentials},
    desktop::DesktopSettings,
    pipeline::{ArtifactSelection, PipelineRequest},
    toolchain,
};
use clap::{Parser, Subcommand};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Signed release builder for the FundEstimator wrapper apps
#[derive(Parser, Debug)]
#[command(
    name = "fund_release",
    version,
    about = "Build signed Android (and optional desktop) releases of the FundEstimator wrapper",
    long_about = "Builds signed release artifacts of the Capacitor wrapper app.

Steps run in order and are skipped when already satisfied:
  install dependencies, scaffold android project, configure environment,
  verify signing, sync assets, build artifacts

Usage:
  fund_release interactive                      # prompt, save, build
  fund_release silent --artifact both           # build from the stored config
  fund_release ci --keystore release.jks --key-alias release --artifact aab
  fund_release show                             # print stored config, secrets hidden

Exit code 0 = every requested artifact exists."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Root of the wrapper project (contains package.json)
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Stored config file [default: <project>/.release/config.json]
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Show skipped steps and extra detail
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors and explicitly requested output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prompt for credentials (stored values as defaults), save them, then build
    Interactive {
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Build from the stored config without prompting
    Silent {
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Build from flags and environment only; the stored config is not touched
    Ci {
        #[command(flatten)]
        build: BuildArgs,

        #[command(flatten)]
        signing: SigningArgs,
    },
    /// Print the stored config with secrets hidden
    Show,
}

/// What to build.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Android artifacts to build
    #[arg(long, value_enum, default_value_t = ArtifactSelection::Apk)]
    pub artifact: ArtifactSelection,

    /// Android SDK directory, tried before ANDROID_HOME and ANDROID_SDK_ROOT
    #[arg(long, value_name = "DIR")]
    pub android_sdk: Option<PathBuf>,

    /// Also build the Windows desktop bundle and installer
    #[arg(long)]
    pub desktop: bool,

    /// Version stamped into the desktop installer [default: 1.0.0]
    #[arg(long, value_name = "VERSION", requires = "desktop")]
    pub desktop_version: Option<String>,

    /// Icon (.ico) shown by the desktop installer
    #[arg(long, value_name = "PATH", requires = "desktop")]
    pub installer_icon: Option<PathBuf>,

    /// Discard PyInstaller's cache before bundling
    #[arg(long, requires = "desktop")]
    pub clean: bool,
}

impl BuildArgs {
    /// Pipeline request for `project_dir` with validated credentials.
    pub fn request(
        &self,
        project_dir: &Path,
        credentials: SigningCredentials,
        remote_service_url: Option<&str>,
    ) -> PipelineRequest {
        let mut request = PipelineRequest::new(project_dir, self.artifact, credentials);
        request.remote_service_url = remote_service_url.map(str::to_string);
        if let Some(sdk) = &self.android_sdk {
            let sdk = project_dir.join(sdk);
            request.sdk_candidates = toolchain::with_explicit(&sdk, std::mem::take(&mut request.sdk_candidates));
        }
        request.desktop = self.desktop.then(|| self.desktop_settings(project_dir));
        request
    }

    /// Desktop settings with flag overrides. Relative icon paths are project-relative.
    pub fn desktop_settings(&self, project_dir: &Path) -> DesktopSettings {
        let mut settings = DesktopSettings::default();
        if let Some(version) = &self.desktop_version {
            settings.version = version.clone();
        }
        settings.installer_icon = self.installer_icon.as_ref().map(|icon| project_dir.join(icon));
        settings.clean = self.clean;
        settings
    }
}

/// Signing inputs for `ci`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SigningArgs {
    /// Keystore file
    #[arg(long, value_name = "PATH")]
    pub keystore: Option<PathBuf>,

    /// Keystore password
    #[arg(long, env = "RELEASE_STORE_PASSWORD", hide_env_values = true)]
    pub store_password: Option<String>,

    /// Key alias inside the keystore
    #[arg(long, value_name = "ALIAS")]
    pub key_alias: Option<String>,

    /// Key password
    #[arg(long, env = "RELEASE_KEY_PASSWORD", hide_env_values = true)]
    pub key_password: Option<String>,

    /// URL of the service the app wraps
    #[arg(long, value_name = "URL")]
    pub remote_url: Option<String>,
}

impl From<&SigningArgs> for ConfigOverrides {
    fn from(args: &SigningArgs) -> Self {
        ConfigOverrides {
            keystore_path: args.keystore.clone(),
            store_password: args.store_password.clone().map(Secret::from),
            key_alias: args.key_alias.clone(),
            key_password: args.key_password.clone().map(Secret::from),
            remote_service_url: args.remote_url.clone(),
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !self.project_dir.is_dir() {
            return Err(format!(
                "Project directory does not exist: {}",
                self.project_dir.display()
            ));
        }
        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
    project_dir: PathBuf,
    config_path: PathBuf,
}

impl RuntimeConfig {
    /// Runtime for `project_dir` using the default config location.
    pub fn new(project_dir: impl Into<PathBuf>, output: super::OutputManager) -> Self {
        let project_dir = project_dir.into();
        let config_path = ConfigStore::for_project(&project_dir).path().to_path_buf();
        Self {
            output,
            project_dir,
            config_path,
        }
    }

    /// Build from parsed arguments, making paths absolute.
    pub fn from_args(args: &Args) -> Result<Self> {
        args.validate()
            .map_err(|reason| CliError::InvalidArguments { reason })?;

        let project_dir = args.project_dir.absolutize()?.into_owned();
        let mut runtime = Self::new(project_dir, super::OutputManager::new(args.verbose, args.quiet));
        if let Some(config) = &args.config {
            runtime.config_path = config.absolutize()?.into_owned();
        }
        Ok(runtime)
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Store for the selected config file.
    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::new(&self.project_dir, &self.config_path)
    }

    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
