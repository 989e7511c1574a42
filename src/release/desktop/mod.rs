//! Desktop bundle and Windows installer creation.
//!
//! The desktop build wraps the same service in a PyInstaller one-dir bundle
//! and packs it into an NSIS setup executable.
//!
//! # Module Organization
//!
//! - `packager` - PyInstaller command line
//! - `installer` - NSI script generation and makensis command
//! - `template` - NSI script template
//! - `utils` - version formatting and BOM writing

pub mod installer;
pub mod packager;
mod template;
mod utils;

use std::path::PathBuf;

/// Desktop bundle and installer settings.
#[derive(Debug, Clone)]
pub struct DesktopSettings {
    /// Bundle and executable name
    pub product_name: String,
    /// Name shown in the installer and shortcuts
    pub display_name: String,
    /// Version stamped into the installer
    pub version: String,
    pub publisher: String,
    /// Optional `.ico` for the installer
    pub installer_icon: Option<PathBuf>,
    /// Pass `--clean` to PyInstaller
    pub clean: bool,
}

impl Default for DesktopSettings {
    fn default() -> Self {
        Self {
            product_name: "FundEstimator".to_string(),
            display_name: "Fund Estimator".to_string(),
            version: "1.0.0".to_string(),
            publisher: "FundEstimator".to_string(),
            installer_icon: None,
            clean: false,
        }
    }
}
