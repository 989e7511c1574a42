//! Signed release builder for the FundEstimator wrapper apps.
//!
//! This library drives the release pipeline for:
//! - Android packages (.apk) and bundles (.aab) of the Capacitor shell
//! - the optional Windows desktop installer (PyInstaller bundle + NSIS)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod release;

// Re-export commonly used types
pub use error::{CliError, ReleaseError, Result};
