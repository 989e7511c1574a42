//! Release orchestration core.
//!
//! - [`config`] - persisted credentials and service URL
//! - [`toolchain`] - Android SDK resolution and external tool lookup
//! - [`signing`] - Gradle signing hook and credentials file
//! - [`pipeline`] - ordered, idempotent release steps
//! - [`desktop`] - PyInstaller bundle and NSIS installer

pub mod config;
pub mod desktop;
pub mod error;
pub mod pipeline;
pub mod signing;
pub mod toolchain;
pub mod utils;

pub use error::{Error, Result};
pub use pipeline::{ArtifactSelection, BuiltArtifact, Orchestrator, PipelineRequest, RunReport};
