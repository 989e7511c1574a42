//! Shared helpers for generated files.

pub mod fs;
pub mod properties;
