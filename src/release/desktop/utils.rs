//! NSIS utility functions.

use crate::release::error::{ErrorExt, Result};
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Format version string for NSIS VIProductVersion.
///
/// NSIS requires exactly 4 numeric parts (major.minor.patch.build):
/// - "1" -> "1.0.0.0"
/// - "1.2.3" -> "1.2.3.0"
/// - "1.2.3.4.5" -> "1.2.3.4"
///
/// Pre-release suffixes ("1.2.0-beta") are dropped.
pub fn format_version_for_nsis(version: &str) -> String {
    let core = version.split(['-', '+']).next().unwrap_or(version);
    let mut parts: Vec<&str> = core.split('.').filter(|p| !p.is_empty()).take(4).collect();
    while parts.len() < 4 {
        parts.push("0");
    }
    parts.join(".")
}

/// Write file with UTF-8 BOM (required by NSIS).
pub async fn write_utf8_bom(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating installer script directory", parent)?;
    }
    let mut file = tokio::fs::File::create(path)
        .await
        .fs_context("creating NSI script file", path)?;

    // Write UTF-8 BOM: EF BB BF
    file.write_all(&[0xEF, 0xBB, 0xBF])
        .await
        .fs_context("writing UTF-8 BOM", path)?;
    file.write_all(content.as_bytes())
        .await
        .fs_context("writing NSI content", path)?;
    file.flush().await.fs_context("flushing NSI file", path)?;

    Ok(())
}

/// Windows-style path for NSIS `File` instructions.
pub fn nsis_path(path: &Path) -> String {
    path.to_string_lossy().replace('/', "\\")
}
