//! File system utilities for generated files.
//!
//! Every writer here replaces the target wholesale; nothing edits a file in
//! place. Line insertion reads the whole file, appends, and writes it back.

use crate::release::error::{ErrorExt, Result};
use std::{io, path::Path};
use tokio::{fs, io::AsyncWriteExt};

/// Read a file as UTF-8, returning `None` when it does not exist.
pub async fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).fs_context("reading", path),
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub async fn write_file(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .fs_context("creating directory", parent)?;
        }
    }
    fs::write(path, content).await.fs_context("writing", path)
}

/// Write `content` to a file only its owner can read.
///
/// On Unix the file is created with mode 0600, and an existing file is
/// narrowed to 0600 before any content reaches it.
pub async fn write_private(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .fs_context("creating directory", parent)?;
        }
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await.fs_context("creating", path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))
            .await
            .fs_context("restricting permissions on", path)?;
    }
    file.write_all(content.as_ref())
        .await
        .fs_context("writing", path)?;
    file.flush().await.fs_context("flushing", path)
}

/// Write `content` unless the file already holds exactly these bytes.
///
/// Returns `true` when the file was (re)written.
pub async fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if read_optional(path).await?.as_deref() == Some(content) {
        log::debug!("{} is up to date", path.display());
        return Ok(false);
    }
    write_file(path, content).await?;
    Ok(true)
}

/// True when `path` holds exactly `content`.
pub async fn has_content(path: &Path, content: &str) -> Result<bool> {
    Ok(read_optional(path).await?.as_deref() == Some(content))
}

/// Append `line` to `path` unless `present` already matches a line of it.
///
/// The file is created when absent. Returns `true` when a line was added.
pub async fn ensure_line<F>(path: &Path, line: &str, present: F) -> Result<bool>
where
    F: Fn(&str) -> bool,
{
    let existing = read_optional(path).await?.unwrap_or_default();
    if existing.lines().any(|l| present(l)) {
        return Ok(false);
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(line);
    updated.push('\n');
    write_file(path, updated).await?;
    Ok(true)
}

/// Add `entry` to the `.gitignore` in `dir` if it is not listed yet.
pub async fn ensure_gitignored(dir: &Path, entry: &str) -> Result<bool> {
    let gitignore = dir.join(".gitignore");
    let added = ensure_line(&gitignore, entry, |l| l.trim() == entry).await?;
    if added {
        log::info!("Added {} to {}", entry, gitignore.display());
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ensure_line_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("list.txt");
        tokio::fs::write(&file, "a\nb").await.unwrap();

        assert!(ensure_line(&file, "c", |l| l == "c").await.unwrap());
        assert!(!ensure_line(&file, "c", |l| l == "c").await.unwrap());

        let content = tokio::fs::read_to_string(&file).await.unwrap();
        assert_eq!(content, "a\nb\nc\n");
    }

    #[tokio::test]
    async fn write_if_changed_skips_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("nested/out.txt");

        assert!(write_if_changed(&file, "x").await.unwrap());
        assert!(!write_if_changed(&file, "x").await.unwrap());
        assert!(write_if_changed(&file, "y").await.unwrap());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn private_files_are_owner_only_even_when_replacing() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fresh = dir.path().join("nested/fresh.properties");
        write_private(&fresh, "a=1\n").await.unwrap();
        let mode = std::fs::metadata(&fresh).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let existing = dir.path().join("existing.properties");
        std::fs::write(&existing, "old").unwrap();
        std::fs::set_permissions(&existing, std::fs::Permissions::from_mode(0o644)).unwrap();
        write_private(&existing, "new").await.unwrap();
        let mode = std::fs::metadata(&existing).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "new");
    }

    #[tokio::test]
    async fn gitignore_created_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_gitignored(dir.path(), ".release/").await.unwrap());
        assert!(!ensure_gitignored(dir.path(), ".release/").await.unwrap());
        let content = tokio::fs::read_to_string(dir.path().join(".gitignore"))
            .await
            .unwrap();
        assert_eq!(content, ".release/\n");
    }
}
