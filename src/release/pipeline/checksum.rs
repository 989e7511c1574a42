//! Artifact checksum calculation.
//!
//! SHA-256 for produced artifacts, supporting both single files (`.apk`,
//! `.aab`, setup executables) and directory trees (the desktop bundle).

use crate::{
    bail,
    release::error::{ErrorExt, Result},
};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Calculates SHA256 checksum of a file or directory.
///
/// For files: reads in 8KB chunks and computes the SHA-256 hash.
/// For directories: hashes every file's relative path and content in sorted
/// path order so the result is deterministic.
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;

    if metadata.is_file() {
        calculate_file_sha256(path).await
    } else if metadata.is_dir() {
        calculate_directory_sha256(path).await
    } else {
        bail!("Path is neither file nor directory: {}", path.display())
    }
}

/// Total size in bytes of a file or every file under a directory.
pub async fn artifact_size(path: &Path) -> Result<u64> {
    let metadata = tokio::fs::metadata(path)
        .await
        .fs_context("reading artifact metadata", path)?;
    if metadata.is_file() {
        return Ok(metadata.len());
    }

    Ok(walkdir::WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum())
}

async fn hash_into(hasher: &mut Sha256, file_path: &Path, buffer: &mut [u8]) -> Result<()> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;

    loop {
        let n = file
            .read(buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(())
}

async fn calculate_file_sha256(file_path: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    hash_into(&mut hasher, file_path, &mut buffer).await?;
    Ok(format!("{:x}", hasher.finalize()))
}

async fn calculate_directory_sha256(dir_path: &Path) -> Result<String> {
    let mut entries: Vec<_> = walkdir::WalkDir::new(dir_path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .collect();

    // Sort by path for deterministic ordering
    entries.sort_by_key(|e| e.path().to_path_buf());

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    for entry in entries {
        if let Ok(rel_path) = entry.path().strip_prefix(dir_path) {
            hasher.update(rel_path.to_string_lossy().replace('\\', "/").as_bytes());
        }
        hash_into(&mut hasher, entry.path(), &mut buffer).await?;
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_hash_matches_known_digest() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("app-release.apk");
        tokio::fs::write(&file, b"abc").await.unwrap();

        assert_eq!(
            calculate_sha256(&file).await.unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(artifact_size(&file).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn directory_hash_depends_on_layout() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        tokio::fs::write(a.path().join("x"), b"1").await.unwrap();
        tokio::fs::write(b.path().join("y"), b"1").await.unwrap();

        let hash_a = calculate_sha256(a.path()).await.unwrap();
        assert_eq!(hash_a, calculate_sha256(a.path()).await.unwrap());
        assert_ne!(hash_a, calculate_sha256(b.path()).await.unwrap());
        assert_eq!(artifact_size(a.path()).await.unwrap(), 1);
    }
}
