//! Persisted release config file.

use super::ReleaseConfig;
use crate::release::{
    error::{Error, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Default config location relative to the project root.
pub const DEFAULT_CONFIG_FILE: &str = ".release/config.json";

/// Reads and writes the single JSON config file.
///
/// Saves replace the whole file. The file is listed in the project's
/// `.gitignore` on first save so credentials never reach version control.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    project_root: PathBuf,
}

impl ConfigStore {
    /// Store at `path`, ignoring it from the repository at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>, path: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            path: path.into(),
        }
    }

    /// Store at the default location under `project_root`.
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(project_root, project_root.join(DEFAULT_CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored config, failing with [`Error::ConfigNotFound`] if absent.
    pub async fn load(&self) -> Result<ReleaseConfig> {
        self.load_optional().await?.ok_or_else(|| Error::ConfigNotFound {
            path: self.path.clone(),
        })
    }

    /// Load the stored config if the file exists.
    pub async fn load_optional(&self) -> Result<Option<ReleaseConfig>> {
        let Some(raw) = fs::read_optional(&self.path).await? else {
            log::debug!("No stored config at {}", self.path.display());
            return Ok(None);
        };

        let config = serde_json::from_str(&raw).map_err(|source| Error::ConfigCorrupt {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("Loaded release config from {}", self.path.display());
        Ok(Some(config))
    }

    /// Replace the stored config with `config`.
    pub async fn save(&self, config: &ReleaseConfig) -> Result<()> {
        let mut json = serde_json::to_string_pretty(config)?;
        json.push('\n');
        fs::write_private(&self.path, json).await?;

        if let Some(entry) = self.gitignore_entry() {
            fs::ensure_gitignored(&self.project_root, &entry).await?;
        }

        log::info!("Saved release config to {}", self.path.display());
        Ok(())
    }

    /// `.gitignore` line for the config file, when it lives inside the project.
    fn gitignore_entry(&self) -> Option<String> {
        let relative = self.path.strip_prefix(&self.project_root).ok()?;
        Some(format!("/{}", relative.to_string_lossy().replace('\\', "/")))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::config::Secret;

    fn sample() -> ReleaseConfig {
        ReleaseConfig {
            keystore_path: PathBuf::from("/keys/a.jks"),
            store_password: Secret::new("p"),
            key_alias: "a".into(),
            key_password: Secret::new("k"),
            remote_service_url: None,
        }
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::for_project(dir.path());

        store.save(&sample()).await.unwrap();
        assert_eq!(store.load().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn save_uses_camel_case_keys_and_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::for_project(dir.path());

        let mut first = sample();
        first.remote_service_url = Some("https://a.example.com".into());
        store.save(&first).await.unwrap();
        store.save(&sample()).await.unwrap();

        let raw = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert!(raw.contains("\"keystorePath\""));
        assert!(raw.contains("\"keyAlias\""));
        assert!(!raw.contains("remoteServiceUrl"));
    }

    #[tokio::test]
    async fn save_ignores_config_from_git() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::for_project(dir.path());
        store.save(&sample()).await.unwrap();
        store.save(&sample()).await.unwrap();

        let gitignore = tokio::fs::read_to_string(dir.path().join(".gitignore"))
            .await
            .unwrap();
        assert_eq!(gitignore.matches("/.release/config.json").count(), 1);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn saved_config_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::for_project(dir.path());
        store.save(&sample()).await.unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::for_project(dir.path());
        assert!(store.load_optional().await.unwrap().is_none());
        assert!(matches!(store.load().await, Err(Error::ConfigNotFound { .. })));
    }

    #[tokio::test]
    async fn malformed_file_is_corrupt_and_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::for_project(dir.path());
        fs::write_file(store.path(), "{ not json").await.unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, Error::ConfigCorrupt { .. }));
        assert!(err.to_string().contains("config.json"));
    }
}
