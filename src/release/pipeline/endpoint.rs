//! Remote service URL injection into the Capacitor config.
//!
//! The mobile shell is a web view pointed at the hosted service, so the URL
//! lives in `capacitor.config.json` under `server.url`. The file is read,
//! updated as a JSON object, and written back whole.

use crate::release::{
    config::validate_remote_url,
    error::{Context, Error, Result},
    utils::fs,
};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Capacitor config file name in the project root.
pub const CAPACITOR_CONFIG: &str = "capacitor.config.json";

/// Set `server.url` in `project_dir/capacitor.config.json`.
///
/// Plain `http` URLs also set `server.cleartext` so Android permits them.
/// Returns `true` when the file changed.
pub async fn inject_remote_url(project_dir: &Path, url: &str) -> Result<bool> {
    let parsed = validate_remote_url(url)?;
    let path = config_path(project_dir);

    let raw = fs::read_optional(&path).await?.ok_or_else(|| {
        Error::GenericError(format!(
            "{} not found; the remote service URL can only be injected into a JSON Capacitor config",
            path.display()
        ))
    })?;

    let mut root: Value = serde_json::from_str(&raw)
        .context(format!("failed to parse {}", path.display()))?;
    let object = root
        .as_object_mut()
        .context(format!("{} must contain a JSON object", path.display()))?;

    let server = object
        .entry("server")
        .or_insert_with(|| Value::Object(Map::new()));
    let server = server
        .as_object_mut()
        .context(format!("'server' in {} must be an object", path.display()))?;

    server.insert("url".into(), Value::String(url.to_string()));
    if parsed.scheme() == "http" {
        server.insert("cleartext".into(), Value::Bool(true));
    } else {
        server.remove("cleartext");
    }

    let mut rendered = serde_json::to_string_pretty(&root)?;
    rendered.push('\n');
    let changed = fs::write_if_changed(&path, &rendered).await?;
    if changed {
        log::info!("Pointed {} at {}", path.display(), url);
    }
    Ok(changed)
}

/// Path of the Capacitor config in `project_dir`.
pub fn config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CAPACITOR_CONFIG)
}
