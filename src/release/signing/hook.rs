//! Build graph wiring for the release signing hook.

use super::{
    HOOK_FILE, KEY_ALIAS_KEY, KEY_PASSWORD_KEY, PROPERTIES_FILE, STORE_FILE_KEY,
    STORE_PASSWORD_KEY, template::HOOK_TEMPLATE,
};
use crate::release::{
    error::{Context, Error, Result},
    utils::fs,
};
use handlebars::Handlebars;
use regex::Regex;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::LazyLock,
};

/// Line appended to `app/build.gradle`.
pub const WIRING_LINE: &str = "apply from: 'release-signing.gradle'";

/// Matches the wiring line regardless of quote style or spacing.
static WIRING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*apply\s+from\s*:\s*['"]release-signing\.gradle['"]\s*;?\s*$"#)
        .expect("wiring pattern is valid")
});

/// True if `line` applies the signing hook.
pub fn is_wiring_line(line: &str) -> bool {
    WIRING_PATTERN.is_match(line)
}

/// Render the hook fragment. Identical on every call.
pub fn render_hook() -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);
    handlebars
        .register_template_string("release-signing.gradle", HOOK_TEMPLATE)
        .context("failed to register signing hook template")?;

    let mut data = BTreeMap::new();
    data.insert("properties_file", PROPERTIES_FILE);
    data.insert("store_file_key", STORE_FILE_KEY);
    data.insert("store_password_key", STORE_PASSWORD_KEY);
    data.insert("key_alias_key", KEY_ALIAS_KEY);
    data.insert("key_password_key", KEY_PASSWORD_KEY);

    Ok(handlebars.render("release-signing.gradle", &data)?)
}

/// Paths of the app module's build script and hook file.
pub(super) fn app_paths(android_dir: &Path) -> (PathBuf, PathBuf) {
    let app_dir = android_dir.join("app");
    (app_dir.join("build.gradle"), app_dir.join(HOOK_FILE))
}

/// The app build script, failing if the project was never generated.
pub(super) fn require_build_gradle(android_dir: &Path) -> Result<PathBuf> {
    let (build_gradle, _) = app_paths(android_dir);
    if !android_dir.is_dir() || !build_gradle.is_file() {
        return Err(Error::ProjectNotScaffolded {
            project_dir: android_dir.to_path_buf(),
            command: super::SCAFFOLD_COMMAND.to_string(),
        });
    }
    Ok(build_gradle)
}

/// Write the hook fragment and wire it into `app/build.gradle`.
///
/// Credential-free and idempotent: the wiring line is only appended when no
/// equivalent line exists.
pub async fn ensure_hook(android_dir: &Path) -> Result<PathBuf> {
    let build_gradle = require_build_gradle(android_dir)?;
    let (_, hook_path) = app_paths(android_dir);

    if fs::write_if_changed(&hook_path, &render_hook()?).await? {
        log::info!("Wrote signing hook {}", hook_path.display());
    }

    if fs::ensure_line(&build_gradle, WIRING_LINE, is_wiring_line).await? {
        log::info!("Wired signing hook into {}", build_gradle.display());
    } else {
        log::debug!("Signing hook already wired into {}", build_gradle.display());
    }

    Ok(hook_path)
}

/// True when the hook file is current and wired.
pub async fn hook_ready(android_dir: &Path) -> Result<bool> {
    let (build_gradle, hook_path) = app_paths(android_dir);
    if !fs::has_content(&hook_path, &render_hook()?).await? {
        return Ok(false);
    }
    let gradle = fs::read_optional(&build_gradle).await?.unwrap_or_default();
    Ok(gradle.lines().any(is_wiring_line))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scaffold(dir: &Path) {
        fs::write_file(&dir.join("app/build.gradle"), "apply plugin: 'com.android.application'\n")
            .await
            .unwrap();
    }

    #[test]
    fn wiring_detection_tolerates_style() {
        assert!(is_wiring_line(WIRING_LINE));
        assert!(is_wiring_line("  apply from:\"release-signing.gradle\";"));
        assert!(!is_wiring_line("// apply from: 'release-signing.gradle'"));
        assert!(!is_wiring_line("apply from: 'other.gradle'"));
    }

    #[test]
    fn hook_render_is_deterministic() {
        let first = render_hook().unwrap();
        assert_eq!(first, render_hook().unwrap());
        assert!(first.contains("rootProject.file('release-signing.properties')"));
        assert!(first.contains("releaseSigningProps['storeFile']"));
    }

    #[tokio::test]
    async fn ensure_hook_wires_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(dir.path()).await;

        for _ in 0..5 {
            ensure_hook(dir.path()).await.unwrap();
        }

        let gradle = tokio::fs::read_to_string(dir.path().join("app/build.gradle"))
            .await
            .unwrap();
        assert_eq!(gradle.lines().filter(|l| is_wiring_line(l)).count(), 1);
        assert!(hook_ready(dir.path()).await.unwrap());
    }

    #[tokio::test]
    async fn ensure_hook_respects_existing_wiring() {
        let dir = tempfile::tempdir().unwrap();
        fs::write_file(
            &dir.path().join("app/build.gradle"),
            "apply from: \"release-signing.gradle\"\n",
        )
        .await
        .unwrap();

        ensure_hook(dir.path()).await.unwrap();
        let gradle = tokio::fs::read_to_string(dir.path().join("app/build.gradle"))
            .await
            .unwrap();
        assert_eq!(gradle, "apply from: \"release-signing.gradle\"\n");
    }

    #[tokio::test]
    async fn missing_project_is_not_scaffolded() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_hook(&dir.path().join("android")).await.unwrap_err();
        match err {
            Error::ProjectNotScaffolded { command, .. } => {
                assert_eq!(command, "npx cap add android");
            }
            other => panic!("expected ProjectNotScaffolded, got {other:?}"),
        }
    }
}
