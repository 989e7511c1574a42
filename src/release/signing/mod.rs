//! Release signing configuration for the Android project.
//!
//! Two generated files make up the signing hook:
//!
//! - `android/app/release-signing.gradle` - build graph fragment, applied from
//!   `app/build.gradle`, that assigns the release signing config
//! - `android/release-signing.properties` - absolute keystore path plus the
//!   three credential strings, git-ignored
//!
//! Both are regenerated from scratch on every [`configure`] call, so repeated
//! calls with the same credentials leave byte-identical files.

mod hook;
mod template;

pub use hook::{WIRING_LINE, ensure_hook, is_wiring_line, render_hook};

use crate::release::{
    config::SigningCredentials,
    error::{Error, Result},
    utils::{fs, properties},
};
use std::path::{Path, PathBuf};

/// Hook file name inside `android/app/`.
pub const HOOK_FILE: &str = "release-signing.gradle";
/// Credentials file name inside `android/`.
pub const PROPERTIES_FILE: &str = "release-signing.properties";
/// Command that generates the Android project.
pub const SCAFFOLD_COMMAND: &str = "npx cap add android";

/// Property names read by the hook.
pub const STORE_FILE_KEY: &str = "storeFile";
pub const STORE_PASSWORD_KEY: &str = "storePassword";
pub const KEY_ALIAS_KEY: &str = "keyAlias";
pub const KEY_PASSWORD_KEY: &str = "keyPassword";

/// Paths of the generated signing files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningHook {
    pub hook_path: PathBuf,
    pub properties_path: PathBuf,
}

/// Path of the credentials file for `android_dir`.
pub fn properties_path(android_dir: &Path) -> PathBuf {
    android_dir.join(PROPERTIES_FILE)
}

/// Render the credentials file.
pub fn render_properties(credentials: &SigningCredentials) -> String {
    let store_file = properties::gradle_path(&credentials.keystore_path);
    properties::render(
        "Generated by fund_release. Contains secrets; never commit.",
        &[
            (STORE_FILE_KEY, &store_file),
            (STORE_PASSWORD_KEY, credentials.store_password.expose()),
            (KEY_ALIAS_KEY, &credentials.key_alias),
            (KEY_PASSWORD_KEY, credentials.key_password.expose()),
        ],
    )
}

/// Write the hook and the credentials file for `credentials`.
///
/// # Errors
///
/// - [`Error::ProjectNotScaffolded`] if `android_dir` (or its app module) is missing
/// - [`Error::KeystoreNotFound`] if the keystore file does not exist
pub async fn configure(android_dir: &Path, credentials: &SigningCredentials) -> Result<SigningHook> {
    hook::require_build_gradle(android_dir)?;
    if !credentials.keystore_path.is_file() {
        return Err(Error::KeystoreNotFound {
            path: credentials.keystore_path.clone(),
        });
    }

    let hook_path = ensure_hook(android_dir).await?;

    let properties_path = properties_path(android_dir);
    fs::write_private(&properties_path, render_properties(credentials)).await?;
    fs::ensure_gitignored(android_dir, &format!("/{PROPERTIES_FILE}")).await?;

    log::info!(
        "Configured release signing with key alias '{}'",
        credentials.key_alias
    );
    Ok(SigningHook {
        hook_path,
        properties_path,
    })
}

/// True when both generated files already match `credentials`.
pub async fn is_configured(android_dir: &Path, credentials: &SigningCredentials) -> Result<bool> {
    if !android_dir.is_dir() || !credentials.keystore_path.is_file() {
        return Ok(false);
    }
    Ok(hook::hook_ready(android_dir).await?
        && fs::has_content(&properties_path(android_dir), &render_properties(credentials)).await?)
}

/// Check that the hook is wired and credentials have been written.
pub async fn verify(android_dir: &Path) -> Result<SigningHook> {
    if !hook::hook_ready(android_dir).await? {
        return Err(Error::GenericError(format!(
            "Signing hook is not wired into {}. Run the configure step with your keystore first.",
            android_dir.join("app").join("build.gradle").display()
        )));
    }

    let properties_path = properties_path(android_dir);
    if !properties_path.is_file() {
        return Err(Error::GenericError(format!(
            "{} is missing. Run the configure step with your keystore first.",
            properties_path.display()
        )));
    }

    Ok(SigningHook {
        hook_path: hook::app_paths(android_dir).1,
        properties_path,
    })
}
