//! Release configuration: credentials and the wrapped service URL.
//!
//! - [`ReleaseConfig`] is the persisted shape. Every field may be blank on
//!   disk so that a partially filled file reads back as *incomplete*.
//! - [`ConfigOverrides`] carries values from flags or prompts for [`merge`].
//! - [`SigningCredentials`] is the validated form handed to the signing step.

mod secret;
mod store;

pub use secret::Secret;
pub use store::{ConfigStore, DEFAULT_CONFIG_FILE};

use crate::release::error::{Error, Result};
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Field names as they appear in the stored file.
pub const KEYSTORE_PATH: &str = "keystorePath";
pub const STORE_PASSWORD: &str = "storePassword";
pub const KEY_ALIAS: &str = "keyAlias";
pub const KEY_PASSWORD: &str = "keyPassword";

/// Persisted release configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReleaseConfig {
    pub keystore_path: PathBuf,
    pub store_password: Secret,
    pub key_alias: String,
    pub key_password: Secret,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_service_url: Option<String>,
}

/// Optional replacement values for a [`ReleaseConfig`].
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub keystore_path: Option<PathBuf>,
    pub store_password: Option<Secret>,
    pub key_alias: Option<String>,
    pub key_password: Option<Secret>,
    pub remote_service_url: Option<String>,
}

/// Credentials that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningCredentials {
    /// Absolute path to an existing keystore file
    pub keystore_path: PathBuf,
    pub store_password: Secret,
    pub key_alias: String,
    pub key_password: Secret,
}

/// Apply `overrides` on top of `existing`. Absent fields keep the stored value.
pub fn merge(existing: ReleaseConfig, overrides: ConfigOverrides) -> ReleaseConfig {
    ReleaseConfig {
        keystore_path: overrides.keystore_path.unwrap_or(existing.keystore_path),
        store_password: overrides.store_password.unwrap_or(existing.store_password),
        key_alias: overrides.key_alias.unwrap_or(existing.key_alias),
        key_password: overrides.key_password.unwrap_or(existing.key_password),
        remote_service_url: overrides.remote_service_url.or(existing.remote_service_url),
    }
}

impl ReleaseConfig {
    /// Names of required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.keystore_path.as_os_str().is_empty() {
            missing.push(KEYSTORE_PATH);
        }
        if self.store_password.is_blank() {
            missing.push(STORE_PASSWORD);
        }
        if self.key_alias.trim().is_empty() {
            missing.push(KEY_ALIAS);
        }
        if self.key_password.is_blank() {
            missing.push(KEY_PASSWORD);
        }
        missing
    }

    /// Remote URL with blank values treated as unset.
    pub fn remote_url(&self) -> Option<&str> {
        self.remote_service_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }

    /// Validate and resolve into [`SigningCredentials`].
    ///
    /// `source_name` identifies where the config came from in error messages.
    pub fn validate(&self, source_name: &str) -> Result<SigningCredentials> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(Error::ConfigIncomplete {
                source_name: source_name.to_string(),
                missing,
            });
        }

        if let Some(url) = self.remote_url() {
            validate_remote_url(url)?;
        }

        Ok(SigningCredentials {
            keystore_path: resolve_keystore(&self.keystore_path)?,
            store_password: self.store_password.clone(),
            key_alias: self.key_alias.trim().to_string(),
            key_password: self.key_password.clone(),
        })
    }
}

/// Absolute path of an existing keystore file.
pub fn resolve_keystore(path: &Path) -> Result<PathBuf> {
    let absolute = path
        .absolutize()
        .map_err(|_| Error::KeystoreNotFound {
            path: path.to_path_buf(),
        })?
        .into_owned();

    if !absolute.is_file() {
        return Err(Error::KeystoreNotFound { path: absolute });
    }
    Ok(absolute)
}

/// Accept only absolute http(s) URLs.
pub fn validate_remote_url(raw: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(raw).map_err(|e| Error::InvalidRemoteUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::InvalidRemoteUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{other}', expected http or https"),
        }),
    }
}
