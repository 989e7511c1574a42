//! Prompt for the release config, save it, then build.

use super::execute;
use crate::cli::{BuildArgs, Prompter, RuntimeConfig};
use crate::error::Result;
use crate::release::{
    Error,
    config::{self, ConfigOverrides, ReleaseConfig, Secret, merge},
    pipeline::{CommandRunner, RunReport},
};
use std::path::PathBuf;

/// Attempts at naming an existing keystore before giving up.
pub const KEYSTORE_ATTEMPTS: usize = 3;

/// Answer that clears the stored remote URL.
const CLEAR: &str = "-";

pub async fn run<P: Prompter, R: CommandRunner>(
    runtime: &RuntimeConfig,
    build: &BuildArgs,
    prompter: &mut P,
    runner: R,
) -> Result<RunReport> {
    let store = runtime.config_store();
    let stored = store.load_optional().await?.unwrap_or_default();

    runtime.section("Release configuration")?;
    let config = gather(runtime, prompter, stored)?;
    let credentials = config.validate(&store.path().display().to_string())?;
    store.save(&config).await?;
    runtime.success(&format!("Saved {}", store.path().display()))?;

    let request = build.request(runtime.project_dir(), credentials, config.remote_url());
    execute(runtime, request, runner).await
}

/// Ask for every field, offering `stored` values as defaults.
pub fn gather<P: Prompter>(
    runtime: &RuntimeConfig,
    prompter: &mut P,
    stored: ReleaseConfig,
) -> Result<ReleaseConfig> {
    let keystore_path = ask_keystore(runtime, prompter, &stored.keystore_path)?;
    let store_password = ask_secret(prompter, "Keystore password", &stored.store_password)?;
    let key_alias = ask_text(prompter, "Key alias", &stored.key_alias)?;
    let key_password = ask_secret(prompter, "Key password", &stored.key_password)?;
    let remote_service_url = ask_remote_url(prompter, stored.remote_url())?;

    let mut config = merge(
        stored,
        ConfigOverrides {
            keystore_path: Some(keystore_path),
            store_password,
            key_alias,
            key_password,
            remote_service_url: remote_service_url.clone().flatten(),
        },
    );
    if remote_service_url == Some(None) {
        config.remote_service_url = None;
    }
    Ok(config)
}

fn with_default(label: &str, default: &str) -> String {
    if default.is_empty() {
        format!("{label}: ")
    } else {
        format!("{label} [{default}]: ")
    }
}

fn ask_text<P: Prompter>(prompter: &mut P, label: &str, stored: &str) -> Result<Option<String>> {
    let answer = prompter.ask(&with_default(label, stored))?;
    Ok((!answer.is_empty()).then_some(answer))
}

/// A blank answer keeps the stored secret.
fn ask_secret<P: Prompter>(prompter: &mut P, label: &str, stored: &Secret) -> Result<Option<Secret>> {
    let question = if stored.is_blank() {
        format!("{label}: ")
    } else {
        format!("{label} [{stored}]: ")
    };
    let answer = prompter.ask_secret(&question)?;
    Ok((!answer.is_empty()).then(|| Secret::from(answer)))
}

/// Re-ask until the keystore exists, at most [`KEYSTORE_ATTEMPTS`] times.
fn ask_keystore<P: Prompter>(
    runtime: &RuntimeConfig,
    prompter: &mut P,
    stored: &std::path::Path,
) -> Result<PathBuf> {
    let default = stored.display().to_string();
    let mut last = stored.to_path_buf();

    for attempt in 1..=KEYSTORE_ATTEMPTS {
        let answer = prompter.ask(&with_default("Keystore path", &default))?;
        let candidate = if answer.is_empty() {
            stored.to_path_buf()
        } else {
            PathBuf::from(answer)
        };

        match config::resolve_keystore(&candidate) {
            Ok(path) => return Ok(path),
            Err(e) => {
                if attempt < KEYSTORE_ATTEMPTS {
                    runtime.warn(&format!("{e}; try again"))?;
                }
                last = candidate;
            }
        }
    }

    Err(Error::KeystoreNotFound { path: last }.into())
}

/// `None`: keep stored. `Some(None)`: clear. `Some(Some(url))`: replace.
fn ask_remote_url<P: Prompter>(
    prompter: &mut P,
    stored: Option<&str>,
) -> Result<Option<Option<String>>> {
    let question = match stored {
        Some(url) => format!("Remote service URL [{url}] ('{CLEAR}' to clear): "),
        None => "Remote service URL (blank to skip): ".to_string(),
    };
    let answer = prompter.ask(&question)?;

    match answer.as_str() {
        "" => Ok(None),
        CLEAR => Ok(Some(None)),
        url => {
            config::validate_remote_url(url)?;
            Ok(Some(Some(url.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputManager;
    use std::collections::VecDeque;

    struct Scripted(VecDeque<String>);

    impl Scripted {
        fn new<I: IntoIterator<Item = S>, S: Into<String>>(answers: I) -> Self {
            Self(answers.into_iter().map(Into::into).collect())
        }
    }

    impl Prompter for Scripted {
        fn ask(&mut self, _question: &str) -> Result<String> {
            Ok(self.0.pop_front().expect("script exhausted"))
        }

        fn ask_secret(&mut self, question: &str) -> Result<String> {
            self.ask(question)
        }
    }

    fn runtime(dir: &std::path::Path) -> RuntimeConfig {
        RuntimeConfig::new(dir, OutputManager::new(false, true))
    }

    #[test]
    fn blank_answers_keep_stored_values() {
        let dir = tempfile::tempdir().unwrap();
        let keystore = dir.path().join("release.jks");
        std::fs::write(&keystore, b"ks").unwrap();

        let stored = ReleaseConfig {
            keystore_path: keystore.clone(),
            store_password: Secret::new("store"),
            key_alias: "release".into(),
            key_password: Secret::new("key"),
            remote_service_url: Some("https://old.example.com".into()),
        };
        let mut prompter = Scripted::new(["", "", "", "", ""]);

        let config = gather(&runtime(dir.path()), &mut prompter, stored.clone()).unwrap();
        assert_eq!(config, stored);
    }

    #[test]
    fn answers_replace_and_dash_clears_url() {
        let dir = tempfile::tempdir().unwrap();
        let keystore = dir.path().join("new.jks");
        std::fs::write(&keystore, b"ks").unwrap();

        let stored = ReleaseConfig {
            remote_service_url: Some("https://old.example.com".into()),
            ..Default::default()
        };
        let mut prompter = Scripted::new([
            keystore.display().to_string(),
            " s ".into(),
            "alias".into(),
            "k".into(),
            "-".into(),
        ]);

        let config = gather(&runtime(dir.path()), &mut prompter, stored).unwrap();
        assert_eq!(config.keystore_path, keystore);
        assert_eq!(config.store_password.expose(), " s ");
        assert_eq!(config.key_alias, "alias");
        assert_eq!(config.remote_service_url, None);
    }

    #[test]
    fn keystore_is_reasked_then_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut prompter = Scripted::new(["/nope/a.jks", "/nope/b.jks", "/nope/c.jks"]);

        let err = gather(&runtime(dir.path()), &mut prompter, ReleaseConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            crate::ReleaseError::Release(Error::KeystoreNotFound { .. })
        ));
        assert!(prompter.0.is_empty());
    }
}
