//! Print the stored config.

use crate::cli::RuntimeConfig;
use crate::error::Result;
use crate::release::config::{
    KEY_ALIAS, KEY_PASSWORD, KEYSTORE_PATH, ReleaseConfig, STORE_PASSWORD,
};

/// Render `config` one field per line. Secrets print as `********`.
pub fn render(config: &ReleaseConfig) -> String {
    let missing = config.missing_fields();
    let mark = |field: &str| {
        if missing.iter().any(|m| *m == field) {
            "  (missing)"
        } else {
            ""
        }
    };

    let mut out = String::new();
    out.push_str(&format!(
        "{KEYSTORE_PATH}: {}{}\n",
        config.keystore_path.display(),
        mark(KEYSTORE_PATH)
    ));
    out.push_str(&format!(
        "{STORE_PASSWORD}: {}{}\n",
        config.store_password,
        mark(STORE_PASSWORD)
    ));
    out.push_str(&format!("{KEY_ALIAS}: {}{}\n", config.key_alias, mark(KEY_ALIAS)));
    out.push_str(&format!(
        "{KEY_PASSWORD}: {}{}\n",
        config.key_password,
        mark(KEY_PASSWORD)
    ));
    out.push_str(&format!(
        "remoteServiceUrl: {}\n",
        config.remote_url().unwrap_or("(not set)")
    ));
    out
}

pub async fn run(runtime: &RuntimeConfig) -> Result<()> {
    let store = runtime.config_store();
    let config = store.load().await?;

    runtime.output().plain(&format!("# {}", store.path().display()))?;
    runtime.output().plain(render(&config).trim_end())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::config::Secret;

    #[test]
    fn secrets_are_hidden_and_blanks_flagged() {
        let config = ReleaseConfig {
            keystore_path: "/keys/release.jks".into(),
            store_password: Secret::new("hunter2"),
            key_alias: String::new(),
            key_password: Secret::new("swordfish"),
            remote_service_url: Some("https://funds.example.com".into()),
        };

        let text = render(&config);
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("swordfish"));
        assert!(text.contains("storePassword: ********\n"));
        assert!(text.contains("keyAlias:   (missing)\n"));
        assert!(text.contains("remoteServiceUrl: https://funds.example.com\n"));
    }
}
