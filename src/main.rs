//! fund_release - signed release builder for the FundEstimator wrapper apps.
//!
//! This binary installs dependencies, scaffolds and signs the Android project,
//! and builds release .apk/.aab files (plus an optional Windows installer),
//! skipping every step that is already done.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match fund_release::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  → {}", suggestion);
            }
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
