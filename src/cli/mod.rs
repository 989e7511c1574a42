//! Command line interface for the release builder.
//!
//! This module provides argument parsing, mode dispatch, prompting and
//! user-facing output.

mod args;
pub mod modes;
mod output;
mod prompt;

pub use args::{Args, BuildArgs, Command, RuntimeConfig, SigningArgs};
pub use output::OutputManager;
pub use prompt::{Prompter, TerminalPrompter};

use crate::error::Result;
use crate::release::pipeline::SystemRunner;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let runtime = RuntimeConfig::from_args(&args)?;

    match &args.command {
        Command::Interactive { build } => {
            modes::interactive::run(&runtime, build, &mut TerminalPrompter, SystemRunner).await?;
        }
        Command::Silent { build } => {
            modes::silent::run(&runtime, build, SystemRunner).await?;
        }
        Command::Ci { build, signing } => {
            modes::parameterized::run(&runtime, build, signing, SystemRunner).await?;
        }
        Command::Show => modes::show::run(&runtime).await?,
    }

    Ok(0)
}
