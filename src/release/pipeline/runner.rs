//! Child process execution.
//!
//! The orchestrator only sees [`CommandRunner`]; [`SystemRunner`] is the real
//! implementation. Success is defined solely by exit code 0.

use crate::release::{
    error::{Error, Result},
    toolchain::{Tool, require_tool},
};
use std::{
    fmt,
    future::Future,
    path::{Path, PathBuf},
    process::Stdio,
};

/// A command line plus working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Command for a known tool on `PATH`.
    pub fn tool(tool: Tool, cwd: impl Into<PathBuf>) -> Self {
        Self::new(tool.program(), cwd)
    }

    /// Gradle wrapper inside `android_dir`.
    pub fn gradle_wrapper(android_dir: &Path) -> Self {
        let program = if cfg!(windows) {
            "gradlew.bat"
        } else {
            "./gradlew"
        };
        Self::new(program, android_dir)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Runs child processes to completion.
pub trait CommandRunner {
    /// Run `command`, wait for it, and return its exit code.
    ///
    /// A process terminated by a signal reports `-1`. `Err` means the process
    /// could not be started at all.
    fn run(&self, command: &CommandSpec) -> impl Future<Output = Result<i32>>;
}

impl<R: CommandRunner> CommandRunner for &R {
    fn run(&self, command: &CommandSpec) -> impl Future<Output = Result<i32>> {
        (**self).run(command)
    }
}

/// Spawns real processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn resolve_program(command: &CommandSpec) -> Result<PathBuf> {
        if let Some(tool) = Tool::from_program(&command.program) {
            return require_tool(tool);
        }
        let program = Path::new(&command.program);
        if program.components().count() > 1 || (cfg!(windows) && program.extension().is_some()) {
            let local = command.cwd.join(program);
            if !local.is_file() {
                return Err(Error::GenericError(format!(
                    "{} not found. Re-run the scaffold step to regenerate it.",
                    local.display()
                )));
            }
            return Ok(local);
        }
        Ok(program.to_path_buf())
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<i32> {
        let program = Self::resolve_program(command)?;
        log::info!("Running: {} (in {})", command, command.cwd.display());

        let status = tokio::process::Command::new(&program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: command.to_string(),
                error,
            })?;

        let code = status.code().unwrap_or(-1);
        log::debug!("{} exited with {}", command.program, code);
        Ok(code)
    }
}
