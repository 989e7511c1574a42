//! Line-oriented prompts on the controlling terminal.

use crate::error::{CliError, Result};
use std::io::{self, BufRead, Write};

/// Source of answers for interactive mode.
pub trait Prompter {
    /// Ask a question and return the answer without surrounding whitespace.
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Ask for a secret without echoing it. Only the line ending is removed.
    fn ask_secret(&mut self, question: &str) -> Result<String>;
}

/// Prompts on stdin/stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    fn read_line(question: &str) -> Result<String> {
        {
            let mut out = io::stdout().lock();
            write!(out, "{question}")?;
            out.flush()?;
        }

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(CliError::PromptFailed {
                reason: "standard input closed".to_string(),
            }
            .into());
        }
        Ok(line)
    }
}

/// `line` without its trailing `\n` or `\r\n`.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

impl Prompter for TerminalPrompter {
    fn ask(&mut self, question: &str) -> Result<String> {
        Ok(Self::read_line(question)?.trim().to_string())
    }

    fn ask_secret(&mut self, question: &str) -> Result<String> {
        let answer = {
            let _echo = EchoGuard::disable();
            Self::read_line(question)
        };
        println!();
        Ok(strip_line_ending(&answer?).to_string())
    }
}

/// Turns terminal echo off until dropped. A no-op when stdin is not a tty.
#[cfg(unix)]
struct EchoGuard {
    original: Option<nix::sys::termios::Termios>,
}

#[cfg(unix)]
impl EchoGuard {
    fn disable() -> Self {
        use nix::sys::termios::{self, LocalFlags, SetArg};
        use std::os::fd::AsFd;

        let stdin = io::stdin();
        let Ok(original) = termios::tcgetattr(stdin.as_fd()) else {
            return Self { original: None };
        };

        let mut silent = original.clone();
        silent.local_flags.remove(LocalFlags::ECHO);
        if let Err(e) = termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, &silent) {
            log::debug!("Could not disable terminal echo: {}", e);
            return Self { original: None };
        }

        Self {
            original: Some(original),
        }
    }
}

#[cfg(unix)]
impl Drop for EchoGuard {
    fn drop(&mut self) {
        use nix::sys::termios::{self, SetArg};
        use std::os::fd::AsFd;

        if let Some(original) = &self.original {
            let stdin = io::stdin();
            let _ = termios::tcsetattr(stdin.as_fd(), SetArg::TCSANOW, original);
        }
    }
}

#[cfg(windows)]
struct EchoGuard {
    original: Option<(
        windows::Win32::Foundation::HANDLE,
        windows::Win32::System::Console::CONSOLE_MODE,
    )>,
}

#[cfg(windows)]
impl EchoGuard {
    fn disable() -> Self {
        use windows::Win32::System::Console::{
            CONSOLE_MODE, ENABLE_ECHO_INPUT, GetConsoleMode, GetStdHandle, STD_INPUT_HANDLE,
            SetConsoleMode,
        };

        let Ok(handle) = (unsafe { GetStdHandle(STD_INPUT_HANDLE) }) else {
            return Self { original: None };
        };
        // Fails when stdin is redirected; there is no echo to hide then.
        let mut mode = CONSOLE_MODE::default();
        if unsafe { GetConsoleMode(handle, &mut mode) }.is_err() {
            return Self { original: None };
        }

        if let Err(e) = unsafe { SetConsoleMode(handle, mode & !ENABLE_ECHO_INPUT) } {
            log::debug!("Could not disable console echo: {}", e);
            return Self { original: None };
        }

        Self {
            original: Some((handle, mode)),
        }
    }
}

#[cfg(windows)]
impl Drop for EchoGuard {
    fn drop(&mut self) {
        use windows::Win32::System::Console::SetConsoleMode;

        if let Some((handle, mode)) = self.original {
            let _ = unsafe { SetConsoleMode(handle, mode) };
        }
    }
}

#[cfg(not(any(unix, windows)))]
struct EchoGuard;

#[cfg(not(any(unix, windows)))]
impl EchoGuard {
    fn disable() -> Self {
        EchoGuard
    }
}
