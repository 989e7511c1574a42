//! External tool detection and availability checking.
//!
//! Lookups go through `which` so the error names the missing tool and how to
//! install it before any child process is spawned.

use crate::release::error::{Error, Result};
use std::path::PathBuf;

/// External programs the pipeline invokes from `PATH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Npm,
    Npx,
    Python,
    Makensis,
}

impl Tool {
    /// Executable name on the host OS.
    pub fn program(self) -> &'static str {
        match self {
            Tool::Npm if cfg!(windows) => "npm.cmd",
            Tool::Npm => "npm",
            Tool::Npx if cfg!(windows) => "npx.cmd",
            Tool::Npx => "npx",
            Tool::Python if cfg!(windows) => "python",
            Tool::Python => "python3",
            Tool::Makensis => "makensis",
        }
    }

    fn install_hint(self) -> &'static str {
        match self {
            Tool::Npm | Tool::Npx => "Install Node.js (https://nodejs.org) and re-run.",
            Tool::Python => "Install Python 3 with `pip install pyinstaller pywebview`.",
            Tool::Makensis => "Install NSIS (e.g., apt-get install nsis) to build the installer.",
        }
    }

    /// Map a program name back to a known tool.
    pub fn from_program(program: &str) -> Option<Tool> {
        [Tool::Npm, Tool::Npx, Tool::Python, Tool::Makensis]
            .into_iter()
            .find(|t| t.program() == program)
    }
}

/// Locate `tool` on `PATH`.
pub fn require_tool(tool: Tool) -> Result<PathBuf> {
    match which::which(tool.program()) {
        Ok(path) => {
            log::debug!("Found {} at: {}", tool.program(), path.display());
            Ok(path)
        }
        Err(e) => {
            log::debug!("{} not found in PATH: {}", tool.program(), e);
            Err(Error::ToolNotFound {
                tool: tool.program().to_string(),
                hint: tool.install_hint().to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_names_map_back_to_tools() {
        for tool in [Tool::Npm, Tool::Npx, Tool::Python, Tool::Makensis] {
            assert_eq!(Tool::from_program(tool.program()), Some(tool));
        }
        assert_eq!(Tool::from_program("./gradlew"), None);
    }
}
