//! Coloured terminal output honouring `--verbose` and `--quiet`.

use anstyle::{AnsiColor, Color, Style};
use std::io::{self, Write};

const GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold();
const YELLOW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))).bold();
const HEADER: Style = Style::new().bold().underline();
const DIM: Style = Style::new().dimmed();

/// User-facing status lines.
///
/// Log records go through `log`; this is for what the user asked to see.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Only printed with `--verbose`.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if self.verbose && !self.quiet {
            self.line(DIM, "  ", message)?;
        }
        Ok(())
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            let mut err = io::stderr().lock();
            writeln!(err, "{YELLOW}warning:{YELLOW:#} {message}")?;
        }
        Ok(())
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            self.line(GREEN, "✓ ", message)?;
        }
        Ok(())
    }

    pub fn section(&self, title: &str) -> io::Result<()> {
        if !self.quiet {
            let mut out = io::stdout().lock();
            writeln!(out)?;
            writeln!(out, "{HEADER}{title}{HEADER:#}")?;
        }
        Ok(())
    }

    pub fn indent(&self, message: &str) -> io::Result<()> {
        if !self.quiet {
            writeln!(io::stdout().lock(), "    {message}")?;
        }
        Ok(())
    }

    /// Printed even with `--quiet`; used for explicitly requested output.
    pub fn plain(&self, message: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{message}")
    }

    fn line(&self, style: Style, marker: &str, message: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{style}{marker}{style:#}{message}")
    }
}
