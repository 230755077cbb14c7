//! Message formatting and display.
//!
//! Every user-facing line goes through [`OutputFormatter`], which applies the
//! quiet and verbose settings and colors the level prefix on terminals.
//!
//! # Examples
//!
//! ```
//! use pagesmith::output::formatter::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Reading 3 file(s)...");
//! formatter.success("Wrote merged.pdf");
//! formatter.warning("No pages discarded");
//! ```

use std::io::IsTerminal;

use crate::config::Config;

/// Level of an output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// Success message.
    Success,
    /// Warning message.
    Warning,
    /// Error message.
    Error,
    /// Verbose-only message.
    Debug,
}

impl MessageLevel {
    /// Prefix and ANSI color for this level.
    fn style(self) -> (&'static str, &'static str) {
        match self {
            Self::Info => ("", ""),
            Self::Success => ("✓ ", "\x1b[32m"),
            Self::Warning => ("⚠ ", "\x1b[33m"),
            Self::Error => ("✗ ", "\x1b[31m"),
            Self::Debug => ("→ ", "\x1b[36m"),
        }
    }

    /// Warnings and errors go to stderr.
    fn to_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

const RESET: &str = "\x1b[0m";

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    quiet: bool,
    verbose: bool,
    colored: bool,
}

impl OutputFormatter {
    /// Create a formatter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress everything but warnings and errors
    /// * `verbose` - Show debug lines and details
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose: verbose && !quiet,
            colored: std::io::stdout().is_terminal() && std::env::var_os("TERM").is_some(),
        }
    }

    /// Create a formatter from configuration.
    ///
    /// JSON output implies quiet so stdout carries only the JSON document.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet || config.json, config.verbose)
    }

    /// Formatter that only shows warnings and errors.
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Formatter that shows everything.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print(MessageLevel::Info, message);
        }
    }

    /// Print a success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print(MessageLevel::Success, message);
        }
    }

    /// Print a warning. Always shown.
    pub fn warning(&self, message: &str) {
        self.print(MessageLevel::Warning, message);
    }

    /// Print an error. Always shown.
    pub fn error(&self, message: &str) {
        self.print(MessageLevel::Error, message);
    }

    /// Print a verbose-only message.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print(MessageLevel::Debug, message);
        }
    }

    fn print(&self, level: MessageLevel, message: &str) {
        let (prefix, color) = level.style();
        let line = if self.colored && !color.is_empty() {
            format!("{color}{prefix}{message}{RESET}")
        } else {
            format!("{prefix}{message}")
        };

        if level.to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    /// Print a section header. Suppressed in quiet mode.
    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{title}");
        }
    }

    /// Print a `label: value` line. Verbose only.
    pub fn detail(&self, label: &str, value: &str) {
        if self.verbose {
            println!("  {label}: {value}");
        }
    }

    /// Print a numbered list item. Suppressed in quiet mode.
    ///
    /// # Arguments
    ///
    /// * `number` - One-based item number
    /// * `message` - Item text
    pub fn list_item(&self, number: usize, message: &str) {
        if !self.quiet {
            println!("  {number:>3}. {message}");
        }
    }

    /// Print a blank line. Suppressed in quiet mode.
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Whether non-error output is shown.
    pub fn should_print(&self) -> bool {
        !self.quiet
    }

    /// Whether verbose output is shown.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Whether quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}
