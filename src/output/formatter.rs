//! Message formatting and display.
//!
//! Every console line carries a bracketed tag (`[INFO]`, `[OK]`, `[WARN]`,
//! `[ERROR]`, `[DONE]`, `[DEBUG]`) and is written to stdout.
//!
//! # Examples
//!
//! ```
//! use pdfmerge::output::OutputFormatter;
//!
//! let formatter = OutputFormatter::new(false, false);
//! formatter.info("Files to merge in order:");
//! formatter.success("Added 3 pages from a.pdf");
//! formatter.warning("Not found: missing.pdf");
//! ```

use std::io;

use crate::config::Config;

/// Level of output message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message.
    Info,
    /// A file was merged.
    Success,
    /// A file was skipped.
    Warning,
    /// A file could not be read.
    Error,
    /// The output was written.
    Done,
    /// Debug/verbose message.
    Debug,
}

impl MessageLevel {
    /// Tag printed in front of messages of this level.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Info => "[INFO]",
            Self::Success => "[OK]",
            Self::Warning => "[WARN]",
            Self::Error => "[ERROR]",
            Self::Done => "[DONE]",
            Self::Debug => "[DEBUG]",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Success => "\x1b[32m", // Green
            Self::Warning => "\x1b[33m", // Yellow
            Self::Error => "\x1b[31m",   // Red
            Self::Done => "\x1b[32m",    // Green
            Self::Debug => "\x1b[36m",   // Cyan
        }
    }
}

/// Output formatter with configurable verbosity.
#[derive(Debug, Clone)]
pub struct OutputFormatter {
    /// Whether to suppress non-error output.
    quiet: bool,
    /// Whether to show verbose output.
    verbose: bool,
    /// Whether to use colored output.
    colored: bool,
}

impl OutputFormatter {
    /// Create a new output formatter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - Suppress informational output
    /// * `verbose` - Show debug output
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            colored: Self::should_use_color(),
        }
    }

    /// Create a formatter from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.quiet, config.verbose)
    }

    /// Create a quiet formatter (only warnings and errors).
    pub fn quiet() -> Self {
        Self::new(true, false)
    }

    /// Create a verbose formatter.
    pub fn verbose() -> Self {
        Self::new(false, true)
    }

    /// Returns true if stdout is a TTY and TERM is set.
    fn should_use_color() -> bool {
        use std::io::IsTerminal;
        io::stdout().is_terminal() && std::env::var("TERM").is_ok()
    }

    /// Print an informational message. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Info, message);
        }
    }

    /// Print a per-file success message. Suppressed in quiet mode.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Success, message);
        }
    }

    /// Print a warning message. Always displayed.
    pub fn warning(&self, message: &str) {
        self.print_message(MessageLevel::Warning, message);
    }

    /// Print an error message. Always displayed.
    pub fn error(&self, message: &str) {
        self.print_message(MessageLevel::Error, message);
    }

    /// Print the completion message. Suppressed in quiet mode.
    pub fn done(&self, message: &str) {
        if !self.quiet {
            self.print_message(MessageLevel::Done, message);
        }
    }

    /// Print a debug message. Only displayed in verbose mode.
    pub fn debug(&self, message: &str) {
        if self.verbose {
            self.print_message(MessageLevel::Debug, message);
        }
    }

    /// Print a bulleted list item. Suppressed in quiet mode.
    pub fn list_item(&self, message: &str) {
        if !self.quiet {
            println!(" - {message}");
        }
    }

    fn print_message(&self, level: MessageLevel, message: &str) {
        println!("{}", self.format_message(level, message));
    }

    /// Render a message with its tag, colored if enabled.
    pub fn format_message(&self, level: MessageLevel, message: &str) -> String {
        let tag = level.tag();
        let color_code = level.color_code();

        if self.colored && !color_code.is_empty() {
            format!("{color_code}{tag}\x1b[0m {message}")
        } else {
            format!("{tag} {message}")
        }
    }
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(false, false)
    }
}
