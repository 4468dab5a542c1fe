//! CLI argument parsing for pdfmerge.
//!
//! This module defines the command-line interface using `clap` and turns the
//! parsed arguments into a validated [`Config`].

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{Config, InputSource, SortKey};
use crate::error::Result;

/// Merge multiple PDFs into one.
///
/// Pages are taken from each input in order. Inputs come either from an
/// explicit list or from a recursive scan of a directory.
#[derive(Parser, Debug)]
#[command(name = "pdfmerge")]
#[command(version)]
#[command(about = "Merge multiple PDFs into one.", long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["inputs", "directory"]),
))]
pub struct Cli {
    /// List of PDF files to merge (in order)
    ///
    /// Entries that do not end in .pdf are ignored.
    #[arg(short, long, num_args = 1.., value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Directory to search for PDFs (recursively)
    #[arg(short, long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Output PDF file path
    ///
    /// An existing file at this path is overwritten.
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Sort when using --directory
    #[arg(long, value_name = "KEY", default_value = "name")]
    #[arg(value_parser = SortKey::VARIANTS)]
    pub sort: String,

    /// Reverse sort order
    #[arg(long)]
    pub reverse: bool,

    /// Password for encrypted PDFs (optional)
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Fail on any error
    ///
    /// Unreadable or encrypted inputs abort the merge instead of being
    /// skipped. Missing files are still only reported.
    #[arg(long)]
    pub strict: bool,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// # Errors
    ///
    /// Returns an error if the sort key is unknown or the resulting
    /// configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let source = match &self.directory {
            Some(dir) => InputSource::Directory(dir.clone()),
            None => InputSource::Files(self.inputs.clone()),
        };

        let config = Config {
            source,
            output: self.output.clone(),
            sort: SortKey::from_str(&self.sort)?,
            reverse: self.reverse,
            password: self.password.clone(),
            strict: self.strict,
            verbose: self.verbose,
            quiet: self.quiet,
        };

        config.validate()?;

        Ok(config)
    }
}
