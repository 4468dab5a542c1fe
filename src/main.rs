//! pdfmerge - Merge multiple PDFs into one.

use clap::Parser;
use std::process;

use pdfmerge::PdfMergeError;
use pdfmerge::cli::Cli;
use pdfmerge::output::{OutputFormatter, init_tracing};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), PdfMergeError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    pdfmerge::run(&config, &formatter)?;

    Ok(())
}
