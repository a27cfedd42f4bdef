pub mod report;

use crate::error::Result;
use crate::table::DEFAULT_OUTPUT_FILE;
use crate::types::SeriesFilter;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for cmrmeta
#[derive(Parser, Debug)]
#[command(name = "cmrmeta")]
#[command(about = "Collect one DICOM file per patient and study date and export its metadata")]
#[command(version)]
pub struct Cli {
    /// Directories, zip archives or DICOM files to search
    #[arg(value_name = "ROOT", required = true)]
    pub roots: Vec<PathBuf>,

    /// SeriesDescription match term (case-insensitive, repeatable)
    ///
    /// Each term runs its own discovery; results are concatenated in order.
    #[arg(short, long = "match", value_name = "TEXT", default_value = "stress")]
    pub matches: Vec<String>,

    /// Treat match terms as regular expressions
    #[arg(long)]
    pub regex: bool,

    /// Output CSV file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output: PathBuf,

    /// Do not search zip files found inside directories
    #[arg(long)]
    pub no_archives: bool,

    /// Output format
    #[arg(short, long, default_value = "csv")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds one filter per match term
    ///
    /// # Errors
    ///
    /// Returns an error if `--regex` is set and a term does not compile
    pub fn filters(&self) -> Result<Vec<SeriesFilter>> {
        self.matches
            .iter()
            .map(|term| {
                if self.regex {
                    SeriesFilter::regex(term)
                } else {
                    Ok(SeriesFilter::contains(term))
                }
            })
            .collect()
    }
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// CSV file at --output
    Csv,
    /// Human-readable summary on stdout
    Text,
    /// JSON records on stdout
    Json,
}
