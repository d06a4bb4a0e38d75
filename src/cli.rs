//! CLI interface for the CV extraction tool

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cv-extract")]
#[command(about = "CV field and work experience extraction tool")]
#[command(
    long_about = "Extract candidate fields and total work experience from CV files (PDF, DOCX, TXT, Markdown)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a single CV file
    Process {
        /// Path to the CV file (PDF, DOCX, TXT, Markdown)
        file: PathBuf,

        /// Output format: console, json (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Skip AI field extraction
        #[arg(long)]
        no_ai: bool,

        /// Append the candidate to the CSV ledger
        #[arg(short, long)]
        append: bool,

        /// Export the candidate row to a CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Position the candidate applied for
        #[arg(short, long)]
        position: Option<String>,

        /// Where the CV came from
        #[arg(short, long)]
        source: Option<String>,
    },

    /// Process every supported CV in a directory
    Batch {
        /// Directory to scan for CV files
        dir: PathBuf,

        /// Export all candidate rows to a CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Skip AI field extraction
        #[arg(long)]
        no_ai: bool,

        /// Append each candidate to the CSV ledger
        #[arg(short, long)]
        append: bool,
    },

    /// Compute work experience from a CV or raw text
    Experience {
        /// Path to the CV file, or '-' to read text from stdin
        file: String,

        /// Output format: console, json (defaults to the configured format)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write a default configuration file
    Init,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
