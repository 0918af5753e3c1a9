//! CLI interface for article-wordfreq

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "article-wordfreq")]
#[command(about = "Rank the most frequent words in scraped articles")]
#[command(long_about = "Normalize article text, drop stopwords and short tokens, and report the top words per article as tables, charts and word clouds")]
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
    /// Extract the top words from one or more article files
    Analyze {
        /// Article files (TXT, MD, HTML, PDF)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Number of words to report per article
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Minimum word length
        #[arg(short, long)]
        min_length: Option<usize>,

        /// Additional stopword file, one word per line
        #[arg(long)]
        stopwords: Option<PathBuf>,

        /// Disable stopword filtering entirely
        #[arg(long, conflicts_with = "stopwords")]
        no_stopwords: bool,

        /// Output format: console, json, markdown, csv, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show token statistics per article
        #[arg(short, long)]
        detailed: bool,

        /// Process articles concurrently
        #[arg(long)]
        parallel: bool,
    },

    /// Inspect the stopword set in effect
    Stopwords {
        #[command(subcommand)]
        action: StopwordAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum StopwordAction {
    /// List every stopword
    Show,

    /// Report whether words would be filtered
    Check {
        /// Words to check
        #[arg(required = true)]
        words: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "csv" => Ok(OutputFormat::Csv),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, csv, html",
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
