//! Command-line interface for label-sequencer.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **sort**: Reorder label pages to follow the reference table
//! - **extract**: Show the tracking identifier recognized on each page
//! - **index**: Inspect a reference table (row counts, duplicates)
//!
//! ## Usage
//!
//! ```text
//! # Extract page text, then reorder by spreadsheet row order
//! pdftotext -layout labels.pdf labels.txt
//! label-sequencer sort --pages labels.txt --reference orders.csv \
//!     --order-out order.txt --report unmatched.csv
//!
//! # Order by the numeric suffix of the order ID
//! label-sequencer sort --pages labels.txt --reference orders.csv --strategy order-id
//!
//! # Read page text from stdin, JSON output for scripting
//! pdftotext labels.pdf - | label-sequencer sort --pages - --reference orders.csv --format json
//! ```

use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::core::page::Page;
use crate::parsing;

pub mod extract;
pub mod index;
pub mod sort;

#[derive(Parser)]
#[command(name = "label-sequencer")]
#[command(author = "label-sequencer contributors")]
#[command(version)]
#[command(about = "Reorder shipping-label pages to follow a reference order table")]
#[command(
    long_about = "label-sequencer reorders the pages of a shipping-label document so they follow the order of a reference spreadsheet.\n\nIt recognizes UPS, FedEx and DHL tracking identifiers in each page's text, links them to the reference rows and provides:\n- The new page order (spreadsheet row order or order-ID numeric order)\n- A report of labels that could not be linked, with the reason\n- Warnings for duplicate tracking identifiers and unusable order keys"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reorder label pages to follow the reference table
    Sort(sort::SortArgs),

    /// Show the tracking identifier recognized on each page
    Extract(extract::ExtractArgs),

    /// Inspect a reference table
    Index(index::IndexArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Read page text from a file, or from stdin when the path is `-`
fn read_pages(path: &Path) -> anyhow::Result<Vec<Page>> {
    if path.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        return Ok(parsing::pages::parse_pages_text(&buffer)?);
    }
    Ok(parsing::pages::parse_pages_file(path)?)
}

/// Load the JSON config file if one was given, otherwise the defaults
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(Config::default()),
    }
}
