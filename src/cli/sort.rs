use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use crate::cli::{load_config, read_pages, OutputFormat};
use crate::core::types::SortStrategy;
use crate::matching::engine::MatchResult;
use crate::matching::report::write_unmatched_report;
use crate::matching::{reorder_labels, ReorderOutcome};
use crate::parsing;

#[derive(Args)]
pub struct SortArgs {
    /// Page text: pdftotext output (pages separated by form feeds) or a JSON page array.
    /// Use '-' for stdin
    #[arg(long, required = true)]
    pub pages: PathBuf,

    /// Reference table (CSV or TSV export of the order spreadsheet)
    #[arg(long, required = true)]
    pub reference: PathBuf,

    /// Ordering strategy for matched pages (overrides the config file)
    #[arg(short, long, value_enum)]
    pub strategy: Option<SortStrategy>,

    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extract and match pages in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write the new page order (one 0-based page index per line) to this file
    #[arg(long)]
    pub order_out: Option<PathBuf>,

    /// Write the unmatched-labels CSV report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

/// Execute sort subcommand
///
/// # Errors
///
/// Returns an error if an input cannot be read or parsed, or an output file
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SortArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    if args.parallel {
        config.parallel = true;
    }

    let pages = read_pages(&args.pages)?;
    let table = parsing::reference::parse_reference_file(&args.reference)
        .with_context(|| format!("reading reference table {}", args.reference.display()))?;

    if verbose {
        eprintln!(
            "Read {} pages and {} reference rows ({} skipped)",
            pages.len(),
            table.rows.len(),
            table.total_rows - table.rows.len()
        );
    }

    if pages.is_empty() {
        eprintln!("Warning: No pages found in input, nothing to reorder.");
    }

    let outcome = reorder_labels(&pages, &table.rows, &config);

    if let Some(path) = &args.order_out {
        write_order(path, &outcome.sequence.ordered_page_indices)
            .with_context(|| format!("writing page order to {}", path.display()))?;
    }

    if let Some(path) = &args.report {
        let file = File::create(path)
            .with_context(|| format!("creating report {}", path.display()))?;
        write_unmatched_report(BufWriter::new(file), &outcome.sequence.unmatched)?;
    }

    match format {
        OutputFormat::Text => print_text_results(&outcome, verbose),
        OutputFormat::Json => print_json_results(&outcome)?,
        OutputFormat::Tsv => print_tsv_results(&outcome),
    }

    Ok(())
}

fn write_order(path: &Path, order: &[usize]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for index in order {
        writeln!(writer, "{index}")?;
    }
    writer.flush()
}

fn print_text_results(outcome: &ReorderOutcome, verbose: bool) {
    let sequence = &outcome.sequence;

    println!("Label Sequencing Results");
    println!("{}", "=".repeat(60));

    println!("\nStrategy: {}", sequence.strategy);
    println!(
        "Pages: {} total, {} matched, {} unmatched ({:.1}% matched)",
        sequence.total_pages(),
        sequence.matched_count,
        sequence.unmatched_count(),
        sequence.match_rate()
    );

    let numbers: Vec<String> = sequence
        .ordered_page_indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect();
    println!("\nNew page order (original page numbers):");
    println!("   {}", numbers.join(" "));

    if !sequence.unmatched.is_empty() {
        println!("\nUnmatched pages:");
        for row in &sequence.unmatched {
            match (&row.extracted_identifier, &row.carrier_guess) {
                (Some(tracking), Some(carrier)) => {
                    println!("   - page {}: {tracking} ({carrier}) {}", row.page_number(), row.reason);
                }
                (Some(tracking), None) => {
                    println!("   - page {}: {tracking} {}", row.page_number(), row.reason);
                }
                _ => println!("   - page {}: {}", row.page_number(), row.reason),
            }
        }
    }

    if !sequence.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &sequence.warnings {
            println!("   - {warning}");
        }
    }

    if !outcome.ambiguities.is_empty() {
        println!("\nDuplicate tracking in reference table:");
        for notice in &outcome.ambiguities {
            let dropped: Vec<String> = notice
                .row_indexes_dropped
                .iter()
                .map(ToString::to_string)
                .collect();
            println!(
                "   - {}: using row {}, ignoring rows {}",
                notice.tracking,
                notice.row_index_kept,
                dropped.join(", ")
            );
        }
    }

    if verbose {
        println!("\nMatched pages:");
        for result in outcome.matches.iter().filter(|r| r.is_matched()) {
            if let Some(row) = result.reference() {
                println!(
                    "   page {} -> {} (row {}, {})",
                    result.page_index + 1,
                    row.order_key,
                    row.row_index,
                    row.carrier
                );
            }
        }
    }

    println!();
}

fn print_json_results(outcome: &ReorderOutcome) -> anyhow::Result<()> {
    let sequence = &outcome.sequence;
    let output = serde_json::json!({
        "generated_at": chrono::Utc::now().to_rfc3339(),
        "strategy": sequence.strategy,
        "total_pages": sequence.total_pages(),
        "matched": sequence.matched_count,
        "unmatched": sequence.unmatched_count(),
        "match_rate": sequence.match_rate(),
        "ordered_page_indices": sequence.ordered_page_indices,
        "unmatched_pages": sequence.unmatched,
        "warnings": sequence.warnings,
        "ambiguities": outcome.ambiguities,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(outcome: &ReorderOutcome) {
    let by_page: HashMap<usize, &MatchResult> = outcome
        .matches
        .iter()
        .map(|r| (r.page_index, r))
        .collect();

    println!("position\tpage_index\tpage_number\tstatus\torder_key\trow_index\ttracking\tcarrier");
    for (position, page_index) in outcome.sequence.ordered_page_indices.iter().enumerate() {
        let Some(result) = by_page.get(page_index) else {
            continue;
        };
        let status = result
            .unmatched_reason()
            .map_or_else(|| "matched".to_string(), |reason| reason.to_string());
        let (order_key, row_index) = result
            .reference()
            .map_or((String::new(), String::new()), |row| {
                (row.order_key.clone(), row.row_index.to_string())
            });

        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            position + 1,
            page_index,
            page_index + 1,
            status,
            order_key,
            row_index,
            result.identifier.tracking.as_deref().unwrap_or(""),
            result.identifier.carrier.label().unwrap_or(""),
        );
    }
}
