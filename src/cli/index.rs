use std::path::PathBuf;

use clap::Args;

use crate::catalog::index::ReferenceIndex;
use crate::cli::OutputFormat;
use crate::parsing;

#[derive(Args)]
pub struct IndexArgs {
    /// Reference table (CSV or TSV export of the order spreadsheet)
    #[arg(required = true)]
    pub reference: PathBuf,
}

/// Execute index subcommand
///
/// # Errors
///
/// Returns an error if the reference table cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IndexArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = parsing::reference::parse_reference_file(&args.reference)?;
    let index = ReferenceIndex::build(&table.rows);

    match format {
        OutputFormat::Text => {
            println!("Reference table: {}", args.reference.display());
            println!("  Columns: {}", table.columns_found.join(", "));
            println!("  Data rows: {}", table.total_rows);
            println!("  Usable rows: {}", table.rows.len());
            println!("  Distinct tracking identifiers: {}", index.len());

            if !table.warnings.is_empty() {
                println!("\nWarnings:");
                for warning in &table.warnings {
                    println!("  - {warning}");
                }
            }

            if !index.ambiguities().is_empty() {
                println!("\nDuplicate tracking identifiers:");
                for notice in index.ambiguities() {
                    println!(
                        "  - {}: using row {}, ignoring rows {:?}",
                        notice.tracking, notice.row_index_kept, notice.row_indexes_dropped
                    );
                }
            }

            if verbose {
                println!("\nRows:");
                for row in &table.rows {
                    println!(
                        "  {:>5}  {:<30} {:<24} {}",
                        row.row_index,
                        row.order_key,
                        row.normalized_tracking(),
                        row.carrier
                    );
                }
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": args.reference.display().to_string(),
                "columns": table.columns_found,
                "total_rows": table.total_rows,
                "usable_rows": table.rows.len(),
                "distinct_tracking": index.len(),
                "warnings": table.warnings,
                "ambiguities": index.ambiguities(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("row_index\torder_key\ttracking\tcarrier\tnumeric_suffix");
            for row in &table.rows {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    row.row_index,
                    row.order_key,
                    row.normalized_tracking(),
                    row.carrier,
                    row.order_suffix().unwrap_or(""),
                );
            }
        }
    }

    Ok(())
}
