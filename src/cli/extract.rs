use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_config, read_pages, OutputFormat};
use crate::core::page::ExtractedIdentifier;
use crate::extraction::Extractor;

#[derive(Args)]
pub struct ExtractArgs {
    /// Page text: pdftotext output (pages separated by form feeds) or a JSON page array.
    /// Use '-' for stdin
    #[arg(required = true)]
    pub pages: PathBuf,

    /// Path to a JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Shortest identifier a carrier rule accepts (overrides the config file)
    #[arg(long)]
    pub min_length: Option<usize>,
}

/// Execute extract subcommand
///
/// # Errors
///
/// Returns an error if the config file or the page text cannot be read or parsed.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ExtractArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let min_length = args.min_length.unwrap_or(config.min_tracking_length);

    let pages = read_pages(&args.pages)?;
    let extractor = Extractor::new(min_length);

    let extracted: Vec<(usize, ExtractedIdentifier)> = pages
        .iter()
        .map(|page| (page.index, extractor.extract(&page.text)))
        .collect();

    if verbose {
        let found = extracted.iter().filter(|(_, e)| e.is_found()).count();
        eprintln!("Recognized identifiers on {found} of {} pages", pages.len());
    }

    match format {
        OutputFormat::Text => {
            for (index, identifier) in &extracted {
                match &identifier.tracking {
                    Some(tracking) => {
                        println!("page {:>4}: {:<6} {tracking}", index + 1, identifier.carrier);
                    }
                    None => println!("page {:>4}: (no identifier recognized)", index + 1),
                }
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = extracted
                .iter()
                .map(|(index, identifier)| {
                    serde_json::json!({
                        "page_index": index,
                        "carrier": identifier.carrier,
                        "tracking": identifier.tracking,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("page_index\tpage_number\tcarrier\ttracking");
            for (index, identifier) in &extracted {
                println!(
                    "{}\t{}\t{}\t{}",
                    index,
                    index + 1,
                    identifier.carrier.label().unwrap_or(""),
                    identifier.tracking.as_deref().unwrap_or(""),
                );
            }
        }
    }

    Ok(())
}
