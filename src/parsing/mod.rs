//! Parsers for the inputs handed over by the document and spreadsheet layers.
//!
//! - **Reference tables**: CSV/TSV exports of the order spreadsheet
//! - **Page text**: `pdftotext` output (pages separated by form feeds) or a JSON
//!   array of `{ "index", "text" }` objects
//!
//! ## Example
//!
//! ```rust,no_run
//! use label_sequencer::parsing::{pages, reference};
//! use std::path::Path;
//!
//! let table = reference::parse_reference_file(Path::new("orders.csv")).unwrap();
//! let pages = pages::parse_pages_file(Path::new("labels.txt")).unwrap();
//! println!("{} rows, {} pages", table.rows.len(), pages.len());
//! ```
//!
//! ## Reference columns
//!
//! Header names are matched case-insensitively:
//!
//! | Field     | Accepted headers |
//! |-----------|------------------|
//! | order key | `ID Ordine Marketplace`, `Order ID`, `id_ordine`, `OrderID`, `ID Ordine`, `Order Key` |
//! | tracking  | `Tracking`, `Tracking Number`, `TrackingNumber`, `tracking_number` |
//! | carrier   | `Corriere`, `Carrier`, `Courier`, `Vettore` |

pub mod pages;
pub mod reference;

use thiserror::Error;

use crate::utils::validation::{MAX_PAGES, MAX_REFERENCE_ROWS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error(
        "Missing columns in reference table: {}. Columns found: {}",
        .missing.join(", "),
        .found.join(", ")
    )]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Too many rows: {0} exceeds maximum allowed ({MAX_REFERENCE_ROWS})")]
    TooManyRows(usize),

    #[error("Too many pages: {0} exceeds maximum allowed ({MAX_PAGES})")]
    TooManyPages(usize),
}
