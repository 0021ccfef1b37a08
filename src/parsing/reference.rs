use std::path::Path;

use tracing::warn;

use crate::core::reference::ReferenceRow;
use crate::parsing::ParseError;
use crate::utils::validation::{check_row_limit, normalize_tracking};

const ORDER_KEY_COLUMNS: &[&str] = &[
    "id ordine marketplace",
    "order id",
    "id_ordine",
    "orderid",
    "id ordine",
    "order key",
];
const TRACKING_COLUMNS: &[&str] = &[
    "tracking",
    "tracking number",
    "trackingnumber",
    "tracking_number",
];
const CARRIER_COLUMNS: &[&str] = &["corriere", "carrier", "courier", "vettore"];

/// Rows read from a reference table plus what was noticed along the way
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    /// Usable rows in table order
    pub rows: Vec<ReferenceRow>,

    /// Data rows in the file, including skipped ones
    pub total_rows: usize,

    /// Header names as written in the file
    pub columns_found: Vec<String>,

    /// Human-readable notes about skipped rows
    pub warnings: Vec<String>,
}

/// Parse a reference table file; the delimiter is inferred from the header line
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_reference_file(path: &Path) -> Result<ReferenceTable, ParseError> {
    let content = std::fs::read_to_string(path)?;
    let delimiter = detect_delimiter(&content);
    parse_reference_text(&content, delimiter)
}

/// Guess the delimiter from the first non-empty line: tab, then `;`, then `,`
#[must_use]
pub fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let count = |c: char| header.matches(c).count();

    if count('\t') > 0 {
        b'\t'
    } else if count(';') > count(',') {
        b';'
    } else {
        b','
    }
}

/// Find a column by any of its accepted names (case-insensitive)
fn find_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
    let lowered: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
    aliases
        .iter()
        .find_map(|alias| lowered.iter().position(|h| h == alias))
}

/// Parse delimited reference-table text with a header row
///
/// # Errors
///
/// Returns `ParseError::MissingColumns` if the order key, tracking or carrier
/// column cannot be found, `ParseError::Csv` on malformed records, or
/// `ParseError::TooManyRows` if the row limit is exceeded.
pub fn parse_reference_text(text: &str, delimiter: u8) -> Result<ReferenceTable, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns_found: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let order_col = find_column(&columns_found, ORDER_KEY_COLUMNS);
    let tracking_col = find_column(&columns_found, TRACKING_COLUMNS);
    let carrier_col = find_column(&columns_found, CARRIER_COLUMNS);

    let (Some(order_col), Some(tracking_col), Some(carrier_col)) =
        (order_col, tracking_col, carrier_col)
    else {
        let mut missing = Vec::new();
        if order_col.is_none() {
            missing.push("order key".to_string());
        }
        if tracking_col.is_none() {
            missing.push("tracking".to_string());
        }
        if carrier_col.is_none() {
            missing.push("carrier".to_string());
        }
        return Err(ParseError::MissingColumns {
            missing,
            found: columns_found,
        });
    };

    let mut rows = Vec::new();
    let mut warnings = Vec::new();
    let mut total_rows = 0;

    for (row_index, record) in reader.records().enumerate() {
        let record = record?;

        // Check row limit for DOS protection
        if check_row_limit(row_index).is_some() {
            return Err(ParseError::TooManyRows(row_index));
        }
        total_rows += 1;

        let field = |col: usize| record.get(col).unwrap_or("").trim();
        let tracking = field(tracking_col);

        if normalize_tracking(tracking).is_empty() {
            // Spreadsheet line numbers are 1-based and start after the header
            let message = format!("Row {}: empty tracking, skipped", row_index + 2);
            warn!("{message}");
            warnings.push(message);
            continue;
        }

        rows.push(ReferenceRow::new(
            field(order_col),
            tracking,
            field(carrier_col),
            row_index,
        ));
    }

    Ok(ReferenceTable {
        rows,
        total_rows,
        columns_found,
        warnings,
    })
}
