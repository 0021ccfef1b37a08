use std::io::Write;

use serde::Serialize;

use crate::matching::sequencer::UnmatchedReportRow;

/// Column header of the unmatched-labels report
pub const REPORT_COLUMNS: [&str; 5] = [
    "page_number",
    "page_index",
    "extracted_identifier",
    "carrier",
    "reason",
];

#[derive(Serialize)]
struct ReportRecord<'a> {
    page_number: usize,
    page_index: usize,
    extracted_identifier: Option<&'a str>,
    carrier: Option<&'a str>,
    reason: String,
}

/// Write the unmatched-labels report as CSV.
///
/// The header row is always written, even when every page matched. Absent
/// identifiers and carriers become empty fields.
///
/// # Errors
///
/// Returns a `csv::Error` if writing to `writer` fails.
pub fn write_unmatched_report<W: Write>(
    writer: W,
    rows: &[UnmatchedReportRow],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(REPORT_COLUMNS)?;
    for row in rows {
        csv_writer.serialize(ReportRecord {
            page_number: row.page_number(),
            page_index: row.page_index,
            extracted_identifier: row.extracted_identifier.as_deref(),
            carrier: row.carrier_guess.as_deref(),
            reason: row.reason.to_string(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}
