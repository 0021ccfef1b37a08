//! # label-sequencer
//!
//! A library for reordering shipping-label documents to follow a reference
//! order table.
//!
//! Warehouses print carrier labels in whatever order the carrier portal
//! returns them, while packing follows the order spreadsheet. `label-sequencer`
//! recognizes the tracking identifier on each label page, links it to the
//! spreadsheet row carrying the same identifier, and computes the page order
//! that follows the spreadsheet.
//!
//! ## Features
//!
//! - **Carrier recognition**: UPS (`TRACKING #:`), FedEx (`TRK#`) and DHL (`WAYBILL`) labels
//! - **Normalization**: Segmented label numbers compare equal to compact table values
//! - **Two orderings**: Spreadsheet row order, or the numeric suffix of the order ID
//! - **Nothing dropped**: Unlinked pages are appended after the ordered ones and reported
//! - **Duplicate detection**: Repeated tracking identifiers in the table are reported
//!
//! ## Example
//!
//! ```rust
//! use label_sequencer::{reorder_labels, Config, Page, ReferenceRow, SortStrategy};
//!
//! let rows = vec![
//!     ReferenceRow::new("3501512414_ORIGINS_02", "1ZFC25776800341731", "UPS", 0),
//!     ReferenceRow::new("3501512414_ORIGINS_01", "6332704114", "MyDHL", 1),
//! ];
//! let pages = vec![
//!     Page::new(0, "TRACKING #: 1Z FC2 577 68 0034 1731"),
//!     Page::new(1, "WAYBILL 63 3270 4114"),
//! ];
//!
//! let config = Config {
//!     strategy: SortStrategy::OrderIdNumeric,
//!     ..Config::default()
//! };
//! let outcome = reorder_labels(&pages, &rows, &config);
//! assert_eq!(outcome.sequence.ordered_page_indices, vec![1, 0]);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Reference table indexing
//! - [`config`]: Run configuration
//! - [`core`]: Core data types for pages, identifiers and reference rows
//! - [`extraction`]: Carrier rules and the identifier extractor
//! - [`matching`]: Matching engine, sequencer and unmatched report
//! - [`parsing`]: Parsers for reference tables and page text
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod extraction;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::index::{AmbiguityNotice, ReferenceIndex};
pub use config::Config;
pub use core::page::{ExtractedIdentifier, Page};
pub use core::reference::ReferenceRow;
pub use core::types::*;
pub use extraction::Extractor;
pub use matching::engine::{MatchOutcome, MatchResult, MatchingEngine};
pub use matching::sequencer::{sequence, SequenceOutcome, SequenceWarning, UnmatchedReportRow};
pub use matching::{reorder_labels, ReorderOutcome};
