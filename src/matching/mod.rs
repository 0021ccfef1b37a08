//! Page matching and sequencing.
//!
//! This module links label pages to reference rows and computes the final
//! page order:
//!
//! - [`MatchingEngine`](engine::MatchingEngine): extracts each page's identifier and looks it up
//! - [`sequence`](sequencer::sequence): orders matched pages and appends unmatched ones
//! - [`write_unmatched_report`](report::write_unmatched_report): CSV report of unmatched pages
//!
//! ## Ordering
//!
//! Matched pages come first, ordered by the chosen [`SortStrategy`](crate::core::types::SortStrategy):
//!
//! 1. **Excel order**: reference row position
//! 2. **Order-ID numeric**: trailing number of the order key (`..._ORIGINS_99` → 99);
//!    keys without trailing digits are placed first and flagged
//!
//! Ties fall back to the original page index. Unmatched pages always follow
//! in their original order, so every input page appears exactly once.
//!
//! ## Example
//!
//! ```rust
//! use label_sequencer::{reorder_labels, Config, Page, ReferenceRow};
//!
//! let rows = vec![
//!     ReferenceRow::new("3501512414_ORIGINS_01", "887898644283", "FedEx", 0),
//!     ReferenceRow::new("3501512414_ORIGINS_02", "6332704114", "MyDHL", 1),
//! ];
//! let pages = vec![
//!     Page::new(0, "WAYBILL 63 3270 4114"),
//!     Page::new(1, "TRK# [0881] 8878 9864 4283"),
//!     Page::new(2, "packing slip"),
//! ];
//!
//! let outcome = reorder_labels(&pages, &rows, &Config::default());
//! assert_eq!(outcome.sequence.ordered_page_indices, vec![1, 0, 2]);
//! assert_eq!(outcome.sequence.unmatched.len(), 1);
//! ```

pub mod engine;
pub mod report;
pub mod sequencer;

use serde::{Deserialize, Serialize};

use crate::catalog::index::{AmbiguityNotice, ReferenceIndex};
use crate::config::Config;
use crate::core::page::Page;
use crate::core::reference::ReferenceRow;

use engine::{MatchResult, MatchingEngine};
use sequencer::SequenceOutcome;

/// Everything a reordering run produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderOutcome {
    /// Per-page match results in input page order
    pub matches: Vec<MatchResult>,

    pub sequence: SequenceOutcome,

    /// Duplicate tracking identifiers in the reference table
    pub ambiguities: Vec<AmbiguityNotice>,
}

/// Build the index, match every page and sequence the results
#[must_use]
pub fn reorder_labels(pages: &[Page], rows: &[ReferenceRow], config: &Config) -> ReorderOutcome {
    let index = ReferenceIndex::build(rows);
    let engine = MatchingEngine::with_config(&index, config);
    let matches = engine.find_matches(pages);
    let sequence = sequencer::sequence(&matches, config.strategy);

    ReorderOutcome {
        matches,
        sequence,
        ambiguities: index.ambiguities().to_vec(),
    }
}
