use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::index::ReferenceIndex;
use crate::config::Config;
use crate::core::page::{ExtractedIdentifier, Page};
use crate::core::reference::ReferenceRow;
use crate::core::types::UnmatchedReason;
use crate::extraction::Extractor;

/// Whether a page was linked to a reference row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MatchOutcome {
    Matched { row: ReferenceRow },
    Unmatched { reason: UnmatchedReason },
}

/// Result of matching one page against the reference index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// 0-based index of the page in the original document
    pub page_index: usize,

    /// What the extractor found on the page
    pub identifier: ExtractedIdentifier,

    pub outcome: MatchOutcome,
}

impl MatchResult {
    #[must_use]
    pub fn is_matched(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Matched { .. })
    }

    /// Linked reference row, if matched
    #[must_use]
    pub fn reference(&self) -> Option<&ReferenceRow> {
        match &self.outcome {
            MatchOutcome::Matched { row } => Some(row),
            MatchOutcome::Unmatched { .. } => None,
        }
    }

    #[must_use]
    pub fn unmatched_reason(&self) -> Option<UnmatchedReason> {
        match self.outcome {
            MatchOutcome::Matched { .. } => None,
            MatchOutcome::Unmatched { reason } => Some(reason),
        }
    }
}

/// Links label pages to reference rows
pub struct MatchingEngine<'a> {
    index: &'a ReferenceIndex,
    extractor: Extractor,
    parallel: bool,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    #[must_use]
    pub fn new(index: &'a ReferenceIndex) -> Self {
        Self::with_config(index, &Config::default())
    }

    /// Create a new matching engine with custom configuration
    #[must_use]
    pub fn with_config(index: &'a ReferenceIndex, config: &Config) -> Self {
        Self {
            index,
            extractor: Extractor::new(config.min_tracking_length),
            parallel: config.parallel,
        }
    }

    /// Extract and look up the identifier of a single page
    #[must_use]
    pub fn match_page(&self, page: &Page) -> MatchResult {
        let identifier = self.extractor.extract(&page.text);

        let outcome = match identifier.tracking.as_deref() {
            None => MatchOutcome::Unmatched {
                reason: UnmatchedReason::NoIdentifier,
            },
            Some(tracking) => match self.index.lookup(tracking) {
                Some(row) => MatchOutcome::Matched { row: row.clone() },
                None => MatchOutcome::Unmatched {
                    reason: UnmatchedReason::NotInReference,
                },
            },
        };

        debug!(
            page = page.number(),
            carrier = %identifier.carrier,
            tracking = identifier.tracking.as_deref().unwrap_or("-"),
            matched = matches!(outcome, MatchOutcome::Matched { .. }),
            "matched page"
        );

        MatchResult {
            page_index: page.index,
            identifier,
            outcome,
        }
    }

    /// Match every page; results keep the input page order
    #[must_use]
    pub fn find_matches(&self, pages: &[Page]) -> Vec<MatchResult> {
        let results: Vec<MatchResult> = if self.parallel {
            pages.par_iter().map(|page| self.match_page(page)).collect()
        } else {
            pages.iter().map(|page| self.match_page(page)).collect()
        };

        let matched = results.iter().filter(|r| r.is_matched()).count();
        info!(
            pages = results.len(),
            matched,
            unmatched = results.len() - matched,
            "matched pages against reference"
        );

        results
    }
}
