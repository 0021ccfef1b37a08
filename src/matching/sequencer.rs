use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::reference::ReferenceRow;
use crate::core::types::{SortStrategy, UnmatchedReason};
use crate::matching::engine::{MatchOutcome, MatchResult};
use crate::utils::validation::{compare_numeric, numeric_suffix};

/// Helper function to convert usize count to f64 with explicit precision loss allowance
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Ordering key of a matched page under a [`SortStrategy`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Reference row position
    RowIndex(usize),
    /// Trailing digits of the order key without leading zeros; `None` sorts first
    OrderSuffix(Option<String>),
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::RowIndex(a), Self::RowIndex(b)) => a.cmp(b),
            (Self::OrderSuffix(a), Self::OrderSuffix(b)) => match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (Some(a), Some(b)) => compare_numeric(a, b),
            },
            (Self::RowIndex(_), Self::OrderSuffix(_)) => Ordering::Less,
            (Self::OrderSuffix(_), Self::RowIndex(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SortStrategy {
    /// Key used to place a page linked to `row`
    #[must_use]
    pub fn sort_key(self, row: &ReferenceRow) -> SortKey {
        match self {
            Self::ExcelOrder => SortKey::RowIndex(row.row_index),
            Self::OrderIdNumeric => SortKey::OrderSuffix(
                numeric_suffix(&row.order_key).map(|s| s.trim_start_matches('0').to_string()),
            ),
        }
    }
}

/// One line of the unmatched-labels report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedReportRow {
    /// 0-based index in the original document
    pub page_index: usize,

    /// Identifier found on the page, if any
    #[serde(default)]
    pub extracted_identifier: Option<String>,

    /// Carrier guessed by the extractor, if any
    #[serde(default)]
    pub carrier_guess: Option<String>,

    pub reason: UnmatchedReason,
}

impl UnmatchedReportRow {
    /// 1-based page number as shown to users
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page_index + 1
    }
}

/// Non-fatal conditions found while ordering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequenceWarning {
    /// Order key has no trailing digits; the page was placed first
    MissingNumericSuffix { page_index: usize, order_key: String },
    /// Several pages link to the same reference row
    SharedReference {
        row_index: usize,
        order_key: String,
        page_indices: Vec<usize>,
    },
}

impl std::fmt::Display for SequenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNumericSuffix {
                page_index,
                order_key,
            } => write!(
                f,
                "page {}: order key '{order_key}' has no numeric suffix, placed first",
                page_index + 1
            ),
            Self::SharedReference {
                row_index,
                order_key,
                page_indices,
            } => {
                let pages: Vec<String> = page_indices.iter().map(|p| (p + 1).to_string()).collect();
                write!(
                    f,
                    "row {row_index} ('{order_key}') is linked from pages {}",
                    pages.join(", ")
                )
            }
        }
    }
}

/// Final page order plus everything the caller has to report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceOutcome {
    pub strategy: SortStrategy,

    /// Permutation of the input page indices: matched pages, then unmatched pages
    pub ordered_page_indices: Vec<usize>,

    /// One row per unmatched page, in page order
    pub unmatched: Vec<UnmatchedReportRow>,

    pub warnings: Vec<SequenceWarning>,

    pub matched_count: usize,
}

impl SequenceOutcome {
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.ordered_page_indices.len()
    }

    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.unmatched.len()
    }

    /// Percentage of matched pages (0-100), one decimal
    #[must_use]
    pub fn match_rate(&self) -> f64 {
        if self.total_pages() == 0 {
            return 0.0;
        }
        let rate = count_to_f64(self.matched_count) / count_to_f64(self.total_pages()) * 100.0;
        (rate * 10.0).round() / 10.0
    }
}

/// Order pages from their match results.
///
/// Matched pages come first, ordered by the strategy's [`SortKey`] with ties
/// broken by page index. Unmatched pages follow in page-index order.
#[must_use]
pub fn sequence(results: &[MatchResult], strategy: SortStrategy) -> SequenceOutcome {
    let mut matched: Vec<(SortKey, usize)> = Vec::with_capacity(results.len());
    let mut unmatched: Vec<UnmatchedReportRow> = Vec::new();
    let mut warnings = Vec::new();
    let mut pages_by_row: BTreeMap<usize, (&str, Vec<usize>)> = BTreeMap::new();

    for result in results {
        match &result.outcome {
            MatchOutcome::Matched { row } => {
                let key = strategy.sort_key(row);
                if key == SortKey::OrderSuffix(None) {
                    warn!(
                        page = result.page_index + 1,
                        order_key = %row.order_key,
                        "order key has no numeric suffix"
                    );
                    warnings.push(SequenceWarning::MissingNumericSuffix {
                        page_index: result.page_index,
                        order_key: row.order_key.clone(),
                    });
                }
                pages_by_row
                    .entry(row.row_index)
                    .or_insert_with(|| (row.order_key.as_str(), Vec::new()))
                    .1
                    .push(result.page_index);
                matched.push((key, result.page_index));
            }
            MatchOutcome::Unmatched { reason } => unmatched.push(UnmatchedReportRow {
                page_index: result.page_index,
                extracted_identifier: result.identifier.tracking.clone(),
                carrier_guess: result.identifier.carrier.label().map(str::to_string),
                reason: *reason,
            }),
        }
    }

    matched.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    unmatched.sort_by_key(|r| r.page_index);

    for (row_index, (order_key, mut page_indices)) in pages_by_row {
        if page_indices.len() > 1 {
            page_indices.sort_unstable();
            warn!(
                row_index,
                order_key,
                pages = page_indices.len(),
                "reference row linked from several pages"
            );
            warnings.push(SequenceWarning::SharedReference {
                row_index,
                order_key: order_key.to_string(),
                page_indices,
            });
        }
    }

    let matched_count = matched.len();
    let ordered_page_indices: Vec<usize> = matched
        .into_iter()
        .map(|(_, page_index)| page_index)
        .chain(unmatched.iter().map(|r| r.page_index))
        .collect();

    info!(
        %strategy,
        matched = matched_count,
        unmatched = unmatched.len(),
        "sequenced pages"
    );

    SequenceOutcome {
        strategy,
        ordered_page_indices,
        unmatched,
        warnings,
        matched_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::page::ExtractedIdentifier;
    use crate::core::types::Carrier;

    fn matched(page_index: usize, order_key: &str, row_index: usize) -> MatchResult {
        MatchResult {
            page_index,
            identifier: ExtractedIdentifier::found(Carrier::Ups, format!("T{row_index}")),
            outcome: MatchOutcome::Matched {
                row: ReferenceRow::new(order_key, format!("T{row_index}"), "UPS", row_index),
            },
        }
    }

    fn unmatched(page_index: usize, reason: UnmatchedReason) -> MatchResult {
        let identifier = match reason {
            UnmatchedReason::NoIdentifier => ExtractedIdentifier::none(),
            UnmatchedReason::NotInReference => {
                ExtractedIdentifier::found(Carrier::Dhl, "6332704114")
            }
        };
        MatchResult {
            page_index,
            identifier,
            outcome: MatchOutcome::Unmatched { reason },
        }
    }

    #[test]
    fn test_excel_order() {
        let results = vec![
            matched(0, "X_02", 1),
            matched(1, "X_01", 0),
            matched(2, "X_03", 2),
        ];
        let outcome = sequence(&results, SortStrategy::ExcelOrder);
        assert_eq!(outcome.ordered_page_indices, vec![1, 0, 2]);
        assert_eq!(outcome.matched_count, 3);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_order_id_numeric_is_numeric_aware() {
        // Table order disagrees with numeric suffix order; 100 sorts after 99
        let results = vec![
            matched(0, "3501512414_ORIGINS_100", 0),
            matched(1, "3501512414_ORIGINS_99", 1),
            matched(2, "3501512414_ORIGINS_9", 2),
        ];
        let outcome = sequence(&results, SortStrategy::OrderIdNumeric);
        assert_eq!(outcome.ordered_page_indices, vec![2, 1, 0]);
    }

    #[test]
    fn test_missing_suffix_placed_first_and_flagged() {
        let results = vec![matched(0, "A_5", 0), matched(1, "ORDER_ABC", 1)];
        let outcome = sequence(&results, SortStrategy::OrderIdNumeric);
        assert_eq!(outcome.ordered_page_indices, vec![1, 0]);
        assert_eq!(
            outcome.warnings,
            vec![SequenceWarning::MissingNumericSuffix {
                page_index: 1,
                order_key: "ORDER_ABC".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_suffix_not_flagged_for_excel_order() {
        let results = vec![matched(0, "ORDER_ABC", 0)];
        let outcome = sequence(&results, SortStrategy::ExcelOrder);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_ties_broken_by_page_index() {
        let results = vec![
            matched(3, "A_7", 0),
            matched(1, "B_007", 1),
            matched(2, "C_7", 2),
        ];
        let outcome = sequence(&results, SortStrategy::OrderIdNumeric);
        assert_eq!(outcome.ordered_page_indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_unmatched_trail_in_page_order() {
        let results = vec![
            unmatched(0, UnmatchedReason::NoIdentifier),
            matched(1, "X_02", 1),
            unmatched(2, UnmatchedReason::NotInReference),
            matched(3, "X_01", 0),
        ];
        let outcome = sequence(&results, SortStrategy::ExcelOrder);
        assert_eq!(outcome.ordered_page_indices, vec![3, 1, 0, 2]);
        assert_eq!(outcome.unmatched_count(), 2);

        let first = &outcome.unmatched[0];
        assert_eq!(first.page_number(), 1);
        assert_eq!(first.reason, UnmatchedReason::NoIdentifier);
        assert_eq!(first.extracted_identifier, None);
        assert_eq!(first.carrier_guess, None);

        let second = &outcome.unmatched[1];
        assert_eq!(second.reason, UnmatchedReason::NotInReference);
        assert_eq!(second.extracted_identifier.as_deref(), Some("6332704114"));
        assert_eq!(second.carrier_guess.as_deref(), Some("DHL"));
    }

    #[test]
    fn test_shared_reference_warning() {
        let results = vec![matched(0, "X_01", 0), matched(1, "X_01", 0)];
        let outcome = sequence(&results, SortStrategy::ExcelOrder);
        assert_eq!(outcome.ordered_page_indices, vec![0, 1]);
        assert_eq!(
            outcome.warnings,
            vec![SequenceWarning::SharedReference {
                row_index: 0,
                order_key: "X_01".to_string(),
                page_indices: vec![0, 1],
            }]
        );
    }

    #[test]
    fn test_empty_results() {
        let outcome = sequence(&[], SortStrategy::OrderIdNumeric);
        assert!(outcome.ordered_page_indices.is_empty());
        assert!(outcome.unmatched.is_empty());
        assert_eq!(outcome.total_pages(), 0);
        assert!((outcome.match_rate() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_match_rate() {
        let results = vec![
            matched(0, "X_01", 0),
            matched(1, "X_02", 1),
            unmatched(2, UnmatchedReason::NoIdentifier),
        ];
        let outcome = sequence(&results, SortStrategy::ExcelOrder);
        assert!((outcome.match_rate() - 66.7).abs() < 1e-9);
    }

    #[test]
    fn test_sort_key_ordering() {
        let none = SortKey::OrderSuffix(None);
        let nine = SortKey::OrderSuffix(Some("9".to_string()));
        let ten = SortKey::OrderSuffix(Some("10".to_string()));
        assert!(none < nine);
        assert!(nine < ten);
        assert!(SortKey::RowIndex(2) < SortKey::RowIndex(10));
    }

    #[test]
    fn test_warning_display() {
        let w = SequenceWarning::MissingNumericSuffix {
            page_index: 4,
            order_key: "ORDER_ABC".to_string(),
        };
        assert_eq!(
            w.to_string(),
            "page 5: order key 'ORDER_ABC' has no numeric suffix, placed first"
        );
    }
}
