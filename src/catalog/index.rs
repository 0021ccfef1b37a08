use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::reference::ReferenceRow;
use crate::utils::validation::normalize_tracking;

/// Two or more reference rows normalize to the same tracking identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmbiguityNotice {
    /// Normalized tracking identifier shared by the rows
    pub tracking: String,

    /// Row that stays linked to the identifier (lowest row index)
    pub row_index_kept: usize,

    /// Rows ignored for lookups, ascending
    pub row_indexes_dropped: Vec<usize>,
}

/// Lookup from normalized tracking identifier to reference row
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    by_tracking: HashMap<String, ReferenceRow>,
    ambiguities: Vec<AmbiguityNotice>,
}

impl ReferenceIndex {
    /// Build the index from reference rows in table order.
    ///
    /// On collision the row with the lowest `row_index` wins and the others are
    /// recorded as an [`AmbiguityNotice`]. Rows whose tracking normalizes to an
    /// empty string cannot be looked up; they are logged and left out.
    #[must_use]
    pub fn build(rows: &[ReferenceRow]) -> Self {
        let mut by_tracking: HashMap<String, ReferenceRow> = HashMap::with_capacity(rows.len());
        let mut dropped: HashMap<String, Vec<usize>> = HashMap::new();
        let mut skipped = 0usize;

        for row in rows {
            let key = row.normalized_tracking();
            if key.is_empty() {
                warn!(
                    row_index = row.row_index,
                    order_key = %row.order_key,
                    "reference row has no usable tracking identifier"
                );
                skipped += 1;
                continue;
            }

            match by_tracking.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(row.clone());
                }
                Entry::Occupied(mut slot) => {
                    let loser = if row.row_index < slot.get().row_index {
                        slot.insert(row.clone()).row_index
                    } else {
                        row.row_index
                    };
                    dropped.entry(slot.key().clone()).or_default().push(loser);
                }
            }
        }

        let mut ambiguities: Vec<AmbiguityNotice> = dropped
            .into_iter()
            .map(|(tracking, mut row_indexes_dropped)| {
                row_indexes_dropped.sort_unstable();
                let row_index_kept = by_tracking[&tracking].row_index;
                AmbiguityNotice {
                    tracking,
                    row_index_kept,
                    row_indexes_dropped,
                }
            })
            .collect();
        ambiguities.sort_by(|a, b| {
            a.row_index_kept
                .cmp(&b.row_index_kept)
                .then_with(|| a.tracking.cmp(&b.tracking))
        });

        for notice in &ambiguities {
            warn!(
                tracking = %notice.tracking,
                kept = notice.row_index_kept,
                dropped = ?notice.row_indexes_dropped,
                "duplicate tracking identifier in reference table"
            );
        }

        info!(
            rows = rows.len(),
            indexed = by_tracking.len(),
            ambiguous = ambiguities.len(),
            skipped,
            "built reference index"
        );

        Self {
            by_tracking,
            ambiguities,
        }
    }

    /// Find the row for a tracking identifier; the query is normalized first
    #[must_use]
    pub fn lookup(&self, tracking: &str) -> Option<&ReferenceRow> {
        self.by_tracking.get(&normalize_tracking(tracking))
    }

    /// Duplicate identifiers found while building, ordered by kept row
    #[must_use]
    pub fn ambiguities(&self) -> &[AmbiguityNotice] {
        &self.ambiguities
    }

    /// Number of distinct identifiers in the index
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_tracking.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tracking.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order: &str, tracking: &str, idx: usize) -> ReferenceRow {
        ReferenceRow::new(order, tracking, "UPS", idx)
    }

    #[test]
    fn test_lookup_normalizes_both_sides() {
        let index = ReferenceIndex::build(&[row("A_1", "1z fc2 577 68 0034 1731", 0)]);
        let found = index.lookup("1Z FC2 577 68 0034 1731").unwrap();
        assert_eq!(found.order_key, "A_1");
        assert!(index.lookup("1ZFC25776800341731").is_some());
        assert!(index.lookup("1ZFC2577680034").is_none());
    }

    #[test]
    fn test_duplicate_keeps_first_row() {
        let rows = vec![
            row("A_1", "6332704114", 0),
            row("A_2", "887898644283", 1),
            row("A_3", "63 3270 4114", 2),
            row("A_4", "633270-4114", 3),
        ];
        let index = ReferenceIndex::build(&rows);

        assert_eq!(index.len(), 2);
        assert_eq!(index.lookup("6332704114").unwrap().order_key, "A_1");
        assert_eq!(
            index.ambiguities(),
            &[AmbiguityNotice {
                tracking: "6332704114".to_string(),
                row_index_kept: 0,
                row_indexes_dropped: vec![2, 3],
            }]
        );
    }

    #[test]
    fn test_duplicate_prefers_lowest_row_index() {
        let rows = vec![row("LATE", "ABC1234567", 5), row("EARLY", "abc1234567", 1)];
        let index = ReferenceIndex::build(&rows);

        assert_eq!(index.lookup("ABC1234567").unwrap().order_key, "EARLY");
        assert_eq!(index.ambiguities()[0].row_index_kept, 1);
        assert_eq!(index.ambiguities()[0].row_indexes_dropped, vec![5]);
    }

    #[test]
    fn test_empty_tracking_skipped() {
        let rows = vec![row("A_1", "  ", 0), row("A_2", "6332704114", 1)];
        let index = ReferenceIndex::build(&rows);

        assert_eq!(index.len(), 1);
        assert!(index.lookup("").is_none());
        assert!(index.ambiguities().is_empty());
    }

    #[test]
    fn test_empty_table() {
        let index = ReferenceIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.ambiguities().is_empty());
        assert!(index.lookup("6332704114").is_none());
    }
}
