use serde::{Deserialize, Serialize};

use crate::utils::validation::{normalize_tracking, numeric_suffix};

/// One row of the reference table: an expected shipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRow {
    /// Marketplace order key, e.g. `3501512414_ORIGINS_99`
    pub order_key: String,

    /// Tracking identifier as written in the table
    pub tracking: String,

    /// Carrier name as written in the table
    pub carrier: String,

    /// 0-based data-row position; defines the table order
    pub row_index: usize,
}

impl ReferenceRow {
    pub fn new(
        order_key: impl Into<String>,
        tracking: impl Into<String>,
        carrier: impl Into<String>,
        row_index: usize,
    ) -> Self {
        Self {
            order_key: order_key.into(),
            tracking: tracking.into(),
            carrier: carrier.into(),
            row_index,
        }
    }

    /// Tracking identifier with the same normalization the extractor applies
    #[must_use]
    pub fn normalized_tracking(&self) -> String {
        normalize_tracking(&self.tracking)
    }

    /// Trailing digits of the order key, if any
    #[must_use]
    pub fn order_suffix(&self) -> Option<&str> {
        numeric_suffix(&self.order_key)
    }
}
