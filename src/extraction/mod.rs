//! Tracking-identifier extraction from label page text.
//!
//! Each supported carrier is a [`CarrierRule`]. The [`Extractor`] tries the
//! rules in a fixed priority order (UPS, FedEx, DHL) and stops at the first
//! rule whose pattern occurs and whose capture passes validation:
//!
//! | Carrier | Label text                      | Identifier          |
//! |---------|---------------------------------|---------------------|
//! | UPS     | `TRACKING #: 1Z FC2 577 68 0034 1731` | `1ZFC25776800341731` |
//! | FedEx   | `TRK# [0881] 8878 9864 4283`    | `887898644283`      |
//! | DHL     | `WAYBILL 63 3270 4114`          | `6332704114`        |
//!
//! A page where no rule matches yields [`Carrier::Unknown`](crate::core::types::Carrier::Unknown) with no identifier.
//!
//! ## Example
//!
//! ```rust
//! use label_sequencer::extraction::Extractor;
//! use label_sequencer::Carrier;
//!
//! let extractor = Extractor::default();
//! let found = extractor.extract("TRK# [0881] 8878 9864 4283");
//! assert_eq!(found.carrier, Carrier::Fedex);
//! assert_eq!(found.tracking.as_deref(), Some("887898644283"));
//! ```

pub mod rules;

pub use rules::CarrierRule;

use crate::core::page::ExtractedIdentifier;

/// Default minimum length of an accepted identifier
pub const DEFAULT_MIN_TRACKING_LENGTH: usize = 10;

/// Runs an ordered list of carrier rules over page text
pub struct Extractor {
    rules: Vec<Box<dyn CarrierRule>>,
    min_length: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TRACKING_LENGTH)
    }
}

impl Extractor {
    /// Create an extractor with the built-in rules
    #[must_use]
    pub fn new(min_length: usize) -> Self {
        Self::with_rules(rules::default_rules(), min_length)
    }

    /// Create an extractor with a custom rule list, tried in the given order
    #[must_use]
    pub fn with_rules(rules: Vec<Box<dyn CarrierRule>>, min_length: usize) -> Self {
        Self { rules, min_length }
    }

    /// Extract the tracking identifier from one page's text
    #[must_use]
    pub fn extract(&self, text: &str) -> ExtractedIdentifier {
        for rule in &self.rules {
            if let Some(tracking) = rule.try_extract(text) {
                if rule.accepts(&tracking, self.min_length) {
                    return ExtractedIdentifier::found(rule.carrier(), tracking);
                }
            }
        }
        ExtractedIdentifier::none()
    }
}

/// Extract with the default rules and minimum length
#[must_use]
pub fn extract(page_text: &str) -> ExtractedIdentifier {
    Extractor::default().extract(page_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Carrier;

    #[test]
    fn test_canonical_examples() {
        let ups = extract("TRACKING #: 1Z FC2 577 68 0034 1731");
        assert_eq!(ups.carrier, Carrier::Ups);
        assert_eq!(ups.tracking.as_deref(), Some("1ZFC25776800341731"));

        let fedex = extract("TRK# [0881] 8878 9864 4283");
        assert_eq!(fedex.carrier, Carrier::Fedex);
        assert_eq!(fedex.tracking.as_deref(), Some("887898644283"));

        let dhl = extract("WAYBILL 63 3270 4114");
        assert_eq!(dhl.carrier, Carrier::Dhl);
        assert_eq!(dhl.tracking.as_deref(), Some("6332704114"));
    }

    #[test]
    fn test_ups_number_below_label() {
        let found = extract("UPS GROUND\nTRACKING #:\n1Z FC2 577 68 0034 1731");
        assert_eq!(found.carrier, Carrier::Ups);
        assert_eq!(found.tracking.as_deref(), Some("1ZFC25776800341731"));
    }

    #[test]
    fn test_no_pattern_is_unknown() {
        let found = extract("INVOICE\nTotal: 42.00 EUR");
        assert_eq!(found, ExtractedIdentifier::none());
        assert!(!found.is_found());
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(extract(""), ExtractedIdentifier::none());
    }

    #[test]
    fn test_priority_ups_before_dhl() {
        let text = "WAYBILL 63 3270 4114\nTRACKING #: 1Z FC2 577 68 0034 1731";
        let found = extract(text);
        assert_eq!(found.carrier, Carrier::Ups);
    }

    #[test]
    fn test_rejected_capture_falls_through() {
        // UPS capture is too short to be valid; the DHL waybill still counts
        let text = "TRACKING #: 1Z12\nWAYBILL 63 3270 4114";
        let found = extract(text);
        assert_eq!(found.carrier, Carrier::Dhl);
        assert_eq!(found.tracking.as_deref(), Some("6332704114"));
    }

    #[test]
    fn test_idempotent() {
        let text = "TRK# [0881] 8878 9864 4283";
        assert_eq!(extract(text), extract(text));
    }

    #[test]
    fn test_custom_min_length() {
        let extractor = Extractor::new(14);
        assert!(!extractor.extract("WAYBILL 63 3270 4114").is_found());
        assert!(extractor.extract("TRK# 8878 9864 4283 1234").is_found());
    }

    #[test]
    fn test_priority_fedex_before_dhl() {
        let text = "WAYBILL 63 3270 4114\nTRK# [0881] 8878 9864 4283";
        assert_eq!(extract(text).carrier, Carrier::Fedex);
    }
}
