use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::Carrier;
use crate::utils::validation::{is_phone_number, normalize_tracking};

/// Length of a UPS `1Z` identifier once normalized
const UPS_1Z_LENGTH: usize = 18;

// The identifier may start on the line after the label. Tokens are separated
// by a single space, tab or dash; a double space or a line break ends it.
static RE_UPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)TRACKING\s*#\s*:?\s*([A-Z0-9]+(?:[ \t-][A-Z0-9]+)*)")
        .expect("valid UPS tracking regex")
});
static RE_FEDEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)TRK#\s*(?:\[\d*\]\s*)?(\d+(?:[ \t]\d+)*)").expect("valid FedEx TRK regex")
});
static RE_DHL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)WAYBILL\s*:?\s*(\d+(?:[ \t]\d+)*)").expect("valid DHL waybill regex")
});

/// A carrier-specific recognizer for tracking identifiers in page text.
pub trait CarrierRule: Send + Sync {
    /// Carrier assigned to identifiers this rule finds
    fn carrier(&self) -> Carrier;

    /// Return the normalized identifier if the rule's pattern occurs in `text`
    fn try_extract(&self, text: &str) -> Option<String>;

    /// Whether a normalized identifier is plausible for this carrier
    fn accepts(&self, tracking: &str, min_length: usize) -> bool {
        tracking.len() >= min_length && !is_phone_number(tracking)
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    let raw = re.captures(text)?.get(1)?.as_str();
    let tracking = normalize_tracking(raw);
    if tracking.is_empty() {
        None
    } else {
        Some(tracking)
    }
}

/// `TRACKING #: 1Z FC2 577 68 0034 1731`
#[derive(Debug, Default, Clone, Copy)]
pub struct UpsRule;

impl CarrierRule for UpsRule {
    fn carrier(&self) -> Carrier {
        Carrier::Ups
    }

    fn try_extract(&self, text: &str) -> Option<String> {
        let mut tracking = first_capture(&RE_UPS, text)?;
        // Words after a single space run into the capture; a 1Z number ends at its fixed length
        if tracking.starts_with("1Z") {
            tracking.truncate(UPS_1Z_LENGTH);
        }
        Some(tracking)
    }

    fn accepts(&self, tracking: &str, min_length: usize) -> bool {
        if tracking.starts_with("1Z") {
            return tracking.len() >= UPS_1Z_LENGTH;
        }
        tracking.len() >= min_length && !is_phone_number(tracking)
    }
}

/// `TRK# [0881] 8878 9864 4283`; the bracketed form code is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FedexRule;

impl CarrierRule for FedexRule {
    fn carrier(&self) -> Carrier {
        Carrier::Fedex
    }

    fn try_extract(&self, text: &str) -> Option<String> {
        first_capture(&RE_FEDEX, text)
    }
}

/// `WAYBILL 63 3270 4114`
#[derive(Debug, Default, Clone, Copy)]
pub struct DhlRule;

impl CarrierRule for DhlRule {
    fn carrier(&self) -> Carrier {
        Carrier::Dhl
    }

    fn try_extract(&self, text: &str) -> Option<String> {
        first_capture(&RE_DHL, text)
    }
}

/// Rules in priority order: UPS, FedEx, DHL
#[must_use]
pub fn default_rules() -> Vec<Box<dyn CarrierRule>> {
    vec![Box::new(UpsRule), Box::new(FedexRule), Box::new(DhlRule)]
}
