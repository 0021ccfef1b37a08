//! Centralized normalization and validation helpers.

use std::cmp::Ordering;

/// Maximum number of pages accepted from a single document (DOS protection)
pub const MAX_PAGES: usize = 10_000;

/// Maximum number of data rows accepted from a reference table
pub const MAX_REFERENCE_ROWS: usize = 100_000;

/// Normalize a tracking identifier for comparison.
///
/// Keeps ASCII letters and digits only, uppercased, so that segmented label
/// text and compact table values compare equal.
///
/// # Examples
///
/// ```
/// use label_sequencer::utils::validation::normalize_tracking;
///
/// assert_eq!(normalize_tracking("1Z FC2 577 68 0034 1731"), "1ZFC25776800341731");
/// assert_eq!(normalize_tracking("63-3270-4114"), "6332704114");
/// assert_eq!(normalize_tracking("abc 123"), "ABC123");
/// ```
#[must_use]
pub fn normalize_tracking(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Trailing run of ASCII digits in an order key.
///
/// # Examples
///
/// ```
/// use label_sequencer::utils::validation::numeric_suffix;
///
/// assert_eq!(numeric_suffix("3501512414_ORIGINS_99"), Some("99"));
/// assert_eq!(numeric_suffix("ORDER123"), Some("123"));
/// assert_eq!(numeric_suffix("ORDER_ABC"), None);
/// ```
#[must_use]
pub fn numeric_suffix(order_key: &str) -> Option<&str> {
    let trimmed = order_key.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    Some(&trimmed[start..])
}

/// Compare two digit strings by numeric value without parsing them.
///
/// Leading zeros are ignored, so `"007"` equals `"7"` and `"100"` sorts after `"99"`
/// regardless of how many digits either side carries.
#[must_use]
pub fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Heuristic for Italian phone numbers that share the shape of a waybill.
///
/// Mobile numbers start with `3` (10 digits), optionally behind the `39`
/// country prefix (12-13 digits).
#[must_use]
pub fn is_phone_number(number: &str) -> bool {
    if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    if number.starts_with("39") && matches!(number.len(), 12 | 13) && number[2..].starts_with('3')
    {
        return true;
    }

    number.starts_with('3') && number.len() == 10
}

/// Check if adding another page would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new page.
#[must_use]
pub fn check_page_limit(count: usize) -> Option<String> {
    if count >= MAX_PAGES {
        Some(format!(
            "Too many pages: adding another would exceed maximum of {MAX_PAGES}"
        ))
    } else {
        None
    }
}

/// Check if adding another reference row would exceed the maximum allowed.
#[must_use]
pub fn check_row_limit(count: usize) -> Option<String> {
    if count >= MAX_REFERENCE_ROWS {
        Some(format!(
            "Too many reference rows: adding another would exceed maximum of {MAX_REFERENCE_ROWS}"
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tracking_removes_spaces() {
        assert_eq!(normalize_tracking("63 3270 2261"), "6332702261");
        assert_eq!(normalize_tracking("1Z FC2 577 68"), "1ZFC257768");
    }

    #[test]
    fn test_normalize_tracking_strips_separators() {
        assert_eq!(normalize_tracking("\t1z-fc2.577/68\n"), "1ZFC257768");
        assert_eq!(normalize_tracking(""), "");
        assert_eq!(normalize_tracking(" - "), "");
    }

    #[test]
    fn test_normalize_tracking_idempotent() {
        let samples = [
            "1Z FC2 577 68 0034 1731",
            "TRK 8878-9864-4283",
            "  waybill  ",
            "ÄB 12",
            "",
        ];
        for s in samples {
            let once = normalize_tracking(s);
            assert_eq!(normalize_tracking(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(numeric_suffix("A_B_C_D_123"), Some("123"));
        assert_eq!(numeric_suffix("3501512414_BOBBI BROWN_100"), Some("100"));
        assert_eq!(numeric_suffix("12345"), Some("12345"));
        assert_eq!(numeric_suffix("ORDER_7 "), Some("7"));
        assert_eq!(numeric_suffix(""), None);
        assert_eq!(numeric_suffix("A_12B"), None);
    }

    #[test]
    fn test_compare_numeric() {
        assert_eq!(compare_numeric("99", "100"), Ordering::Less);
        assert_eq!(compare_numeric("007", "7"), Ordering::Equal);
        assert_eq!(compare_numeric("20", "3"), Ordering::Greater);
        assert_eq!(
            compare_numeric("123456789012345678901234567890", "99"),
            Ordering::Greater
        );
        assert_eq!(compare_numeric("0", "000"), Ordering::Equal);
    }

    #[test]
    fn test_is_phone_number() {
        assert!(is_phone_number("3331234567"));
        assert!(is_phone_number("393331234567"));
        assert!(!is_phone_number("6332704114"));
        assert!(!is_phone_number("887898644283"));
        assert!(!is_phone_number("1ZFC2577680034"));
    }

    #[test]
    fn test_limits() {
        assert!(check_page_limit(0).is_none());
        assert!(check_page_limit(MAX_PAGES).is_some());
        assert!(check_row_limit(MAX_REFERENCE_ROWS - 1).is_none());
        assert!(check_row_limit(MAX_REFERENCE_ROWS).is_some());
    }
}
