use serde::{Deserialize, Serialize};

/// Carrier recognized from a label page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Carrier {
    #[serde(rename = "DHL")]
    Dhl,
    #[serde(rename = "FedEx")]
    Fedex,
    #[serde(rename = "UPS")]
    Ups,
    Unknown,
}

impl Carrier {
    /// Name as printed in reports, `None` for [`Carrier::Unknown`]
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::Dhl => Some("DHL"),
            Self::Fedex => Some("FedEx"),
            Self::Ups => Some("UPS"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label().unwrap_or("Unknown"))
    }
}

/// How matched pages are ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Follow the reference table's row order
    #[default]
    ExcelOrder,
    /// Order by the trailing numeric suffix of the order key
    #[value(name = "order-id")]
    OrderIdNumeric,
}

impl std::fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExcelOrder => write!(f, "excel-order"),
            Self::OrderIdNumeric => write!(f, "order-id"),
        }
    }
}

/// Why a page could not be linked to a reference row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// None of the carrier rules recognized an identifier on the page
    NoIdentifier,
    /// An identifier was recognized but no reference row carries it
    NotInReference,
}

impl std::fmt::Display for UnmatchedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoIdentifier => write!(f, "no identifier recognized"),
            Self::NotInReference => write!(f, "identifier not in reference"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_labels() {
        assert_eq!(Carrier::Ups.label(), Some("UPS"));
        assert_eq!(Carrier::Fedex.to_string(), "FedEx");
        assert_eq!(Carrier::Unknown.label(), None);
    }

    #[test]
    fn test_strategy_serde_names() {
        let json = serde_json::to_string(&SortStrategy::OrderIdNumeric).unwrap();
        assert_eq!(json, "\"order_id_numeric\"");
        let parsed: SortStrategy = serde_json::from_str("\"excel_order\"").unwrap();
        assert_eq!(parsed, SortStrategy::ExcelOrder);
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(
            UnmatchedReason::NotInReference.to_string(),
            "identifier not in reference"
        );
        assert_eq!(
            UnmatchedReason::NoIdentifier.to_string(),
            "no identifier recognized"
        );
    }
}
