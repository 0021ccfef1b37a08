use serde::{Deserialize, Serialize};

use crate::core::types::Carrier;

/// One label page as handed over by the document layer: its position in the
/// original document and the text extracted from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 0-based position in the original document
    pub index: usize,

    /// Raw page text
    pub text: String,
}

impl Page {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// 1-based page number as shown to users
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Result of running the carrier rules over one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedIdentifier {
    pub carrier: Carrier,

    /// Normalized tracking identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<String>,
}

impl ExtractedIdentifier {
    pub fn found(carrier: Carrier, tracking: impl Into<String>) -> Self {
        Self {
            carrier,
            tracking: Some(tracking.into()),
        }
    }

    #[must_use]
    pub fn none() -> Self {
        Self {
            carrier: Carrier::Unknown,
            tracking: None,
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        self.tracking.is_some()
    }
}
