//! Core data types for label reordering.
//!
//! - [`Page`]: One label page with its extracted text
//! - [`ExtractedIdentifier`]: Carrier and normalized tracking found on a page
//! - [`ReferenceRow`]: One expected shipment from the reference table
//! - [`Carrier`], [`SortStrategy`], [`UnmatchedReason`]: Classification types
//!
//! ## Tracking normalization
//!
//! Labels print tracking identifiers in visually segmented groups while the
//! reference table usually stores the compact form:
//!
//! | Label text               | Reference table     |
//! |--------------------------|---------------------|
//! | `1Z FC2 577 68 0034 1731`| `1ZFC25776800341731`|
//! | `8878 9864 4283`         | `887898644283`      |
//! | `63 3270 4114`           | `6332704114`        |
//!
//! Both sides go through [`normalize_tracking`](crate::utils::validation::normalize_tracking)
//! before they are compared.

pub mod page;
pub mod reference;
pub mod types;
