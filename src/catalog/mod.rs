//! Reference table indexing.
//!
//! The reference table is the authoritative list of expected shipments. Before
//! matching, its rows are indexed by normalized tracking identifier so each
//! label page is linked with a single hash lookup.
//!
//! ## Duplicates
//!
//! Tracking identifiers are expected to be unique within a table. When two rows
//! normalize to the same identifier the earliest row wins and the collision is
//! reported as an [`AmbiguityNotice`](index::AmbiguityNotice).
//!
//! ## Example
//!
//! ```rust
//! use label_sequencer::{ReferenceIndex, ReferenceRow};
//!
//! let rows = vec![
//!     ReferenceRow::new("3501512414_ORIGINS_99", "1ZFC25776800341731", "UPS", 0),
//!     ReferenceRow::new("3501512414_ORIGINS_98", "6332704114", "MyDHL", 1),
//! ];
//! let index = ReferenceIndex::build(&rows);
//!
//! let row = index.lookup("1Z FC2 577 68 0034 1731").unwrap();
//! assert_eq!(row.order_key, "3501512414_ORIGINS_99");
//! ```

pub mod index;
