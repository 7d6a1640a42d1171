//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the ranked listing (`EntityListing`, `ListingEntry`, `ListingMatch`)
//! - per-field value enums (`BirthdayFlag`, `Nationality`, ...)
//! - the output row and table (`CelebrityRecord`, `ResultTable`)
//! - run configuration (`CollectConfig`, `AssemblyPolicy`)

pub mod types;

pub use types::*;
