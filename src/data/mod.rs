//! Source clients: the valuation feed plus the per-entity valuation and
//! biography pages.

pub mod feed;
pub mod pages;
pub mod source;
pub mod throttle;

pub use feed::{celebrity_names, lookup_by_name, parse_listing, require_name};
pub use pages::{BioField, BiographyPage, ValuationPage};
pub use source::{CelebritySource, HttpSource, SourceConfig};
pub use throttle::Throttle;
