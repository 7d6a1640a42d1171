//! Terminal formatting for single lookups and the ranked listing.
//!
//! Formatting lives here so the pipeline and extractors stay free of output
//! concerns.

use crate::domain::{COLUMNS, CelebrityRecord, EntityListing};

/// Labelled block, one column per line, in export column order.
pub fn format_record(record: &CelebrityRecord) -> String {
    let width = COLUMNS.iter().map(|c| c.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, value) in COLUMNS.iter().zip(record.to_row()) {
        out.push_str(&format!("{label:<width$}  {value}\n"));
    }
    out
}

/// Rank, name, price and id for the top `top` entries (all when `None`).
pub fn format_listing(listing: &EntityListing, top: Option<usize>) -> String {
    let shown = top.unwrap_or(listing.len()).min(listing.len());
    let mut out = String::new();
    out.push_str(&format!("{:>5}  {:<32} {:>12}  {}\n", "Rank", "Celebrity", "Price", "Id"));
    for (rank, entry) in listing.ranked().take(shown) {
        out.push_str(&format!(
            "{:>5}  {:<32} {:>12}  {}\n",
            rank, entry.name, entry.price, entry.id
        ));
    }
    if shown < listing.len() {
        out.push_str(&format!("... {} more\n", listing.len() - shown));
    }
    out
}
