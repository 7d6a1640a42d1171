//! Celebrity Bucks JSON feed decoding and by-name lookup.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{EntityListing, ListingEntry, ListingMatch};
use crate::error::AppError;

/// Raw feed body: `{"CelebrityValues": [{name, celebId, price}, ...]}`.
#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(rename = "CelebrityValues")]
    celebrity_values: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    name: String,
    #[serde(rename = "celebId")]
    celeb_id: Value,
    price: Value,
}

impl FeedResponse {
    fn into_listing(self) -> Result<EntityListing, AppError> {
        let mut entries = Vec::with_capacity(self.celebrity_values.len());
        for raw in self.celebrity_values {
            let id = match &raw.celeb_id {
                Value::String(s) => s.trim().to_string(),
                Value::Number(n) => n.to_string(),
                other => {
                    return Err(AppError::upstream(format!(
                        "Unexpected celebId for '{}': {other}",
                        raw.name
                    )));
                }
            };
            let price = parse_price(&raw.price).ok_or_else(|| {
                AppError::upstream(format!("Unexpected price for '{}': {}", raw.name, raw.price))
            })?;
            entries.push(ListingEntry {
                name: raw.name,
                id,
                price,
            });
        }
        Ok(EntityListing::new(entries))
    }
}

fn parse_price(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            (f.fract() == 0.0 && f.is_finite()).then_some(f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Decode a feed body into the ranked listing.
pub fn parse_listing(body: &str) -> Result<EntityListing, AppError> {
    let feed: FeedResponse = serde_json::from_str(body)
        .map_err(|e| AppError::upstream(format!("Failed to parse Celebrity Bucks feed: {e}")))?;
    feed.into_listing()
}

/// Reject names that cannot identify anybody.
pub fn require_name(name: &str) -> Result<&str, AppError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::config("Celebrity name must be a non-empty string."));
    }
    Ok(trimmed)
}

/// Exact, case-sensitive scan of the listing.
///
/// A miss is an ordinary outcome (`None`), not an error.
pub fn lookup_by_name(listing: &EntityListing, name: &str) -> Option<ListingMatch> {
    listing
        .ranked()
        .find(|(_, entry)| entry.name == name)
        .map(|(rank, entry)| ListingMatch {
            rank,
            price: entry.price,
            id: entry.id.clone(),
        })
}

/// Names in rank order.
pub fn celebrity_names(listing: &EntityListing) -> Vec<String> {
    listing.entries().iter().map(|e| e.name.clone()).collect()
}
