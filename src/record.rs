//! Record assembly: one entity's listing entry plus its two pages become one
//! `CelebrityRecord`.
//!
//! The `AssemblyPolicy` decides what a failing field does:
//! - `BestEffort`: the field (or every field read from a page that could not
//!   be fetched) degrades to `None`
//! - `FailFast`: the whole record is abandoned with an error

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::data::{BiographyPage, CelebritySource, ValuationPage, lookup_by_name};
use crate::domain::{AssemblyPolicy, CelebrityRecord, EntityListing, ListingMatch};
use crate::error::AppError;
use crate::extract;

/// Fetch both pages for `name` and assemble its record.
pub fn assemble_record<S: CelebritySource + ?Sized>(
    source: &S,
    listing: &EntityListing,
    name: &str,
    policy: AssemblyPolicy,
    now: NaiveDateTime,
) -> Result<CelebrityRecord, AppError> {
    let entry = lookup_by_name(listing, name);
    if entry.is_none() && policy == AssemblyPolicy::FailFast {
        warn!(celebrity = %name, "record abandoned: not in listing");
        return Err(AppError::upstream(format!(
            "{name} not found within CelebrityBucks data set."
        )));
    }

    let valuation = match &entry {
        Some(hit) => source.fetch_valuation(&hit.id, name),
        None => Err(AppError::upstream(format!(
            "{name} not found within CelebrityBucks data set."
        ))),
    };
    let biography = source.fetch_biography(name);

    assemble_from_pages(name, entry, valuation, biography, policy, now)
}

/// Assemble a record from already-fetched (or failed) pages.
pub fn assemble_from_pages(
    name: &str,
    entry: Option<ListingMatch>,
    valuation: Result<ValuationPage, AppError>,
    biography: Result<BiographyPage, AppError>,
    policy: AssemblyPolicy,
    now: NaiveDateTime,
) -> Result<CelebrityRecord, AppError> {
    let gate = Gate { policy, name };
    let today = now.date();

    let entry = gate.settle("listing entry", entry.ok_or_else(|| "not in listing".to_string()))?;
    let valuation = gate.settle("valuation page", valuation.map_err(|e| e.to_string()))?;
    let biography = gate.settle("biography page", biography.map_err(|e| e.to_string()))?;

    let price = entry.as_ref().map(|e| e.price);

    let avg_21_day_price = valuation.as_ref().and_then(extract::avg_21_day_price);
    let ratio_21_day = gate.settle("21-day ratio", price_ratio(avg_21_day_price, price))?;

    let all_time_high_price = valuation.as_ref().and_then(extract::all_time_high_price);
    let ratio_all_time_high = gate.settle("all-time-high ratio", price_ratio(all_time_high_price, price))?;

    let days_since_all_time_high = valuation
        .as_ref()
        .and_then(|v| extract::days_since_all_time_high(v, today));

    let recommendation = match &valuation {
        Some(v) => gate.settle("recommendation", extract::recommendation(v))?,
        None => None,
    };

    let bio = biography.as_ref();

    Ok(CelebrityRecord {
        name: name.to_string(),
        rank: entry.as_ref().map(|e| e.rank),
        price,
        avg_21_day_price,
        ratio_21_day,
        all_time_high_price,
        ratio_all_time_high,
        days_since_all_time_high,
        gender: bio.and_then(extract::gender),
        age: bio.and_then(extract::age),
        upcoming_birthday: bio.and_then(|b| extract::upcoming_birthday(b, today)),
        nationality: bio.and_then(extract::us_nationality),
        living_status: bio.and_then(extract::living_status),
        recommendation,
        collected_at: now,
    })
}

/// `round(numerator / denominator, 3)`.
pub fn price_ratio(numerator: Option<i64>, denominator: Option<i64>) -> Result<f64, String> {
    let num = numerator.ok_or_else(|| "numerator is NaN".to_string())?;
    let den = denominator.ok_or_else(|| "current price is NaN".to_string())?;
    if den == 0 {
        return Err("current price is zero".to_string());
    }
    Ok(round_to(num as f64 / den as f64, 3))
}

// Rounds the exact binary value: 2001/2000 is stored just below 1.0005.
fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}

struct Gate<'a> {
    policy: AssemblyPolicy,
    name: &'a str,
}

impl Gate<'_> {
    fn settle<T>(&self, field: &str, outcome: Result<T, String>) -> Result<Option<T>, AppError> {
        match outcome {
            Ok(value) => Ok(Some(value)),
            Err(reason) => match self.policy {
                AssemblyPolicy::BestEffort => {
                    debug!(celebrity = %self.name, field, reason = %reason, "field degraded to NaN");
                    Ok(None)
                }
                AssemblyPolicy::FailFast => {
                    warn!(celebrity = %self.name, field, reason = %reason, "record abandoned");
                    Err(AppError::upstream(format!("{}: {field}: {reason}", self.name)))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::data::BioField;
    use crate::domain::{BirthdayFlag, COLUMNS, LivingStatus, Nationality, Recommendation};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 11, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn entry() -> Option<ListingMatch> {
        Some(ListingMatch {
            rank: 75,
            price: 51000,
            id: "1234".to_string(),
        })
    }

    fn valuation() -> ValuationPage {
        ValuationPage {
            panels: ["$3,000", "$40,000", "$1,721,000", "Oct 25, 2020"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            alerts: vec!["Hello".to_string(), "We say Hold".to_string()],
        }
    }

    fn biography() -> BiographyPage {
        let texts = [
            "LeBron James", "Male", "x", "Birth", "USA", "- 35 yrs", "y", "USA, Akron", "36 yrs", "z",
        ];
        let mut page = BiographyPage {
            fields: texts.iter().map(|t| BioField::plain(*t)).collect(),
        };
        page.fields[3].highlight = Some("3 November".to_string());
        page
    }

    #[test]
    fn ratio_rounds_to_three_places() {
        assert_eq!(price_ratio(Some(3000), Some(51000)), Ok(0.059));
        assert_eq!(price_ratio(Some(1721000), Some(51000)), Ok(33.745));
    }

    #[test]
    fn ratio_rounds_the_stored_quotient_not_the_decimal_tie() {
        assert_eq!(price_ratio(Some(2001), Some(2000)), Ok(1.0));
        assert_eq!(price_ratio(Some(1001), Some(2000)), Ok(0.5));
        assert_eq!(price_ratio(Some(1), Some(8000)), Ok(0.0));
    }

    #[test]
    fn ratio_fails_on_missing_or_zero_operands() {
        assert!(price_ratio(None, Some(10)).is_err());
        assert!(price_ratio(Some(10), None).is_err());
        assert!(price_ratio(Some(10), Some(0)).is_err());
    }

    #[test]
    fn full_pages_fill_every_field() {
        let rec = assemble_from_pages(
            "LeBron James",
            entry(),
            Ok(valuation()),
            Ok(biography()),
            AssemblyPolicy::FailFast,
            now(),
        )
        .unwrap();

        assert_eq!(rec.rank, Some(75));
        assert_eq!(rec.price, Some(51000));
        assert_eq!(rec.avg_21_day_price, Some(3000));
        assert_eq!(rec.ratio_21_day, Some(0.059));
        assert_eq!(rec.all_time_high_price, Some(1721000));
        assert_eq!(rec.days_since_all_time_high, Some(7));
        assert_eq!(rec.gender.as_deref(), Some("Male"));
        assert_eq!(rec.age, Some(35));
        assert_eq!(rec.upcoming_birthday, Some(BirthdayFlag::Upcoming));
        assert_eq!(rec.nationality, Some(Nationality::Us));
        assert_eq!(rec.living_status, Some(LivingStatus::Alive));
        assert_eq!(rec.recommendation, Some(Recommendation::Hold));
        assert_eq!(rec.collected_at, now());
        assert_eq!(rec.to_row().len(), COLUMNS.len());
    }

    #[test]
    fn best_effort_isolates_failed_fields() {
        let mut page = valuation();
        page.panels[0] = "n/a".to_string();
        page.alerts.truncate(1);

        let rec = assemble_from_pages(
            "LeBron James",
            entry(),
            Ok(page),
            Ok(biography()),
            AssemblyPolicy::BestEffort,
            now(),
        )
        .unwrap();

        assert_eq!(rec.avg_21_day_price, None);
        assert_eq!(rec.ratio_21_day, None);
        assert_eq!(rec.recommendation, None);
        assert_eq!(rec.all_time_high_price, Some(1721000));
        assert_eq!(rec.ratio_all_time_high, Some(33.745));
        assert_eq!(rec.gender.as_deref(), Some("Male"));
    }

    #[test]
    fn best_effort_survives_missing_pages_and_entry() {
        let rec = assemble_from_pages(
            "Nobody",
            None,
            Err(AppError::upstream("no id")),
            Err(AppError::upstream("timeout")),
            AssemblyPolicy::BestEffort,
            now(),
        )
        .unwrap();

        assert_eq!(rec.rank, None);
        assert_eq!(rec.price, None);
        assert_eq!(rec.gender, None);
        assert_eq!(rec.recommendation, None);
        assert_eq!(rec.to_row().len(), 15);
    }

    struct CountingSource {
        biography_fetches: std::sync::atomic::AtomicUsize,
    }

    impl CelebritySource for CountingSource {
        fn fetch_listing(&self) -> Result<EntityListing, AppError> {
            Ok(EntityListing::default())
        }

        fn fetch_valuation(&self, _id: &str, _name: &str) -> Result<ValuationPage, AppError> {
            Ok(valuation())
        }

        fn fetch_biography(&self, _name: &str) -> Result<BiographyPage, AppError> {
            self.biography_fetches
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            Ok(biography())
        }
    }

    #[test]
    fn fail_fast_skips_fetches_for_unlisted_names() {
        let source = CountingSource {
            biography_fetches: Default::default(),
        };
        let listing = EntityListing::default();

        let err = assemble_record(&source, &listing, "Nobody", AssemblyPolicy::FailFast, now()).unwrap_err();
        assert!(err.message().contains("not found within CelebrityBucks"));
        assert_eq!(source.biography_fetches.load(std::sync::atomic::Ordering::SeqCst), 0);

        let rec = assemble_record(&source, &listing, "Nobody", AssemblyPolicy::BestEffort, now()).unwrap();
        assert_eq!(rec.rank, None);
        assert_eq!(rec.gender.as_deref(), Some("Male"));
        assert_eq!(source.biography_fetches.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn fail_fast_abandons_on_first_failure() {
        let mut page = valuation();
        page.alerts.truncate(1);
        let err = assemble_from_pages(
            "LeBron James",
            entry(),
            Ok(page),
            Ok(biography()),
            AssemblyPolicy::FailFast,
            now(),
        )
        .unwrap_err();
        assert!(err.message().contains("recommendation"));

        let missing_page = assemble_from_pages(
            "LeBron James",
            entry(),
            Ok(valuation()),
            Err(AppError::upstream("timeout")),
            AssemblyPolicy::FailFast,
            now(),
        );
        assert!(missing_page.is_err());
    }
}
