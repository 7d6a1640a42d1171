//! Shared domain types.
//!
//! These types are kept small and free of I/O so they can be:
//!
//! - built from live feeds and pages during a collection run
//! - built from synthetic fixtures in tests
//! - written out as rows of the exported table

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;
use clap::ValueEnum;

/// One ranked entry of the valuation feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub id: String,
    /// Current price in game currency units.
    pub price: i64,
}

/// The ranked entity list, in feed order (position + 1 = rank).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityListing {
    entries: Vec<ListingEntry>,
}

impl EntityListing {
    pub fn new(entries: Vec<ListingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(rank, entry)` pairs with 1-based ranks.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &ListingEntry)> {
        self.entries.iter().enumerate().map(|(idx, e)| (idx + 1, e))
    }

    /// Keep only the top `n` ranked entries.
    pub fn truncated(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }
}

/// Result of a successful by-name lookup in the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingMatch {
    pub rank: usize,
    pub price: i64,
    pub id: String,
}

/// Whether a birthday falls within the next seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthdayFlag {
    Upcoming,
    NoUpcoming,
}

impl BirthdayFlag {
    pub fn label(self) -> &'static str {
        match self {
            BirthdayFlag::Upcoming => "Upcoming birthday",
            BirthdayFlag::NoUpcoming => "No upcoming birthday",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nationality {
    Us,
    Foreign,
}

impl Nationality {
    pub fn label(self) -> &'static str {
        match self {
            Nationality::Us => "U.S. national",
            Nationality::Foreign => "Foreign to U.S.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LivingStatus {
    Alive,
    Dead,
}

impl LivingStatus {
    pub fn label(self) -> &'static str {
        match self {
            LivingStatus::Alive => "Alive",
            LivingStatus::Dead => "Dead",
        }
    }
}

/// The valuation site's own trading advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    Buy,
    Hold,
    Sell,
}

impl Recommendation {
    pub fn label(self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "Buy" => Some(Recommendation::Buy),
            "Hold" => Some(Recommendation::Hold),
            "Sell" => Some(Recommendation::Sell),
            _ => None,
        }
    }
}

/// How the record assembler reacts to a failing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssemblyPolicy {
    /// Degrade the failing field to NaN and keep going.
    BestEffort,
    /// Abandon the whole record on the first failure.
    FailFast,
}

/// One output row.
///
/// `None` is the NaN sentinel for every optional field; `rank`/`price` are
/// `None` only when the entity is missing from the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct CelebrityRecord {
    pub name: String,
    pub rank: Option<usize>,
    pub price: Option<i64>,
    pub avg_21_day_price: Option<i64>,
    pub ratio_21_day: Option<f64>,
    pub all_time_high_price: Option<i64>,
    pub ratio_all_time_high: Option<f64>,
    pub days_since_all_time_high: Option<i64>,
    pub gender: Option<String>,
    pub age: Option<i64>,
    pub upcoming_birthday: Option<BirthdayFlag>,
    pub nationality: Option<Nationality>,
    pub living_status: Option<LivingStatus>,
    pub recommendation: Option<Recommendation>,
    pub collected_at: NaiveDateTime,
}

/// Fixed export column order.
pub const COLUMNS: [&str; 15] = [
    "Celebrity",
    "Current Ranking",
    "Current Price",
    "Avg. 21-Day Price",
    "Avg. 21-Day Price/Current Price",
    "All-Time High Price",
    "All-Time High Price/Current Price",
    "Days Since All-Time High Price",
    "Gender",
    "Age",
    "Upcoming Birthday",
    "U.S. Nationality",
    "Living Status",
    "Celebrity Bucks Recommendation",
    "Last Update",
];

/// Text written for any field that could not be determined.
pub const NAN: &str = "NaN";

impl CelebrityRecord {
    /// Human-readable stand-in for a listing miss.
    pub fn not_found_message(&self) -> String {
        format!("{} not found within CelebrityBucks data set.", self.name)
    }

    /// Render the record as one row of cells in `COLUMNS` order.
    pub fn to_row(&self) -> [String; 15] {
        let not_found = self.not_found_message();
        [
            self.name.clone(),
            self.rank.map(|r| r.to_string()).unwrap_or_else(|| not_found.clone()),
            self.price.map(|p| p.to_string()).unwrap_or(not_found),
            cell(self.avg_21_day_price),
            cell(self.ratio_21_day),
            cell(self.all_time_high_price),
            cell(self.ratio_all_time_high),
            cell(self.days_since_all_time_high),
            self.gender.clone().unwrap_or_else(|| NAN.to_string()),
            cell(self.age),
            label_cell(self.upcoming_birthday.map(BirthdayFlag::label)),
            label_cell(self.nationality.map(Nationality::label)),
            label_cell(self.living_status.map(LivingStatus::label)),
            label_cell(self.recommendation.map(Recommendation::label)),
            self.collected_at.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        ]
    }
}

fn cell<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| NAN.to_string())
}

fn label_cell(label: Option<&'static str>) -> String {
    label.unwrap_or(NAN).to_string()
}

/// The accumulated rows of one collection run, in listing order.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    pub rows: Vec<CelebrityRecord>,
}

impl ResultTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A full collection run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct CollectConfig {
    /// Directory the timestamped CSV is written into.
    pub out_dir: PathBuf,
    /// Worker threads used for per-entity fetches (1 = strictly sequential).
    pub workers: usize,
    /// Minimum spacing between request starts against one host.
    pub min_interval: Duration,
    pub policy: AssemblyPolicy,
    /// Only collect the top N ranked entities.
    pub limit: Option<usize>,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("data"),
            workers: 1,
            min_interval: Duration::from_millis(1000),
            policy: AssemblyPolicy::BestEffort,
            limit: None,
        }
    }
}
