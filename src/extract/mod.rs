//! Field extractors.
//!
//! Each extractor reads one semantic field from a page view and is total:
//! anything it cannot locate or parse comes back as `None` (exported as
//! `NaN`). The only exception is [`valuation::recommendation`], whose failure
//! is reported to the caller so the assembly policy can decide.

pub mod biography;
pub mod calendar;
pub mod valuation;

pub use biography::{age, gender, living_status, upcoming_birthday, us_nationality};
pub use valuation::{all_time_high_price, avg_21_day_price, days_since_all_time_high, recommendation};

/// Up to `len` characters of `s` starting at character `start`.
fn char_slice(s: &str, start: usize, len: usize) -> String {
    s.chars().skip(start).take(len).collect()
}

/// Lenient integer parse: surrounding whitespace is ignored.
fn parse_int(s: &str) -> Option<i64> {
    s.trim().parse::<i64>().ok()
}
