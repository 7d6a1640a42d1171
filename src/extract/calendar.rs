//! Month tables and date rules shared by the extractors.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `"August"` -> 8.
pub fn month_from_name(name: &str) -> Option<u32> {
    month_index(&MONTHS, name)
}

/// `"Aug"` -> 8.
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    month_index(&MONTHS_SHORT, abbrev)
}

fn month_index(table: &[&str; 12], needle: &str) -> Option<u32> {
    table
        .iter()
        .position(|m| *m == needle)
        .map(|idx| idx as u32 + 1)
}

/// Year a birthday is placed in when checking for an upcoming one.
///
/// During the first seven days of January the following year is used.
pub fn reference_year(today: NaiveDate) -> i32 {
    if today.month() == 1 && today.day() <= 7 {
        today.year() + 1
    } else {
        today.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn early_january_resolves_to_next_year() {
        assert_eq!(reference_year(date(2025, 1, 3)), 2026);
        assert_eq!(reference_year(date(2025, 1, 7)), 2026);
    }

    #[test]
    fn rest_of_year_resolves_to_current_year() {
        assert_eq!(reference_year(date(2025, 1, 8)), 2025);
        assert_eq!(reference_year(date(2025, 1, 10)), 2025);
        assert_eq!(reference_year(date(2025, 12, 31)), 2025);
    }

    #[test]
    fn month_tables_cover_all_twelve() {
        assert_eq!(month_from_name("January"), Some(1));
        assert_eq!(month_from_name("December"), Some(12));
        assert_eq!(month_from_abbrev("Sep"), Some(9));
        assert_eq!(month_from_abbrev("Sept"), None);
        assert_eq!(month_from_name("august"), None);
    }
}
