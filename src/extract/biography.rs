//! Extractors over the biography page's ordered `.fl` fields.
//!
//! Positions are fixed by the upstream layout; every lookup is bounds-checked
//! and a miss yields `None`.

use chrono::NaiveDate;

use crate::data::BiographyPage;
use crate::domain::{BirthdayFlag, LivingStatus, Nationality};
use crate::extract::calendar::{month_from_name, reference_year};
use crate::extract::{char_slice, parse_int};

/// Shown on the search page the site falls back to for unknown names.
const NO_RESULTS_MARKER: &str = "Seek celebrities by planet positions";
const DEATH_LABEL: &str = "Death:";

pub fn gender(page: &BiographyPage) -> Option<String> {
    page.field(1).map(|f| f.text.clone())
}

/// Age in whole years.
///
/// Primary: three characters at offset 2 of the 5th-from-last field.
/// Fallback: three characters at offset 0 of the 3rd-from-last field.
pub fn age(page: &BiographyPage) -> Option<i64> {
    let primary = page
        .field_from_end(5)
        .and_then(|f| parse_int(&char_slice(&f.text, 2, 3)));
    primary.or_else(|| {
        page.field_from_end(3)
            .and_then(|f| parse_int(&char_slice(&f.text, 0, 3)))
    })
}

/// Whether the birthday falls within `[today, today + 7 days]`.
///
/// The birth date is read from the highlighted part of the 4th field
/// (`"<day> <Month>"`) and placed in [`reference_year`].
pub fn upcoming_birthday(page: &BiographyPage, today: NaiveDate) -> Option<BirthdayFlag> {
    let highlight = page.field(3)?.highlight.as_deref()?;
    let mut tokens = highlight.split_whitespace();
    let day = tokens.next()?.parse::<u32>().ok()?;
    let month = month_from_name(tokens.next()?)?;

    let birthday = NaiveDate::from_ymd_opt(reference_year(today), month, day)?;
    let delta = (birthday - today).num_days();

    Some(if (0..=7).contains(&delta) {
        BirthdayFlag::Upcoming
    } else {
        BirthdayFlag::NoUpcoming
    })
}

pub fn us_nationality(page: &BiographyPage) -> Option<Nationality> {
    let field = page.field(7)?;
    Some(if char_slice(&field.text, 0, 2) == "US" {
        Nationality::Us
    } else {
        Nationality::Foreign
    })
}

/// `None` when the page is the site's no-results fallback.
pub fn living_status(page: &BiographyPage) -> Option<LivingStatus> {
    let first = page.field(0)?;
    if first.text.contains(NO_RESULTS_MARKER) {
        return None;
    }
    let died = page.fields.iter().any(|f| f.text == DEATH_LABEL);
    Some(if died { LivingStatus::Dead } else { LivingStatus::Alive })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BioField;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn page(texts: &[&str]) -> BiographyPage {
        BiographyPage {
            fields: texts.iter().map(|t| BioField::plain(*t)).collect(),
        }
    }

    fn birthday_page(highlight: &str) -> BiographyPage {
        let mut p = page(&["Name", "Male", "Born", "Birth"]);
        p.fields[3].highlight = Some(highlight.to_string());
        p
    }

    #[test]
    fn gender_reads_second_field() {
        assert_eq!(gender(&page(&["Name", "Female"])).as_deref(), Some("Female"));
        assert_eq!(gender(&page(&["Name"])), None);
    }

    #[test]
    fn age_prefers_fifth_from_last() {
        let p = page(&["a", "- 59 yrs", "b", "61 years", "c", "d"]);
        assert_eq!(age(&p), Some(59));
    }

    #[test]
    fn age_falls_back_to_third_from_last() {
        let p = page(&["a", "unknown", "b", "61 years", "c", "d"]);
        assert_eq!(age(&p), Some(61));
    }

    #[test]
    fn age_is_none_when_both_fail() {
        assert_eq!(age(&page(&["a", "b"])), None);
        assert_eq!(age(&page(&["a", "xyz", "b", "n/a", "c", "d"])), None);
    }

    #[test]
    fn birthday_within_a_week_is_upcoming() {
        let today = date(2024, 8, 1);
        assert_eq!(upcoming_birthday(&birthday_page("4 August"), today), Some(BirthdayFlag::Upcoming));
        assert_eq!(upcoming_birthday(&birthday_page("1 August"), today), Some(BirthdayFlag::Upcoming));
        assert_eq!(upcoming_birthday(&birthday_page("8 August"), today), Some(BirthdayFlag::Upcoming));
    }

    #[test]
    fn birthday_outside_window_is_not_upcoming() {
        let today = date(2024, 8, 1);
        assert_eq!(upcoming_birthday(&birthday_page("9 August"), today), Some(BirthdayFlag::NoUpcoming));
        assert_eq!(upcoming_birthday(&birthday_page("31 July"), today), Some(BirthdayFlag::NoUpcoming));
    }

    #[test]
    fn early_january_places_birthday_in_next_year() {
        let today = date(2024, 1, 3);
        assert_eq!(upcoming_birthday(&birthday_page("5 January"), today), Some(BirthdayFlag::NoUpcoming));
    }

    #[test]
    fn unparseable_birthday_is_none() {
        let today = date(2023, 2, 25);
        assert_eq!(upcoming_birthday(&birthday_page("29 February"), today), None);
        assert_eq!(upcoming_birthday(&birthday_page("4 Agosto"), today), None);
        assert_eq!(upcoming_birthday(&birthday_page("August"), today), None);
        assert_eq!(upcoming_birthday(&page(&["a", "b", "c", "d"]), today), None);
    }

    #[test]
    fn nationality_checks_eighth_field_prefix() {
        let us = page(&["0", "1", "2", "3", "4", "5", "6", "USA, Honolulu"]);
        let foreign = page(&["0", "1", "2", "3", "4", "5", "6", "UK, London"]);
        assert_eq!(us_nationality(&us), Some(Nationality::Us));
        assert_eq!(us_nationality(&foreign), Some(Nationality::Foreign));
        assert_eq!(us_nationality(&page(&["0"])), None);
    }

    #[test]
    fn living_status_scans_for_death_label() {
        assert_eq!(living_status(&page(&["Name", "Male", "Death:", "2016"])), Some(LivingStatus::Dead));
        assert_eq!(living_status(&page(&["Name", "Male", "Birth:"])), Some(LivingStatus::Alive));
    }

    #[test]
    fn living_status_is_none_on_no_results_page() {
        let p = page(&["Seek celebrities by planet positions and aspects", "Death:"]);
        assert_eq!(living_status(&p), None);
        assert_eq!(living_status(&BiographyPage::default()), None);
    }
}
