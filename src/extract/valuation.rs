//! Extractors over the valuation page's price panels and alert boxes.

use chrono::NaiveDate;

use crate::data::ValuationPage;
use crate::domain::Recommendation;
use crate::extract::calendar::month_from_abbrev;
use crate::extract::parse_int;

/// `"$1,721,000"` -> 1721000. The first character is the currency symbol.
pub fn parse_price(text: &str) -> Option<i64> {
    let mut chars = text.chars();
    chars.next()?;
    parse_int(&chars.as_str().replace(',', ""))
}

pub fn avg_21_day_price(page: &ValuationPage) -> Option<i64> {
    page.panel(0).and_then(parse_price)
}

/// Tries the 3rd panel, then the 2nd, then the 2nd-from-last.
pub fn all_time_high_price(page: &ValuationPage) -> Option<i64> {
    [page.panel(2), page.panel(1), page.panel_from_end(2)]
        .into_iter()
        .flatten()
        .find_map(parse_price)
}

/// Days from the all-time-high date (last panel, `"Mon D, YYYY"`) to `today`.
pub fn days_since_all_time_high(page: &ValuationPage, today: NaiveDate) -> Option<i64> {
    let text = page.panel_from_end(1)?.replace(',', "");
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [month, day, year] = tokens.as_slice() else {
        return None;
    };

    let month = month_from_abbrev(month)?;
    let day = day.parse::<u32>().ok()?;
    let year = year.parse::<i32>().ok()?;
    let high_date = NaiveDate::from_ymd_opt(year, month, day)?;

    Some((today - high_date).num_days())
}

/// Last word of the second alert box.
///
/// Unlike the other extractors this one reports its failure.
pub fn recommendation(page: &ValuationPage) -> Result<Recommendation, String> {
    let alert = page
        .alerts
        .get(1)
        .ok_or_else(|| format!("expected at least 2 alert boxes, found {}", page.alerts.len()))?;
    let token = alert
        .split_whitespace()
        .last()
        .ok_or_else(|| "recommendation alert is empty".to_string())?;
    Recommendation::parse(token).ok_or_else(|| format!("unexpected recommendation '{token}'"))
}
