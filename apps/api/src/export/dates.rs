//! `"YYYY-MM"` → `"Mar 2023"` date labels.
//!
//! Pure string slicing plus a month-name lookup. No calendar arithmetic, no
//! timezone or locale handling.

use chrono::Month;

/// Label shown for a month outside 1..=12 or an unparsable date.
pub const INVALID_DATE_LABEL: &str = "Invalid";

/// Label shown instead of the end date when an entry is current.
pub const PRESENT_LABEL: &str = "Present";

/// Formats a `YEAR-MONTH` string (1-indexed, 1 or 2 digit month) as `"{Mon} {Year}"`.
///
/// Returns `""` for blank input and [`INVALID_DATE_LABEL`] for anything malformed.
pub fn format_date(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return String::new();
    }

    let Some((year, month)) = date.split_once('-') else {
        return INVALID_DATE_LABEL.to_string();
    };

    match month_abbrev(month) {
        Some(abbrev) if is_year(year) => format!("{abbrev} {year}"),
        _ => INVALID_DATE_LABEL.to_string(),
    }
}

/// Renders `"{start} — {end}"`, with `"Present"` as the end when `current` is set.
///
/// The current flag wins: a stored end date is ignored for current entries.
pub fn format_date_range(start: &str, end: &str, current: bool) -> String {
    let end_label = if current {
        PRESENT_LABEL.to_string()
    } else {
        format_date(end)
    };
    format!("{} — {}", format_date(start), end_label)
}

fn is_year(year: &str) -> bool {
    year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit())
}

/// Three-letter English abbreviation for a 1-indexed month string.
fn month_abbrev(month: &str) -> Option<&'static str> {
    if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: u8 = month.parse().ok()?;
    let month = Month::try_from(number).ok()?;
    month.name().get(..3)
}
