use chrono::NaiveDate;

// Formats tried in order against the raw Date column.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y"];

/// Render a raw date string as "Month D, YYYY". Anything that does not
/// parse as a calendar date is shown unchanged.
pub fn format_release_date(raw: &str) -> String {
    let trimmed = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return date.format("%B %-d, %Y").to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_date() {
        assert_eq!(format_release_date("2024-01-05"), "January 5, 2024");
    }

    #[test]
    fn slash_dates() {
        assert_eq!(format_release_date("2023/12/31"), "December 31, 2023");
        assert_eq!(format_release_date("12/31/2023"), "December 31, 2023");
    }

    #[test]
    fn unparseable_falls_back_to_raw() {
        assert_eq!(format_release_date("not-a-date"), "not-a-date");
        assert_eq!(format_release_date(""), "");
    }

    #[test]
    fn surrounding_whitespace_tolerated() {
        assert_eq!(format_release_date(" 2024-06-10 "), "June 10, 2024");
    }
}
