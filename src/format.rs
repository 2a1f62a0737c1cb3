use chrono::{Local, NaiveDate};

/// Formats an amount as Indian rupees with en-IN digit grouping, e.g.
/// `1234567.89` becomes `₹12,34,567.89`.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}₹{}.{frac_part}", group_indian(int_part))
}

// en-IN grouping: the last three digits form one group, everything before
// them is grouped in pairs.
fn group_indian(int_part: &str) -> String {
    if int_part.len() <= 3 {
        return int_part.to_string();
    }
    let (head, tail) = int_part.split_at(int_part.len() - 3);
    let head_chars: Vec<char> = head.chars().collect();
    let mut grouped = String::new();
    let mut idx = 0;
    if head_chars.len() % 2 == 1 {
        grouped.push(head_chars[0]);
        idx = 1;
    }
    while idx < head_chars.len() {
        if !grouped.is_empty() {
            grouped.push(',');
        }
        grouped.push(head_chars[idx]);
        grouped.push(head_chars[idx + 1]);
        idx += 2;
    }
    format!("{grouped},{tail}")
}

/// "Jun 14, 2025" style used everywhere a stored date is displayed.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Expands a "YYYY-MM" budget month into "June 2025". Unparsable input is
/// shown as-is.
pub fn format_month_year(month_year: &str) -> String {
    match NaiveDate::parse_from_str(&format!("{month_year}-01"), "%Y-%m-%d") {
        Ok(first_of_month) => first_of_month.format("%B %Y").to_string(),
        Err(_) => month_year.to_string(),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's date in the `value` format of `<input type="date">`.
pub fn today_value() -> String {
    today().format("%Y-%m-%d").to_string()
}

/// The current month in the `value` format of `<input type="month">`.
pub fn current_month_value() -> String {
    today().format("%Y-%m").to_string()
}

/// Parses a form amount, accepting only finite values greater than zero.
pub fn parse_positive_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        None
    }
}

/// Like [`parse_positive_amount`] but zero is allowed, for fields such as a
/// goal's starting amount.
pub fn parse_non_negative_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    if value.is_finite() && value >= 0.0 {
        Some(value)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_amounts_group_like_western_currencies() {
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(5.0), "₹5.00");
        assert_eq!(format_currency(999.99), "₹999.99");
    }

    #[test]
    fn test_thousands_take_a_single_separator() {
        assert_eq!(format_currency(1000.0), "₹1,000.00");
        assert_eq!(format_currency(99999.0), "₹99,999.00");
    }

    #[test]
    fn test_lakhs_and_crores_group_in_pairs() {
        assert_eq!(format_currency(100000.0), "₹1,00,000.00");
        assert_eq!(format_currency(1234567.89), "₹12,34,567.89");
        assert_eq!(format_currency(987654321.0), "₹98,76,54,321.00");
    }

    #[test]
    fn test_negative_amounts_keep_the_sign_in_front() {
        assert_eq!(format_currency(-200.0), "-₹200.00");
        assert_eq!(format_currency(-1234567.0), "-₹12,34,567.00");
    }

    #[test]
    fn test_fractions_round_to_two_places() {
        assert_eq!(format_currency(10.005), "₹10.01");
        assert_eq!(format_currency(10.004), "₹10.00");
    }

    #[test]
    fn test_date_display_drops_leading_zero_from_day() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();
        assert_eq!(format_date(date), "Jun 5, 2025");
        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(format_date(date), "Dec 25, 2024");
    }

    #[test]
    fn test_month_year_expands_to_full_month_name() {
        assert_eq!(format_month_year("2025-03"), "March 2025");
        assert_eq!(format_month_year("2024-12"), "December 2024");
    }

    #[test]
    fn test_bad_month_year_falls_back_to_input() {
        assert_eq!(format_month_year("not-a-month"), "not-a-month");
        assert_eq!(format_month_year(""), "");
    }

    #[test]
    fn test_positive_amount_parsing_rejects_junk() {
        assert_eq!(parse_positive_amount("250.50"), Some(250.5));
        assert_eq!(parse_positive_amount("  42 "), Some(42.0));
        assert_eq!(parse_positive_amount("0"), None);
        assert_eq!(parse_positive_amount("-5"), None);
        assert_eq!(parse_positive_amount("abc"), None);
        assert_eq!(parse_positive_amount(""), None);
        assert_eq!(parse_positive_amount("inf"), None);
        assert_eq!(parse_positive_amount("NaN"), None);
    }

    #[test]
    fn test_non_negative_parsing_allows_zero() {
        assert_eq!(parse_non_negative_amount("0"), Some(0.0));
        assert_eq!(parse_non_negative_amount("10.5"), Some(10.5));
        assert_eq!(parse_non_negative_amount("-0.01"), None);
    }
}
