//! # view::format
//!
//! Number formatting for the deck: abbreviated currency, signed percentages
//! and grouped plain numbers.

/// Dollar amount, abbreviated at K / M / B with one decimal.  Below 1 000 it
/// prints up to two fraction digits with trailing zeros dropped.
///
/// The sign follows the symbol: `-1500.0` renders as `"$-1.5K"`.
pub fn format_currency(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000_000.0 {
        format!("${:.1}B", value / 1_000_000_000.0)
    } else if abs >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.1}K", value / 1_000.0)
    } else {
        format!("${}", format_number(value, 2))
    }
}

/// `+2.76%`, `-0.60%`, `0.00%`. Plus sign only for strictly positive values.
pub fn format_percent(value: f64, digits: usize) -> String {
    let sign = if value > 0.0 { "+" } else { "" };
    format!("{sign}{value:.digits$}%")
}

/// Indicator change line: `+0.24 Δ`, `-0.60 Δ`.
pub fn format_delta(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{sign}{value:.2} Δ")
}

/// Thousands-grouped number with at most `max_digits` fraction digits and no
/// trailing zeros: `format_number(1234.5, 2) == "1,234.5"`.
pub fn format_number(value: f64, max_digits: usize) -> String {
    let fixed = format!("{:.*}", max_digits, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let mut out = String::with_capacity(fixed.len() + 4);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_thresholds() {
        assert_eq!(format_currency(86_400_000.0), "$86.4M");
        assert_eq!(format_currency(1_260_000_000.0), "$1.3B");
        assert_eq!(format_currency(49_580.0), "$49.6K");
        assert_eq!(format_currency(3192.0), "$3.2K");
        assert_eq!(format_currency(999.5), "$999.5");
        assert_eq!(format_currency(12.0), "$12");
        assert_eq!(format_currency(-1_500.0), "$-1.5K");
    }

    #[test]
    fn test_percent_sign() {
        assert_eq!(format_percent(2.7564, 2), "+2.76%");
        assert_eq!(format_percent(-0.6, 2), "-0.60%");
        assert_eq!(format_percent(0.0, 1), "0.0%");
    }

    #[test]
    fn test_delta() {
        assert_eq!(format_delta(0.24), "+0.24 Δ");
        assert_eq!(format_delta(-0.6), "-0.60 Δ");
        assert_eq!(format_delta(0.0), "+0.00 Δ");
    }

    #[test]
    fn test_number_grouping_and_trimming() {
        assert_eq!(format_number(122.4, 2), "122.4");
        assert_eq!(format_number(820.0, 0), "820");
        assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number(1000.0, 2), "1,000");
        assert_eq!(format_number(-0.001, 2), "0");
        assert_eq!(format_number(-42.5, 1), "-42.5");
    }
}
