//! Indian-locale number formatting for chart labels and statement tables.
//!
//! Amounts are in rupees. Thousands, lakhs (1e5) and crores (1e7) are the
//! abbreviation steps; full amounts use the 3-2-2 digit grouping.

use chrono::FixedOffset;

use crate::models::local_datetime;

const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Axis tick labels: `2Cr`, `1.5L`, `12K`, `-840`.
pub fn format_indian_compact(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    let scaled = |unit: f64, suffix: &str| {
        let n = abs / unit;
        if n.fract() == 0.0 {
            format!("{}{}{}", sign, n, suffix)
        } else {
            format!("{}{:.1}{}", sign, n, suffix)
        }
    };

    if abs == 0.0 {
        "0".to_string()
    } else if abs >= CRORE {
        scaled(CRORE, "Cr")
    } else if abs >= LAKH {
        scaled(LAKH, "L")
    } else if abs >= THOUSAND {
        scaled(THOUSAND, "K")
    } else {
        let rounded = abs.round();
        if rounded == 0.0 {
            "0".to_string()
        } else {
            format!("{}{}", sign, rounded)
        }
    }
}

/// Statement amounts. `-` for a missing value.
///
/// Full form keeps at most one decimal (`12,34,567.5`); short form abbreviates
/// with a spaced suffix (`1.2 Cr`, `3 L`, `12.5 K`).
pub fn format_currency(value: Option<f64>, full: bool) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return "-".to_string();
    };

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if full {
        return format!("{}{}", sign, group_with_decimals(abs, 1, false));
    }

    if abs >= CRORE {
        format!("{}{} Cr", sign, trim_one_decimal(abs / CRORE))
    } else if abs >= LAKH {
        format!("{}{} L", sign, trim_one_decimal(abs / LAKH))
    } else if abs >= THOUSAND {
        format!("{}{} K", sign, trim_one_decimal(abs / THOUSAND))
    } else {
        format!("{}{}", sign, trim_one_decimal(abs))
    }
}

/// Tooltip form: `₹12,34,567.89`.
pub fn format_inr(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}₹{}", sign, group_with_decimals(value.abs(), 2, true))
}

/// `05 Jan 2024` in the viewer's calendar.
pub fn format_date(date_milli: i64, offset: &FixedOffset) -> String {
    match local_datetime(date_milli, offset) {
        Some(dt) => dt.format("%d %b %Y").to_string(),
        None => "-".to_string(),
    }
}

/// `1.0` -> `1`, `1.25` -> `1.3`
fn trim_one_decimal(n: f64) -> String {
    let s = format!("{:.1}", n);
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}

/// en-IN grouping of a non-negative amount. With `pad` the fraction always
/// has `digits` places, otherwise trailing zeros are dropped.
fn group_with_decimals(abs: f64, digits: usize, pad: bool) -> String {
    let fixed = format!("{:.*}", digits, abs);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (fixed.as_str(), ""),
    };

    let mut out = group_indian_digits(int_part);
    let frac = if pad { frac_part } else { frac_part.trim_end_matches('0') };
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `1234567` -> `12,34,567`
fn group_indian_digits(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_labels() {
        assert_eq!(format_indian_compact(0.0), "0");
        assert_eq!(format_indian_compact(20_000_000.0), "2Cr");
        assert_eq!(format_indian_compact(15_500_000.0), "1.6Cr");
        assert_eq!(format_indian_compact(150_000.0), "1.5L");
        assert_eq!(format_indian_compact(-300_000.0), "-3L");
        assert_eq!(format_indian_compact(12_000.0), "12K");
        assert_eq!(format_indian_compact(-2_500.0), "-2.5K");
        assert_eq!(format_indian_compact(-840.4), "-840");
        assert_eq!(format_indian_compact(-0.3), "0");
    }

    #[test]
    fn test_currency_missing() {
        assert_eq!(format_currency(None, true), "-");
        assert_eq!(format_currency(Some(f64::NAN), false), "-");
    }

    #[test]
    fn test_currency_short() {
        assert_eq!(format_currency(Some(12_345_678.0), false), "1.2 Cr");
        assert_eq!(format_currency(Some(300_000.0), false), "3 L");
        assert_eq!(format_currency(Some(-12_500.0), false), "-12.5 K");
        assert_eq!(format_currency(Some(999.5), false), "999.5");
        assert_eq!(format_currency(Some(0.0), false), "0");
    }

    #[test]
    fn test_currency_full() {
        assert_eq!(format_currency(Some(1_234_567.5), true), "12,34,567.5");
        assert_eq!(format_currency(Some(-1_234_567.0), true), "-12,34,567");
        assert_eq!(format_currency(Some(999.0), true), "999");
        assert_eq!(format_currency(Some(100_000.0), true), "1,00,000");
    }

    #[test]
    fn test_inr() {
        assert_eq!(format_inr(1_234_567.891), "₹12,34,567.89");
        assert_eq!(format_inr(-500.0), "-₹500.00");
        assert_eq!(format_inr(0.0), "₹0.00");
    }

    #[test]
    fn test_group_indian_digits() {
        assert_eq!(group_indian_digits("1"), "1");
        assert_eq!(group_indian_digits("1234"), "1,234");
        assert_eq!(group_indian_digits("12345"), "12,345");
        assert_eq!(group_indian_digits("123456789"), "12,34,56,789");
    }

    #[test]
    fn test_format_date() {
        let ist = FixedOffset::east_opt(330 * 60).unwrap();
        // 2024-01-04T20:00:00Z is 5 Jan in IST
        assert_eq!(format_date(1_704_398_400_000, &ist), "05 Jan 2024");
    }
}
