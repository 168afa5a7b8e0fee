//! Locale-aware number and timestamp formatting for the dashboard

use crate::core::currency::Currency;
use chrono::{DateTime, Local};
use std::fmt::Display;

/// Number formatting conventions, keyed by the locale associated with a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Locale {
    EnUs,
    PtBr,
    DeDe,
    EnGb,
    JaJp,
}

impl Locale {
    /// Returns the (grouping, decimal) separators.
    pub fn separators(&self) -> (char, char) {
        match self {
            Locale::EnUs | Locale::EnGb | Locale::JaJp => (',', '.'),
            Locale::PtBr | Locale::DeDe => ('.', ','),
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Locale::EnUs => "en-US",
                Locale::PtBr => "pt-BR",
                Locale::DeDe => "de-DE",
                Locale::EnGb => "en-GB",
                Locale::JaJp => "ja-JP",
            }
        )
    }
}

const MAGNITUDES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Formats `value` with digit grouping, rounding to `max_fraction` digits and
/// trimming trailing zeros down to `min_fraction` digits.
pub fn format_number(
    value: f64,
    min_fraction: usize,
    max_fraction: usize,
    locale: Locale,
) -> String {
    let (group_sep, decimal_sep) = locale.separators();
    let fixed = to_fixed(value.abs(), max_fraction);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut fraction = frac_part.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    let is_zero = int_part.chars().chain(fraction.chars()).all(|c| c == '0');
    let mut output = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && !is_zero {
        output.push('-');
    }
    output.push_str(&group_digits(int_part, group_sep));
    if !fraction.is_empty() {
        output.push(decimal_sep);
        output.push_str(&fraction);
    }
    output
}

/// Fixed-point text for a non-negative `value`. Exact halves round away from
/// zero, unlike `{:.N}` which rounds them to the even digit.
fn to_fixed(value: f64, digits: usize) -> String {
    let scaled = format!("{:.0}", (value * 10f64.powi(digits as i32)).round());
    if digits == 0 {
        return scaled;
    }
    let padded = format!("{scaled:0>width$}", width = digits + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - digits);
    format!("{int_part}.{frac_part}")
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

/// Amounts of at least one unit get two grouped decimals; sub-unit amounts get
/// six plain decimals so small-cap prices stay readable.
pub fn format_price(value: f64, currency: Currency) -> String {
    if value >= 1.0 {
        format_number(value, 2, 2, currency.locale())
    } else if value < 0.0 {
        format!("-{}", to_fixed(-value, 6))
    } else {
        to_fixed(value, 6)
    }
}

/// Scales large amounts into K/M/B/T short form, e.g. `2.5B`.
pub fn format_magnitude(value: f64, currency: Currency) -> String {
    let locale = currency.locale();
    match MAGNITUDES.iter().find(|(threshold, _)| value >= *threshold) {
        Some((threshold, suffix)) => {
            format!("{}{suffix}", format_number(value / threshold, 0, 2, locale))
        }
        None => format_number(value, 0, 2, locale),
    }
}

/// Signed percentage change with two decimals, e.g. `+1.25%` or `-0.40%`.
pub fn format_change(change: f64) -> String {
    let fixed = to_fixed(change.abs(), 2);
    if change >= 0.0 {
        format!("+{fixed}%")
    } else {
        format!("-{fixed}%")
    }
}

/// Last update indicator, always in Brazilian Portuguese day-first layout.
pub fn format_last_update(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%d/%m/%Y às %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_price_below_one() {
        assert_eq!(format_price(0.5, Currency::Usd), "0.500000");
        assert_eq!(format_price(0.000123, Currency::Brl), "0.000123");
        assert_eq!(format_price(0.0, Currency::Eur), "0.000000");
    }

    #[test]
    fn test_format_price_uses_currency_locale() {
        assert_eq!(format_price(1234.5, Currency::Usd), "1,234.50");
        assert_eq!(format_price(1234.5, Currency::Brl), "1.234,50");
        assert_eq!(format_price(1234567.891, Currency::Eur), "1.234.567,89");
        assert_eq!(format_price(1.0, Currency::Gbp), "1.00");
        assert_eq!(format_price(9_876_543.0, Currency::Jpy), "9,876,543.00");
    }

    #[test]
    fn test_format_magnitude_suffixes() {
        assert_eq!(format_magnitude(2_500_000_000.0, Currency::Usd), "2.5B");
        assert_eq!(format_magnitude(999.0, Currency::Usd), "999");
        assert_eq!(format_magnitude(1_234.0, Currency::Usd), "1.23K");
        assert_eq!(format_magnitude(3_200_000_000_000.0, Currency::Usd), "3.2T");
        assert_eq!(format_magnitude(1_000_000.0, Currency::Usd), "1M");
        assert_eq!(format_magnitude(1_500_000.0, Currency::Brl), "1,5M");
        assert_eq!(format_magnitude(12.346, Currency::Eur), "12,35");
        assert_eq!(format_magnitude(0.0, Currency::Usd), "0");
    }

    #[test]
    fn test_format_magnitude_groups_oversized_trillions() {
        assert_eq!(format_magnitude(1_234_000_000_000_000.0, Currency::Usd), "1,234T");
        assert_eq!(format_magnitude(1_234_000_000_000_000.0, Currency::Eur), "1.234T");
    }

    #[test]
    fn test_format_number_negative_values() {
        assert_eq!(format_number(-1234.5, 2, 2, Locale::EnUs), "-1,234.50");
        assert_eq!(format_number(-0.001, 0, 2, Locale::EnUs), "0");
    }

    #[test]
    fn test_format_change_sign() {
        assert_eq!(format_change(1.234), "+1.23%");
        assert_eq!(format_change(0.0), "+0.00%");
        assert_eq!(format_change(-0.5), "-0.50%");
        assert_eq!(format_change(-0.004), "-0.00%");
        assert_eq!(format_change(-0.0), "+0.00%");
    }

    #[test]
    fn test_exact_halves_round_away_from_zero() {
        assert_eq!(format_price(1.125, Currency::Usd), "1.13");
        assert_eq!(format_magnitude(1_125_000.0, Currency::Usd), "1.13M");
        assert_eq!(format_number(2.5, 0, 0, Locale::EnUs), "3");
        assert_eq!(format_number(-2.5, 0, 0, Locale::EnUs), "-3");
        assert_eq!(format_change(0.125), "+0.13%");
        assert_eq!(format_change(-0.625), "-0.63%");
    }

    #[test]
    fn test_format_last_update() {
        let timestamp = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        assert_eq!(format_last_update(&timestamp), "05/03/2024 às 14:07:09");
    }

    #[test]
    fn test_locale_display() {
        assert_eq!(Locale::EnUs.to_string(), "en-US");
        assert_eq!(Locale::DeDe.to_string(), "de-DE");
        assert_eq!(Locale::JaJp.separators(), (',', '.'));
    }
}
