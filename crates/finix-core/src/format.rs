//! Display formatting for money and timelines
//!
//! Rounding happens only here, after every calculation is done.

use rust_decimal::{Decimal, RoundingStrategy};

/// Placeholder for a timeline that cannot be computed
pub const NOT_AVAILABLE: &str = "N/A";

/// Format an amount with two decimals and thousands separators ("1,234.50")
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded);

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Format an amount as dollars ("$1,234.50")
pub fn format_currency(value: Decimal) -> String {
    let amount = format_amount(value);
    match amount.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", amount),
    }
}

/// Format a month count with one decimal
pub fn format_months(months: Decimal) -> String {
    let rounded = months.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.1}", rounded)
}

/// Format an optional timeline, "N/A" when it cannot be computed
pub fn format_timeline(months: Option<Decimal>) -> String {
    months
        .map(format_months)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_amount_separators() {
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(999.5)), "999.50");
        assert_eq!(format_amount(dec!(1000)), "1,000.00");
        assert_eq!(format_amount(dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_amount(dec!(-2500.005)), "-2,500.01");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1500)), "$1,500.00");
        assert_eq!(format_currency(dec!(-250)), "-$250.00");
    }

    #[test]
    fn test_format_months() {
        assert_eq!(format_months(dec!(25.714285)), "25.7");
        assert_eq!(format_months(dec!(15)), "15.0");
        assert_eq!(format_months(dec!(-10.75)), "-10.8");
    }

    #[test]
    fn test_format_timeline_none() {
        assert_eq!(format_timeline(None), "N/A");
        assert_eq!(format_timeline(Some(dec!(3.25))), "3.3");
    }
}
