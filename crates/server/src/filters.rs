//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Formats a decimal amount as currency with thousands grouping.
///
/// Usage in templates: `{{ stats.total_value|currency }}`
#[askama::filter_fn]
pub fn currency(amount: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = amount.to_string();
    let (sign, unsigned) = raw
        .strip_prefix('-')
        .map_or(("", raw.as_str()), |rest| ("-", rest));
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let mut grouped = String::new();
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // Always show two decimal places
    let mut cents = fraction.to_owned();
    cents.truncate(2);
    while cents.len() < 2 {
        cents.push('0');
    }

    Ok(format!("{sign}${grouped}.{cents}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use askama::Template;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    use crate::filters;

    #[derive(Template)]
    #[template(source = "{{ amount|currency }}", ext = "html")]
    struct Amount {
        amount: Decimal,
    }

    fn fmt(s: &str) -> String {
        Amount {
            amount: Decimal::from_str(s).unwrap(),
        }
        .render()
        .unwrap()
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(fmt("1234567.5"), "$1,234,567.50");
        assert_eq!(fmt("999"), "$999.00");
        assert_eq!(fmt("1000"), "$1,000.00");
    }

    #[test]
    fn test_currency_zero_and_cents() {
        assert_eq!(fmt("0"), "$0.00");
        assert_eq!(fmt("0.05"), "$0.05");
    }
}
