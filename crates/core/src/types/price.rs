//! Price display formatting and parsing.
//!
//! Catalog payloads carry decimal amounts as strings (e.g. `"12.5"`). The
//! storefront renders them as fixed two-decimal currency strings (`"$12.50"`)
//! and the cart parses those display strings back into numbers for subtotal
//! math. Both directions live here so the round trip stays in one place.

use rust_decimal::Decimal;

/// Format a raw decimal amount string as a display price.
///
/// `"12.5"` becomes `"$12.50"`. Amounts that fail to parse as a decimal are
/// passed through with a `$` prefix rather than dropped, so a malformed
/// backend amount still renders something recognizable.
#[must_use]
pub fn format_display_price(amount: &str) -> String {
    amount.trim().parse::<Decimal>().map_or_else(
        |_| format!("${amount}"),
        |value| format!("${:.2}", value.round_dp(2)),
    )
}

/// Parse a display price back into a numeric amount.
///
/// Strips every character other than digits and the decimal point before
/// parsing, so `"$1,234.56"` yields `1234.56`. Unparseable input yields `0.0`.
#[must_use]
pub fn parse_display_price(display: &str) -> f64 {
    let numeric: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_to_two_decimals() {
        assert_eq!(format_display_price("12.5"), "$12.50");
        assert_eq!(format_display_price("12"), "$12.00");
        assert_eq!(format_display_price("0"), "$0.00");
    }

    #[test]
    fn test_format_rounds_excess_precision() {
        assert_eq!(format_display_price("12.504"), "$12.50");
        assert_eq!(format_display_price("12.999"), "$13.00");
    }

    #[test]
    fn test_format_unparseable_passes_through() {
        assert_eq!(format_display_price("free"), "$free");
    }

    #[test]
    fn test_parse_strips_currency_symbols() {
        assert!((parse_display_price("$12.50") - 12.5).abs() < f64::EPSILON);
        assert!((parse_display_price("$1,234.56") - 1234.56).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_unparseable_is_zero() {
        assert!((parse_display_price("") - 0.0).abs() < f64::EPSILON);
        assert!((parse_display_price("n/a") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_trip() {
        let display = format_display_price("12.5");
        assert!((parse_display_price(&display) - 12.5).abs() < 1e-9);
    }
}
