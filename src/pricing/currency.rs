//! Currency conversion and locale-aware display formatting

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::PricingError;
use crate::money::{require_finite, to_decimal, to_f64};

/// Exchange rates keyed by target currency code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable(HashMap<String, f64>);

impl RateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, currency: impl Into<String>, rate: f64) -> Self {
        self.0.insert(currency.into(), rate);
        self
    }

    pub fn rate_for(&self, currency: &str) -> Option<f64> {
        self.0.get(currency).copied()
    }
}

/// Result of a currency conversion, with full traceability of the rate
/// and markup used
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedPrice {
    pub amount: f64,
    pub currency: String,
    pub rate: f64,
    pub markup_percent: f64,
}

/// Convert a price into the target currency with markup:
/// `amount = price * rate * (1 + markup / 100)`, rounded to 2 decimals.
pub fn convert_currency(
    price: f64,
    target_currency: &str,
    rates: &RateTable,
    markup_percent: f64,
) -> Result<ConvertedPrice, PricingError> {
    require_finite(price, "price")?;
    require_finite(markup_percent, "markup_percent")?;

    let Some(rate) = rates.rate_for(target_currency) else {
        return Err(PricingError::UnknownCurrency {
            currency: target_currency.to_string(),
        });
    };

    let amount = to_decimal(price)
        * to_decimal(rate)
        * (Decimal::ONE + to_decimal(markup_percent) / Decimal::ONE_HUNDRED);

    Ok(ConvertedPrice {
        amount: to_f64(amount),
        currency: target_currency.to_string(),
        rate,
        markup_percent,
    })
}

/// Locale-aware price formatting.
///
/// Japanese yen has no fractional unit and formats with zero decimal
/// places; every other currency uses two. Non-breaking spaces are
/// normalized to regular spaces for display-layer consistency.
pub fn format_price(price: f64, currency: &str, locale: &str) -> String {
    let decimals: u32 = if currency == "JPY" { 0 } else { 2 };

    let rounded = to_decimal(price)
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

    let formatted = if uses_comma_decimal(locale) {
        let digits = format_digits(rounded, decimals, '.', ',');
        match symbol_for(currency) {
            Some(symbol) => format!("{} {}", digits, symbol),
            None => format!("{} {}", digits, currency),
        }
    } else {
        let digits = format_digits(rounded, decimals, ',', '.');
        match symbol_for(currency) {
            Some(symbol) => format!("{}{}", symbol, digits),
            None => format!("{} {}", digits, currency),
        }
    };

    normalize_spaces(&formatted)
}

/// Locales whose number format uses a decimal comma and suffixed symbol
fn uses_comma_decimal(locale: &str) -> bool {
    let language = locale.split(['-', '_']).next().unwrap_or(locale);
    matches!(language, "de" | "es" | "fr" | "it" | "nl" | "pt")
}

fn symbol_for(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Render a rounded decimal with grouping and decimal separators
fn format_digits(value: Decimal, decimals: u32, group_sep: char, decimal_sep: char) -> String {
    let negative = value.is_sign_negative();
    let abs = value.abs();

    let plain = format!("{:.*}", decimals as usize, abs);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (plain, None),
    };

    // Insert grouping separators every three digits from the right
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(decimal_sep);
        out.push_str(&frac);
    }
    out
}

/// Replace non-breaking space variants with regular spaces
fn normalize_spaces(s: &str) -> String {
    s.replace(['\u{00A0}', '\u{202F}'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> RateTable {
        RateTable::new()
            .with_rate("EUR", 0.92)
            .with_rate("JPY", 149.50)
            .with_rate("USD", 1.0)
    }

    #[test]
    fn test_convert_with_markup() {
        // 100 * 0.92 * 1.03 = 94.76
        let c = convert_currency(100.0, "EUR", &rates(), 3.0).unwrap();
        assert_eq!(c.amount, 94.76);
        assert_eq!(c.currency, "EUR");
        assert_eq!(c.rate, 0.92);
        assert_eq!(c.markup_percent, 3.0);
    }

    #[test]
    fn test_convert_without_markup() {
        let c = convert_currency(100.0, "JPY", &rates(), 0.0).unwrap();
        assert_eq!(c.amount, 14950.0);
    }

    #[test]
    fn test_convert_unknown_currency_is_error() {
        let err = convert_currency(100.0, "CHF", &rates(), 0.0).unwrap_err();
        assert_eq!(
            err,
            PricingError::UnknownCurrency {
                currency: "CHF".to_string()
            }
        );
    }

    #[test]
    fn test_convert_non_finite_price_is_error() {
        let err = convert_currency(f64::NAN, "EUR", &rates(), 0.0).unwrap_err();
        assert!(matches!(
            err,
            PricingError::NonFiniteAmount { field: "price", .. }
        ));
    }

    #[test]
    fn test_jpy_has_no_decimal_places() {
        assert_eq!(format_price(1500.0, "JPY", "ja-JP"), "¥1,500");
    }

    #[test]
    fn test_jpy_fractional_input_rounds_to_whole_yen() {
        assert_eq!(format_price(1500.6, "JPY", "ja-JP"), "¥1,501");
    }

    #[test]
    fn test_usd_two_decimal_places() {
        assert_eq!(format_price(1500.5, "USD", "en-US"), "$1,500.50");
    }

    #[test]
    fn test_eur_german_locale() {
        assert_eq!(format_price(1500.5, "EUR", "de-DE"), "1.500,50 €");
    }

    #[test]
    fn test_gbp_british_locale() {
        assert_eq!(format_price(42.0, "GBP", "en-GB"), "£42.00");
    }

    #[test]
    fn test_unknown_currency_uses_code() {
        assert_eq!(format_price(1500.0, "SEK", "en-US"), "1,500.00 SEK");
    }

    #[test]
    fn test_no_non_breaking_spaces_in_output() {
        let s = format_price(1234567.89, "EUR", "fr-FR");
        assert!(!s.contains('\u{00A0}'));
        assert!(!s.contains('\u{202F}'));
    }

    #[test]
    fn test_large_amount_grouping() {
        assert_eq!(format_price(1234567.89, "USD", "en-US"), "$1,234,567.89");
    }
}
