//! Quantity break selector
//!
//! Selects the correct volume break for a requested quantity. Selection
//! is total: if no break qualifies, the one with the smallest `min_qty`
//! applies, so a result is always produced.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;

use crate::models::QuantityBreak;
use crate::money::{to_decimal, to_f64};

/// Result of quantity break selection
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityPriceResult {
    /// Per-unit price after the break's discount
    pub unit_price: f64,
    /// The break that was applied; None only when the table is empty
    pub applied_break: Option<QuantityBreak>,
    /// Per-unit discount amount
    pub discount_amount: f64,
}

/// Select and apply the quantity break for `qty`.
///
/// The break with the highest `min_qty <= qty` wins. When two breaks
/// share a `min_qty` (a data-quality bug upstream), the larger discount
/// wins rather than relying on declaration order.
pub fn calculate_quantity_price(
    base_price: f64,
    qty: u32,
    breaks: &[QuantityBreak],
) -> QuantityPriceResult {
    if breaks.is_empty() {
        return QuantityPriceResult {
            unit_price: to_f64(to_decimal(base_price)),
            applied_break: None,
            discount_amount: 0.0,
        };
    }

    let base = to_decimal(base_price);

    let selected = breaks
        .iter()
        .filter(|b| b.min_qty <= qty)
        .max_by(|a, b| {
            a.min_qty
                .cmp(&b.min_qty)
                .then_with(|| discount_amount(a, base).cmp(&discount_amount(b, base)))
        })
        .unwrap_or_else(|| {
            // No break qualifies: fall back to the smallest min_qty,
            // tie broken toward the larger discount
            breaks
                .iter()
                .min_by(|a, b| {
                    a.min_qty
                        .cmp(&b.min_qty)
                        .then_with(|| discount_amount(b, base).cmp(&discount_amount(a, base)))
                })
                .expect("breaks is non-empty")
        });

    let discount = discount_amount(selected, base);
    let unit_price = (base - discount).max(Decimal::ZERO);

    QuantityPriceResult {
        unit_price: to_f64(unit_price),
        applied_break: Some(selected.clone()),
        discount_amount: to_f64(discount),
    }
}

/// Same as [`calculate_quantity_price`], but breaks whose validity
/// window excludes `date` are filtered out first.
pub fn calculate_quantity_price_with_dates(
    base_price: f64,
    qty: u32,
    breaks: &[QuantityBreak],
    date: DateTime<Utc>,
) -> QuantityPriceResult {
    let in_window: Vec<QuantityBreak> = breaks
        .iter()
        .filter(|b| b.is_valid_on(date))
        .cloned()
        .collect();
    calculate_quantity_price(base_price, qty, &in_window)
}

fn discount_amount(brk: &QuantityBreak, base: Decimal) -> Decimal {
    brk.discount.amount_on(base)
}

/// Derived savings figures for a quoted quantity discount
#[derive(Debug, Clone, PartialEq)]
pub struct QuantitySavings {
    pub total_before: f64,
    pub total_after: f64,
    /// Exactly `total_before - total_after`
    pub savings: f64,
    pub savings_percent: f64,
    pub effective_unit_price: f64,
}

/// Purely derived savings summary; performs no validation
pub fn calculate_quantity_savings(
    base_price: f64,
    qty: u32,
    discount_percent: f64,
) -> QuantitySavings {
    let hundred = Decimal::ONE_HUNDRED;
    let before = to_decimal(base_price) * Decimal::from(qty);
    let after = before * (Decimal::ONE - to_decimal(discount_percent) / hundred);

    // Round the totals first so the reported savings is exactly their
    // difference
    let total_before = to_f64(before);
    let total_after = to_f64(after);
    let savings = to_f64(to_decimal(total_before) - to_decimal(total_after));

    let effective_unit_price = if qty > 0 {
        to_f64(to_decimal(total_after) / Decimal::from(qty))
    } else {
        0.0
    };

    QuantitySavings {
        total_before,
        total_after,
        savings,
        savings_percent: discount_percent,
        effective_unit_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DiscountValue;

    fn pct_break(min: u32, percent: f64) -> QuantityBreak {
        QuantityBreak {
            min_qty: min,
            max_qty: None,
            discount: DiscountValue::Percentage(percent),
            valid_from: None,
            valid_to: None,
        }
    }

    fn table() -> Vec<QuantityBreak> {
        vec![pct_break(10, 5.0), pct_break(50, 10.0), pct_break(100, 15.0)]
    }

    #[test]
    fn test_highest_qualifying_break_wins() {
        let r = calculate_quantity_price(100.0, 60, &table());
        assert_eq!(r.unit_price, 90.0);
        assert_eq!(r.applied_break.unwrap().min_qty, 50);
        assert_eq!(r.discount_amount, 10.0);
    }

    #[test]
    fn test_fallback_to_smallest_break_below_all_thresholds() {
        // qty=3 qualifies for nothing; the min_qty=10 break applies anyway
        let r = calculate_quantity_price(100.0, 3, &table());
        assert_eq!(r.unit_price, 95.0);
        assert_eq!(r.applied_break.unwrap().min_qty, 10);
    }

    #[test]
    fn test_empty_table_returns_base() {
        let r = calculate_quantity_price(100.0, 60, &[]);
        assert_eq!(r.unit_price, 100.0);
        assert!(r.applied_break.is_none());
        assert_eq!(r.discount_amount, 0.0);
    }

    #[test]
    fn test_tie_on_min_qty_prefers_larger_discount() {
        let breaks = vec![pct_break(10, 5.0), pct_break(10, 8.0)];
        let r = calculate_quantity_price(100.0, 20, &breaks);
        assert_eq!(r.unit_price, 92.0);
    }

    #[test]
    fn test_fixed_amount_break() {
        let breaks = vec![QuantityBreak {
            min_qty: 10,
            max_qty: None,
            discount: DiscountValue::FixedAmount(2.5),
            valid_from: None,
            valid_to: None,
        }];
        let r = calculate_quantity_price(100.0, 10, &breaks);
        assert_eq!(r.unit_price, 97.5);
        assert_eq!(r.discount_amount, 2.5);
    }

    #[test]
    fn test_unit_price_monotonic_across_break_boundaries() {
        let breaks = table();
        let mut last = f64::MAX;
        for qty in [1, 9, 10, 49, 50, 99, 100, 500] {
            let r = calculate_quantity_price(100.0, qty, &breaks);
            assert!(
                r.unit_price <= last,
                "unit price increased at qty {}: {} > {}",
                qty,
                r.unit_price,
                last
            );
            last = r.unit_price;
        }
    }

    #[test]
    fn test_date_filter_excludes_expired_break() {
        let mut expired = pct_break(10, 50.0);
        expired.valid_to = Some("2024-12-31T23:59:59Z".parse().unwrap());
        let breaks = vec![expired, pct_break(10, 5.0)];

        let date: DateTime<Utc> = "2025-06-01T00:00:00Z".parse().unwrap();
        let r = calculate_quantity_price_with_dates(100.0, 20, &breaks, date);
        assert_eq!(r.unit_price, 95.0);
    }

    #[test]
    fn test_date_filter_keeps_open_window() {
        let breaks = vec![pct_break(10, 5.0)];
        let date: DateTime<Utc> = "2025-06-01T00:00:00Z".parse().unwrap();
        let r = calculate_quantity_price_with_dates(100.0, 20, &breaks, date);
        assert_eq!(r.unit_price, 95.0);
    }

    #[test]
    fn test_savings_identity() {
        for (base, qty, pct) in [(100.0, 10, 5.0), (99.99, 7, 33.0), (0.01, 3, 50.0)] {
            let s = calculate_quantity_savings(base, qty, pct);
            assert_eq!(
                to_f64(to_decimal(s.total_before) - to_decimal(s.total_after)),
                s.savings
            );
        }
    }

    #[test]
    fn test_savings_values() {
        let s = calculate_quantity_savings(100.0, 10, 5.0);
        assert_eq!(s.total_before, 1000.0);
        assert_eq!(s.total_after, 950.0);
        assert_eq!(s.savings, 50.0);
        assert_eq!(s.savings_percent, 5.0);
        assert_eq!(s.effective_unit_price, 95.0);
    }

    #[test]
    fn test_savings_zero_quantity() {
        let s = calculate_quantity_savings(100.0, 0, 5.0);
        assert_eq!(s.total_before, 0.0);
        assert_eq!(s.savings, 0.0);
        assert_eq!(s.effective_unit_price, 0.0);
    }
}
