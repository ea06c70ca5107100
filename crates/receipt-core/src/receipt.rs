//! # Receipt Builder
//!
//! Computes totals for a list of line items and renders the text report.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  for each item:                                                         │
//! │      line_total = round_half_up(price × quantity)      ◄── once per line│
//! │      subtotal  += line_total                           ◄── exact sum    │
//! │                                                                         │
//! │  tax         = round_half_up(subtotal × tax_rate)                       │
//! │  grand_total = round_half_up(subtotal + tax)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Layout
//! ```text
//! Items:
//! - Lovely Loveseat x 1 @ $254.00 = $254.00
//! - Luxurious Lamp x 1 @ $52.15 = $52.15
//!
//! Subtotal: $306.15
//! Tax (8.8%): $26.94
//! Total: $333.09
//! ```
//! Lines are joined with `\n` and there is no trailing newline; writers add
//! one if they want it.

use std::fmt;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{LineItem, TaxRate};

/// Header line of every receipt.
pub const ITEMS_HEADER: &str = "Items:";

/// One rendered item line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLine {
    pub description: String,
    pub quantity: i64,
    /// Unit price quantized for display.
    pub unit_price: Money,
    pub line_total: Money,
}

/// Aggregate amounts of a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptTotals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// A computed receipt, ready to render.
///
/// Built once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    lines: Vec<ReceiptLine>,
    tax_label: String,
    totals: ReceiptTotals,
    currency_symbol: String,
}

impl Receipt {
    /// Computes every line and total.
    ///
    /// Fails only if an amount overflows the decimal range.
    pub fn compute(
        items: &[LineItem],
        tax_rate: TaxRate,
        currency_symbol: &str,
    ) -> CoreResult<Self> {
        let mut lines = Vec::with_capacity(items.len());
        let mut subtotal = Money::zero();

        for item in items {
            let line_total = item.line_total()?;
            subtotal = subtotal
                .checked_add(line_total)
                .ok_or_else(|| CoreError::overflow("subtotal"))?;

            let unit_price = Money::round_half_up(item.price).ok_or_else(|| {
                CoreError::overflow(format!("unit price for '{}'", item.description))
            })?;

            lines.push(ReceiptLine {
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price,
                line_total,
            });
        }

        let tax = subtotal
            .calculate_tax(tax_rate)
            .ok_or_else(|| CoreError::overflow("tax"))?;
        let total = subtotal
            .checked_add(tax)
            .ok_or_else(|| CoreError::overflow("total"))?;

        Ok(Receipt {
            lines,
            tax_label: tax_rate.percentage_label()?,
            totals: ReceiptTotals {
                subtotal,
                tax,
                total,
            },
            currency_symbol: currency_symbol.to_string(),
        })
    }

    /// The item lines, in input order.
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Subtotal, tax and grand total.
    pub fn totals(&self) -> ReceiptTotals {
        self.totals
    }

    /// Renders the receipt text (no trailing newline).
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn money(&self, amount: Money) -> String {
        amount.with_symbol(&self.currency_symbol)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", ITEMS_HEADER)?;
        for line in &self.lines {
            writeln!(
                f,
                "- {} x {} @ {} = {}",
                line.description,
                line.quantity,
                self.money(line.unit_price),
                self.money(line.line_total)
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Subtotal: {}", self.money(self.totals.subtotal))?;
        writeln!(f, "Tax ({}%): {}", self.tax_label, self.money(self.totals.tax))?;
        write!(f, "Total: {}", self.money(self.totals.total))
    }
}

/// Builds the receipt text for `items`.
///
/// ## Example
/// ```rust
/// use receipt_core::receipt::build_receipt;
/// use receipt_core::types::{LineItem, TaxRate};
/// use rust_decimal::Decimal;
///
/// let items = vec![
///     LineItem::new("Lovely Loveseat", Decimal::new(25400, 2), 1),
///     LineItem::new("Luxurious Lamp", Decimal::new(5215, 2), 1),
/// ];
/// let rate: TaxRate = "0.088".parse().unwrap();
///
/// let text = build_receipt(&items, rate, "$").unwrap();
/// assert!(text.ends_with("Subtotal: $306.15\nTax (8.8%): $26.94\nTotal: $333.09"));
/// ```
pub fn build_receipt(
    items: &[LineItem],
    tax_rate: TaxRate,
    currency_symbol: &str,
) -> CoreResult<String> {
    Receipt::compute(items, tax_rate, currency_symbol).map(|receipt| receipt.render())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn rate(text: &str) -> TaxRate {
        text.parse().unwrap()
    }

    #[test]
    fn test_end_to_end_scenario() {
        let items = vec![
            LineItem::new("Lovely Loveseat", dec!(254.00), 1),
            LineItem::new("Luxurious Lamp", dec!(52.15), 1),
        ];

        let text = build_receipt(&items, rate("0.088"), "$").unwrap();

        assert_eq!(
            text,
            "Items:\n\
             - Lovely Loveseat x 1 @ $254.00 = $254.00\n\
             - Luxurious Lamp x 1 @ $52.15 = $52.15\n\
             \n\
             Subtotal: $306.15\n\
             Tax (8.8%): $26.94\n\
             Total: $333.09"
        );
    }

    #[test]
    fn test_empty_items() {
        let text = build_receipt(&[], rate("0.05"), "€").unwrap();
        assert_eq!(
            text,
            "Items:\n\nSubtotal: €0.00\nTax (5%): €0.00\nTotal: €0.00"
        );

        let text = build_receipt(&[], TaxRate::zero(), "$").unwrap();
        assert!(text.contains("Tax (0%): $0.00"));
    }

    #[test]
    fn test_rounding_tie_breaks_up() {
        let items = vec![LineItem::new("Pen", dec!(2.005), 1)];
        let text = build_receipt(&items, TaxRate::zero(), "$").unwrap();
        assert!(text.contains("- Pen x 1 @ $2.01 = $2.01"));
    }

    #[test]
    fn test_subtotal_is_sum_of_rounded_line_totals() {
        // Each line rounds 0.005 → 0.01; summing first would give 0.015 → 0.02
        let items = vec![
            LineItem::new("A", dec!(0.005), 1),
            LineItem::new("B", dec!(0.005), 1),
            LineItem::new("C", dec!(0.005), 1),
        ];
        let receipt = Receipt::compute(&items, TaxRate::zero(), "$").unwrap();
        assert_eq!(receipt.totals().subtotal.amount(), dec!(0.03));

        let expected: Decimal = receipt.lines().iter().map(|l| l.line_total.amount()).sum();
        assert_eq!(receipt.totals().subtotal.amount(), expected);
    }

    #[test]
    fn test_summation_without_float_drift() {
        let items = vec![
            LineItem::new("A", dec!(0.1), 1),
            LineItem::new("B", dec!(0.2), 1),
        ];
        let receipt = Receipt::compute(&items, TaxRate::zero(), "$").unwrap();
        assert_eq!(receipt.totals().subtotal.amount(), dec!(0.30));
        assert!(receipt.render().contains("Subtotal: $0.30"));
    }

    #[test]
    fn test_totals() {
        let items = vec![
            LineItem::new("Lovely Loveseat", dec!(254), 1),
            LineItem::new("Luxurious Lamp", dec!(52.15), 1),
        ];
        let totals = Receipt::compute(&items, rate("0.088"), "$").unwrap().totals();
        assert_eq!(totals.subtotal.amount(), dec!(306.15));
        assert_eq!(totals.tax.amount(), dec!(26.94));
        assert_eq!(totals.total.amount(), dec!(333.09));
    }

    #[test]
    fn test_quantity_multiplies_before_rounding() {
        let items = vec![LineItem::new("Bolt", dec!(0.333), 3)];
        let text = build_receipt(&items, rate("0.25"), "$").unwrap();
        assert!(text.contains("- Bolt x 3 @ $0.33 = $1.00"));
        assert!(text.contains("Tax (25%): $0.25"));
        assert!(text.ends_with("Total: $1.25"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let items = vec![
            LineItem::new("Widget", dec!(9.99), 7),
            LineItem::new("Gadget", dec!(0.015), 3),
        ];
        let first = build_receipt(&items, rate("0.0725"), "£").unwrap();
        let second = build_receipt(&items, rate("0.0725"), "£").unwrap();
        assert_eq!(first, second);
        assert!(!first.ends_with('\n'));
    }

    #[test]
    fn test_negative_quantity_is_rendered() {
        let items = vec![LineItem::new("Return", dec!(10), -2)];
        let text = build_receipt(&items, TaxRate::zero(), "$").unwrap();
        assert!(text.contains("- Return x -2 @ $10.00 = $-20.00"));
        assert!(text.contains("Subtotal: $-20.00"));
    }

    #[test]
    fn test_price_too_wide_for_cents_is_an_error() {
        let price = crate::money::parse_decimal("7922816251426433759354395033.5").unwrap();
        let items = vec![LineItem::new("Item", price, 1)];
        assert!(matches!(
            build_receipt(&items, TaxRate::zero(), "$"),
            Err(CoreError::Overflow { .. })
        ));
    }

    #[test]
    fn test_total_too_wide_for_cents_is_an_error() {
        let items = vec![
            LineItem::new("A", dec!(79228162514264337593543950.33), 1),
            LineItem::new("B", dec!(79228162514264337593543950.33), 1),
        ];
        assert!(matches!(
            Receipt::compute(&items, TaxRate::zero(), "$"),
            Err(CoreError::Overflow { .. })
        ));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let items = vec![LineItem::new("Huge", Decimal::MAX, 2)];
        assert!(matches!(
            build_receipt(&items, TaxRate::zero(), "$"),
            Err(CoreError::Overflow { .. })
        ));
    }
}
