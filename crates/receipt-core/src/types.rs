//! # Domain Types
//!
//! Core domain types used throughout the receipt generator.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    TaxRate      │   │   Strictness    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  description    │   │  Decimal        │   │  Lenient        │       │
//! │  │  price (exact)  │   │  0.088 = 8.8%   │   │  Strict         │       │
//! │  │  quantity       │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line items have no identity beyond structural equality. They are built
//! fresh from input on every run and dropped when the receipt is rendered.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, FormatError};
use crate::money::{parse_decimal, Money};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as an exact decimal fraction.
///
/// `0.088` means 8.8%. Parsed from text so that `"0.088"` never becomes
/// `0.08799999…`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a decimal fraction.
    #[inline]
    pub const fn new(rate: Decimal) -> Self {
        TaxRate(rate)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Returns the rate as a fraction.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a percentage with trailing zeros stripped.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::types::TaxRate;
    ///
    /// let rate: TaxRate = "0.088".parse().unwrap();
    /// assert_eq!(rate.percentage_label().unwrap(), "8.8");
    ///
    /// let rate: TaxRate = "0.05".parse().unwrap();
    /// assert_eq!(rate.percentage_label().unwrap(), "5");
    /// ```
    pub fn percentage_label(&self) -> CoreResult<String> {
        let percentage = self
            .0
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| CoreError::overflow("tax percentage"))?;
        Ok(percentage.normalize().to_string())
    }
}

impl FromStr for TaxRate {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_decimal(s)
            .map(TaxRate)
            .ok_or_else(|| FormatError::InvalidTaxRate(s.to_string()))
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One purchased item.
///
/// `price` keeps the exact precision of the input (`2.005` stays `2.005`);
/// rounding only happens when the line total is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Display text. The parser substitutes `"Item"` when it is missing.
    pub description: String,

    /// Exact unit price.
    pub price: Decimal,

    /// Count of units. Not forced to be positive unless parsed strictly.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(description: impl Into<String>, price: Decimal, quantity: i64) -> Self {
        LineItem {
            description: description.into(),
            price,
            quantity,
        }
    }

    /// `round_half_up(price × quantity, 2dp)`, recomputed on every call.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::types::LineItem;
    /// use rust_decimal::Decimal;
    ///
    /// let item = LineItem::new("Pen", Decimal::new(2005, 3), 1); // 2.005
    /// assert_eq!(item.line_total().unwrap().to_string(), "2.01");
    /// ```
    pub fn line_total(&self) -> CoreResult<Money> {
        Money::line_total(self.price, self.quantity).ok_or_else(|| {
            CoreError::overflow(format!("line total for '{}'", self.description))
        })
    }
}

// =============================================================================
// Strictness
// =============================================================================

/// How forgiving the item parser is about missing or out-of-range fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Missing fields fall back to defaults; any number is accepted.
    #[default]
    Lenient,

    /// Missing price, quantity below one and negative price are errors.
    Strict,
}

impl Strictness {
    /// Returns true for [`Strictness::Strict`].
    #[inline]
    pub fn is_strict(&self) -> bool {
        matches!(self, Strictness::Strict)
    }
}

impl From<bool> for Strictness {
    fn from(strict: bool) -> Self {
        if strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
