//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    2.005 is stored as 2.00499999...  → rounds to 2.00  ❌ WRONG!        │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal                                    │
//! │    "0.1" + "0.2" = 0.3 exactly                                          │
//! │    "2.005" rounds half-up to 2.01                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unit prices and tax rates keep whatever precision the input had. Only
//! `Money` values (line totals, subtotal, tax, total) are quantized to cents.
//!
//! ## Usage
//! ```rust
//! use receipt_core::money::{parse_decimal, Money};
//!
//! let price = parse_decimal("2.005").unwrap();
//! let total = Money::round_half_up(price).unwrap();
//! assert_eq!(total.to_string(), "2.01");
//! assert_eq!(total.with_symbol("$"), "$2.01");
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::TaxRate;

/// Number of fractional digits every `Money` value carries.
pub const MINOR_UNIT_SCALE: u32 = 2;

/// Largest negative exponent expanded to plain notation by [`parse_decimal`].
const MAX_EXPANDED_EXPONENT: u32 = 1000;

// =============================================================================
// Decimal Parsing
// =============================================================================

/// Parses a decimal literal exactly.
///
/// Accepts plain (`"52.15"`, `"-3"`, `"+.5"`) and scientific (`"1.5e2"`)
/// notation. Surrounding whitespace is ignored. Returns `None` for anything
/// else, including empty strings, `NaN` and infinities.
///
/// Digits past the 28th fractional place are rounded away in both
/// notations, so `"1e-29"` parses like its plain spelling. Negative
/// exponents below `-1000` are rejected.
///
/// ## Example
/// ```rust
/// use receipt_core::money::parse_decimal;
/// use std::str::FromStr;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal(" 254.00 "), Some(Decimal::from_str("254.00").unwrap()));
/// assert_eq!(parse_decimal("1e2"), Some(Decimal::from(100)));
/// assert_eq!(parse_decimal("abc"), None);
/// ```
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if text.contains(|c: char| c == 'e' || c == 'E') {
        Decimal::from_scientific(text).ok().or_else(|| {
            expand_negative_exponent(text).and_then(|plain| Decimal::from_str(&plain).ok())
        })
    } else {
        Decimal::from_str(text).ok()
    }
}

/// Rewrites `"1.5e-30"` in plain notation.
///
/// Only negative exponents are expanded; a positive exponent that
/// `from_scientific` rejects is a genuine overflow.
fn expand_negative_exponent(text: &str) -> Option<String> {
    let (mantissa, exponent) = text.split_once(|c: char| c == 'e' || c == 'E')?;
    let exponent: i64 = exponent.parse().ok()?;
    if exponent >= 0 || exponent.unsigned_abs() > u64::from(MAX_EXPANDED_EXPONENT) {
        return None;
    }

    let (sign, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{int_part}{frac_part}");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Position of the decimal point within `digits` after the shift
    let point = int_part.len() as i64 + exponent;
    let plain = if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        format!("{sign}0.{zeros}{digits}")
    } else {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{sign}{whole}.{fraction}")
    };
    Some(plain)
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount quantized to exactly two fractional digits.
///
/// ## Design Decisions
/// - **Decimal, not cents**: unit prices such as `2.005` must multiply
///   exactly before rounding, so the inputs cannot be truncated to cents
/// - **Always scale 2**: `Display` prints `5.00`, never `5`
/// - **Round half up**: ties round away from zero (`0.125 → 0.13`)
///
/// ## Where Money is Used
/// ```text
/// LineItem.price × quantity ──► round ──► line total ─┐
///                                                     ├─► subtotal
///                     (one rounded total per line) ───┘      │
///                                                            ▼
///                                  subtotal × tax rate ──► round ──► tax
///                                                            │
///                                  subtotal + tax ─────────► round ──► total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// Quantizes a decimal to cents using round-half-up.
    ///
    /// Returns `None` when the value has too many integer digits to carry
    /// two decimals within the 28-digit precision.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let tax = Money::round_half_up(Decimal::new(269412, 4)).unwrap(); // 26.9412
    /// assert_eq!(tax.to_string(), "26.94");
    ///
    /// let tie = Money::round_half_up(Decimal::new(125, 3)).unwrap(); // 0.125
    /// assert_eq!(tie.to_string(), "0.13");
    ///
    /// assert!(Money::round_half_up(Decimal::MAX).is_none());
    /// ```
    pub fn round_half_up(value: Decimal) -> Option<Self> {
        let mut rounded =
            value.round_dp_with_strategy(MINOR_UNIT_SCALE, RoundingStrategy::MidpointAwayFromZero);
        // rescale keeps the old scale when the mantissa would overflow
        rounded.rescale(MINOR_UNIT_SCALE);
        (rounded.scale() == MINOR_UNIT_SCALE).then_some(Money(rounded))
    }

    /// Returns zero money value (`0.00`).
    pub fn zero() -> Self {
        Money(Decimal::new(0, MINOR_UNIT_SCALE))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Computes `round_half_up(unit_price × quantity)`.
    ///
    /// Returns `None` if the product overflows the decimal range or cannot
    /// be held at two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let unit_price = Decimal::new(299, 2); // 2.99
    /// let line_total = Money::line_total(unit_price, 3).unwrap();
    /// assert_eq!(line_total.to_string(), "8.97");
    /// ```
    pub fn line_total(unit_price: Decimal, quantity: i64) -> Option<Money> {
        unit_price
            .checked_mul(Decimal::from(quantity))
            .and_then(Money::round_half_up)
    }

    /// Calculates tax on this amount with round-half-up.
    ///
    /// ## Example
    /// ```rust
    /// use receipt_core::money::Money;
    /// use receipt_core::types::TaxRate;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::round_half_up(Decimal::new(30615, 2)).unwrap(); // 306.15
    /// let rate: TaxRate = "0.088".parse().unwrap();
    ///
    /// // 306.15 × 0.088 = 26.9412 → 26.94
    /// assert_eq!(subtotal.calculate_tax(rate).unwrap().to_string(), "26.94");
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Option<Money> {
        self.0.checked_mul(rate.value()).and_then(Money::round_half_up)
    }

    /// Adds two amounts, re-quantizing the result. `None` on overflow.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).and_then(Money::round_half_up)
    }

    /// Formats the amount with a currency symbol prefix.
    ///
    /// No thousands separators and no locale handling: the symbol is
    /// concatenated directly before the numeral.
    ///
    /// ```rust
    /// use receipt_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let price = Money::round_half_up(Decimal::new(123456789, 2)).unwrap();
    /// assert_eq!(price.with_symbol("€"), "€1234567.89");
    /// ```
    pub fn with_symbol(&self, currency_symbol: &str) -> String {
        format!("{}{}", currency_symbol, self)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the bare numeral with two decimals, e.g. `306.15` or `-5.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
