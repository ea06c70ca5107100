//! # Validation Module
//!
//! Strict-mode rules for item records and tax rates.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Coercion (parser, always on)                                 │
//! │  ├── price must be a decimal literal                                   │
//! │  └── quantity must be integer-coercible                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Business rules (THIS MODULE, strict mode only)               │
//! │  ├── price present and >= 0                                            │
//! │  ├── quantity >= 1                                                     │
//! │  └── tax rate within 0..=1                                             │
//! │                                                                         │
//! │  Lenient mode stops after layer 1, so returns and credits               │
//! │  (negative quantities) still produce a receipt.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use receipt_core::validation::{validate_price, validate_quantity};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_quantity(1, 5).is_ok());
//! assert!(validate_quantity(1, 0).is_err());
//! assert!(validate_price(1, &Decimal::new(-100, 2)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a quantity value. `item` is the 1-based record number.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_quantity(item: usize, quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            item,
            field: "quantity",
        });
    }

    Ok(())
}

/// Validates a unit price. Zero is allowed (free items).
pub fn validate_price(item: usize, price: &Decimal) -> ValidationResult<()> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::MustNotBeNegative {
            item,
            field: "price",
        });
    }

    Ok(())
}

/// Validates a tax rate.
///
/// ## Rules
/// - Must be between 0 and 1 (0% to 100%)
///
/// ## Example
/// ```rust
/// use receipt_core::validation::validate_tax_rate;
///
/// assert!(validate_tax_rate(&"0.088".parse().unwrap()).is_ok());
/// assert!(validate_tax_rate(&"8.8".parse().unwrap()).is_err());
/// ```
pub fn validate_tax_rate(rate: &TaxRate) -> ValidationResult<()> {
    let value = rate.value();
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(ValidationError::TaxRateOutOfRange {
            rate: value.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
