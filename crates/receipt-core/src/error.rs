//! # Error Types
//!
//! Domain-specific error types for receipt-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  receipt-core errors (this file)                                       │
//! │  ├── CoreError        - What every core operation returns              │
//! │  ├── FormatError      - Document shape / field coercion failures       │
//! │  └── ValidationError  - Strict-mode rule violations                    │
//! │                                                                         │
//! │  receipt-cli errors (separate crate)                                   │
//! │  ├── CliError         - Missing items file, I/O, config                │
//! │  └── SessionError     - Interactive shell failures                     │
//! │                                                                         │
//! │  Flow: FormatError / ValidationError → CoreError → CliError → stderr   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item number, offending value)
//! 3. Errors are enum variants, never String
//! 4. The first bad record aborts the whole receipt

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the parser and the receipt builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The input document or one of its fields could not be read.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// A strict-mode rule was violated.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An amount exceeded the range of the decimal type.
    #[error("Amount overflow while computing {context}")]
    Overflow { context: String },
}

impl CoreError {
    /// Creates an overflow error for the named computation.
    pub fn overflow(context: impl Into<String>) -> Self {
        CoreError::Overflow {
            context: context.into(),
        }
    }
}

// =============================================================================
// Format Error
// =============================================================================

/// The input is structurally invalid or a field fails to coerce.
///
/// `item` is the 1-based position of the record in the `items` list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The text is not valid JSON.
    #[error("Invalid JSON document: {0}")]
    InvalidJson(String),

    /// The top-level value is not an object.
    #[error("Expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    /// `items` is present but is not a list.
    #[error("'items' must be a list, found {found}")]
    ItemsNotAList { found: &'static str },

    /// A record inside `items` is not an object.
    #[error("Item {item} must be an object, found {found}")]
    RecordNotAnObject { item: usize, found: &'static str },

    /// The price is not a decimal literal.
    #[error("Item {item}: invalid price {value}")]
    InvalidPrice { item: usize, value: String },

    /// The quantity cannot be coerced to an integer.
    #[error("Item {item}: invalid quantity {value}")]
    InvalidQuantity { item: usize, value: String },

    /// The tax rate is not a decimal literal.
    #[error("Invalid tax rate '{0}'")]
    InvalidTaxRate(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Strict-mode validation errors.
///
/// Lenient parsing never produces these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field that lenient mode would default is missing.
    #[error("item {item}: {field} is required")]
    Required { item: usize, field: &'static str },

    /// Value must be at least one.
    #[error("item {item}: {field} must be positive")]
    MustBePositive { item: usize, field: &'static str },

    /// Value must be zero or more.
    #[error("item {item}: {field} must not be negative")]
    MustNotBeNegative { item: usize, field: &'static str },

    /// Tax rate outside 0..=1.
    #[error("tax rate {rate} must be between 0 and 1")]
    TaxRateOutOfRange { rate: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
