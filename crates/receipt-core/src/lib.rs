//! # receipt-core: Pure Receipt Computation
//!
//! This crate is the **heart** of the receipt generator. It turns item
//! records into an itemized text receipt with exact decimal math and zero
//! I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Receipt Generator Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   receipt-cli (adapters)                        │   │
//! │  │   --items file ──┐        interactive shell:                    │   │
//! │  │                  │        load <file> / add <row> ──┐           │   │
//! │  └──────────────────┼──────────────────────────────────┼───────────┘   │
//! │                     │  JSON document                   │                │
//! │  ┌──────────────────▼──────────────────────────────────▼───────────┐   │
//! │  │               ★ receipt-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐    ┌───────────┐    ┌───────────┐              │   │
//! │  │   │  parser   │───►│   types   │───►│  receipt  │──► String    │   │
//! │  │   │ JSON→Item │    │ LineItem  │    │  builder  │              │   │
//! │  │   └───────────┘    │ TaxRate   │    └─────┬─────┘              │   │
//! │  │                    └───────────┘          │                    │   │
//! │  │                                     ┌─────▼─────┐              │   │
//! │  │                                     │   money   │              │   │
//! │  │                                     └───────────┘              │   │
//! │  │   NO I/O • NO LOGGING • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`parser`] - Item Parser (document → `LineItem`s)
//! - [`receipt`] - Receipt Builder (totals + text layout)
//! - [`money`] - `Money` type with round-half-up to cents
//! - [`types`] - `LineItem`, `TaxRate`, `Strictness`
//! - [`validation`] - Strict-mode rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, byte for byte
//! 2. **No I/O**: callers read files and hand in text or JSON values
//! 3. **Exact Decimals**: prices, rates and totals are `rust_decimal::Decimal`
//! 4. **Explicit Errors**: all errors are typed; the first bad record aborts
//!
//! ## Example Usage
//!
//! ```rust
//! use receipt_core::{build_receipt, parse_items_str, TaxRate};
//!
//! let items = parse_items_str(r#"{"items": [
//!     {"description": "Lovely Loveseat", "price": "254.00", "quantity": 1},
//!     {"description": "Luxurious Lamp", "price": "52.15"}
//! ]}"#).unwrap();
//!
//! let rate: TaxRate = "0.088".parse().unwrap();
//! let receipt = build_receipt(&items, rate, "$").unwrap();
//!
//! assert!(receipt.ends_with("Total: $333.09"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod parser;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FormatError, ValidationError};
pub use money::Money;
pub use parser::{parse_items, parse_items_str, parse_items_str_with, parse_items_with};
pub use receipt::{build_receipt, Receipt, ReceiptLine, ReceiptTotals};
pub use types::{LineItem, Strictness, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tax rate used when the caller does not configure one (8.8%).
pub const DEFAULT_TAX_RATE: &str = "0.088";

/// Currency symbol used when the caller does not configure one.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
