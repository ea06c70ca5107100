//! # Commands
//!
//! The two ways of producing a receipt.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  generate     one shot: --items file → receipt on stdout or --output    │
//! │  interactive  line-oriented shell over a Session                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod generate;
pub mod interactive;
