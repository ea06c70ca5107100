//! # Shell State
//!
//! State held by the interactive shell between commands.

pub mod session;

pub use session::{ManualRow, Session, Settings, Upload};
