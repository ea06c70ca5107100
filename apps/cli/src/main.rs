//! # receipt
//!
//! Entry point for the receipt generator binary.
//!
//! ```text
//! receipt --items order.json [--tax 0.088] [--currency $] [--output receipt.txt]
//! receipt --interactive
//! receipt --schema
//! ```

use clap::Parser;

use receipt_cli::cli::Cli;

fn main() -> anyhow::Result<()> {
    receipt_cli::run(Cli::parse())?;
    Ok(())
}
