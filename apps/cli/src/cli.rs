//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Generate a shopping receipt from JSON items.
#[derive(Debug, Parser)]
#[command(name = "receipt", version)]
pub struct Cli {
    /// Path to JSON file with items
    #[arg(
        long,
        value_name = "PATH",
        required_unless_present_any = ["interactive", "schema"]
    )]
    pub items: Option<PathBuf>,

    /// Sales tax rate as decimal (e.g., 0.088 for 8.8%) [default: 0.088]
    #[arg(long, value_name = "DECIMAL", allow_hyphen_values = true)]
    pub tax: Option<String>,

    /// Currency symbol to prefix amounts [default: $]
    #[arg(long, value_name = "SYMBOL")]
    pub currency: Option<String>,

    /// Write the receipt to this file instead of stdout
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Reject missing prices, non-positive quantities and negative prices
    #[arg(long)]
    pub strict: bool,

    /// Read defaults from this TOML file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start the interactive shell
    #[arg(short, long, conflicts_with_all = ["items", "output", "schema"])]
    pub interactive: bool,

    /// Print an example items document and exit
    #[arg(long)]
    pub schema: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
