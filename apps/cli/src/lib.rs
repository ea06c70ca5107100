//! # receipt-cli
//!
//! Command-line and interactive front end for `receipt-core`.
//!
//! ## Module Organization
//! ```text
//! receipt_cli/
//! ├── lib.rs            ◄─── You are here (logging setup & dispatch)
//! ├── cli.rs            ◄─── clap argument definitions
//! ├── config.rs         ◄─── defaults → receipt.toml → env → flags
//! ├── error.rs          ◄─── CliError / SessionError
//! ├── state/
//! │   └── session.rs    ◄─── rows, upload, settings, last receipt
//! └── commands/
//!     ├── generate.rs   ◄─── one-shot --items run
//!     └── interactive.rs◄─── rustyline shell
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::io;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use receipt_core::parser::SAMPLE_DOCUMENT;

use cli::Cli;
use commands::generate::{self, GenerateRequest};
use config::ReceiptConfig;
use error::{CliError, CliResult};

/// Runs one invocation of the `receipt` binary.
///
/// ## Dispatch
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging (stderr, RUST_LOG or -v/-vv)                     │
/// │  2. --schema       ──► print example document, done                     │
/// │  3. Load Config    ──► defaults → receipt.toml → env → flags            │
/// │  4. --interactive  ──► shell until quit                                 │
/// │     otherwise      ──► generate from --items, write stdout / --output   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> CliResult<()> {
    init_tracing(cli.verbose);

    if cli.schema {
        println!("{SAMPLE_DOCUMENT}");
        return Ok(());
    }

    let mut config = ReceiptConfig::load(cli.config.as_deref())?;
    config.apply_cli(&cli);
    debug!(?config, "Configuration resolved");

    if cli.interactive {
        return commands::interactive::run_shell(&config);
    }

    let items_path = cli.items.clone().ok_or(CliError::MissingItems)?;

    info!(path = ?items_path, "Generating receipt");
    let request = GenerateRequest::new(items_path, &config);
    let receipt = generate::generate(&request)?;

    let stdout = io::stdout();
    generate::write_receipt(&receipt, cli.output.as_deref(), &mut stdout.lock())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `-v` - info, `-vv` - debug (ignored when `RUST_LOG` is set)
/// - Default: WARN, so stdout carries only the receipt
///
/// Logs always go to stderr.
fn init_tracing(verbosity: u8) {
    let fallback = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
