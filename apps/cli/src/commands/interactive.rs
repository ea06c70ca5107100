//! # Interactive Shell
//!
//! A line-oriented front end: enter rows by hand or load a JSON file,
//! adjust the settings, then `show` the receipt and `save` a copy.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rustyline ──► shlex::split ──► ShellCommand ──► execute(&mut Session)  │
//! │                                                      │                  │
//! │                         Ok(Continue(text)) ──► print text               │
//! │                         Ok(Quit)           ──► leave the loop           │
//! │                         Err(e)             ──► "error: e", keep going   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, info, warn};

use receipt_core::parser::SAMPLE_DOCUMENT;

use crate::config::ReceiptConfig;
use crate::error::{CliResult, SessionError, SessionResult};
use crate::state::{ManualRow, Session, Settings};

/// Prompt shown before every line.
pub const PROMPT: &str = ">> ";

/// File name used by `save` without an argument.
pub const DEFAULT_SAVE_PATH: &str = "receipt.txt";

const HELP: &str = "\
Commands:
  add <description> <price> [quantity]   add a row (quote descriptions with spaces)
  remove <n>                             remove row n
  rows                                   list the rows
  clear                                  remove all rows
  load <path>                            use a JSON items file instead of the rows
  unload                                 go back to the rows
  tax <decimal>                          set the tax rate, e.g. 0.088
  currency <symbol>                      set the currency symbol
  settings                               show the current settings
  show                                   generate and print the receipt
  save [path]                            save the last receipt (default receipt.txt)
  schema                                 print an example items file
  help                                   show this help
  quit                                   leave the shell";

const NO_ARGUMENT_COMMANDS: &[&str] = &[
    "rows", "clear", "unload", "settings", "show", "schema", "help", "?", "quit", "exit",
];

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add(ManualRow),
    Remove(usize),
    Rows,
    Clear,
    Load(PathBuf),
    Unload,
    Tax(String),
    Currency(String),
    Settings,
    Show,
    Save(Option<PathBuf>),
    Schema,
    Help,
    Quit,
}

/// What the loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text, if any, and read the next line.
    Continue(Option<String>),
    Quit,
}

impl Outcome {
    fn print(text: impl Into<String>) -> Self {
        Outcome::Continue(Some(text.into()))
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> SessionResult<Option<ShellCommand>> {
    let words = shlex::split(line).ok_or(SessionError::UnbalancedQuotes)?;
    let Some((name, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match (name.to_lowercase().as_str(), args) {
        ("add", [description, price]) => {
            ShellCommand::Add(ManualRow::new(description.as_str(), price.as_str(), None))
        }
        ("add", [description, price, quantity]) => ShellCommand::Add(ManualRow::new(
            description.as_str(),
            price.as_str(),
            Some(quantity.clone()),
        )),
        ("add", _) => return Err(SessionError::Usage("add <description> <price> [quantity]")),

        ("remove", [index]) => {
            let index = index
                .parse()
                .map_err(|_| SessionError::Usage("remove <n>"))?;
            ShellCommand::Remove(index)
        }
        ("remove", _) => return Err(SessionError::Usage("remove <n>")),

        ("load", [path]) => ShellCommand::Load(PathBuf::from(path)),
        ("load", _) => return Err(SessionError::Usage("load <path>")),

        ("tax", [rate]) => ShellCommand::Tax(rate.clone()),
        ("tax", _) => return Err(SessionError::Usage("tax <decimal>")),

        ("currency", [symbol]) => ShellCommand::Currency(symbol.clone()),
        ("currency", _) => return Err(SessionError::Usage("currency <symbol>")),

        ("save", []) => ShellCommand::Save(None),
        ("save", [path]) => ShellCommand::Save(Some(PathBuf::from(path))),
        ("save", _) => return Err(SessionError::Usage("save [path]")),

        ("rows", []) => ShellCommand::Rows,
        ("clear", []) => ShellCommand::Clear,
        ("unload", []) => ShellCommand::Unload,
        ("settings", []) => ShellCommand::Settings,
        ("show", []) => ShellCommand::Show,
        ("schema", []) => ShellCommand::Schema,
        ("help" | "?", []) => ShellCommand::Help,
        ("quit" | "exit", []) => ShellCommand::Quit,

        (other, _) if NO_ARGUMENT_COMMANDS.contains(&other) => {
            return Err(SessionError::Usage("this command takes no arguments"))
        }

        _ => return Err(SessionError::UnknownCommand(name.clone())),
    };

    Ok(Some(command))
}

// =============================================================================
// Execution
// =============================================================================

/// Applies one command to the session.
pub fn execute(session: &mut Session, command: ShellCommand) -> SessionResult<Outcome> {
    debug!(?command, "Executing shell command");

    let outcome = match command {
        ShellCommand::Add(row) => {
            let number = session.add_row(row);
            Outcome::print(format!("Added row {number}"))
        }
        ShellCommand::Remove(index) => {
            let row = session.remove_row(index)?;
            Outcome::print(format!("Removed row {index}: {}", row.description))
        }
        ShellCommand::Rows => Outcome::print(describe_rows(session)),
        ShellCommand::Clear => {
            session.clear_rows();
            Outcome::print("All rows removed")
        }
        ShellCommand::Load(path) => {
            let text = fs::read_to_string(&path).map_err(|source| SessionError::Read {
                path: path.clone(),
                source,
            })?;
            session.load_upload(path.display().to_string(), &text)?;
            info!(?path, "Items document loaded");
            Outcome::print(format!("Loaded {}; rows are ignored until `unload`", path.display()))
        }
        ShellCommand::Unload => {
            if session.unload() {
                Outcome::print("Upload removed; using the rows again")
            } else {
                Outcome::print("No upload to remove")
            }
        }
        ShellCommand::Tax(rate) => {
            session.set_tax_rate(&rate)?;
            Outcome::print(format!("Tax rate set to {}", session.settings().tax_rate))
        }
        ShellCommand::Currency(symbol) => {
            session.set_currency_symbol(symbol);
            Outcome::print(format!(
                "Currency symbol set to {}",
                session.settings().currency_symbol
            ))
        }
        ShellCommand::Settings => Outcome::print(describe_settings(session.settings())),
        ShellCommand::Show => Outcome::print(session.generate()?),
        ShellCommand::Save(path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH));
            let receipt = session.last_receipt().ok_or(SessionError::NothingToSave)?;
            fs::write(&path, receipt).map_err(|source| SessionError::Write {
                path: path.clone(),
                source,
            })?;
            info!(?path, "Receipt saved");
            Outcome::print(format!("Receipt saved to {}", path.display()))
        }
        ShellCommand::Schema => Outcome::print(SAMPLE_DOCUMENT),
        ShellCommand::Help => Outcome::print(HELP),
        ShellCommand::Quit => Outcome::Quit,
    };

    Ok(outcome)
}

fn describe_rows(session: &Session) -> String {
    let mut out = String::new();
    if let Some(upload) = session.upload() {
        let _ = writeln!(out, "Using {}; these rows are ignored:", upload.name);
    }
    if session.rows().is_empty() {
        out.push_str("No rows");
        return out;
    }
    for (number, row) in session.rows().iter().enumerate() {
        let _ = write!(
            out,
            "{}. {} | price {} | quantity {}",
            number + 1,
            row.description,
            row.price,
            row.quantity.as_deref().unwrap_or("1")
        );
        if number + 1 < session.rows().len() {
            out.push('\n');
        }
    }
    out
}

fn describe_settings(settings: &Settings) -> String {
    format!(
        "tax rate: {}\ncurrency: {}\nstrict: {}",
        settings.tax_rate,
        settings.currency_symbol,
        settings.strictness.is_strict()
    )
}

// =============================================================================
// Shell Loop
// =============================================================================

/// Runs the shell until `quit`, Ctrl-D or Ctrl-C.
pub fn run_shell(config: &ReceiptConfig) -> CliResult<()> {
    let mut editor = DefaultEditor::new()?;
    let mut session = Session::new(Settings::from(config));
    info!("Interactive shell started");
    println!("Receipt generator. Type `help` for commands.");

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        let result = parse_command(&line).and_then(|command| match command {
            Some(command) => execute(&mut session, command),
            None => Ok(Outcome::Continue(None)),
        });

        match result {
            Ok(Outcome::Quit) => break,
            Ok(Outcome::Continue(Some(text))) => println!("{text}"),
            Ok(Outcome::Continue(None)) => {}
            Err(e) => {
                warn!(error = %e, "Shell command failed");
                println!("error: {e}");
            }
        }
    }

    info!("Interactive shell closed");
    Ok(())
}
