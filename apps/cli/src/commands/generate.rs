//! # One-Shot Generation
//!
//! Reads an items file, builds the receipt and writes it out.
//!
//! ## Flow
//! ```text
//! --items path ──► exists? ──► read ──► parse_items_str_with ──► TaxRate
//!                    │ no                                          │
//!                    ▼                                             ▼
//!              ItemsNotFound                               Receipt::compute
//!                                                                  │
//!                              stdout  ◄── no --output ────────────┤
//!                              file + "Receipt written to …" ◄─────┘
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use receipt_core::validation::validate_tax_rate;
use receipt_core::{parse_items_str_with, CoreError, Receipt, Strictness, TaxRate};

use crate::config::ReceiptConfig;
use crate::error::{CliError, CliResult};

/// Inputs of a one-shot run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub items_path: PathBuf,
    pub tax_rate: String,
    pub currency_symbol: String,
    pub strictness: Strictness,
}

impl GenerateRequest {
    pub fn new(items_path: impl Into<PathBuf>, config: &ReceiptConfig) -> Self {
        GenerateRequest {
            items_path: items_path.into(),
            tax_rate: config.tax_rate.clone(),
            currency_symbol: config.currency_symbol.clone(),
            strictness: Strictness::from(config.strict),
        }
    }
}

/// Builds the receipt text for a request.
///
/// Items are parsed before the tax rate, so a bad document is reported
/// ahead of a bad rate.
pub fn generate(request: &GenerateRequest) -> CliResult<String> {
    let path = &request.items_path;
    if !path.exists() {
        return Err(CliError::ItemsNotFound(path.clone()));
    }

    debug!(?path, "Reading items file");
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;

    let items = parse_items_str_with(&text, request.strictness)?;

    let tax_rate: TaxRate = request.tax_rate.parse().map_err(CoreError::from)?;
    if request.strictness.is_strict() {
        validate_tax_rate(&tax_rate).map_err(CoreError::from)?;
    }

    let receipt = Receipt::compute(&items, tax_rate, &request.currency_symbol)?;
    let totals = receipt.totals();
    info!(
        items = items.len(),
        subtotal = %totals.subtotal,
        tax = %totals.tax,
        total = %totals.total,
        "Receipt computed"
    );

    Ok(receipt.render())
}

/// Writes the receipt to `output`, or to `out` when no file is given.
///
/// A file gets the receipt plus a trailing newline, and `out` gets a
/// confirmation line.
pub fn write_receipt<W: Write>(receipt: &str, output: Option<&Path>, out: &mut W) -> CliResult<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{receipt}\n")).map_err(|source| CliError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!(?path, "Receipt written");
            writeln!(out, "Receipt written to {}", path.display())?;
        }
        None => writeln!(out, "{receipt}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_core::parser::SAMPLE_DOCUMENT;
    use receipt_core::{FormatError, ValidationError};

    fn request(dir: &Path, contents: &str) -> GenerateRequest {
        let path = dir.join("items.json");
        fs::write(&path, contents).unwrap();
        GenerateRequest::new(path, &ReceiptConfig::default())
    }

    #[test]
    fn test_generate_sample_document() {
        let dir = tempfile::tempdir().unwrap();
        let text = generate(&request(dir.path(), SAMPLE_DOCUMENT)).unwrap();
        assert!(text.starts_with("Items:\n- Lovely Loveseat x 1 @ $254.00 = $254.00\n"));
        assert!(text.ends_with("Tax (8.8%): $26.94\nTotal: $333.09"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let request = GenerateRequest::new(missing, &ReceiptConfig::default());
        let err = generate(&request).unwrap_err();
        assert!(matches!(err, CliError::ItemsNotFound(_)));
        assert!(err.to_string().starts_with("Items file not found: "));
    }

    #[test]
    fn test_bad_items_reported_before_bad_rate() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = request(dir.path(), r#"{"items": [{"price": "abc"}]}"#);
        request.tax_rate = "nope".into();
        assert!(matches!(
            generate(&request),
            Err(CliError::Core(CoreError::Format(FormatError::InvalidPrice { .. })))
        ));
    }

    #[test]
    fn test_invalid_tax_rate() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = request(dir.path(), SAMPLE_DOCUMENT);
        request.tax_rate = "abc".into();
        assert!(matches!(
            generate(&request),
            Err(CliError::Core(CoreError::Format(FormatError::InvalidTaxRate(_))))
        ));
    }

    #[test]
    fn test_strict_mode_checks_tax_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut request = request(dir.path(), SAMPLE_DOCUMENT);
        request.tax_rate = "1.5".into();
        assert!(generate(&request).is_ok());

        request.strictness = Strictness::Strict;
        assert!(matches!(
            generate(&request),
            Err(CliError::Core(CoreError::Validation(
                ValidationError::TaxRateOutOfRange { .. }
            )))
        ));
    }

    #[test]
    fn test_write_to_stdout() {
        let mut out = Vec::new();
        write_receipt("Items:", None, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Items:\n");
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.txt");
        let mut out = Vec::new();

        write_receipt("Items:\n\nTotal: $0.00", Some(&path), &mut out).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Items:\n\nTotal: $0.00\n");
        let message = String::from_utf8(out).unwrap();
        assert!(message.starts_with("Receipt written to "));
        assert!(message.trim_end().ends_with("receipt.txt"));
    }
}
