//! # Session State
//!
//! Everything the interactive shell remembers between commands.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Shell Command            Session Method          State Change          │
//! │  ─────────────            ──────────────          ────────────          │
//! │                                                                         │
//! │  add Lamp 52.15 ─────────► add_row() ───────────► rows.push(row)        │
//! │  remove 2 ───────────────► remove_row() ────────► rows.remove(1)        │
//! │  clear ──────────────────► clear_rows() ────────► rows.clear()          │
//! │  load order.json ────────► load_upload() ───────► upload = Some(doc)    │
//! │  unload ─────────────────► unload() ────────────► upload = None         │
//! │  tax / currency ─────────► set_tax_rate() … ────► settings.*            │
//! │  show ───────────────────► generate() ──────────► last_receipt = text   │
//! │                                                                         │
//! │  An uploaded document takes precedence over manual rows.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Manual rows are turned into an `{"items": [...]}` document so both
//! sources run through the same parser.

use serde_json::{Map, Value};

use receipt_core::parser::{decode_document, ITEMS_KEY};
use receipt_core::validation::validate_tax_rate;
use receipt_core::{parse_items_with, CoreError, Receipt, Strictness, TaxRate};

use crate::config::ReceiptConfig;
use crate::error::{SessionError, SessionResult};

/// One manually entered row. Fields stay as typed text until generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualRow {
    pub description: String,
    pub price: String,
    /// `None` falls back to the parser's default quantity.
    pub quantity: Option<String>,
}

impl ManualRow {
    pub fn new(
        description: impl Into<String>,
        price: impl Into<String>,
        quantity: Option<String>,
    ) -> Self {
        ManualRow {
            description: description.into(),
            price: price.into(),
            quantity,
        }
    }

    fn to_record(&self) -> Value {
        let mut record = Map::new();
        record.insert("description".into(), Value::String(self.description.clone()));
        record.insert("price".into(), Value::String(self.price.clone()));
        if let Some(ref quantity) = self.quantity {
            record.insert("quantity".into(), Value::String(quantity.clone()));
        }
        Value::Object(record)
    }
}

/// A loaded items document.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    /// Where the document came from, for display.
    pub name: String,
    pub document: Value,
}

/// Receipt settings editable from the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub tax_rate: String,
    pub currency_symbol: String,
    pub strictness: Strictness,
}

impl From<&ReceiptConfig> for Settings {
    fn from(config: &ReceiptConfig) -> Self {
        Settings {
            tax_rate: config.tax_rate.clone(),
            currency_symbol: config.currency_symbol.clone(),
            strictness: Strictness::from(config.strict),
        }
    }
}

/// State of one interactive session.
#[derive(Debug, Clone)]
pub struct Session {
    rows: Vec<ManualRow>,
    upload: Option<Upload>,
    settings: Settings,
    last_receipt: Option<String>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Session {
            rows: Vec::new(),
            upload: None,
            settings,
            last_receipt: None,
        }
    }

    // =========================================================================
    // Manual Rows
    // =========================================================================

    pub fn rows(&self) -> &[ManualRow] {
        &self.rows
    }

    /// Appends a row and returns its 1-based number.
    pub fn add_row(&mut self, row: ManualRow) -> usize {
        self.rows.push(row);
        self.rows.len()
    }

    /// Removes the row with the given 1-based number.
    pub fn remove_row(&mut self, index: usize) -> SessionResult<ManualRow> {
        if index == 0 || index > self.rows.len() {
            return Err(SessionError::RowOutOfRange {
                index,
                count: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index - 1))
    }

    pub fn clear_rows(&mut self) {
        self.rows.clear();
    }

    // =========================================================================
    // Upload
    // =========================================================================

    pub fn upload(&self) -> Option<&Upload> {
        self.upload.as_ref()
    }

    /// Decodes `text` and makes it the active item source.
    ///
    /// Only the JSON syntax is checked here; record errors surface when the
    /// receipt is generated.
    pub fn load_upload(&mut self, name: impl Into<String>, text: &str) -> SessionResult<()> {
        let document = decode_document(text).map_err(CoreError::from)?;
        self.upload = Some(Upload {
            name: name.into(),
            document,
        });
        Ok(())
    }

    /// Drops the upload; returns whether there was one.
    pub fn unload(&mut self) -> bool {
        self.upload.take().is_some()
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Sets the tax rate after checking that it parses.
    pub fn set_tax_rate(&mut self, rate: &str) -> SessionResult<()> {
        rate.parse::<TaxRate>().map_err(CoreError::from)?;
        self.settings.tax_rate = rate.trim().to_string();
        Ok(())
    }

    pub fn set_currency_symbol(&mut self, symbol: impl Into<String>) {
        self.settings.currency_symbol = symbol.into();
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// The document the next receipt will be built from.
    pub fn document(&self) -> Value {
        match self.upload {
            Some(ref upload) => upload.document.clone(),
            None => {
                let records = self.rows.iter().map(ManualRow::to_record).collect();
                let mut document = Map::new();
                document.insert(ITEMS_KEY.to_string(), Value::Array(records));
                Value::Object(document)
            }
        }
    }

    /// Builds the receipt from the active source and remembers it.
    pub fn generate(&mut self) -> SessionResult<&str> {
        let strictness = self.settings.strictness;
        let items = parse_items_with(&self.document(), strictness)?;

        let tax_rate: TaxRate = self.settings.tax_rate.parse().map_err(CoreError::from)?;
        if strictness.is_strict() {
            validate_tax_rate(&tax_rate).map_err(CoreError::from)?;
        }

        let receipt = Receipt::compute(&items, tax_rate, &self.settings.currency_symbol)?;
        Ok(self.last_receipt.insert(receipt.render()).as_str())
    }

    /// The most recently generated receipt text.
    pub fn last_receipt(&self) -> Option<&str> {
        self.last_receipt.as_deref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_core::{FormatError, ValidationError};

    fn session() -> Session {
        Session::new(Settings::from(&ReceiptConfig::default()))
    }

    #[test]
    fn test_manual_rows_generate_receipt() {
        let mut session = session();
        session.add_row(ManualRow::new("Lovely Loveseat", "254.00", Some("1".into())));
        session.add_row(ManualRow::new("Luxurious Lamp", "52.15", None));

        let text = session.generate().unwrap().to_string();
        assert!(text.contains("- Luxurious Lamp x 1 @ $52.15 = $52.15"));
        assert!(text.ends_with("Total: $333.09"));
        assert_eq!(session.last_receipt(), Some(text.as_str()));
    }

    #[test]
    fn test_empty_session_generates_empty_receipt() {
        let mut session = session();
        assert_eq!(
            session.generate().unwrap(),
            "Items:\n\nSubtotal: $0.00\nTax (8.8%): $0.00\nTotal: $0.00"
        );
    }

    #[test]
    fn test_blank_description_defaults() {
        let mut session = session();
        session.add_row(ManualRow::new("", "3", Some("2".into())));
        assert!(session.generate().unwrap().contains("- Item x 2 @ $3.00 = $6.00"));
    }

    #[test]
    fn test_remove_row_is_one_based() {
        let mut session = session();
        session.add_row(ManualRow::new("A", "1", None));
        session.add_row(ManualRow::new("B", "2", None));

        let removed = session.remove_row(1).unwrap();
        assert_eq!(removed.description, "A");
        assert_eq!(session.rows().len(), 1);

        assert!(matches!(
            session.remove_row(0),
            Err(SessionError::RowOutOfRange { index: 0, count: 1 })
        ));
        assert!(matches!(
            session.remove_row(5),
            Err(SessionError::RowOutOfRange { index: 5, count: 1 })
        ));
    }

    #[test]
    fn test_upload_takes_precedence_over_rows() {
        let mut session = session();
        session.add_row(ManualRow::new("Manual", "1", None));
        session
            .load_upload("order.json", r#"{"items": [{"description": "Uploaded", "price": 2}]}"#)
            .unwrap();

        let text = session.generate().unwrap().to_string();
        assert!(text.contains("Uploaded"));
        assert!(!text.contains("Manual"));

        assert!(session.unload());
        assert!(!session.unload());
        assert!(session.generate().unwrap().contains("Manual"));
    }

    #[test]
    fn test_invalid_upload_is_rejected() {
        let mut session = session();
        let err = session.load_upload("bad.json", "{not json").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Core(CoreError::Format(FormatError::InvalidJson(_)))
        ));
        assert!(session.upload().is_none());
    }

    #[test]
    fn test_bad_row_price_surfaces_on_generate() {
        let mut session = session();
        session.add_row(ManualRow::new("Lamp", "abc", None));
        let err = session.generate().unwrap_err();
        assert_eq!(err.to_string(), r#"Item 1: invalid price "abc""#);
        assert!(session.last_receipt().is_none());
    }

    #[test]
    fn test_settings_changes_apply_to_next_receipt() {
        let mut session = session();
        session.add_row(ManualRow::new("Book", "10", None));
        session.set_tax_rate("0.05").unwrap();
        session.set_currency_symbol("€");

        let text = session.generate().unwrap();
        assert!(text.contains("Tax (5%): €0.50"));
        assert!(text.ends_with("Total: €10.50"));
    }

    #[test]
    fn test_invalid_tax_rate_is_rejected() {
        let mut session = session();
        assert!(session.set_tax_rate("abc").is_err());
        assert_eq!(session.settings().tax_rate, "0.088");
    }

    #[test]
    fn test_strict_session_rejects_zero_quantity() {
        let mut session = Session::new(Settings {
            strictness: Strictness::Strict,
            ..Settings::from(&ReceiptConfig::default())
        });
        session.add_row(ManualRow::new("Lamp", "5", Some("0".into())));
        assert!(matches!(
            session.generate(),
            Err(SessionError::Core(CoreError::Validation(
                ValidationError::MustBePositive { .. }
            )))
        ));
    }
}
