//! # Item Parser
//!
//! Turns a decoded items document into validated [`LineItem`]s.
//!
//! ## Input Shape
//! ```text
//! {
//!   "items": [                                  ◄── absent key = no items
//!     {"description": "Lovely Loveseat",        ◄── default "Item"
//!      "price": "254.00",                       ◄── string or number, default 0
//!      "quantity": 1},                          ◄── integer-coercible, default 1
//!     ...
//!   ]
//! }
//! ```
//!
//! ## Coercion Rules
//! ```text
//! ┌──────────────┬──────────────────────────────┬─────────────────────────┐
//! │ field        │ accepted                     │ rejected (FormatError)  │
//! ├──────────────┼──────────────────────────────┼─────────────────────────┤
//! │ description  │ anything (non-strings as     │ never                   │
//! │              │ their JSON text)             │                         │
//! │ price        │ decimal string, JSON number  │ "abc", null, bool, list │
//! │ quantity     │ integer, float (truncated),  │ "2.5", "x", null, list  │
//! │              │ integer string, bool (1/0)   │                         │
//! └──────────────┴──────────────────────────────┴─────────────────────────┘
//! ```
//!
//! The first bad record aborts the whole parse; there is no
//! skip-and-continue mode.

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::error::{CoreResult, FormatError, ValidationError};
use crate::money::parse_decimal;
use crate::types::{LineItem, Strictness};
use crate::validation::{validate_price, validate_quantity};

/// Key of the item list in the input document.
pub const ITEMS_KEY: &str = "items";

/// Description used when a record has none.
pub const DEFAULT_DESCRIPTION: &str = "Item";

/// Quantity used when a record has none.
pub const DEFAULT_QUANTITY: i64 = 1;

/// Example document accepted by [`parse_items_str`].
pub const SAMPLE_DOCUMENT: &str = r#"{
  "items": [
    {"description": "Lovely Loveseat", "price": "254.00", "quantity": 1},
    {"description": "Luxurious Lamp",   "price": "52.15",  "quantity": 1}
  ]
}"#;

// =============================================================================
// Public API
// =============================================================================

/// Parses an items document leniently.
///
/// ## Example
/// ```rust
/// use receipt_core::parser::parse_items;
/// use serde_json::json;
///
/// let items = parse_items(&json!({"items": [{}]})).unwrap();
/// assert_eq!(items[0].description, "Item");
/// assert_eq!(items[0].quantity, 1);
/// assert!(items[0].price.is_zero());
/// ```
pub fn parse_items(document: &Value) -> CoreResult<Vec<LineItem>> {
    parse_items_with(document, Strictness::Lenient)
}

/// Parses an items document with the given strictness.
pub fn parse_items_with(document: &Value, strictness: Strictness) -> CoreResult<Vec<LineItem>> {
    let object = document.as_object().ok_or(FormatError::NotAnObject {
        found: json_kind(document),
    })?;

    let records = match object.get(ITEMS_KEY) {
        None => return Ok(Vec::new()),
        Some(Value::Array(records)) => records,
        Some(other) => {
            return Err(FormatError::ItemsNotAList {
                found: json_kind(other),
            }
            .into())
        }
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| parse_record(index + 1, record, strictness))
        .collect()
}

/// Decodes JSON text and parses it leniently.
///
/// ## Example
/// ```rust
/// use receipt_core::parser::{parse_items_str, SAMPLE_DOCUMENT};
///
/// let items = parse_items_str(SAMPLE_DOCUMENT).unwrap();
/// assert_eq!(items.len(), 2);
/// assert_eq!(items[1].description, "Luxurious Lamp");
/// ```
pub fn parse_items_str(text: &str) -> CoreResult<Vec<LineItem>> {
    parse_items_str_with(text, Strictness::Lenient)
}

/// Decodes JSON text and parses it with the given strictness.
pub fn parse_items_str_with(text: &str, strictness: Strictness) -> CoreResult<Vec<LineItem>> {
    let document = decode_document(text)?;
    parse_items_with(&document, strictness)
}

/// Decodes JSON text into a document without interpreting it.
pub fn decode_document(text: &str) -> Result<Value, FormatError> {
    serde_json::from_str(text).map_err(|e| FormatError::InvalidJson(e.to_string()))
}

// =============================================================================
// Record Parsing
// =============================================================================

fn parse_record(item: usize, record: &Value, strictness: Strictness) -> CoreResult<LineItem> {
    let fields = record.as_object().ok_or(FormatError::RecordNotAnObject {
        item,
        found: json_kind(record),
    })?;

    let description = coerce_description(fields.get("description"));
    let price = parse_price(item, fields, strictness)?;
    let quantity = match fields.get("quantity") {
        Some(value) => coerce_quantity(item, value)?,
        None => DEFAULT_QUANTITY,
    };

    if strictness.is_strict() {
        validate_price(item, &price)?;
        validate_quantity(item, quantity)?;
    }

    Ok(LineItem {
        description,
        price,
        quantity,
    })
}

fn parse_price(
    item: usize,
    fields: &Map<String, Value>,
    strictness: Strictness,
) -> CoreResult<Decimal> {
    match fields.get("price") {
        Some(value) => Ok(coerce_price(item, value)?),
        None if strictness.is_strict() => Err(ValidationError::Required {
            item,
            field: "price",
        }
        .into()),
        None => Ok(Decimal::ZERO),
    }
}

fn coerce_description(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => DEFAULT_DESCRIPTION.to_string(),
        Some(Value::String(s)) if s.is_empty() => DEFAULT_DESCRIPTION.to_string(),
        Some(Value::String(s)) => s.clone(),
        // Compact JSON text: `true`, `[1,2]`
        Some(other) => other.to_string(),
    }
}

/// Prices go through their text form so numbers keep their literal digits.
fn coerce_price(item: usize, value: &Value) -> Result<Decimal, FormatError> {
    let parsed = match value {
        Value::String(s) => parse_decimal(s),
        Value::Number(n) => parse_decimal(&n.to_string()),
        _ => None,
    };

    parsed.ok_or_else(|| FormatError::InvalidPrice {
        item,
        value: value.to_string(),
    })
}

fn coerce_quantity(item: usize, value: &Value) -> Result<i64, FormatError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate_float)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };

    parsed.ok_or_else(|| FormatError::InvalidQuantity {
        item,
        value: value.to_string(),
    })
}

/// Truncates toward zero; `None` for NaN, infinities and out-of-range values.
fn truncate_float(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63

    let truncated = value.trunc();
    if truncated.is_finite() && truncated >= -LIMIT && truncated < LIMIT {
        Some(truncated as i64)
    } else {
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_sample_document() {
        let items = parse_items_str(SAMPLE_DOCUMENT).unwrap();
        assert_eq!(
            items,
            vec![
                LineItem::new("Lovely Loveseat", dec!(254.00), 1),
                LineItem::new("Luxurious Lamp", dec!(52.15), 1),
            ]
        );
    }

    #[test]
    fn test_empty_record_uses_defaults() {
        let items = parse_items(&json!({"items": [{}]})).unwrap();
        assert_eq!(items, vec![LineItem::new("Item", dec!(0), 1)]);
    }

    #[test]
    fn test_missing_items_key_is_empty() {
        assert!(parse_items(&json!({})).unwrap().is_empty());
        assert!(parse_items(&json!({"other": [1, 2]})).unwrap().is_empty());
    }

    #[test]
    fn test_structure_errors() {
        assert_eq!(
            parse_items(&json!([1, 2])),
            Err(FormatError::NotAnObject { found: "list" }.into())
        );
        assert_eq!(
            parse_items(&json!({"items": "lamp"})),
            Err(FormatError::ItemsNotAList { found: "string" }.into())
        );
        assert_eq!(
            parse_items(&json!({"items": null})),
            Err(FormatError::ItemsNotAList { found: "null" }.into())
        );
        assert_eq!(
            parse_items(&json!({"items": [{}, 5]})),
            Err(FormatError::RecordNotAnObject {
                item: 2,
                found: "number"
            }
            .into())
        );
    }

    #[test]
    fn test_invalid_json_text() {
        let err = parse_items_str("{\"items\": [").unwrap_err();
        assert!(matches!(err, CoreError::Format(FormatError::InvalidJson(_))));
    }

    #[test]
    fn test_price_coercion() {
        let items = parse_items(&json!({"items": [
            {"price": "254"},
            {"price": 52.15},
            {"price": 7},
            {"price": " 1.5e1 "},
        ]}))
        .unwrap();
        let prices: Vec<Decimal> = items.iter().map(|i| i.price).collect();
        assert_eq!(prices, vec![dec!(254), dec!(52.15), dec!(7), dec!(15)]);
    }

    #[test]
    fn test_numeric_price_keeps_literal_digits() {
        let items = parse_items_str(r#"{"items": [{"price": 0.1}, {"price": 0.2}]}"#).unwrap();
        assert_eq!(items[0].price + items[1].price, dec!(0.3));
    }

    #[test]
    fn test_invalid_price_aborts_parse() {
        let result = parse_items(&json!({"items": [
            {"description": "Good", "price": "1.00"},
            {"description": "Bad", "price": "abc"},
        ]}));
        assert_eq!(
            result,
            Err(FormatError::InvalidPrice {
                item: 2,
                value: "\"abc\"".to_string()
            }
            .into())
        );

        assert!(parse_items(&json!({"items": [{"price": null}]})).is_err());
        assert!(parse_items(&json!({"items": [{"price": true}]})).is_err());
    }

    #[test]
    fn test_quantity_coercion() {
        let items = parse_items(&json!({"items": [
            {"quantity": 3},
            {"quantity": "4"},
            {"quantity": 2.9},
            {"quantity": -1.5},
            {"quantity": true},
        ]}))
        .unwrap();
        let quantities: Vec<i64> = items.iter().map(|i| i.quantity).collect();
        assert_eq!(quantities, vec![3, 4, 2, -1, 1]);
    }

    #[test]
    fn test_invalid_quantity() {
        for bad in [json!("2.5"), json!("two"), json!(null), json!([1])] {
            let result = parse_items(&json!({"items": [{"quantity": bad}]}));
            assert!(
                matches!(
                    result,
                    Err(CoreError::Format(FormatError::InvalidQuantity { item: 1, .. }))
                ),
                "expected invalid quantity for {bad}"
            );
        }
        assert!(parse_items_str(r#"{"items": [{"quantity": 1e300}]}"#).is_err());
    }

    #[test]
    fn test_description_coercion() {
        let items = parse_items(&json!({"items": [
            {"description": ""},
            {"description": null},
            {"description": 42},
            {"description": "  Lamp  "},
            {"description": true},
            {"description": [1, 2]},
        ]}))
        .unwrap();
        let descriptions: Vec<&str> = items.iter().map(|i| i.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["Item", "Item", "42", "  Lamp  ", "true", "[1,2]"]
        );
    }

    #[test]
    fn test_extra_keys_ignored_and_order_kept() {
        let items = parse_items(&json!({"items": [
            {"description": "B", "sku": "X-1"},
            {"description": "A", "discount": "0.5"},
        ]}))
        .unwrap();
        assert_eq!(items[0].description, "B");
        assert_eq!(items[1].description, "A");
    }

    #[test]
    fn test_lenient_accepts_negative_and_zero() {
        let items = parse_items(&json!({"items": [
            {"price": "-5", "quantity": 0},
        ]}))
        .unwrap();
        assert_eq!(items[0].price, dec!(-5));
        assert_eq!(items[0].quantity, 0);
    }

    #[test]
    fn test_strict_mode() {
        let strict = Strictness::Strict;

        assert!(parse_items_with(&json!({"items": [{"price": "1"}]}), strict).is_ok());

        assert_eq!(
            parse_items_with(&json!({"items": [{}]}), strict),
            Err(ValidationError::Required {
                item: 1,
                field: "price"
            }
            .into())
        );
        assert_eq!(
            parse_items_with(&json!({"items": [{"price": "1", "quantity": 0}]}), strict),
            Err(ValidationError::MustBePositive {
                item: 1,
                field: "quantity"
            }
            .into())
        );
        assert_eq!(
            parse_items_with(&json!({"items": [{"price": "-1"}]}), strict),
            Err(ValidationError::MustNotBeNegative {
                item: 1,
                field: "price"
            }
            .into())
        );
    }
}
