//! Decoding of ecosystem data files
//!
//! A data file is a JSON array of package objects. Field-level problems are
//! absorbed by the record's lenient deserializers; elements that are not
//! objects are skipped.

use crate::catalog::domain::PackageRecord;
use crate::shared::error::CatalogError;
use crate::shared::Result;
use serde::Deserialize;
use serde_json::Value;

/// Decodes a payload into records, in payload order
///
/// # Arguments
/// * `payload` - Raw JSON text
/// * `source_label` - Where the payload came from, for error messages
///
/// # Errors
/// Returns `MalformedPayload` if the text is not JSON or not an array
pub fn decode_records(payload: &str, source_label: &str) -> Result<Vec<PackageRecord>> {
    let value: Value = serde_json::from_str(payload).map_err(|e| CatalogError::MalformedPayload {
        source_label: source_label.to_string(),
        details: e.to_string(),
    })?;

    let Value::Array(elements) = value else {
        return Err(CatalogError::MalformedPayload {
            source_label: source_label.to_string(),
            details: format!("expected a JSON array, found {}", kind_of(&value)),
        }
        .into());
    };

    let mut records = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            tracing::warn!(index, kind = kind_of(&element), "skipping non-object package entry");
            continue;
        }
        match PackageRecord::deserialize(element) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(index, error = %e, "skipping unreadable package entry"),
        }
    }
    Ok(records)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
