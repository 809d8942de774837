//! Table listing payload normalization
//!
//! The table endpoints have shipped several envelopes for the same array of
//! rows. This is the only place that knows about them:
//!
//! - a bare array: `[ {...}, ... ]`
//! - `{ "tables": [ ... ] }`
//! - `{ "data": [ ... ] }`
//! - `{ "data": { "tables": [ ... ] } }`

use serde_json::Value;
use shared::models::TableRow;

/// Locate the row array inside any supported envelope
fn row_array(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(rows) => Some(rows),
        Value::Object(obj) => {
            if let Some(Value::Array(rows)) = obj.get("tables") {
                return Some(rows);
            }
            match obj.get("data")? {
                Value::Array(rows) => Some(rows),
                Value::Object(data) => match data.get("tables")? {
                    Value::Array(rows) => Some(rows),
                    _ => None,
                },
                _ => None,
            }
        }
        _ => None,
    }
}

/// Flatten a table listing payload into rows.
///
/// Unrecognized envelopes yield an empty list. Rows that cannot be decoded
/// even leniently (no table id, not an object) are skipped.
pub fn extract_table_rows(payload: &Value) -> Vec<TableRow> {
    let Some(rows) = row_array(payload) else {
        tracing::warn!("Table listing payload has no recognizable row array");
        return Vec::new();
    };

    rows.iter()
        .enumerate()
        .filter_map(
            |(index, row)| match serde_json::from_value::<TableRow>(row.clone()) {
                Ok(row) => Some(row),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Skipping undecodable table row");
                    None
                }
            },
        )
        .collect()
}
