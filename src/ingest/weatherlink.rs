/// WeatherLink current-conditions document parsing
///
/// Reads the JSON served by a WeatherLink Live (`/v1/current_conditions`)
/// or an AirLink and turns it into a `RawReading`. Fetching the document is
/// somebody else's job; this module only sees the text or parsed value.
///
/// Expected shape:
/// ```text
/// { "data": { "did": "001D0A...", "ts": 1700000000,
///             "conditions": [ { "data_structure_type": 1, "txid": 1, ... }, ... ] } }
/// ```

use serde_json::{Map, Value};

use crate::model::{ConvertError, RawReading, SubReport, UNKNOWN_DEVICE_ID};

// ============================================================================
// Entry points
// ============================================================================

/// Parses document text.
///
/// Invalid JSON is a `ParseFailure`; a well-formed document with the wrong
/// shape is `StructuralInvalid`.
pub fn parse_reading(text: &str) -> Result<RawReading, ConvertError> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| ConvertError::ParseFailure(e.to_string()))?;
    reading_from_value(&document)
}

/// Extracts a reading from an already-parsed document.
pub fn reading_from_value(document: &Value) -> Result<RawReading, ConvertError> {
    let data = document
        .get("data")
        .filter(|d| d.is_object())
        .ok_or_else(|| structural("missing data object"))?;

    let timestamp_seconds = match data.get("ts") {
        None | Some(Value::Null) => return Err(structural("missing data.ts")),
        Some(ts) => ts
            .as_i64()
            .ok_or_else(|| structural("data.ts is not an integer"))?,
    };

    let conditions = match data.get("conditions") {
        None | Some(Value::Null) => return Err(structural("missing data.conditions")),
        Some(c) => c
            .as_array()
            .ok_or_else(|| structural("data.conditions is not an array"))?,
    };

    // The AirLink reports its device id as a string; tolerate a number too
    let device_id = match data.get("did") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => UNKNOWN_DEVICE_ID.to_string(),
    };

    Ok(RawReading {
        device_id,
        timestamp_seconds,
        sub_reports: conditions.iter().map(sub_report).collect(),
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn structural(msg: &str) -> ConvertError {
    ConvertError::StructuralInvalid(msg.to_string())
}

/// Wraps one `conditions` entry. Non-object entries become an empty
/// sub-report with no structure type, so the router skips them.
fn sub_report(entry: &Value) -> SubReport {
    let fields = entry.as_object().cloned().unwrap_or_else(Map::new);
    SubReport {
        structure_type: fields.get("data_structure_type").and_then(Value::as_i64),
        transmitter_id: fields.get("txid").and_then(Value::as_i64),
        fields,
    }
}

// ============================================================================
// Tests
// ============================================================================
