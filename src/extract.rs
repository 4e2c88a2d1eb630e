//! Schema-driven field extraction.
//!
//! Walks a `Schema` against one raw sub-report and produces the typed
//! field set. Individual fields never fail the extraction: a missing,
//! null, non-numeric or non-finite value simply drops that field.

use serde_json::Value;

use crate::model::{FieldSet, NumericKind, SubReport, TypedField};
use crate::schema::Schema;
use crate::units::UnitSettings;

/// Coerces a raw JSON value to a number.
///
/// Numbers pass through. Strings are parsed after trimming, and a string
/// that does not parse becomes NaN so the caller drops it. Anything else
/// (bool, array, object, null) is treated as absent.
pub fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        _ => None,
    }
}

/// Whether `value` truncated toward zero is representable as `i64`.
fn fits_i64(value: f64) -> bool {
    // 2^63; i64::MAX itself is not exactly representable as f64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let truncated = value.trunc();
    (-LIMIT..LIMIT).contains(&truncated)
}

/// Projects `report` through `schema`, in schema declaration order.
pub fn extract_fields(report: &SubReport, schema: &Schema, settings: &UnitSettings) -> FieldSet {
    schema
        .iter()
        .filter_map(|spec| {
            let raw = report.raw(spec.source_key).and_then(numeric_value);
            let value = match spec.conversion {
                Some(conversion) => conversion.apply(raw, settings),
                None => raw,
            }?;

            // NaN and infinities have no line protocol representation
            if !value.is_finite() {
                return None;
            }
            if spec.kind == NumericKind::Integer && !fits_i64(value) {
                return None;
            }

            Some((spec.output_name, TypedField { value, kind: spec.kind }))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
