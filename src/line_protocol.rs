/// InfluxDB line protocol encoding.
///
/// A line is `measurement[,tag=value...] field=value[,field=value...] timestamp`
/// with nanosecond precision. Output must be byte-exact: the store rejects
/// a point whose field types disagree with earlier writes, so integers always
/// carry the `i` suffix and floats never do.
///
/// Reference: https://docs.influxdata.com/influxdb/v2/reference/syntax/line-protocol/

use chrono::{DateTime, Utc};

use crate::model::{NumericKind, TagSet, TypedField};

// ---------------------------------------------------------------------------
// Escaping
// ---------------------------------------------------------------------------

/// Escapes a tag value. Backslash goes first so the escapes added for
/// comma, equals and space are not themselves doubled.
pub fn escape_tag_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
}

/// Escapes a measurement name (comma and space only).
pub fn escape_measurement(name: &str) -> String {
    name.replace('\\', "\\\\").replace(',', "\\,").replace(' ', "\\ ")
}

// ---------------------------------------------------------------------------
// Line parts
// ---------------------------------------------------------------------------

/// Encodes the tag set as sorted `key=value` pairs joined by commas.
///
/// Absent and empty values are dropped. Keys come from static
/// configuration and are written as-is.
pub fn encode_tags(tags: &TagSet) -> String {
    tags.iter()
        .filter_map(|(key, value)| {
            let value = value.as_deref().filter(|v| !v.is_empty())?;
            Some(format!("{}={}", key, escape_tag_value(value)))
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Encodes a single field value.
///
/// Integers are truncated toward zero and suffixed `i`. Floats use the
/// shortest representation that round-trips, so `0.0` is written `0`.
pub fn encode_value(field: &TypedField) -> String {
    match field.kind {
        NumericKind::Integer => format!("{}i", field.value.trunc() as i64),
        // + 0.0 folds -0.0 into 0.0
        NumericKind::Float => format!("{}", field.value + 0.0),
    }
}

/// Encodes fields in the given order, joined by commas.
pub fn encode_fields(fields: &[(&str, TypedField)]) -> String {
    fields
        .iter()
        .map(|(name, field)| format!("{}={}", name, encode_value(field)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Converts epoch seconds to epoch nanoseconds.
///
/// Returns `None` when the instant cannot be represented as `i64`
/// nanoseconds (roughly outside the years 1677..2262).
pub fn seconds_to_nanos(seconds: i64) -> Option<i64> {
    DateTime::<Utc>::from_timestamp(seconds, 0)?.timestamp_nanos_opt()
}

/// Assembles one line.
///
/// Returns `None` when `fields` is empty: a point without fields is not
/// valid line protocol and is never emitted.
pub fn encode_line(
    measurement: &str,
    tags: &TagSet,
    fields: &[(&str, TypedField)],
    timestamp_ns: i64,
) -> Option<String> {
    let field_part = encode_fields(fields);
    if field_part.is_empty() {
        return None;
    }

    let tag_part = encode_tags(tags);
    let mut line = escape_measurement(measurement);
    if !tag_part.is_empty() {
        line.push(',');
        line.push_str(&tag_part);
    }
    line.push(' ');
    line.push_str(&field_part);
    line.push(' ');
    line.push_str(&timestamp_ns.to_string());

    Some(line)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
