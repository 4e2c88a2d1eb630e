/// RawReading, SubReport, TypedField, ConvertError
/// core data structures and error handling
///
/// Core data types for the WeatherLink line protocol converter.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond small accessors, no I/O, and no external
/// dependencies beyond `serde_json` value maps.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Structure type codes
// ---------------------------------------------------------------------------

/// WeatherLink Live ISS current conditions (one per transmitter).
pub const STRUCTURE_ISS: i64 = 1;

/// WeatherLink Live LSS barometer.
pub const STRUCTURE_BAROMETER: i64 = 3;

/// WeatherLink Live LSS indoor temperature / humidity.
pub const STRUCTURE_INDOOR: i64 = 4;

/// AirLink current conditions.
pub const STRUCTURE_AIR_QUALITY: i64 = 6;

/// Device id used when the document carries no `did`.
pub const UNKNOWN_DEVICE_ID: &str = "unknown";

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// One structurally-tagged block from the `data.conditions` array.
///
/// `structure_type` is `None` when the entry is not an object or carries no
/// integer `data_structure_type`; such entries are never routed.
#[derive(Debug, Clone, PartialEq)]
pub struct SubReport {
    pub structure_type: Option<i64>,
    pub transmitter_id: Option<i64>,
    pub fields: Map<String, Value>,
}

impl SubReport {
    /// Looks up a raw field value, treating an explicit JSON `null` as absent.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }
}

/// A parsed WeatherLink / AirLink current-conditions document.
///
/// Built once per conversion call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub device_id: String,
    pub timestamp_seconds: i64,
    pub sub_reports: Vec<SubReport>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Target numeric type of an encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Truncated toward zero and written with an `i` suffix.
    Integer,
    /// Written as a plain decimal.
    Float,
}

/// A resolved field value, never NaN, ready for encoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypedField {
    pub value: f64,
    pub kind: NumericKind,
}

/// Extractor output: `(output_name, field)` pairs in schema declaration order.
pub type FieldSet = Vec<(&'static str, TypedField)>;

/// Tag key to value. `BTreeMap` keeps keys in byte-wise order; a `None`
/// value means the tag is dropped from the encoded line.
pub type TagSet = BTreeMap<String, Option<String>>;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Reasons a conversion produced no output.
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// The input text is not valid JSON.
    ParseFailure(String),
    /// Required keys are missing or the mandatory sub-report is absent.
    StructuralInvalid(String),
    /// Sub-reports were examined but none produced a single field.
    NoValidData,
}

impl ConvertError {
    /// Parse failures are errors; everything else is an operator warning.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ConvertError::ParseFailure(_))
    }
}

impl std::fmt::Display for ConvertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConvertError::ParseFailure(msg) => write!(f, "Parse error: {}", msg),
            ConvertError::StructuralInvalid(msg) => write!(f, "Invalid structure: {}", msg),
            ConvertError::NoValidData => write!(f, "No valid data in reading"),
        }
    }
}

impl std::error::Error for ConvertError {}
