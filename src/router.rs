//! Sub-report routing.
//!
//! Picks the sub-reports of interest out of a reading, runs each through
//! its category's schema and encodes it. The output is one line per
//! contributing sub-report, joined with `\n`, in category order.

use crate::config::ConverterConfig;
use crate::extract::extract_fields;
use crate::line_protocol::{encode_line, seconds_to_nanos};
use crate::model::{ConvertError, RawReading, SubReport};
use crate::schema::Category;

/// Returns whether `report` belongs to `category` under `config`.
///
/// Outdoor sub-reports must also come from the configured transmitter.
pub fn matches_category(report: &SubReport, category: Category, config: &ConverterConfig) -> bool {
    if report.structure_type != Some(category.structure_type()) {
        return false;
    }
    match category {
        Category::Outdoor => report.transmitter_id == Some(config.outdoor_txid),
        _ => true,
    }
}

/// Encodes one sub-report as a line, or `None` if it yields no fields.
pub fn encode_sub_report(
    report: &SubReport,
    category: Category,
    reading: &RawReading,
    timestamp_ns: i64,
    config: &ConverterConfig,
) -> Option<String> {
    let fields = extract_fields(report, category.schema(), &config.unit_settings());
    let measurement = config.measurement(category);
    let tags = measurement.tag_set(&reading.device_id);
    encode_line(&measurement.measurement, &tags, &fields, timestamp_ns)
}

fn timestamp_ns(reading: &RawReading) -> Result<i64, ConvertError> {
    seconds_to_nanos(reading.timestamp_seconds).ok_or_else(|| {
        ConvertError::StructuralInvalid(format!(
            "data.ts {} is out of range",
            reading.timestamp_seconds
        ))
    })
}

fn join(lines: Vec<String>) -> Result<String, ConvertError> {
    if lines.is_empty() {
        Err(ConvertError::NoValidData)
    } else {
        Ok(lines.join("\n"))
    }
}

/// Converts a WeatherLink Live reading: outdoor, then indoor, then barometer.
pub fn convert_reading(reading: &RawReading, config: &ConverterConfig) -> Result<String, ConvertError> {
    let ts = timestamp_ns(reading)?;

    let lines = Category::WEATHERLINK_LIVE
        .iter()
        .flat_map(move |&category| {
            reading
                .sub_reports
                .iter()
                .filter(move |r| matches_category(r, category, config))
                .filter_map(move |r| encode_sub_report(r, category, reading, ts, config))
        })
        .collect();

    join(lines)
}

/// Converts an AirLink reading.
///
/// The first sub-report must be the air-quality block; anything else
/// rejects the whole document up front.
pub fn convert_air_quality_reading(
    reading: &RawReading,
    config: &ConverterConfig,
) -> Result<String, ConvertError> {
    let expected = Category::AirQuality.structure_type();
    let report = match reading.sub_reports.first() {
        None => {
            return Err(ConvertError::StructuralInvalid(
                "data.conditions is empty".to_string(),
            ));
        }
        Some(r) if r.structure_type != Some(expected) => {
            return Err(ConvertError::StructuralInvalid(format!(
                "expected data_structure_type {}, got {}",
                expected,
                r.structure_type
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "none".to_string())
            )));
        }
        Some(r) => r,
    };

    let ts = timestamp_ns(reading)?;
    join(
        encode_sub_report(report, Category::AirQuality, reading, ts, config)
            .into_iter()
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
