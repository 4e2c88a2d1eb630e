//! Davis WeatherLink Live / AirLink readings to InfluxDB line protocol.
//!
//! ```text
//! JSON text ──ingest──▶ RawReading ──router──▶ per sub-report:
//!     schema + extract ──▶ typed fields ──line_protocol──▶ line
//! ```
//!
//! Conversion is pure given `(input, config)`: no I/O, no shared mutable
//! state, safe to call from several threads with the same config.

pub mod config;
pub mod extract;
pub mod ingest;
pub mod line_protocol;
pub mod logging;
pub mod model;
pub mod router;
pub mod schema;
pub mod units;

use serde_json::Value;

pub use config::{ConverterConfig, DeviceKind};
pub use model::{ConvertError, RawReading};

/// Converts document text for the configured device.
pub fn convert(text: &str, config: &ConverterConfig) -> Result<String, ConvertError> {
    let reading = ingest::weatherlink::parse_reading(text)?;
    convert_parsed(&reading, config)
}

/// Converts an already-parsed document for the configured device.
pub fn convert_value(document: &Value, config: &ConverterConfig) -> Result<String, ConvertError> {
    let reading = ingest::weatherlink::reading_from_value(document)?;
    convert_parsed(&reading, config)
}

/// Converts document text and reports the outcome through `logging`,
/// tagged with the reading's device id once the document has parsed.
pub fn convert_and_log(text: &str, config: &ConverterConfig) -> Result<String, ConvertError> {
    let source = logging::LogSource::for_device(config.device);

    let reading = match ingest::weatherlink::parse_reading(text) {
        Ok(r) => r,
        Err(e) => {
            logging::log_conversion_failure(source, None, &e);
            return Err(e);
        }
    };

    let device_id = Some(reading.device_id.as_str());
    let result = convert_parsed(&reading, config);
    match &result {
        Ok(lines) => logging::log_conversion_success(source, device_id, lines),
        Err(e) => logging::log_conversion_failure(source, device_id, e),
    }
    result
}

/// Converts a reading for the configured device.
pub fn convert_parsed(reading: &RawReading, config: &ConverterConfig) -> Result<String, ConvertError> {
    match config.device {
        DeviceKind::WeatherlinkLive => router::convert_reading(reading, config),
        DeviceKind::Airlink => router::convert_air_quality_reading(reading, config),
    }
}
