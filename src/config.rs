/// Converter configuration.
///
/// Everything the conversion needs besides the input document: which device
/// variant is being read, the rain collector cup size, the outdoor
/// transmitter to select, and the measurement name and static tags for each
/// category. Loaded from TOML; every key has a default, so an empty file
/// yields a working WeatherLink Live configuration.
///
/// ```toml
/// device = "weatherlink_live"
/// rain_cup_size_mm = 0.2
/// outdoor_txid = 1
///
/// [outdoor]
/// measurement = "outdoor_conditions"
/// tags = { source = "davis", location = "outside", friendly_name = "Davis Outdoor ISS" }
/// ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::TagSet;
use crate::schema::Category;
use crate::units::{DEFAULT_CUP_SIZE_MM, UnitSettings};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which device produced the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    /// Outdoor, indoor and barometer lines.
    #[default]
    WeatherlinkLive,
    /// A single air-quality line.
    Airlink,
}

/// Measurement name and static tags for one category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MeasurementConfig {
    pub measurement: String,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl MeasurementConfig {
    fn davis(measurement: &str, location: &str, friendly_name: &str) -> Self {
        let tags = [
            ("source", "davis"),
            ("location", location),
            ("friendly_name", friendly_name),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self { measurement: measurement.to_string(), tags }
    }

    /// Static tags plus `sensor_id`, ready for encoding.
    pub fn tag_set(&self, sensor_id: &str) -> TagSet {
        let mut tags: TagSet = self
            .tags
            .iter()
            .map(|(k, v)| (k.clone(), Some(v.clone())))
            .collect();
        tags.insert("sensor_id".to_string(), Some(sensor_id.to_string()));
        tags
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub device: DeviceKind,
    pub rain_cup_size_mm: f64,
    /// ISS transmitter id whose sub-report becomes the outdoor line.
    pub outdoor_txid: i64,
    pub outdoor: MeasurementConfig,
    pub indoor: MeasurementConfig,
    pub barometer: MeasurementConfig,
    pub air_quality: MeasurementConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            device: DeviceKind::default(),
            rain_cup_size_mm: DEFAULT_CUP_SIZE_MM,
            outdoor_txid: 1,
            outdoor: MeasurementConfig::davis("outdoor_conditions", "outside", "Davis Outdoor ISS"),
            indoor: MeasurementConfig::davis("indoor_conditions", "inside", "Davis Indoor Console"),
            barometer: MeasurementConfig::davis("barometer", "inside", "Davis Barometer"),
            air_quality: MeasurementConfig::davis("air_quality", "outside", "Davis AirLink"),
        }
    }
}

impl ConverterConfig {
    pub fn measurement(&self, category: Category) -> &MeasurementConfig {
        match category {
            Category::Outdoor => &self.outdoor,
            Category::Indoor => &self.indoor,
            Category::Barometer => &self.barometer,
            Category::AirQuality => &self.air_quality,
        }
    }

    pub fn unit_settings(&self) -> UnitSettings {
        UnitSettings { cup_size_mm: self.rain_cup_size_mm }
    }

    /// Checks values serde cannot: a usable cup size, non-empty
    /// measurement names and tag keys that need no escaping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rain_cup_size_mm.is_finite() || self.rain_cup_size_mm <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "rain_cup_size_mm must be a positive number, got {}",
                self.rain_cup_size_mm
            )));
        }

        let categories = [
            ("outdoor", &self.outdoor),
            ("indoor", &self.indoor),
            ("barometer", &self.barometer),
            ("air_quality", &self.air_quality),
        ];
        for (section, m) in categories {
            if m.measurement.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("[{}] measurement is empty", section)));
            }
            // Tag keys are written unescaped
            if let Some(key) = m.tags.keys().find(|k| !is_valid_tag_key(k)) {
                return Err(ConfigError::Invalid(format!(
                    "[{}] tag key {:?} must be non-empty without spaces, commas or '='",
                    section, key
                )));
            }
        }

        Ok(())
    }
}

fn is_valid_tag_key(key: &str) -> bool {
    !key.is_empty() && !key.contains([' ', ',', '='])
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Parses and validates configuration text.
pub fn parse_config(text: &str) -> Result<ConverterConfig, ConfigError> {
    let config: ConverterConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Loads and validates a TOML configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ConverterConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    parse_config(&text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
