/// Field schema registry for WeatherLink sub-reports.
///
/// Defines, for each sub-report category, which raw keys are projected into
/// line protocol fields, their numeric type, and the unit conversion applied.
/// This is the single source of truth for field names — the extractor walks
/// these tables and never special-cases a field.
///
/// Keys present in a sub-report but absent from its table are ignored.
/// Tables are declared in lexicographic order of output name.

use crate::model::{
    NumericKind, STRUCTURE_AIR_QUALITY, STRUCTURE_BAROMETER, STRUCTURE_INDOOR, STRUCTURE_ISS,
};
use crate::units::Conversion;

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

/// One projected output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name in the encoded line. Unique within a schema.
    pub output_name: &'static str,
    /// Key in the raw sub-report.
    pub source_key: &'static str,
    pub kind: NumericKind,
    pub conversion: Option<Conversion>,
}

impl FieldSpec {
    /// Float field read from the key of the same name, unconverted.
    pub const fn float(name: &'static str) -> Self {
        Self { output_name: name, source_key: name, kind: NumericKind::Float, conversion: None }
    }

    /// Integer field read from the key of the same name, unconverted.
    pub const fn integer(name: &'static str) -> Self {
        Self { output_name: name, source_key: name, kind: NumericKind::Integer, conversion: None }
    }

    /// Float field read from the key of the same name through `conversion`.
    pub const fn converted(name: &'static str, conversion: Conversion) -> Self {
        Self {
            output_name: name,
            source_key: name,
            kind: NumericKind::Float,
            conversion: Some(conversion),
        }
    }

    /// Reads from `source_key` instead of `output_name`.
    pub const fn from_key(self, source_key: &'static str) -> Self {
        Self { source_key, ..self }
    }
}

/// An ordered, read-only field table for one sub-report category.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn iter(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up a field by output name. Returns `None` if not declared.
    pub fn find(&self, output_name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.output_name == output_name)
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The sub-report categories a reading is routed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Outdoor,
    Indoor,
    Barometer,
    AirQuality,
}

impl Category {
    /// WeatherLink Live categories, in output order.
    pub const WEATHERLINK_LIVE: [Category; 3] =
        [Category::Outdoor, Category::Indoor, Category::Barometer];

    /// Structure type code that identifies this category's sub-reports.
    pub fn structure_type(self) -> i64 {
        match self {
            Category::Outdoor => STRUCTURE_ISS,
            Category::Indoor => STRUCTURE_INDOOR,
            Category::Barometer => STRUCTURE_BAROMETER,
            Category::AirQuality => STRUCTURE_AIR_QUALITY,
        }
    }

    pub fn schema(self) -> &'static Schema {
        schema_for(self)
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

use Conversion::{FahrenheitToCelsius, InHgToHpa, InHgTrendToHpa, MphToMs, TipsToMm};

/// ISS current conditions (structure type 1).
pub static OUTDOOR_SCHEMA: Schema = Schema {
    name: "outdoor",
    fields: &[
        FieldSpec::converted("dew_point", FahrenheitToCelsius),
        FieldSpec::converted("heat_index", FahrenheitToCelsius),
        FieldSpec::float("hum"),
        FieldSpec::converted("rain_rate_hi", TipsToMm),
        FieldSpec::converted("rain_rate_last", TipsToMm),
        FieldSpec::converted("rain_storm", TipsToMm),
        FieldSpec::converted("rainfall_daily", TipsToMm),
        FieldSpec::converted("rainfall_last_15_min", TipsToMm),
        FieldSpec::converted("rainfall_last_24_hr", TipsToMm),
        FieldSpec::converted("rainfall_last_60_min", TipsToMm),
        FieldSpec::converted("rainfall_monthly", TipsToMm),
        FieldSpec::converted("rainfall_year", TipsToMm),
        FieldSpec::integer("rx_state"),
        FieldSpec::integer("solar_rad"),
        FieldSpec::converted("temp", FahrenheitToCelsius),
        FieldSpec::converted("thsw_index", FahrenheitToCelsius),
        FieldSpec::converted("thw_index", FahrenheitToCelsius),
        FieldSpec::integer("trans_battery_flag"),
        FieldSpec::float("uv_index"),
        FieldSpec::converted("wet_bulb", FahrenheitToCelsius),
        FieldSpec::converted("wind_chill", FahrenheitToCelsius),
        FieldSpec::integer("wind_dir_at_hi_speed_last_10_min"),
        FieldSpec::integer("wind_dir_at_hi_speed_last_2_min"),
        FieldSpec::integer("wind_dir_last"),
        FieldSpec::integer("wind_dir_scalar_avg_last_10_min"),
        FieldSpec::integer("wind_dir_scalar_avg_last_1_min"),
        FieldSpec::integer("wind_dir_scalar_avg_last_2_min"),
        FieldSpec::converted("wind_speed_avg_last_10_min", MphToMs),
        FieldSpec::converted("wind_speed_avg_last_1_min", MphToMs),
        FieldSpec::converted("wind_speed_avg_last_2_min", MphToMs),
        FieldSpec::converted("wind_speed_hi_last_10_min", MphToMs),
        FieldSpec::converted("wind_speed_hi_last_2_min", MphToMs),
        FieldSpec::converted("wind_speed_last", MphToMs),
    ],
};

/// LSS indoor temperature / humidity (structure type 4).
pub static INDOOR_SCHEMA: Schema = Schema {
    name: "indoor",
    fields: &[
        FieldSpec::converted("dew_point", FahrenheitToCelsius).from_key("dew_point_in"),
        FieldSpec::converted("heat_index", FahrenheitToCelsius).from_key("heat_index_in"),
        FieldSpec::float("hum").from_key("hum_in"),
        FieldSpec::converted("temp", FahrenheitToCelsius).from_key("temp_in"),
    ],
};

/// LSS barometer (structure type 3).
pub static BAROMETER_SCHEMA: Schema = Schema {
    name: "barometer",
    fields: &[
        FieldSpec::converted("bar_absolute", InHgToHpa),
        FieldSpec::converted("bar_sea_level", InHgToHpa),
        FieldSpec::converted("bar_trend", InHgTrendToHpa),
    ],
};

/// AirLink current conditions (structure type 6).
pub static AIR_QUALITY_SCHEMA: Schema = Schema {
    name: "air_quality",
    fields: &[
        FieldSpec::converted("dew_point", FahrenheitToCelsius),
        FieldSpec::converted("heat_index", FahrenheitToCelsius),
        FieldSpec::float("hum"),
        FieldSpec::integer("pct_pm_data_last_1_hour"),
        FieldSpec::integer("pct_pm_data_last_24_hours"),
        FieldSpec::integer("pct_pm_data_last_3_hours"),
        FieldSpec::integer("pct_pm_data_nowcast"),
        FieldSpec::float("pm_1"),
        FieldSpec::integer("pm_10_last"),
        FieldSpec::float("pm_10_last_1_hour"),
        FieldSpec::float("pm_10_last_24_hours"),
        FieldSpec::float("pm_10_last_3_hours"),
        FieldSpec::float("pm_10_nowcast"),
        FieldSpec::integer("pm_1_last"),
        FieldSpec::float("pm_2p5"),
        FieldSpec::integer("pm_2p5_last"),
        FieldSpec::float("pm_2p5_last_1_hour"),
        FieldSpec::float("pm_2p5_last_24_hours"),
        FieldSpec::float("pm_2p5_last_3_hours"),
        FieldSpec::float("pm_2p5_nowcast"),
        FieldSpec::converted("temp", FahrenheitToCelsius),
        FieldSpec::converted("wet_bulb", FahrenheitToCelsius),
    ],
};

/// Returns the table for a category.
pub fn schema_for(category: Category) -> &'static Schema {
    match category {
        Category::Outdoor => &OUTDOOR_SCHEMA,
        Category::Indoor => &INDOOR_SCHEMA,
        Category::Barometer => &BAROMETER_SCHEMA,
        Category::AirQuality => &AIR_QUALITY_SCHEMA,
    }
}

/// All tables, for registry-wide checks.
pub static ALL_SCHEMAS: [&Schema; 4] =
    [&OUTDOOR_SCHEMA, &INDOOR_SCHEMA, &BAROMETER_SCHEMA, &AIR_QUALITY_SCHEMA];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
