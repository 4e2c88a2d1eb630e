//! Unit conversion for WeatherLink readings.
//!
//! WeatherLink devices report in US customary units. Every converter takes
//! and returns `Option<f64>`: an absent input stays absent, and the result
//! is rounded to a fixed number of decimals (half away from zero).

/// inHg to hPa.
pub const HPA_PER_IN_HG: f64 = 33.8639;

/// mph to m/s.
pub const MS_PER_MPH: f64 = 0.44704;

/// Default rain collector cup size, in millimetres per tip.
pub const DEFAULT_CUP_SIZE_MM: f64 = 0.2;

/// Rounds `value` to `decimals` places, ties away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// °F to °C, 1 decimal.
pub fn fahrenheit_to_celsius(f: Option<f64>) -> Option<f64> {
    f.map(|f| round_to((f - 32.0) * 5.0 / 9.0, 1))
}

/// inHg to hPa, 1 decimal.
pub fn in_hg_to_hpa(in_hg: Option<f64>) -> Option<f64> {
    in_hg.map(|p| round_to(p * HPA_PER_IN_HG, 1))
}

/// inHg to hPa, 3 decimals. Used for the barometric trend, which is small.
pub fn in_hg_trend_to_hpa(in_hg: Option<f64>) -> Option<f64> {
    in_hg.map(|p| round_to(p * HPA_PER_IN_HG, 3))
}

/// mph to m/s, 2 decimals.
pub fn mph_to_ms(mph: Option<f64>) -> Option<f64> {
    mph.map(|s| round_to(s * MS_PER_MPH, 2))
}

/// Rain collector tips to mm, 1 decimal.
pub fn tips_to_mm(tips: Option<f64>, cup_size_mm: f64) -> Option<f64> {
    tips.map(|t| round_to(t * cup_size_mm, 1))
}

// ---------------------------------------------------------------------------
// Named conversions for schema tables
// ---------------------------------------------------------------------------

/// Settings a conversion may need at call time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSettings {
    pub cup_size_mm: f64,
}

impl Default for UnitSettings {
    fn default() -> Self {
        Self { cup_size_mm: DEFAULT_CUP_SIZE_MM }
    }
}

/// A converter referenced from a static schema table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    FahrenheitToCelsius,
    InHgToHpa,
    InHgTrendToHpa,
    MphToMs,
    TipsToMm,
}

impl Conversion {
    pub fn apply(self, value: Option<f64>, settings: &UnitSettings) -> Option<f64> {
        match self {
            Conversion::FahrenheitToCelsius => fahrenheit_to_celsius(value),
            Conversion::InHgToHpa => in_hg_to_hpa(value),
            Conversion::InHgTrendToHpa => in_hg_trend_to_hpa(value),
            Conversion::MphToMs => mph_to_ms(value),
            Conversion::TipsToMm => tips_to_mm(value, settings.cup_size_mm),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
