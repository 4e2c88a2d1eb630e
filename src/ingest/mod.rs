/// Input document parsing.
///
/// Submodules:
/// - `weatherlink` — WeatherLink Live / AirLink current-conditions JSON.

pub mod weatherlink;
