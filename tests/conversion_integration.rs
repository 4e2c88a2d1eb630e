/// Integration tests for end-to-end document conversion
///
/// Tests verify:
/// 1. A full WeatherLink Live document converts to outdoor, indoor and
///    barometer lines, byte for byte
/// 2. AirLink documents produce a single air-quality line
/// 3. Failure modes return the right classified error and no output
/// 4. Conversion is deterministic and safe to share across threads
///
/// Fixtures live in tests/fixtures/. No network or database is needed.
///
/// Run with: cargo test --test conversion_integration

use std::fs;

use serde_json::json;
use weatherlink_lp::logging::{level_for, LogLevel};
use weatherlink_lp::{convert, convert_value, ConvertError, ConverterConfig, DeviceKind};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn fixture(name: &str) -> String {
    fs::read_to_string(format!("tests/fixtures/{}", name)).expect("fixture should exist")
}

fn airlink_config() -> ConverterConfig {
    ConverterConfig { device: DeviceKind::Airlink, ..ConverterConfig::default() }
}

const WLL_OUTDOOR: &str = "outdoor_conditions,friendly_name=Davis\\ Outdoor\\ ISS,location=outside,\
sensor_id=001D0A700002,source=davis \
dew_point=8,heat_index=16.7,hum=55.1,rain_rate_last=0,rainfall_daily=12.6,rainfall_monthly=28,\
rainfall_year=384.2,rx_state=2i,solar_rad=747i,temp=17.1,thsw_index=18.3,thw_index=16.7,\
trans_battery_flag=0i,uv_index=5.5,wind_chill=17.1,wind_dir_at_hi_speed_last_10_min=200i,\
wind_dir_at_hi_speed_last_2_min=190i,wind_dir_last=181i,wind_dir_scalar_avg_last_10_min=165i,\
wind_dir_scalar_avg_last_1_min=176i,wind_dir_scalar_avg_last_2_min=170i,\
wind_speed_avg_last_10_min=1.61,wind_speed_avg_last_1_min=2.01,wind_speed_avg_last_2_min=1.83,\
wind_speed_hi_last_10_min=4.92,wind_speed_hi_last_2_min=3.58,wind_speed_last=2.24 \
1700000000000000000";

const WLL_INDOOR: &str = "indoor_conditions,friendly_name=Davis\\ Indoor\\ Console,location=inside,\
sensor_id=001D0A700002,source=davis dew_point=7.8,heat_index=21.3,hum=41.1,temp=21.8 \
1700000000000000000";

const WLL_BAROMETER: &str = "barometer,friendly_name=Davis\\ Barometer,location=inside,\
sensor_id=001D0A700002,source=davis bar_absolute=1016.2,bar_sea_level=1016.2 \
1700000000000000000";

// ---------------------------------------------------------------------------
// 1. WeatherLink Live
// ---------------------------------------------------------------------------

#[test]
fn test_wll_document_converts_to_three_lines() {
    let output = convert(&fixture("wll_current_conditions.json"), &ConverterConfig::default())
        .expect("fixture should convert");

    let lines: Vec<&str> = output.split('\n').collect();
    assert_eq!(lines.len(), 3, "expected outdoor, indoor and barometer lines:\n{}", output);
    assert_eq!(lines[0], WLL_OUTDOOR);
    assert_eq!(lines[1], WLL_INDOOR);
    assert_eq!(lines[2], WLL_BAROMETER);
}

#[test]
fn test_wll_null_fields_never_appear() {
    let output = convert(&fixture("wll_current_conditions.json"), &ConverterConfig::default())
        .unwrap();

    // wet_bulb, rain_rate_hi, rain_storm and bar_trend are null in the fixture
    for absent in ["wet_bulb=", "rain_rate_hi=", "rain_storm=", "bar_trend=", "rainfall_last_15_min="] {
        assert!(!output.contains(absent), "{} should be omitted", absent);
    }
    // leaf/soil (type 2) and unlisted keys are not projected
    assert!(!output.contains("lsid"));
    assert!(!output.contains("moist_soil"));
}

#[test]
fn test_cup_size_changes_rain_fields_only() {
    let config = ConverterConfig { rain_cup_size_mm: 0.254, ..ConverterConfig::default() };
    let output = convert(&fixture("wll_current_conditions.json"), &config).unwrap();

    // 63 tips * 0.254 mm
    assert!(output.contains(",rainfall_daily=16,"), "got {}", output);
    assert!(output.contains(",temp=17.1,"));
}

#[test]
fn test_outdoor_scenario_minimal_document() {
    let document = json!({
        "data": { "ts": 1_700_000_000, "did": "ABC",
                  "conditions": [{ "data_structure_type": 1, "txid": 1, "temp": 32, "hum": 50 }] }
    });

    assert_eq!(
        convert_value(&document, &ConverterConfig::default()).unwrap(),
        "outdoor_conditions,friendly_name=Davis\\ Outdoor\\ ISS,location=outside,sensor_id=ABC,\
         source=davis hum=50,temp=0 1700000000000000000"
    );
}

#[test]
fn test_tagless_measurement_has_no_comma_artifact() {
    let mut config = ConverterConfig::default();
    config.barometer.tags.clear();
    let document = json!({
        "data": { "ts": 1, "conditions": [{ "data_structure_type": 3, "bar_sea_level": 29.92 }] }
    });

    // sensor_id is always present, so only the static tags disappear
    assert_eq!(
        convert_value(&document, &config).unwrap(),
        "barometer,sensor_id=unknown bar_sea_level=1013.2 1000000000"
    );
}

// ---------------------------------------------------------------------------
// 2. AirLink
// ---------------------------------------------------------------------------

#[test]
fn test_airlink_document_converts_to_one_line() {
    let output = convert(&fixture("airlink_current_conditions.json"), &airlink_config()).unwrap();

    assert_eq!(
        output,
        "air_quality,friendly_name=Davis\\ AirLink,location=outside,sensor_id=001D0A100021,\
         source=davis dew_point=6.5,heat_index=17.2,hum=47.6,pct_pm_data_last_1_hour=100i,\
         pct_pm_data_last_24_hours=98i,pct_pm_data_last_3_hours=100i,pct_pm_data_nowcast=100i,\
         pm_1=1.9,pm_10_last=4i,pm_10_last_1_hour=4.12,pm_10_last_24_hours=4.94,\
         pm_10_last_3_hours=4.37,pm_10_nowcast=4.23,pm_1_last=2i,pm_2p5=2.6,pm_2p5_last=3i,\
         pm_2p5_last_1_hour=2.89,pm_2p5_last_24_hours=3.27,pm_2p5_last_3_hours=3.02,\
         pm_2p5_nowcast=2.95,temp=17.9,wet_bulb=11.6 1700000060000000000"
    );
}

#[test]
fn test_wll_document_is_rejected_as_airlink() {
    let err = convert(&fixture("wll_current_conditions.json"), &airlink_config()).unwrap_err();
    assert!(matches!(err, ConvertError::StructuralInvalid(_)), "got {:?}", err);
    assert_eq!(level_for(&err), LogLevel::Warning);
}

// ---------------------------------------------------------------------------
// 3. Failure modes
// ---------------------------------------------------------------------------

#[test]
fn test_malformed_json_is_parse_failure() {
    let err = convert("{bad json", &ConverterConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::ParseFailure(_)), "got {:?}", err);
    assert_eq!(level_for(&err), LogLevel::Error);
}

#[test]
fn test_no_matching_transmitter_is_no_valid_data() {
    let document = json!({
        "data": { "ts": 1_700_000_000, "did": "ABC",
                  "conditions": [{ "data_structure_type": 1, "txid": 7, "temp": 32 },
                                 { "data_structure_type": 2, "txid": 1, "temp_1": 40 }] }
    });
    assert_eq!(
        convert_value(&document, &ConverterConfig::default()),
        Err(ConvertError::NoValidData)
    );
}

#[test]
fn test_missing_conditions_is_structural() {
    let err = convert(r#"{"data":{"ts":1700000000}}"#, &ConverterConfig::default()).unwrap_err();
    assert_eq!(err, ConvertError::StructuralInvalid("missing data.conditions".into()));
}

// ---------------------------------------------------------------------------
// 4. Determinism and sharing
// ---------------------------------------------------------------------------

#[test]
fn test_conversion_is_idempotent() {
    let text = fixture("wll_current_conditions.json");
    let config = ConverterConfig::default();
    assert_eq!(convert(&text, &config).unwrap(), convert(&text, &config).unwrap());
}

#[test]
fn test_concurrent_conversions_share_config() {
    let text = fixture("wll_current_conditions.json");
    let config = ConverterConfig::default();
    let expected = convert(&text, &config).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| convert(&text, &config))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap(), expected);
        }
    });
}
