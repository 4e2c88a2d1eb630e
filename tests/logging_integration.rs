/// Integration tests for conversion outcome logging
///
/// Tests verify:
/// 1. Failures after parsing are logged with the reading's device id
/// 2. Unparseable input is logged at ERROR with no device id
/// 3. Successes are logged at DEBUG with their line count
///
/// The logger is process-global, so everything runs in a single test
/// against one log file.

use std::fs;

use weatherlink_lp::logging::{init_logger, LogLevel};
use weatherlink_lp::{convert_and_log, ConvertError, ConverterConfig};

#[test]
fn test_conversion_outcomes_are_logged_with_device_id() {
    let path = std::env::temp_dir().join(format!("weatherlink_lp_outcomes_{}.log", std::process::id()));
    let _ = fs::remove_file(&path);
    init_logger(LogLevel::Debug, Some(&path.to_string_lossy()), true);

    let config = ConverterConfig::default();

    let no_data = convert_and_log(
        r#"{"data":{"did":"001D0A700002","ts":1700000000,"conditions":[]}}"#,
        &config,
    );
    assert_eq!(no_data, Err(ConvertError::NoValidData));

    let bad = convert_and_log("{bad json", &config);
    assert!(matches!(bad, Err(ConvertError::ParseFailure(_))));

    let ok = convert_and_log(
        r#"{"data":{"did":"ABC","ts":1,"conditions":[{"data_structure_type":4,"temp_in":68}]}}"#,
        &config,
    );
    assert!(ok.is_ok());

    let contents = fs::read_to_string(&path).unwrap();
    let _ = fs::remove_file(&path);
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3, "got {:?}", contents);

    assert!(
        lines[0].contains("WARN WLL [001D0A700002]: conversion failed: No valid data in reading"),
        "got {:?}",
        lines[0]
    );
    assert!(lines[1].contains("ERROR WLL: conversion failed: Parse error:"), "got {:?}", lines[1]);
    assert!(lines[2].contains("DEBUG WLL [ABC]: converted 1 line"), "got {:?}", lines[2]);
}
