/// Structured logging for the converter
///
/// Provides context-rich logging with device identifiers, timestamps, and
/// severity levels. Supports both console output and file-based logging
/// for long-running collectors that invoke the converter on a schedule.
///
/// Conversion itself never logs; `convert_and_log` reports its outcome
/// through `log_conversion_failure` / `log_conversion_success`.

use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::config::DeviceKind;
use crate::model::ConvertError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Log Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSource {
    WeatherLink,
    AirLink,
    Config,
    System,
}

impl LogSource {
    pub fn for_device(device: DeviceKind) -> Self {
        match device {
            DeviceKind::WeatherlinkLive => LogSource::WeatherLink,
            DeviceKind::Airlink => LogSource::AirLink,
        }
    }
}

impl fmt::Display for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSource::WeatherLink => write!(f, "WLL"),
            LogSource::AirLink => write!(f, "AIRLINK"),
            LogSource::Config => write!(f, "CFG"),
            LogSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    fn log(&self, level: LogLevel, source: LogSource, device_id: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let device_part = device_id.map(|d| format!(" [{}]", d)).unwrap_or_default();
        let log_entry = format!("{} {} {}{}: {}", timestamp, level, source, device_part, message);

        // Console output. stdout carries line protocol, so everything goes
        // to stderr.
        if self.console_timestamps {
            eprintln!("{}", log_entry);
        } else {
            match level {
                LogLevel::Error => eprintln!("✗ {}{}: {}", source, device_part, message),
                LogLevel::Warning => eprintln!("⚠ {}{}: {}", source, device_part, message),
                LogLevel::Info => eprintln!("{}", message),
                LogLevel::Debug => {}
            }
        }

        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger. Calling it again replaces the settings.
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    let logger = Logger {
        min_level,
        log_file: log_file.map(String::from),
        console_timestamps,
    };
    if let Ok(mut slot) = LOGGER.lock() {
        *slot = Some(logger);
    }
}

/// Logs through the global logger; a no-op before `init_logger`.
pub fn log(level: LogLevel, source: LogSource, device_id: Option<&str>, message: &str) {
    if let Ok(guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_ref() {
            logger.log(level, source, device_id, message);
        }
    }
}

pub fn debug(source: LogSource, device_id: Option<&str>, message: &str) {
    log(LogLevel::Debug, source, device_id, message);
}

pub fn info(source: LogSource, device_id: Option<&str>, message: &str) {
    log(LogLevel::Info, source, device_id, message);
}

pub fn error(source: LogSource, device_id: Option<&str>, message: &str) {
    log(LogLevel::Error, source, device_id, message);
}

// ---------------------------------------------------------------------------
// Conversion Outcome Logging
// ---------------------------------------------------------------------------

/// Severity a conversion failure is reported at.
///
/// Unparseable input is an error; a well-formed document that yields
/// nothing is a warning, since the device may simply be between samples.
pub fn level_for(err: &ConvertError) -> LogLevel {
    if err.is_fatal() {
        LogLevel::Error
    } else {
        LogLevel::Warning
    }
}

/// Log a conversion failure at its classified level
pub fn log_conversion_failure(source: LogSource, device_id: Option<&str>, err: &ConvertError) {
    log(level_for(err), source, device_id, &format!("conversion failed: {}", err));
}

/// Log a successful conversion with its line count
pub fn log_conversion_success(source: LogSource, device_id: Option<&str>, output: &str) {
    let lines = output.lines().count();
    debug(
        source,
        device_id,
        &format!("converted {} line{}", lines, if lines == 1 { "" } else { "s" }),
    );
}
