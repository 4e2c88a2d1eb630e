/// weatherlink_lp — convert a WeatherLink current-conditions document to
/// InfluxDB line protocol.
///
/// Reads INPUT.json (or stdin) and writes line protocol to stdout.
/// The config path falls back to $WEATHERLINK_CONFIG (a `.env` file is
/// honoured), then to built-in defaults.
///
/// Exit status: 0 on output, 1 when the document yields nothing
/// (warning), 2 on unreadable input or configuration (error).

use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use weatherlink_lp::config::{self, ConverterConfig};
use weatherlink_lp::logging::{self, LogLevel, LogSource};

/// Convert WeatherLink JSON to InfluxDB line protocol
#[derive(Parser, Debug)]
#[command(name = "weatherlink_lp")]
#[command(version)]
#[command(about = "Convert WeatherLink Live / AirLink JSON to InfluxDB line protocol")]
struct Args {
    /// Input document; stdin when omitted or "-"
    input: Option<String>,

    /// Converter configuration (TOML)
    #[arg(short, long, env = "WEATHERLINK_CONFIG")]
    config: Option<String>,

    /// Append timestamped log entries to this file
    #[arg(long)]
    log_file: Option<String>,

    /// Minimum level written to stderr / the log file
    #[arg(long, env = "WEATHERLINK_LOG", value_enum, default_value_t = LogLevelArg::Warn)]
    log_level: LogLevelArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevelArg {
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevelArg> for LogLevel {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Debug => LogLevel::Debug,
            LogLevelArg::Info => LogLevel::Info,
            LogLevelArg::Warn => LogLevel::Warning,
            LogLevelArg::Error => LogLevel::Error,
        }
    }
}

fn load_config(path: Option<&str>) -> Result<ConverterConfig, config::ConfigError> {
    match path {
        Some(path) => {
            let config = config::load_config(path)?;
            logging::info(LogSource::Config, None, &format!("loaded {}", path));
            Ok(config)
        }
        None => Ok(ConverterConfig::default()),
    }
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(p) if p != "-" => fs::read_to_string(p),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let args = Args::parse();

    logging::init_logger(args.log_level.into(), args.log_file.as_deref(), args.log_file.is_some());

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            logging::error(LogSource::Config, None, &e.to_string());
            return ExitCode::from(2);
        }
    };

    let text = match read_input(args.input.as_deref()) {
        Ok(t) => t,
        Err(e) => {
            logging::error(LogSource::System, None, &format!("failed to read input: {}", e));
            return ExitCode::from(2);
        }
    };

    match weatherlink_lp::convert_and_log(&text, &config) {
        Ok(lines) => {
            println!("{}", lines);
            ExitCode::SUCCESS
        }
        Err(e) if e.is_fatal() => ExitCode::from(2),
        Err(_) => ExitCode::from(1),
    }
}
