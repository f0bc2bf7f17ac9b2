use chrono::Local;
use clap::builder::TypedValueParser;
use clap::Parser;
use colored::*;
use log::{error, info, warn};
use log::{Level, LevelFilter, Metadata, Record};
use parsing::cpuinfo::extract_file;
use std::env;
use std::path::PathBuf;

/// https://docs.rs/log/latest/log/#implementing-a-logger
struct SimpleLogger;

impl log::Log for SimpleLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        // this is configured by calling log::set_max_level, and so this logging implementation logs all kinds of levels
        true
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level = match record.level() {
                Level::Info => format!("{}", record.level()).bold().blue(),
                Level::Warn => format!("{}", record.level()).bold().yellow(),
                Level::Error => format!("{}", record.level()).bold().red(),
                Level::Debug => format!("{}", record.level()).bold().green(),
                Level::Trace => format!("{}", record.level()).bold().cyan(),
            };
            // stdout is reserved for the csv rows
            eprintln!(
                "({})[{}] {}",
                Local::now().to_rfc2822(),
                level,
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

#[derive(Parser)]
struct Args {
    /// The cpuinfo dump to read
    file: PathBuf,
    /// Level of logging verbosity
    #[arg(short = 'v',
        long = "verbosity",
        default_value_t = LevelFilter::Warn,
        value_parser = clap::builder::PossibleValuesParser::new(["TRACE", "DEBUG", "INFO", "WARN", "ERROR", "OFF"])
            .map(|s| s.to_lowercase().parse::<LevelFilter>().unwrap())
        )]
    logging_level: LevelFilter,
    /// Print the extracted fields as json instead of csv rows
    #[arg(long = "json")]
    json: bool,
}

static LOGGER: SimpleLogger = SimpleLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli_args = Args::parse();
    // the environment wins over the command line, same as the port in hwapi
    let mut logging_level = cli_args.logging_level;
    let mut bad_env_level = None;
    if let Ok(value) = env::var("CPUINFO_VERBOSITY") {
        match value.to_lowercase().parse::<LevelFilter>() {
            Ok(level) => logging_level = level,
            Err(_) => bad_env_level = Some(value),
        }
    }
    log::set_logger(&LOGGER).map(|()| log::set_max_level(logging_level))?;
    if let Some(value) = bad_env_level {
        warn!("ignoring unrecognized CPUINFO_VERBOSITY {:?}", value);
    }

    info!("Reading cpuinfo dump {:?}", cli_args.file);
    let cpu_info = match extract_file(&cli_args.file) {
        Ok(c) => c,
        Err(e) => {
            error!("failed to extract {:?}: {}", cli_args.file, e);
            return Err(e.into());
        }
    };

    if cli_args.json {
        println!("{}", serde_json::to_string_pretty(&cpu_info)?);
    } else {
        for row in cpu_info.csv_rows() {
            println!("{}", row);
        }
    }
    info!("Finished {:?}", cli_args.file);

    Ok(())
}
