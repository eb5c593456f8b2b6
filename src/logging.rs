//! Logging setup for the benchmark binary.
//!
//! Logs go to stderr so that stdout only carries the report.
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::error::BenchError;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "SNN_BENCH_LOG";

/// Parse a log level, falling back to `Warn` if it is missing or invalid.
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|level| level.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// The log level set in the environment.
pub fn level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_ENV).ok().as_deref())
}

/// Install a stderr logger at the given level.
pub fn init_logging(level: LevelFilter) -> Result<(), BenchError> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{l} - {m}\n")))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| BenchError::IOError(e.to_string()))?;

    log4rs::init_config(config).map_err(|e| BenchError::IOError(e.to_string()))?;
    Ok(())
}
