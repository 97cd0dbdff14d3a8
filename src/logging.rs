#![cfg(feature = "std")]

//! Minimal stderr logger for the binaries. Stdout stays reserved for game
//! output and the simulator's JSON.

use log::{LevelFilter, Log, Metadata, Record};
use std::env;

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "PAPER_BOMBING_LOG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // drop the crate prefix from module targets
        let target = record
            .target()
            .strip_prefix("paper_bombing::")
            .unwrap_or(record.target());
        eprintln!("[{:<5} {}] {}", record.level(), target, record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Initialize logging with a level taken from `PAPER_BOMBING_LOG`
/// (`off`, `error`, `warn`, `info`, `debug`, `trace`).
/// Defaults to `info` if the variable is not set or invalid.
pub fn init_logging() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    init_logging_with(level);
}

/// Initialize logging at a fixed level. Only the first call installs the
/// logger; later calls are ignored.
pub fn init_logging_with(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
