//! Stderr logging wired into the `log` facade.
//!
//! All `log::info!()`, `log::warn!()`, `log::error!()` calls throughout the
//! crate are routed to stderr with their level tag, keeping stdout free for
//! the interactive prompt and the final verification report. The level is
//! selected via the `SPLATENV_LOG` environment variable (default `info`).

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Environment variable controlling the log level.
pub const LOG_LEVEL_VAR: &str = "SPLATENV_LOG";

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            // Keep warnings and errors visually distinct from step banners
            match record.level() {
                Level::Info => eprintln!("{}", record.args()),
                level => eprintln!("[{}] {}", level, record.args()),
            }
        }
    }

    fn flush(&self) {}
}

/// Parse a level name from the environment, falling back to `info`.
fn level_from_env() -> LevelFilter {
    match std::env::var(LOG_LEVEL_VAR) {
        Ok(value) => match value.to_ascii_lowercase().as_str() {
            "off" => LevelFilter::Off,
            "error" => LevelFilter::Error,
            "warn" => LevelFilter::Warn,
            "debug" => LevelFilter::Debug,
            "trace" => LevelFilter::Trace,
            _ => LevelFilter::Info,
        },
        Err(_) => LevelFilter::Info,
    }
}

/// Install the stderr logger as the global logger for the `log` crate.
///
/// Safe to call more than once; a second call leaves the first logger in
/// place.
pub fn init() {
    let level = level_from_env();
    if log::set_boxed_logger(Box::new(StderrLogger)).is_ok() {
        log::set_max_level(level);
    }
}
