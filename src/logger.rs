// A tiny logger for the `log` crate that writes every record to stderr.
// Filtering happens through `log::set_max_level` alone.

use log::Log;

use crate::style::Theme;

/// The simplest possible logger that logs to stderr.
#[derive(Debug)]
pub struct Logger(());

impl Logger {
    /// Create a new logger that logs to stderr and initialize it as the
    /// global logger. If there was a problem setting the logger, then an
    /// error is returned.
    pub fn init() -> Result<&'static Logger, log::SetLoggerError> {
        static LOGGER: Logger = Logger(());
        log::set_logger(&LOGGER)?;
        Ok(&LOGGER)
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        // Only `Timestamp::now()` is used here, since anything involving
        // the system time zone may itself emit log records.
        let now = jiff::Timestamp::now();
        let level = Theme::stderr().highlight(record.level());
        match record.module_path() {
            Some(module) => {
                eprintln!("{now}|{level}|{module}: {}", record.args());
            }
            None => {
                eprintln!("{now}|{level}: {}", record.args());
            }
        }
    }

    fn flush(&self) {}
}
