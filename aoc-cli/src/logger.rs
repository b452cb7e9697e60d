//! Minimal `log` backend writing to stderr so answers on stdout stay clean

use log::{LevelFilter, Log, Metadata, Record};

pub(crate) struct StderrLogger;

static STDERR_LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        eprintln!("[{} {}] {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

/// Install the stderr logger with `level` as the global maximum
pub(crate) fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    log::set_logger(&STDERR_LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
