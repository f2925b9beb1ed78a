use crate::sink::{LogSink, SinkWriter};
use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Formats log records into a [`LogSink`].
pub struct BoardLogger<S> {
    sink: S,
    max_level: LevelFilter,
}

impl<S: LogSink> BoardLogger<S> {
    #[must_use]
    pub const fn new(sink: S, max_level: LevelFilter) -> Self {
        Self { sink, max_level }
    }

    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Install as the global logger. Call once during early init.
    ///
    /// # Errors
    /// Another logger is already installed.
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }
}

impl<S: LogSink> Log for BoardLogger<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Best effort; a sink cannot report failure.
        let _ = writeln!(
            SinkWriter(&self.sink),
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Buf(Mutex<Vec<u8>>);

    impl LogSink for Buf {
        fn write_bytes(&self, bytes: &[u8]) {
            self.0.lock().unwrap().extend_from_slice(bytes);
        }
    }

    impl Buf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn emit(logger: &BoardLogger<Buf>, level: Level, msg: &str) {
        logger.log(
            &Record::builder()
                .level(level)
                .target("board")
                .args(format_args!("{msg}"))
                .build(),
        );
    }

    #[test]
    fn formats_one_line_per_record() {
        let logger = BoardLogger::new(Buf::default(), LevelFilter::Debug);
        emit(&logger, Level::Info, "map_io done");
        emit(&logger, Level::Debug, "uart0 ready");
        assert_eq!(
            logger.sink().text(),
            "[INFO] board: map_io done\n[DEBUG] board: uart0 ready\n"
        );
    }

    #[test]
    fn filters_above_max_level() {
        let logger = BoardLogger::new(Buf::default(), LevelFilter::Warn);
        emit(&logger, Level::Info, "hidden");
        emit(&logger, Level::Error, "shown");
        assert_eq!(logger.sink().text(), "[ERROR] board: shown\n");
    }
}
