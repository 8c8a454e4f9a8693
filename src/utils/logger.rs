//! Logger utility for application-wide logging
//!
//! A custom logger implementation that works with the standard log
//! crate, mirroring records to the console and optionally to a log
//! file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Level, LevelFilter, Log, Metadata, Record};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output, if file logging was requested
    file: Mutex<Option<File>>,
    /// Most verbose level that will be recorded
    max_level: Level,
}

impl Logger {
    /// Creates a logger that writes to a file as well as the console
    ///
    /// # Arguments
    /// * `log_file` - Path to the log file
    /// * `max_level` - Most verbose level to record
    ///
    /// # Returns
    /// A new Logger instance or an error if the file cannot be created
    pub fn with_file(log_file: &str, max_level: Level) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            max_level,
        })
    }

    /// Creates a console-only logger
    pub fn new(max_level: Level) -> Self {
        Logger {
            file: Mutex::new(None),
            max_level,
        }
    }

    /// Logs a message line
    ///
    /// # Arguments
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        if let Some(file) = &mut *self.file.lock().unwrap() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Installs a logger as the global logger for the log crate
    ///
    /// # Arguments
    /// * `max_level` - Most verbose level to record
    pub fn init_global_logger(max_level: Level) -> io::Result<()> {
        let global_logger = Logger::new(max_level);

        // Ignore the SetLoggerError; it only occurs if a logger was
        // already installed.
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: global logger was already initialized");
        }
        log::set_max_level(LevelFilter::Trace);
        Ok(())
    }
}

// Implement the Log trait to make the Logger work with the log crate.
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method.
    }
}
