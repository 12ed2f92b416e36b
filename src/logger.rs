use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Appends timestamped lines to a file. The terminal belongs to the board
/// while a game runs, so there is no console sink.
pub struct Logger {
    prefix: Option<String>,
    file: Option<Mutex<File>>,
}

impl Logger {
    fn new(prefix: Option<String>, file: Option<File>) -> Self {
        Self { prefix, file: file.map(Mutex::new) }
    }

    pub fn log(&self, message: &str) {
        let Some(file) = &self.file else {
            return;
        };
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let line = match &self.prefix {
            Some(prefix) => format!("[{}][{}] {}\n", timestamp, prefix, message),
            None => format!("[{}] {}\n", timestamp, message),
        };
        if let Ok(mut file) = file.lock() {
            // A failed log write must not take the game down
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// Installs the process-wide logger. Later calls are ignored.
pub fn init_logger(prefix: Option<String>, path: Option<&Path>) -> std::io::Result<()> {
    let file = match path {
        Some(path) => Some(OpenOptions::new().create(true).append(true).open(path)?),
        None => None,
    };
    LOGGER.get_or_init(|| Logger::new(prefix, file));
    Ok(())
}

/// Logs through the installed logger; a no-op before [`init_logger`].
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}
