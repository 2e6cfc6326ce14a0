use std::{
    collections::VecDeque,
    ops::DerefMut,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use serde::{Deserialize, Serialize};

pub static LOG: Mutex<Option<Arc<Mutex<dyn Repository>>>> = Mutex::new(None);

static CONSOLE_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Warn as usize);

pub const MAX_ENTRIES: usize = 100;

#[allow(clippy::missing_errors_doc)]
pub trait Service {
    fn get_log_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn add_log_entry(&self, entry: Entry) -> Result<(), Error>;
}

/// Persistence of log entries, newest first.
///
/// Implementations must not log themselves.
#[allow(clippy::missing_errors_doc)]
pub trait Repository: Send + Sync + 'static {
    fn read_entries(&self) -> Result<VecDeque<Entry>, Error>;
    fn write_entry(&self, entry: Entry) -> Result<(), Error>;
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{0}")]
    Unknown(String),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Entry {
    pub time: String,
    #[serde(with = "LevelDef")]
    pub level: Level,
    pub message: String,
}

impl Entry {
    #[must_use]
    pub fn new(level: Level, message: String) -> Self {
        Self {
            time: Local::now().format("%b %d %H:%M:%S").to_string(),
            level,
            message,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(remote = "Level")]
pub enum LevelDef {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

static LOGGER: Logger = Logger;

/// Installs the logger.
///
/// Records up to debug level are persisted to `storage`, records up to
/// `console_level` are also printed to stderr.
///
/// # Errors
///
/// Returns an error if the logger has already been initialized.
pub fn init(
    storage: Arc<Mutex<dyn Repository>>,
    console_level: LevelFilter,
) -> Result<(), SetLoggerError> {
    if let Ok(mut log) = LOG.lock() {
        *log = Some(storage);
    }
    CONSOLE_LEVEL.store(console_level as usize, Ordering::Relaxed);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Debug.max(console_level)))
}

#[must_use]
pub fn console_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

struct Logger;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = record.args().to_string();

            if record.level() as usize <= CONSOLE_LEVEL.load(Ordering::Relaxed) {
                eprintln!("{}: {message}", record.level());
            }

            if record.level() <= Level::Debug {
                if let Ok(log) = LOG.lock() {
                    if let Some(ref log) = *log {
                        if let Ok(mut repository) = log.lock() {
                            let _ = repository
                                .deref_mut()
                                .write_entry(Entry::new(record.level(), message));
                        }
                    }
                }
            }
        }
    }

    fn flush(&self) {}
}
