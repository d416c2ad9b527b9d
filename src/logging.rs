//! File-backed `log` backend.
//!
//! The terminal belongs to the game while it runs, so records go to a file (or nowhere).

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};

/// Appends one line per record to a writer.
pub struct WriterLogger<W: Write + Send> {
    out: Mutex<W>,
    level: LevelFilter,
}

pub type FileLogger = WriterLogger<File>;

impl<W: Write + Send> WriterLogger<W> {
    pub fn new(out: W, level: LevelFilter) -> Self {
        Self {
            out: Mutex::new(out),
            level,
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl FileLogger {
    /// Open (or create) `path` in append mode.
    pub fn open(path: &str, level: LevelFilter) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file, level))
    }
}

impl<W: Write + Send> Log for WriterLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        if let Ok(mut out) = self.out.lock() {
            // Write errors are ignored.
            let _ = writeln!(
                out,
                "{} {:<5} {}: {}",
                ts,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

/// Install the global logger.
///
/// Without a path the max level is set to `Off` and nothing is installed.
pub fn init(path: Option<&str>, level: LevelFilter) -> Result<()> {
    let Some(path) = path else {
        log::set_max_level(LevelFilter::Off);
        return Ok(());
    };

    let logger = FileLogger::open(path, level)
        .with_context(|| format!("failed to open log file {path}"))?;
    log::set_boxed_logger(Box::new(logger)).context("logger already installed")?;
    log::set_max_level(level);
    Ok(())
}
